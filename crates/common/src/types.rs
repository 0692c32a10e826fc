use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PrismError;

/// Which of the two demos to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    /// Free-flying camera over a grid of cubes.
    #[default]
    Camera,
    /// Rotating pyramid under a spot light.
    Lighting,
}

impl DemoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoKind::Camera => "camera",
            DemoKind::Lighting => "lighting",
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemoKind {
    type Err = PrismError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "camera" => Ok(DemoKind::Camera),
            "lighting" => Ok(DemoKind::Lighting),
            other => Err(PrismError::UnknownDemo(other.to_string())),
        }
    }
}

/// Linear RGBA colour, one `f32` per channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const GREEN: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clamp every channel into `[0, 1]`.
    pub fn saturate(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Per-frame steering input, each axis in `[-1, 1]`.
///
/// Produced from held keys, consumed by the free camera.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionAxes {
    /// Forward (+) / backward (-).
    pub thrust: f32,
    /// Turn right (+) / left (-), degrees scaled by turn speed.
    pub yaw: f32,
    /// Roll left (+) / right (-).
    pub roll: f32,
    /// Look up (+) / down (-).
    pub pitch: f32,
}

impl MotionAxes {
    pub const IDLE: MotionAxes = MotionAxes {
        thrust: 0.0,
        yaw: 0.0,
        roll: 0.0,
        pitch: 0.0,
    };

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_kind_parses_case_insensitively() {
        assert_eq!("Camera".parse::<DemoKind>().unwrap(), DemoKind::Camera);
        assert_eq!(" lighting ".parse::<DemoKind>().unwrap(), DemoKind::Lighting);
        assert!("teapot".parse::<DemoKind>().is_err());
    }

    #[test]
    fn demo_kind_display_round_trips() {
        for kind in [DemoKind::Camera, DemoKind::Lighting] {
            assert_eq!(kind.to_string().parse::<DemoKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rgba_saturate_clamps_channels() {
        let c = Rgba::new(1.5, -0.2, 0.5, 1.0).saturate();
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn idle_axes() {
        assert!(MotionAxes::default().is_idle());
        let moving = MotionAxes {
            thrust: 1.0,
            ..MotionAxes::default()
        };
        assert!(!moving.is_idle());
    }
}
