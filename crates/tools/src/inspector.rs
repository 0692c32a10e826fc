use glam::Vec3;
use prism_common::{DemoKind, Rgba};
use prism_scene::{Frame, ObjectTransforms};

/// Frame inspector for developer tooling.
///
/// Read-only queries against a built frame for the debug panel and CLI.
pub struct FrameInspector;

impl FrameInspector {
    /// Produce a summary of the frame.
    pub fn summary(frame: &Frame) -> FrameSummary {
        let view = frame.view();
        let non_finite_draws = Self::draws(frame)
            .filter(|(transforms, _)| !transforms.is_finite())
            .count();
        if non_finite_draws > 0 || !view.is_finite() {
            tracing::warn!(non_finite_draws, "frame contains non-finite matrices");
        }
        FrameSummary {
            demo: frame.kind(),
            draw_count: frame.draw_count(),
            eye: view.eye(),
            forward: -view.camera.z_axis.truncate(),
            view_finite: view.is_finite(),
            non_finite_draws,
        }
    }

    /// Details of one draw, by index in submission order.
    pub fn inspect_draw(frame: &Frame, index: usize) -> Option<DrawInfo> {
        Self::draws(frame)
            .nth(index)
            .map(|(transforms, color)| DrawInfo {
                index,
                position: transforms.world.w_axis.truncate(),
                color,
                determinant: transforms.world.determinant(),
                finite: transforms.is_finite(),
            })
    }

    fn draws(frame: &Frame) -> Box<dyn Iterator<Item = (ObjectTransforms, Rgba)> + '_> {
        match frame {
            Frame::Camera(f) => Box::new(f.instances.iter().map(|i| (i.transforms, i.color))),
            Frame::Lighting(f) => Box::new(std::iter::once((f.object, f.color_front))),
        }
    }
}

/// Summary of a frame for the inspector.
#[derive(Debug, Clone)]
pub struct FrameSummary {
    pub demo: DemoKind,
    pub draw_count: usize,
    pub eye: Vec3,
    pub forward: Vec3,
    pub view_finite: bool,
    pub non_finite_draws: usize,
}

impl FrameSummary {
    /// True when every matrix in the frame is finite.
    pub fn is_valid(&self) -> bool {
        self.view_finite && self.non_finite_draws == 0
    }
}

impl std::fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Frame: demo={} draws={} eye=({:.2}, {:.2}, {:.2}) forward=({:.2}, {:.2}, {:.2}) valid={}",
            self.demo,
            self.draw_count,
            self.eye.x,
            self.eye.y,
            self.eye.z,
            self.forward.x,
            self.forward.y,
            self.forward.z,
            self.is_valid()
        )
    }
}

/// Detailed info about a single draw.
#[derive(Debug, Clone)]
pub struct DrawInfo {
    pub index: usize,
    pub position: Vec3,
    pub color: Rgba,
    pub determinant: f32,
    pub finite: bool,
}

impl std::fmt::Display for DrawInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Draw #{} pos=({:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2}, {:.2}) det={:.3}",
            self.index,
            self.position.x,
            self.position.y,
            self.position.z,
            self.color.r,
            self.color.g,
            self.color.b,
            self.color.a,
            self.determinant,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use prism_common::PrismConfig;
    use prism_scene::Demo;

    fn camera_frame() -> Frame {
        Demo::new(DemoKind::Camera, &PrismConfig::default()).frame(1.5)
    }

    #[test]
    fn summary_camera_demo() {
        let summary = FrameInspector::summary(&camera_frame());
        assert_eq!(summary.demo, DemoKind::Camera);
        assert_eq!(summary.draw_count, 124);
        assert!(summary.is_valid());
        assert!(summary.forward.abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn summary_lighting_demo() {
        let frame = Demo::new(DemoKind::Lighting, &PrismConfig::default()).frame(1.0);
        let summary = FrameInspector::summary(&frame);
        assert_eq!(summary.draw_count, 1);
        assert!(summary.eye.abs_diff_eq(Vec3::new(0.0, 2.0, 5.0), 1e-5));
    }

    #[test]
    fn inspect_draw_found() {
        let info = FrameInspector::inspect_draw(&camera_frame(), 0).unwrap();
        assert!(info.position.abs_diff_eq(Vec3::new(-5.0, -5.0, -5.0), 1e-6));
        assert_eq!(info.color, Rgba::new(1.0, 1.0, 1.0, 1.0));
        assert!((info.determinant - 1.0).abs() < 1e-6);
        assert!(info.finite);
    }

    #[test]
    fn inspect_draw_out_of_range() {
        assert!(FrameInspector::inspect_draw(&camera_frame(), 124).is_none());
    }

    #[test]
    fn detects_non_finite_draws() {
        let mut frame = camera_frame();
        if let Frame::Camera(f) = &mut frame {
            let singular = Mat4::from_scale(Vec3::new(0.0, 1.0, 1.0));
            f.instances[3].transforms = f.view.object(singular);
        }
        let summary = FrameInspector::summary(&frame);
        assert_eq!(summary.non_finite_draws, 1);
        assert!(!summary.is_valid());
        assert!(format!("{summary}").contains("valid=false"));
    }

    #[test]
    fn draw_display() {
        let info = FrameInspector::inspect_draw(&camera_frame(), 1).unwrap();
        let s = format!("{info}");
        assert!(s.starts_with("Draw #1"));
    }
}
