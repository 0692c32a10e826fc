use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PrismError;
use crate::types::{DemoKind, Rgba};

/// Top-level configuration. Every section falls back to its defaults, so a
/// YAML file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    pub window: WindowConfig,
    pub camera_demo: CameraDemoConfig,
    pub lighting_demo: LightingDemoConfig,
}

/// Window settings for the desktop app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Demo to run when none is given on the command line.
    pub demo: DemoKind,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            demo: DemoKind::Camera,
        }
    }
}

/// Largest accepted `grid_half_extent`: 65^3 - 1 cubes, about 40 MB of
/// instance data.
pub const MAX_GRID_HALF_EXTENT: u32 = 32;

/// Free camera over a grid of cubes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDemoConfig {
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub start_position: Vec3,
    /// Initial heading in degrees, turning about +Y. Heading 0 looks down -Z,
    /// which from the default start at z = -10 faces away from every cube;
    /// 180 looks down +Z at the grid.
    pub start_heading_degrees: f32,
    /// Units per second.
    pub speed: f32,
    /// Degrees per second.
    pub turn_speed_degrees: f32,
    /// Cells per side are `2 * grid_half_extent + 1`, at most
    /// [`MAX_GRID_HALF_EXTENT`].
    pub grid_half_extent: u32,
    pub grid_spacing: f32,
    /// Normalised when building frames.
    pub light_direction: Vec3,
}

impl Default for CameraDemoConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            z_near: 0.1,
            z_far: 100.0,
            start_position: Vec3::new(0.0, 0.0, -10.0),
            start_heading_degrees: 180.0,
            speed: 2.0,
            turn_speed_degrees: 45.0,
            grid_half_extent: 2,
            grid_spacing: 2.5,
            light_direction: Vec3::new(-1.0, 1.0, 1.0),
        }
    }
}

/// Rotating pyramid under a spot light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingDemoConfig {
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub light_position: Vec3,
    pub shininess: f32,
    pub color_front: Rgba,
    pub color_back: Rgba,
    /// Full intensity inside this cone half-angle.
    pub spot_inner_degrees: f32,
    /// No light outside this cone half-angle.
    pub spot_outer_degrees: f32,
    pub ambient: f32,
    pub rotation_degrees: f32,
    pub rotation_min_degrees: f32,
    pub rotation_max_degrees: f32,
}

impl Default for LightingDemoConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            z_near: 1.0,
            z_far: 2000.0,
            eye: Vec3::new(0.0, 2.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            light_position: Vec3::new(5.0, 5.0, 10.0),
            shininess: 80.0,
            color_front: Rgba::GREEN,
            color_back: Rgba::RED,
            spot_inner_degrees: 10.0,
            spot_outer_degrees: 20.0,
            ambient: 0.1,
            rotation_degrees: 0.0,
            rotation_min_degrees: 0.0,
            rotation_max_degrees: 360.0,
        }
    }
}

impl PrismConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PrismError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, PrismError> {
        let config: PrismConfig = if text.trim().is_empty() {
            PrismConfig::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, PrismError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), PrismError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(PrismError::invalid("window size must be non-zero"));
        }
        self.camera_demo.validate()?;
        self.lighting_demo.validate()
    }
}

fn check_finite(section: &str, field: &str, value: f32) -> Result<(), PrismError> {
    if !value.is_finite() {
        return Err(PrismError::invalid(format!(
            "{section}.{field} must be finite, got {value}"
        )));
    }
    Ok(())
}

fn check_finite_vec(section: &str, field: &str, value: Vec3) -> Result<(), PrismError> {
    if !value.is_finite() {
        return Err(PrismError::invalid(format!(
            "{section}.{field} must be finite, got {value}"
        )));
    }
    Ok(())
}

fn check_projection(section: &str, fov: f32, near: f32, far: f32) -> Result<(), PrismError> {
    check_finite(section, "fov_degrees", fov)?;
    check_finite(section, "z_near", near)?;
    check_finite(section, "z_far", far)?;
    if fov <= 0.0 || fov >= 180.0 {
        return Err(PrismError::invalid(format!(
            "{section}.fov_degrees must be in (0, 180), got {fov}"
        )));
    }
    if near <= 0.0 {
        return Err(PrismError::invalid(format!(
            "{section}.z_near must be positive, got {near}"
        )));
    }
    if far <= near {
        return Err(PrismError::invalid(format!(
            "{section}.z_far ({far}) must be greater than z_near ({near})"
        )));
    }
    Ok(())
}

impl CameraDemoConfig {
    pub fn validate(&self) -> Result<(), PrismError> {
        const SECTION: &str = "camera_demo";
        check_projection(SECTION, self.fov_degrees, self.z_near, self.z_far)?;
        check_finite_vec(SECTION, "start_position", self.start_position)?;
        check_finite(SECTION, "start_heading_degrees", self.start_heading_degrees)?;
        check_finite(SECTION, "speed", self.speed)?;
        check_finite(SECTION, "turn_speed_degrees", self.turn_speed_degrees)?;
        check_finite(SECTION, "grid_spacing", self.grid_spacing)?;
        check_finite_vec(SECTION, "light_direction", self.light_direction)?;

        if self.speed < 0.0 || self.turn_speed_degrees < 0.0 {
            return Err(PrismError::invalid("camera_demo speeds must not be negative"));
        }
        if self.grid_half_extent > MAX_GRID_HALF_EXTENT {
            return Err(PrismError::invalid(format!(
                "camera_demo.grid_half_extent must be at most {MAX_GRID_HALF_EXTENT}, got {}",
                self.grid_half_extent
            )));
        }
        if self.grid_spacing <= 0.0 {
            return Err(PrismError::invalid("camera_demo.grid_spacing must be positive"));
        }
        if self.light_direction.length_squared() <= f32::EPSILON {
            return Err(PrismError::invalid(
                "camera_demo.light_direction must be non-zero",
            ));
        }
        Ok(())
    }
}

impl LightingDemoConfig {
    pub fn validate(&self) -> Result<(), PrismError> {
        const SECTION: &str = "lighting_demo";
        check_projection(SECTION, self.fov_degrees, self.z_near, self.z_far)?;
        check_finite_vec(SECTION, "eye", self.eye)?;
        check_finite_vec(SECTION, "target", self.target)?;
        check_finite_vec(SECTION, "up", self.up)?;
        check_finite_vec(SECTION, "light_position", self.light_position)?;
        check_finite(SECTION, "shininess", self.shininess)?;
        check_finite(SECTION, "ambient", self.ambient)?;
        check_finite(SECTION, "spot_inner_degrees", self.spot_inner_degrees)?;
        check_finite(SECTION, "spot_outer_degrees", self.spot_outer_degrees)?;
        check_finite(SECTION, "rotation_degrees", self.rotation_degrees)?;
        check_finite(SECTION, "rotation_min_degrees", self.rotation_min_degrees)?;
        check_finite(SECTION, "rotation_max_degrees", self.rotation_max_degrees)?;
        for (field, color) in [("color_front", self.color_front), ("color_back", self.color_back)] {
            if !color.to_array().iter().all(|c| c.is_finite()) {
                return Err(PrismError::invalid(format!(
                    "{SECTION}.{field} channels must be finite"
                )));
            }
        }

        let view_dir = self.target - self.eye;
        if view_dir.length_squared() <= f32::EPSILON {
            return Err(PrismError::invalid("lighting_demo.eye must differ from target"));
        }
        if view_dir.normalize().cross(self.up).length_squared() <= 1e-8 {
            return Err(PrismError::invalid(
                "lighting_demo.up must not be parallel to the view direction",
            ));
        }
        let light_dir = self.target - self.light_position;
        if light_dir.length_squared() <= f32::EPSILON {
            return Err(PrismError::invalid(
                "lighting_demo.light_position must differ from target",
            ));
        }
        if light_dir.normalize().cross(self.up).length_squared() <= 1e-8 {
            return Err(PrismError::invalid(
                "lighting_demo.up must not be parallel to the light direction",
            ));
        }
        if self.shininess < 0.0 {
            return Err(PrismError::invalid("lighting_demo.shininess must not be negative"));
        }
        if !(0.0..=90.0).contains(&self.spot_outer_degrees)
            || self.spot_inner_degrees < 0.0
            || self.spot_inner_degrees > self.spot_outer_degrees
        {
            return Err(PrismError::invalid(
                "lighting_demo spot cone needs 0 <= inner <= outer <= 90 degrees",
            ));
        }
        if self.rotation_min_degrees > self.rotation_max_degrees {
            return Err(PrismError::invalid(
                "lighting_demo rotation range is inverted",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = PrismConfig::default();
        config.validate().unwrap();
        assert_eq!(config.camera_demo.grid_half_extent, 2);
        assert_eq!(config.lighting_demo.shininess, 80.0);
    }

    #[test]
    fn empty_text_gives_defaults() {
        let config = PrismConfig::from_yaml_str("").unwrap();
        assert_eq!(config, PrismConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "camera_demo:\n  speed: 5.0\n  grid_half_extent: 3\n";
        let config = PrismConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.camera_demo.speed, 5.0);
        assert_eq!(config.camera_demo.grid_half_extent, 3);
        assert_eq!(config.camera_demo.fov_degrees, 75.0);
        assert_eq!(config.lighting_demo, LightingDemoConfig::default());
    }

    #[test]
    fn yaml_round_trip() {
        let config = PrismConfig::default();
        let text = config.to_yaml().unwrap();
        let parsed = PrismConfig::from_yaml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = PrismConfig::from_yaml_str("camera_demo: [1, 2").unwrap_err();
        assert!(matches!(err, PrismError::ConfigParse(_)));
    }

    #[test]
    fn far_plane_before_near_is_rejected() {
        let yaml = "camera_demo:\n  z_near: 10.0\n  z_far: 1.0\n";
        let err = PrismConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, PrismError::InvalidConfig(_)));
        assert!(err.to_string().contains("z_far"));
    }

    #[test]
    fn eye_on_target_is_rejected() {
        let mut config = PrismConfig::default();
        config.lighting_demo.eye = config.lighting_demo.target;
        assert!(config.validate().is_err());
    }

    #[test]
    fn up_parallel_to_view_is_rejected() {
        let mut config = PrismConfig::default();
        config.lighting_demo.eye = Vec3::new(0.0, 5.0, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_spot_cone_is_rejected() {
        let mut config = PrismConfig::default();
        config.lighting_demo.spot_inner_degrees = 30.0;
        config.lighting_demo.spot_outer_degrees = 10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_light_direction_is_rejected() {
        let mut config = PrismConfig::default();
        config.camera_demo.light_direction = Vec3::ZERO;
        assert!(config.validate().is_err());
    }

    fn rejection(config: &PrismConfig) -> String {
        match config.validate() {
            Err(PrismError::InvalidConfig(msg)) => msg,
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn nan_rotation_bound_is_rejected() {
        let yaml = "lighting_demo:\n  rotation_min_degrees: .nan\n";
        let err = PrismConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("rotation_min_degrees"));

        let mut config = PrismConfig::default();
        config.lighting_demo.rotation_max_degrees = f32::INFINITY;
        assert!(rejection(&config).contains("rotation_max_degrees"));
        config.lighting_demo.rotation_max_degrees = 360.0;
        config.lighting_demo.rotation_degrees = f32::NAN;
        assert!(rejection(&config).contains("rotation_degrees"));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let yaml = "camera_demo:\n  grid_half_extent: 1500000000\n";
        let err = PrismConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("grid_half_extent"));

        let mut config = PrismConfig::default();
        config.camera_demo.grid_half_extent = MAX_GRID_HALF_EXTENT;
        config.validate().unwrap();
    }

    #[test]
    fn infinite_far_plane_is_rejected() {
        let yaml = "camera_demo:\n  z_far: .inf\n";
        let err = PrismConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("z_far"));
    }

    #[test]
    fn non_finite_camera_fields_are_rejected() {
        let mut config = PrismConfig::default();
        config.camera_demo.speed = f32::NAN;
        assert!(rejection(&config).contains("speed"));

        let mut config = PrismConfig::default();
        config.camera_demo.turn_speed_degrees = f32::NAN;
        assert!(rejection(&config).contains("turn_speed_degrees"));

        let mut config = PrismConfig::default();
        config.camera_demo.start_heading_degrees = f32::INFINITY;
        assert!(rejection(&config).contains("start_heading_degrees"));

        let mut config = PrismConfig::default();
        config.camera_demo.light_direction = Vec3::new(f32::NAN, 1.0, 0.0);
        assert!(rejection(&config).contains("light_direction"));
    }

    #[test]
    fn non_finite_lighting_fields_are_rejected() {
        let mut config = PrismConfig::default();
        config.lighting_demo.eye = Vec3::new(f32::NAN, 2.0, 5.0);
        assert!(rejection(&config).contains("eye"));

        let mut config = PrismConfig::default();
        config.lighting_demo.shininess = f32::INFINITY;
        assert!(rejection(&config).contains("shininess"));

        let mut config = PrismConfig::default();
        config.lighting_demo.ambient = f32::NAN;
        assert!(rejection(&config).contains("ambient"));

        let mut config = PrismConfig::default();
        config.lighting_demo.color_back = Rgba::new(f32::NAN, 0.0, 0.0, 1.0);
        assert!(rejection(&config).contains("color_back"));
    }

    #[test]
    fn negative_speed_is_rejected() {
        let mut config = PrismConfig::default();
        config.camera_demo.speed = -1.0;
        assert!(rejection(&config).contains("speeds"));
    }

    #[test]
    fn non_positive_grid_spacing_is_rejected() {
        for spacing in [0.0, -2.5] {
            let mut config = PrismConfig::default();
            config.camera_demo.grid_spacing = spacing;
            assert!(rejection(&config).contains("grid_spacing"));
        }
    }

    #[test]
    fn light_on_target_is_rejected() {
        let mut config = PrismConfig::default();
        config.lighting_demo.light_position = config.lighting_demo.target;
        assert!(rejection(&config).contains("light_position"));
    }

    #[test]
    fn up_parallel_to_light_is_rejected() {
        let mut config = PrismConfig::default();
        config.lighting_demo.light_position = Vec3::new(0.0, 8.0, 0.0);
        assert!(rejection(&config).contains("light direction"));
    }

    #[test]
    fn inverted_rotation_range_is_rejected() {
        let mut config = PrismConfig::default();
        config.lighting_demo.rotation_min_degrees = 90.0;
        config.lighting_demo.rotation_max_degrees = 45.0;
        assert!(rejection(&config).contains("rotation range"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window:\n  demo: lighting\n  width: 640").unwrap();
        let config = PrismConfig::load(file.path()).unwrap();
        assert_eq!(config.window.demo, DemoKind::Lighting);
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 720);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PrismConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, PrismError::Io(_)));
    }
}
