use glam::{Mat4, Vec3};
use prism_scene::{CameraFrame, Frame, LightingFrame};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a prepared frame and produces output. It never feeds
/// anything back into the demo.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &Frame) -> Self::Output;
}

/// Debug text renderer: a human-readable dump of a frame.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Print every matrix instead of just positions and colours.
    pub verbose: bool,
    /// Cap on per-draw lines; `None` prints all.
    pub max_draws: Option<usize>,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }

    fn camera(&self, out: &mut String, frame: &CameraFrame) {
        let cam = &frame.camera;
        out.push_str(&format!(
            "Camera: pos=({:.2}, {:.2}, {:.2}) heading={:.1} elevation={:.1} roll={:.1}\n",
            cam.position.x, cam.position.y, cam.position.z, cam.heading, cam.elevation, cam.roll
        ));
        out.push_str(&format!("Light dir: {}\n", vec3(frame.light_direction)));
        if self.verbose {
            matrix(out, "projection", &frame.view.projection);
            matrix(out, "view", &frame.view.view);
        }

        let limit = self.max_draws.unwrap_or(usize::MAX);
        for instance in frame.instances.iter().take(limit) {
            let p = instance.transforms.world.w_axis.truncate();
            let c = instance.color;
            out.push_str(&format!(
                "  cube [{:>2} {:>2} {:>2}] pos={} color=({:.2}, {:.2}, {:.2})\n",
                instance.cell.x,
                instance.cell.y,
                instance.cell.z,
                vec3(p),
                c.r,
                c.g,
                c.b
            ));
            if self.verbose {
                matrix(out, "    wvp", &instance.transforms.world_view_projection);
            }
        }
        if frame.instances.len() > limit {
            out.push_str(&format!("  ... {} more\n", frame.instances.len() - limit));
        }
    }

    fn lighting(&self, out: &mut String, frame: &LightingFrame) {
        out.push_str(&format!(
            "Pyramid: rotation={:.1} deg shininess={:.1}\n",
            frame.rotation_degrees, frame.shininess
        ));
        out.push_str(&format!(
            "Eye: {} Light: {} dir={}\n",
            vec3(frame.view_world_position),
            vec3(frame.light_world_position),
            vec3(frame.light_direction)
        ));
        let f = frame.color_front;
        let b = frame.color_back;
        out.push_str(&format!(
            "Colors: front=({:.2}, {:.2}, {:.2}) back=({:.2}, {:.2}, {:.2})\n",
            f.r, f.g, f.b, b.r, b.g, b.b
        ));
        if self.verbose {
            matrix(out, "world", &frame.object.world);
            matrix(out, "wvp", &frame.object.world_view_projection);
            matrix(out, "world_inverse_transpose", &frame.object.world_inverse_transpose);
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame (demo={}, draws={}) ===\n",
            frame.kind(),
            frame.draw_count()
        ));
        match frame {
            Frame::Camera(f) => self.camera(&mut out, f),
            Frame::Lighting(f) => self.lighting(&mut out, f),
        }
        out
    }
}

fn vec3(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

/// Rows of a column-major matrix.
fn matrix(out: &mut String, name: &str, m: &Mat4) {
    out.push_str(&format!("{name}:\n"));
    for r in 0..4 {
        let row = m.row(r);
        out.push_str(&format!(
            "  [{:>8.3} {:>8.3} {:>8.3} {:>8.3}]\n",
            row.x, row.y, row.z, row.w
        ));
    }
}
