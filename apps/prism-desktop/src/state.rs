use egui::Context as EguiContext;
use prism_common::{DemoKind, PrismConfig};
use prism_input::{Action, HeldKeys, Key, KeyBindings, RotationSlider};
use prism_scene::{Demo, Frame, Perspective};
use prism_tools::{FrameInspector, FrameSummary};
use std::time::Instant;
use winit::keyboard::KeyCode;

/// Translate a physical key into one the demos understand.
pub fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyR => Key::R,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        KeyCode::F1 => Key::F1,
        _ => return None,
    };
    Some(key)
}

/// Application state, independent of the GPU.
pub struct AppState {
    pub demo: Demo,
    pub keys: HeldKeys,
    pub bindings: KeyBindings,
    pub slider: RotationSlider,
    pub show_panel: bool,
    pub paused: bool,
    pub quit_requested: bool,
    pub aspect: f32,
    pub last_frame: Instant,
    // FPS over the last second
    frames_since_sample: u32,
    last_sample: Instant,
    fps: f32,
}

impl AppState {
    pub fn new(kind: DemoKind, config: &PrismConfig) -> Self {
        let now = Instant::now();
        Self {
            demo: Demo::new(kind, config),
            keys: HeldKeys::new(),
            bindings: KeyBindings::default(),
            slider: RotationSlider::from_config(&config.lighting_demo),
            show_panel: true,
            paused: false,
            quit_requested: false,
            aspect: Perspective::aspect_for(config.window.width, config.window.height),
            last_frame: now,
            frames_since_sample: 0,
            last_sample: now,
            fps: 0.0,
        }
    }

    pub fn kind(&self) -> DemoKind {
        self.demo.kind()
    }

    /// Whether the demo animates without input. The lighting demo only
    /// redraws when its rotation changes.
    pub fn animates(&self) -> bool {
        self.kind() == DemoKind::Camera && !self.paused
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = Perspective::aspect_for(width, height);
    }

    /// Advance by `dt` seconds of held-key steering.
    pub fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        self.demo.advance(self.keys.motion_axes(), dt);
    }

    /// Record a key transition. Returns true if a redraw is needed.
    pub fn handle_key(&mut self, key: Key, pressed: bool, repeat: bool) -> bool {
        let held_changed = self.keys.set(key, pressed);
        if !pressed {
            return held_changed;
        }
        let Some(action) = self.bindings.action_for(key) else {
            return held_changed;
        };
        // only nudges auto-repeat
        if repeat && !matches!(action, Action::NudgeRotation(_)) {
            return false;
        }
        self.apply(action)
    }

    /// Apply a discrete action. Returns true if a redraw is needed.
    pub fn apply(&mut self, action: Action) -> bool {
        tracing::debug!(?action, "applying action");
        match action {
            Action::ResetCamera => {
                self.demo.reset();
                if let Demo::Lighting(demo) = &self.demo {
                    self.slider.set(demo.initial_rotation_degrees());
                }
                true
            }
            Action::TogglePanel => {
                self.show_panel = !self.show_panel;
                true
            }
            Action::TogglePause => {
                self.paused = !self.paused;
                tracing::info!(paused = self.paused, "pause toggled");
                true
            }
            Action::NudgeRotation(delta) => {
                self.slider.nudge(delta) && self.demo.set_rotation_degrees(self.slider.value())
            }
            Action::Quit => {
                self.quit_requested = true;
                false
            }
        }
    }

    /// Push the slider value into the demo after a UI edit.
    pub fn sync_slider(&mut self) -> bool {
        self.slider.clamp();
        self.demo.set_rotation_degrees(self.slider.value())
    }

    pub fn frame(&self) -> Frame {
        self.demo.frame(self.aspect)
    }

    /// Count a presented frame for the FPS readout.
    pub fn count_frame(&mut self, now: Instant) {
        self.frames_since_sample += 1;
        let elapsed = now.duration_since(self.last_sample).as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = self.frames_since_sample as f32 / elapsed;
            self.frames_since_sample = 0;
            self.last_sample = now;
        }
    }

    /// Side panel. Returns true if the UI changed demo state.
    pub fn draw_ui(&mut self, ctx: &EguiContext, summary: &FrameSummary) -> bool {
        if !self.show_panel {
            return false;
        }

        let mut changed = false;
        egui::SidePanel::left("inspector")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading(match self.kind() {
                    DemoKind::Camera => "Camera Demo",
                    DemoKind::Lighting => "Lighting Demo",
                });
                ui.separator();
                ui.label(format!("Draws: {}", summary.draw_count));
                ui.label(format!(
                    "Eye: ({:.2}, {:.2}, {:.2})",
                    summary.eye.x, summary.eye.y, summary.eye.z
                ));
                ui.label(format!(
                    "Forward: ({:.2}, {:.2}, {:.2})",
                    summary.forward.x, summary.forward.y, summary.forward.z
                ));
                if !summary.is_valid() {
                    ui.colored_label(egui::Color32::RED, "Non-finite matrices in frame");
                }
                if self.kind() == DemoKind::Camera {
                    ui.label(format!("FPS: {:.1}", self.fps));
                }
                ui.separator();

                if let Demo::Camera(demo) = &self.demo {
                    let cam = &demo.camera;
                    ui.label(format!("Heading: {:.1}", cam.heading));
                    ui.label(format!("Elevation: {:.1}", cam.elevation));
                    ui.label(format!("Roll: {:.1}", cam.roll));
                }
                match self.kind() {
                    DemoKind::Camera => {
                        changed |= ui.checkbox(&mut self.paused, "Paused (Space)").changed();
                    }
                    DemoKind::Lighting => {
                        let range = self.slider.min..=self.slider.max;
                        let response = ui.add(
                            egui::Slider::new(self.slider.value_mut(), range).text("rotation (deg)"),
                        );
                        if response.changed() {
                            changed |= self.sync_slider();
                        }
                    }
                }

                if ui.button("Reset (R)").clicked() {
                    changed |= self.apply(Action::ResetCamera);
                }

                ui.separator();
                ui.small(match self.kind() {
                    DemoKind::Camera => "W/S: Move | A/D: Turn | Q/E: Roll | Up/Down: Pitch",
                    DemoKind::Lighting => "Left/Right: Rotate | F1: Toggle Panel",
                });
            });
        changed
    }

    pub fn summary(&self) -> FrameSummary {
        FrameInspector::summary(&self.frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn camera_state() -> AppState {
        AppState::new(DemoKind::Camera, &PrismConfig::default())
    }

    fn lighting_state() -> AppState {
        AppState::new(DemoKind::Lighting, &PrismConfig::default())
    }

    #[test]
    fn maps_steering_keys() {
        assert_eq!(map_key(KeyCode::KeyW), Some(Key::W));
        assert_eq!(map_key(KeyCode::ArrowUp), Some(Key::ArrowUp));
        assert_eq!(map_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn held_key_moves_camera() {
        let mut state = camera_state();
        let start = state.summary().eye;
        state.handle_key(Key::W, true, false);
        state.update(1.0);
        let moved = state.summary().eye;
        assert!((moved - start).abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-4));

        state.handle_key(Key::W, false, false);
        state.update(1.0);
        assert!(state.summary().eye.abs_diff_eq(moved, 1e-6));
    }

    #[test]
    fn pause_freezes_motion() {
        let mut state = camera_state();
        state.handle_key(Key::Space, true, false);
        assert!(state.paused);
        assert!(!state.animates());
        state.handle_key(Key::W, true, false);
        let before = state.summary().eye;
        state.update(1.0);
        assert_eq!(state.summary().eye, before);
    }

    #[test]
    fn repeated_toggle_is_ignored() {
        let mut state = camera_state();
        state.handle_key(Key::F1, true, false);
        assert!(!state.show_panel);
        state.handle_key(Key::F1, true, true);
        assert!(!state.show_panel);
    }

    #[test]
    fn escape_requests_quit() {
        let mut state = camera_state();
        state.handle_key(Key::Escape, true, false);
        assert!(state.quit_requested);
    }

    #[test]
    fn nudge_rotates_pyramid() {
        let mut state = lighting_state();
        assert!(!state.animates());
        assert!(state.handle_key(Key::ArrowRight, true, false));
        assert!(state.handle_key(Key::ArrowRight, true, true));
        assert_eq!(state.slider.value(), 10.0);
        let Frame::Lighting(frame) = state.frame() else {
            panic!("expected lighting frame");
        };
        assert!((frame.rotation_degrees - 10.0).abs() < 1e-3);
    }

    #[test]
    fn nudge_below_minimum_needs_no_redraw() {
        let mut state = lighting_state();
        assert!(!state.handle_key(Key::ArrowLeft, true, false));
        assert_eq!(state.slider.value(), 0.0);
    }

    #[test]
    fn reset_restores_slider() {
        let mut state = lighting_state();
        *state.slider.value_mut() = 200.0;
        assert!(state.sync_slider());
        state.apply(Action::ResetCamera);
        assert_eq!(state.slider.value(), 0.0);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut state = camera_state();
        state.resize(1000, 500);
        assert_eq!(state.aspect, 2.0);
        state.resize(1000, 0);
        assert_eq!(state.aspect, 1000.0);
    }
}
