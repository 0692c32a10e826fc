use crate::keys::Key;

/// A discrete, one-shot command produced by a key press.
///
/// Held-key steering is not an action; it is read every frame through
/// `HeldKeys::motion_axes`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Return the camera (or pyramid) to its start pose.
    ResetCamera,
    /// Show or hide the side panel.
    TogglePanel,
    /// Freeze or resume frame advancement.
    TogglePause,
    /// Step the rotation slider by the given number of degrees.
    NudgeRotation(f32),
    /// Close the window.
    Quit,
}

/// Key-to-action table.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    /// Degrees per Left/Right press.
    pub nudge_step: f32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self { nudge_step: 5.0 }
    }
}

impl KeyBindings {
    /// Action bound to a key press, if any. Steering keys map to nothing.
    pub fn action_for(&self, key: Key) -> Option<Action> {
        let action = match key {
            Key::R => Action::ResetCamera,
            Key::F1 => Action::TogglePanel,
            Key::Space => Action::TogglePause,
            Key::ArrowLeft => Action::NudgeRotation(-self.nudge_step),
            Key::ArrowRight => Action::NudgeRotation(self.nudge_step),
            Key::Escape => Action::Quit,
            _ => return None,
        };
        tracing::trace!(?key, ?action, "key bound to action");
        Some(action)
    }
}
