use prism_common::MotionAxes;
use std::collections::HashSet;

/// Keys the demos react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    F1,
}

impl Key {
    /// Parse a key name such as `w`, `up` or `arrowleft`, ignoring case.
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name.to_ascii_lowercase().as_str() {
            "w" => Key::W,
            "a" => Key::A,
            "s" => Key::S,
            "d" => Key::D,
            "q" => Key::Q,
            "e" => Key::E,
            "r" => Key::R,
            "up" | "arrowup" => Key::ArrowUp,
            "down" | "arrowdown" => Key::ArrowDown,
            "left" | "arrowleft" => Key::ArrowLeft,
            "right" | "arrowright" => Key::ArrowRight,
            "space" => Key::Space,
            "escape" | "esc" => Key::Escape,
            "f1" => Key::F1,
            _ => return None,
        };
        Some(key)
    }
}

/// Set of keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Returns true if the held set changed.
    pub fn set(&mut self, key: Key, pressed: bool) -> bool {
        if pressed {
            self.held.insert(key)
        } else {
            self.held.remove(&key)
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Collapse held keys into steering axes.
    ///
    /// Each axis is driven by a key pair; when both are held the first
    /// key of the pair wins: W over S, D over A, Q over E, Up over Down.
    pub fn motion_axes(&self) -> MotionAxes {
        MotionAxes {
            thrust: self.axis(Key::W, Key::S),
            yaw: self.axis(Key::D, Key::A),
            roll: self.axis(Key::Q, Key::E),
            pitch: self.axis(Key::ArrowUp, Key::ArrowDown),
        }
    }

    fn axis(&self, positive: Key, negative: Key) -> f32 {
        if self.is_held(positive) {
            1.0
        } else if self.is_held(negative) {
            -1.0
        } else {
            0.0
        }
    }
}
