use prism_common::LightingDemoConfig;

/// Bounded value in degrees driving the pyramid rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSlider {
    pub min: f32,
    pub max: f32,
    value: f32,
}

impl Default for RotationSlider {
    fn default() -> Self {
        Self::from_config(&LightingDemoConfig::default())
    }
}

impl RotationSlider {
    /// Slider over `min..=max`; swaps bounds given in the wrong order.
    /// A non-finite bound falls back to the default `0..=360` edge.
    pub fn new(min: f32, max: f32, value: f32) -> Self {
        let min = if min.is_finite() { min } else { 0.0 };
        let max = if max.is_finite() { max } else { 360.0 };
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut slider = Self {
            min,
            max,
            value: min,
        };
        slider.set(value);
        slider
    }

    pub fn from_config(config: &LightingDemoConfig) -> Self {
        Self::new(
            config.rotation_min_degrees,
            config.rotation_max_degrees,
            config.rotation_degrees,
        )
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Mutable access for UI widgets; call `clamp` afterwards.
    pub fn value_mut(&mut self) -> &mut f32 {
        &mut self.value
    }

    /// Set the value, clamped to the range. Returns true if it changed.
    pub fn set(&mut self, value: f32) -> bool {
        // max/min instead of clamp: never panics on bad public bounds
        let next = if value.is_nan() { self.value } else { value.max(self.min).min(self.max) };
        let changed = next != self.value;
        self.value = next;
        changed
    }

    pub fn nudge(&mut self, delta: f32) -> bool {
        self.set(self.value + delta)
    }

    pub fn clamp(&mut self) {
        self.set(self.value);
    }

    pub fn radians(&self) -> f32 {
        self.value.to_radians()
    }
}
