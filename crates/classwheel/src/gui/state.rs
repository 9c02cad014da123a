use crate::config::Config;
use spinwheel::label::{Label, LabelSet};
use spinwheel::wheel::{Scene, SpinConfigError, Tick, Wheel, WheelLayout};

pub const MAX_WHEEL_SIZE: f64 = 500.0;

/// The wheel engine plus the names the user is editing.
pub struct WheelState {
    pub wheel: Wheel,
    pub labels: LabelSet,
}

impl WheelState {
    pub fn new(config: &Config) -> Result<Self, SpinConfigError> {
        Ok(Self {
            wheel: Wheel::new(config.spin)?,
            labels: config.labels.clone(),
        })
    }

    /// Returns whether a spin actually started.
    pub fn start_spin<F>(&mut self, on_complete: F) -> bool
    where
        F: FnOnce(&Label) + 'static,
    {
        self.wheel.start_spin(self.labels.as_slice(), on_complete)
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> Tick {
        self.wheel.tick(timestamp_ms)
    }

    pub fn add_label(&mut self, label: &Label) {
        match self.labels.insert(label) {
            Ok(l) => log::info!("Added '{}' to the wheel", l),
            Err(e) => log::warn!("Cannot add label: {}", e),
        }
    }

    pub fn remove_label(&mut self, label: &Label) {
        if !self.labels.remove(label) {
            log::warn!("No label '{}' on the wheel", label);
        }
    }

    pub fn clear_labels(&mut self) {
        self.labels.clear();
    }

    /// Applies a reloaded config. A running spin keeps its own snapshot.
    pub fn reload(&mut self, config: &Config) {
        self.labels = config.labels.clone();
        if let Err(e) = self.wheel.set_config(config.spin) {
            log::error!("Keeping previous spin settings: {}", e);
        }
    }

    pub fn scene(&self, width: f64, height: f64) -> Scene {
        let size = width.min(height).min(MAX_WHEEL_SIZE);
        let mut layout = WheelLayout::fit(size, size);
        layout.center.x = width / 2.0;
        layout.center.y = height / 2.0;
        self.wheel.scene(self.labels.as_slice(), &layout)
    }

    pub fn status_text(&self) -> String {
        if self.wheel.is_spinning() {
            "Spinning...".to_string()
        } else if let Some(selection) = self
            .wheel
            .last_selection()
            .filter(|s| self.labels.contains(s.as_str()))
        {
            format!("Selected: {}", selection)
        } else if self.labels.is_empty() {
            "Add names to start spinning the wheel!".to_string()
        } else {
            "Click the wheel to spin".to_string()
        }
    }
}
