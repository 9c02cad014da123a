use super::geometry::{Scene, WheelLayout, build_scene};
use super::{DEFAULT_DURATION_MS, DEFAULT_MAX_TURNS, DEFAULT_MIN_TURNS, FULL_TURN, MIN_WHOLE_TURNS};
use crate::label::Label;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::fmt;
use std::ops::RangeInclusive;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// How the resting angle maps back to a label.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// `floor(N * angle / 2pi)`: every label owns an equal share.
    #[default]
    #[strum(to_string = "uniform", serialize = "n")]
    Uniform,
    /// `floor((N - 1) * angle / 2pi)`: the last label only wins at the
    /// exact upper boundary.
    #[strum(to_string = "legacy", serialize = "n-1")]
    Legacy,
}

impl IndexPolicy {
    /// `normalized` is expected in `[0, 2pi]`; the result is clamped into range.
    pub fn index(&self, count: usize, normalized: f64) -> usize {
        if count == 0 {
            return 0;
        }
        let multiplier = match self {
            Self::Uniform => count,
            Self::Legacy => count - 1,
        } as f64;
        let raw = (multiplier * (normalized / FULL_TURN)).floor();
        (raw.max(0.0) as usize).min(count - 1)
    }
}

/// Folds any angle into `[0, 2pi)`.
pub fn normalize_rotation(rotation: f64) -> f64 {
    let r = rotation.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 2pi
    if r >= FULL_TURN { 0.0 } else { r }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Error, PartialEq)]
pub enum SpinConfigError {
    #[error("Spin duration must be positive, got {0} ms")]
    Duration(f64),
    #[error("Spins need at least 3 whole turns, got {0}")]
    TooFewTurns(u32),
    #[error("min_turns ({min}) is larger than max_turns ({max})")]
    TurnRange { min: u32, max: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpinConfig {
    pub duration_ms: f64,
    pub min_turns: u32,
    pub max_turns: u32,
    pub index_policy: IndexPolicy,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            min_turns: DEFAULT_MIN_TURNS,
            max_turns: DEFAULT_MAX_TURNS,
            index_policy: IndexPolicy::default(),
        }
    }
}

impl SpinConfig {
    pub fn validate(&self) -> Result<(), SpinConfigError> {
        if !(self.duration_ms > 0.0 && self.duration_ms.is_finite()) {
            return Err(SpinConfigError::Duration(self.duration_ms));
        }
        if self.min_turns < MIN_WHOLE_TURNS {
            return Err(SpinConfigError::TooFewTurns(self.min_turns));
        }
        if self.min_turns > self.max_turns {
            return Err(SpinConfigError::TurnRange {
                min: self.min_turns,
                max: self.max_turns,
            });
        }
        Ok(())
    }

    pub fn turns(&self) -> RangeInclusive<u32> {
        self.min_turns..=self.max_turns.max(self.min_turns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinDraw {
    pub whole_turns: u32,
    /// Uniform on `[0, 1)`.
    pub fraction: f64,
}

impl SpinDraw {
    pub fn target_rotation(&self) -> f64 {
        self.whole_turns as f64 * FULL_TURN + self.fraction * FULL_TURN
    }
}

pub trait SpinSource {
    fn draw(&mut self, turns: RangeInclusive<u32>) -> SpinDraw;
}

pub struct RandomSource<R>(R);

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl Default for RandomSource<ThreadRng> {
    fn default() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> SpinSource for RandomSource<R> {
    fn draw(&mut self, turns: RangeInclusive<u32>) -> SpinDraw {
        SpinDraw {
            whole_turns: self.0.random_range(turns),
            fraction: self.0.random::<f64>(),
        }
    }
}

/// Always yields the same draw; for scripted runs and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDraw(pub SpinDraw);

impl SpinSource for FixedDraw {
    fn draw(&mut self, _turns: RangeInclusive<u32>) -> SpinDraw {
        self.0
    }
}

pub type OnComplete = Box<dyn FnOnce(&Label)>;

/// One spin-to-resolution run.
pub struct SpinSession {
    labels: Vec<Label>,
    target_rotation: f64,
    duration_ms: f64,
    start_timestamp: Option<f64>,
    current_rotation: f64,
    on_complete: Option<OnComplete>,
}

impl SpinSession {
    fn new(labels: Vec<Label>, draw: SpinDraw, duration_ms: f64, on_complete: OnComplete) -> Self {
        Self {
            labels,
            target_rotation: draw.target_rotation(),
            duration_ms,
            start_timestamp: None,
            current_rotation: 0.0,
            on_complete: Some(on_complete),
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn target_rotation(&self) -> f64 {
        self.target_rotation
    }

    pub fn start_timestamp(&self) -> Option<f64> {
        self.start_timestamp
    }

    pub fn current_rotation(&self) -> f64 {
        self.current_rotation
    }

    /// Advances to `timestamp` and returns the progress in `[0, 1]`.
    fn advance(&mut self, timestamp: f64) -> f64 {
        let start = *self.start_timestamp.get_or_insert(timestamp);
        let elapsed = (timestamp - start).max(0.0);
        let progress = (elapsed / self.duration_ms).min(1.0);
        let rotation = self.target_rotation * ease_out_cubic(progress);
        // a late frame carrying an older timestamp must not rewind the wheel
        self.current_rotation = self.current_rotation.max(rotation);
        progress
    }
}

impl fmt::Debug for SpinSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinSession")
            .field("labels", &self.labels)
            .field("target_rotation", &self.target_rotation)
            .field("duration_ms", &self.duration_ms)
            .field("start_timestamp", &self.start_timestamp)
            .field("current_rotation", &self.current_rotation)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub enum SpinState {
    #[default]
    Idle,
    Spinning(SpinSession),
    /// Holds the last winner; a new spin may start right away.
    Resolved(Label),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Nothing to animate; the host should stop requesting frames.
    Idle,
    Frame { rotation: f64 },
    Resolved { rotation: f64, selection: Label },
}

impl Tick {
    pub fn wants_next_frame(&self) -> bool {
        matches!(self, Self::Frame { .. })
    }
}

pub struct Wheel<S = RandomSource<ThreadRng>> {
    config: SpinConfig,
    source: S,
    state: SpinState,
    rotation: f64,
}

impl Wheel {
    pub fn new(config: SpinConfig) -> Result<Self, SpinConfigError> {
        Self::with_source(config, RandomSource::default())
    }
}

impl<S: SpinSource> Wheel<S> {
    pub fn with_source(config: SpinConfig, source: S) -> Result<Self, SpinConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            state: SpinState::Idle,
            rotation: 0.0,
        })
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    /// Takes effect from the next spin on. An invalid config is rejected
    /// and the current one kept.
    pub fn set_config(&mut self, config: SpinConfig) -> Result<(), SpinConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning(_))
    }

    pub fn last_selection(&self) -> Option<&Label> {
        match &self.state {
            SpinState::Resolved(label) => Some(label),
            _ => None,
        }
    }

    /// Starts a spin over a snapshot of `labels`. Returns `false` without
    /// touching any state when `labels` is empty or a spin is running.
    pub fn start_spin<F>(&mut self, labels: &[Label], on_complete: F) -> bool
    where
        F: FnOnce(&Label) + 'static,
    {
        if labels.is_empty() {
            log::debug!("Ignoring spin request: no labels");
            return false;
        }
        if self.is_spinning() {
            log::debug!("Ignoring spin request: a spin is already running");
            return false;
        }

        let draw = self.source.draw(self.config.turns());
        log::debug!(
            "Starting spin over {} labels: {} turns + {:.3}",
            labels.len(),
            draw.whole_turns,
            draw.fraction
        );

        self.rotation = 0.0;
        self.state = SpinState::Spinning(SpinSession::new(
            labels.to_vec(),
            draw,
            self.config.duration_ms,
            Box::new(on_complete),
        ));
        true
    }

    /// Runs one animation step at `timestamp_ms` on the host's clock.
    pub fn tick(&mut self, timestamp_ms: f64) -> Tick {
        let SpinState::Spinning(session) = &mut self.state else {
            return Tick::Idle;
        };

        let progress = session.advance(timestamp_ms);
        self.rotation = session.current_rotation;
        if progress < 1.0 {
            return Tick::Frame {
                rotation: self.rotation,
            };
        }

        let normalized = normalize_rotation(session.current_rotation);
        let index = self
            .config
            .index_policy
            .index(session.labels.len(), normalized);
        let selection = session.labels[index].clone();
        let on_complete = session.on_complete.take();

        self.state = SpinState::Resolved(selection.clone());
        log::info!("Wheel stopped on '{}'", selection);

        if let Some(callback) = on_complete {
            callback(&selection);
        }
        Tick::Resolved {
            rotation: self.rotation,
            selection,
        }
    }

    /// Abandons any running spin without resolving it.
    pub fn dispose(&mut self) {
        if let SpinState::Spinning(session) = &self.state {
            log::debug!(
                "Disposing wheel mid-spin at {:.3} rad",
                session.current_rotation
            );
            self.state = SpinState::Idle;
        }
    }

    /// Scene for the current frame. While spinning the session snapshot
    /// is drawn, not `labels`.
    pub fn scene(&self, labels: &[Label], layout: &WheelLayout) -> Scene {
        match &self.state {
            SpinState::Spinning(session) => build_scene(&session.labels, self.rotation, layout),
            _ => build_scene(labels, self.rotation, layout),
        }
    }
}
