use palette::Srgb;
use std::f64::consts::TAU;

pub mod driver;
pub mod geometry;
pub mod render;

pub use driver::{
    FixedDraw, IndexPolicy, RandomSource, SpinConfig, SpinConfigError, SpinDraw, SpinSession,
    SpinSource, SpinState, Tick, Wheel,
};
pub use geometry::{LabelAnchor, Point, Pointer, Scene, Segment, WheelLayout, build_scene};
pub use render::{DrawSurface, TextAlign, TextStyle, WheelStyle, render, render_attached};

pub const FULL_TURN: f64 = TAU;
pub const DEFAULT_DURATION_MS: f64 = 5000.0;
pub const DEFAULT_MIN_TURNS: u32 = 8;
pub const DEFAULT_MAX_TURNS: u32 = 10;
pub const MIN_WHOLE_TURNS: u32 = 3;

pub const SURFACE_MARGIN: f64 = 10.0; // gap between wheel rim and surface edge
pub const LABEL_INSET: f64 = 20.0; // label end distance from the rim
pub const LABEL_BASELINE_OFFSET: f64 = 6.0;
pub const HUB_RADIUS: f64 = 15.0;
pub const POINTER_TIP: f64 = 20.0;
pub const POINTER_BASE: f64 = 40.0;
pub const POINTER_HALF_WIDTH: f64 = 10.0;
pub const OUTLINE_WIDTH: f64 = 1.0;

pub const PALETTE: [Srgb<u8>; 10] = [
    Srgb::new(0xFF, 0x41, 0x36), // red
    Srgb::new(0xFF, 0xDC, 0x00), // yellow
    Srgb::new(0x2E, 0xCC, 0x40), // green
    Srgb::new(0x00, 0x74, 0xD9), // blue
    Srgb::new(0xB1, 0x0D, 0xC9), // purple
    Srgb::new(0xFF, 0x85, 0x1B), // orange
    Srgb::new(0x7F, 0xDB, 0xFF), // light blue
    Srgb::new(0xF0, 0x12, 0xBE), // pink
    Srgb::new(0x01, 0xFF, 0x70), // lime
    Srgb::new(0xDD, 0xDD, 0xDD), // gray
];
