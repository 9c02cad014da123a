mod macros;

pub mod label;
pub mod protocol;
pub mod wheel;

pub use label::{Label, LabelError, LabelSet};
pub use wheel::{Scene, Tick, Wheel, WheelLayout};
