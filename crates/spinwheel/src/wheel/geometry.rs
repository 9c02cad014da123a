use super::{
    FULL_TURN, HUB_RADIUS, LABEL_BASELINE_OFFSET, LABEL_INSET, PALETTE, POINTER_BASE,
    POINTER_HALF_WIDTH, POINTER_TIP, SURFACE_MARGIN,
};
use crate::label::Label;
use palette::Srgb;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Where the wheel sits on its surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayout {
    pub center: Point,
    pub radius: f64,
}

impl WheelLayout {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Centers the wheel on a `width` x `height` surface, leaving a small margin.
    pub fn fit(width: f64, height: f64) -> Self {
        let center = Point::new(width / 2.0, height / 2.0);
        let radius = (center.x.min(center.y) - SURFACE_MARGIN).max(0.0);
        Self { center, radius }
    }
}

impl Default for WheelLayout {
    fn default() -> Self {
        Self::fit(500.0, 500.0)
    }
}

/// Text placement in the segment's local frame: rotate by `angle` around
/// the wheel center, then draw right-aligned at (`distance`, `baseline`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub angle: f64,
    pub distance: f64,
    pub baseline: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub label: Label,
    /// Raw, unwrapped bounds in radians.
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: Srgb<u8>,
    pub anchor: LabelAnchor,
}

impl Segment {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn bisector(&self) -> f64 {
        self.start_angle + self.span() / 2.0
    }
}

/// Fixed triangle marker at angle 0, pointing at the rim from the hub.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub tip: Point,
    pub base_left: Point,
    pub base_right: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub layout: WheelLayout,
    pub rotation: f64,
    pub segments: Vec<Segment>,
    pub hub_radius: f64,
    pub pointer: Pointer,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

pub fn segment_color(index: usize) -> Srgb<u8> {
    PALETTE[index % PALETTE.len()]
}

/// Splits the wheel into one equal wedge per label, offset by `rotation`.
pub fn build_scene(labels: &[Label], rotation: f64, layout: &WheelLayout) -> Scene {
    let count = labels.len() as f64;
    let segments = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let start_angle = i as f64 / count * FULL_TURN + rotation;
            let end_angle = (i + 1) as f64 / count * FULL_TURN + rotation;
            Segment {
                index: i,
                label: label.clone(),
                start_angle,
                end_angle,
                fill: segment_color(i),
                anchor: LabelAnchor {
                    angle: start_angle + (end_angle - start_angle) / 2.0,
                    distance: layout.radius - LABEL_INSET,
                    baseline: LABEL_BASELINE_OFFSET,
                },
            }
        })
        .collect();

    let c = layout.center;
    Scene {
        layout: *layout,
        rotation,
        segments,
        hub_radius: HUB_RADIUS,
        pointer: Pointer {
            tip: c.offset(POINTER_TIP, 0.0),
            base_left: c.offset(POINTER_BASE, -POINTER_HALF_WIDTH),
            base_right: c.offset(POINTER_BASE, POINTER_HALF_WIDTH),
        },
    }
}
