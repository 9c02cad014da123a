use super::OUTLINE_WIDTH;
use super::geometry::{Point, Scene, Segment};
use palette::{Srgb, Srgba};
use std::f64::consts::TAU;

pub fn opaque(color: Srgb<u8>) -> Srgba<f64> {
    let (r, g, b) = color.into_format::<f64>().into_components();
    Srgba::new(r, g, b, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub size: f64,
    pub bold: bool,
    pub color: Srgba<f64>,
}

/// Colors and font used to paint a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelStyle {
    pub outline: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub pointer: Srgba<f64>,
    pub label: TextStyle,
}

impl Default for WheelStyle {
    fn default() -> Self {
        let dark = Srgba::new(0.2, 0.2, 0.2, 1.0);
        Self {
            outline: Srgba::new(0.0, 0.0, 0.0, 1.0),
            hub: dark,
            pointer: dark,
            label: TextStyle {
                family: "Sans".to_string(),
                size: 16.0,
                bold: true,
                color: Srgba::new(0.0, 0.0, 0.0, 1.0),
            },
        }
    }
}

/// Immediate-mode 2D target. `fill` keeps the current path so a following
/// `stroke` outlines the same shape.
pub trait DrawSurface {
    type Error: std::error::Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, to: Point);
    fn line_to(&mut self, to: Point);
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);
    fn fill(&mut self, color: Srgba<f64>) -> Result<(), Self::Error>;
    fn stroke(&mut self, color: Srgba<f64>, width: f64) -> Result<(), Self::Error>;
    fn save(&mut self) -> Result<(), Self::Error>;
    fn restore(&mut self) -> Result<(), Self::Error>;
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, angle: f64);
    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        align: TextAlign,
        style: &TextStyle,
    ) -> Result<(), Self::Error>;
}

/// Repaints the whole surface: wedges, labels, hub, then pointer.
pub fn render<S: DrawSurface>(
    scene: &Scene,
    surface: &mut S,
    style: &WheelStyle,
) -> Result<(), S::Error> {
    surface.clear()?;
    for segment in &scene.segments {
        draw_segment(scene, segment, surface, style)?;
        draw_label(scene, segment, surface, style)?;
    }
    draw_hub(scene, surface, style)?;
    draw_pointer(scene, surface, style)
}

/// Same as [`render`], but a missing surface is a no-op.
pub fn render_attached<S: DrawSurface>(
    scene: &Scene,
    surface: Option<&mut S>,
    style: &WheelStyle,
) -> Result<(), S::Error> {
    match surface {
        Some(surface) => render(scene, surface, style),
        None => Ok(()),
    }
}

fn draw_segment<S: DrawSurface>(
    scene: &Scene,
    segment: &Segment,
    surface: &mut S,
    style: &WheelStyle,
) -> Result<(), S::Error> {
    let center = scene.layout.center;
    surface.begin_path();
    surface.move_to(center);
    surface.arc(
        center,
        scene.layout.radius,
        segment.start_angle,
        segment.end_angle,
    );
    surface.close_path();
    surface.fill(opaque(segment.fill))?;
    surface.stroke(style.outline, OUTLINE_WIDTH)
}

fn draw_label<S: DrawSurface>(
    scene: &Scene,
    segment: &Segment,
    surface: &mut S,
    style: &WheelStyle,
) -> Result<(), S::Error> {
    let center = scene.layout.center;
    let anchor = segment.anchor;
    surface.save()?;
    surface.translate(center.x, center.y);
    surface.rotate(anchor.angle);
    surface.fill_text(
        &segment.label,
        Point::new(anchor.distance, anchor.baseline),
        TextAlign::Right,
        &style.label,
    )?;
    surface.restore()
}

fn draw_hub<S: DrawSurface>(
    scene: &Scene,
    surface: &mut S,
    style: &WheelStyle,
) -> Result<(), S::Error> {
    surface.begin_path();
    surface.arc(scene.layout.center, scene.hub_radius, 0.0, TAU);
    surface.fill(style.hub)
}

fn draw_pointer<S: DrawSurface>(
    scene: &Scene,
    surface: &mut S,
    style: &WheelStyle,
) -> Result<(), S::Error> {
    let pointer = scene.pointer;
    surface.begin_path();
    surface.move_to(pointer.tip);
    surface.line_to(pointer.base_left);
    surface.line_to(pointer.base_right);
    surface.close_path();
    surface.fill(style.pointer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use crate::wheel::PALETTE;
    use crate::wheel::geometry::{WheelLayout, build_scene};
    use std::convert::Infallible;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        BeginPath,
        ClosePath,
        MoveTo(Point),
        LineTo(Point),
        Arc(f64, f64),
        Fill(Srgba<f64>),
        Stroke,
        Save,
        Restore,
        Translate,
        Rotate(f64),
        Text(String, TextAlign),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Recorder {
        fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.ops.iter().filter(|op| pred(op)).count()
        }
    }

    impl DrawSurface for Recorder {
        type Error = Infallible;

        fn clear(&mut self) -> Result<(), Infallible> {
            self.ops.push(Op::Clear);
            Ok(())
        }
        fn begin_path(&mut self) {
            self.ops.push(Op::BeginPath);
        }
        fn close_path(&mut self) {
            self.ops.push(Op::ClosePath);
        }
        fn move_to(&mut self, to: Point) {
            self.ops.push(Op::MoveTo(to));
        }
        fn line_to(&mut self, to: Point) {
            self.ops.push(Op::LineTo(to));
        }
        fn arc(&mut self, _center: Point, _radius: f64, start: f64, end: f64) {
            self.ops.push(Op::Arc(start, end));
        }
        fn fill(&mut self, color: Srgba<f64>) -> Result<(), Infallible> {
            self.ops.push(Op::Fill(color));
            Ok(())
        }
        fn stroke(&mut self, _color: Srgba<f64>, _width: f64) -> Result<(), Infallible> {
            self.ops.push(Op::Stroke);
            Ok(())
        }
        fn save(&mut self) -> Result<(), Infallible> {
            self.ops.push(Op::Save);
            Ok(())
        }
        fn restore(&mut self) -> Result<(), Infallible> {
            self.ops.push(Op::Restore);
            Ok(())
        }
        fn translate(&mut self, _dx: f64, _dy: f64) {
            self.ops.push(Op::Translate);
        }
        fn rotate(&mut self, angle: f64) {
            self.ops.push(Op::Rotate(angle));
        }
        fn fill_text(
            &mut self,
            text: &str,
            _at: Point,
            align: TextAlign,
            _style: &TextStyle,
        ) -> Result<(), Infallible> {
            self.ops.push(Op::Text(text.to_string(), align));
            Ok(())
        }
    }

    fn scene(names: &[&str], rotation: f64) -> Scene {
        let labels: Vec<Label> = names.iter().map(|n| Label::from(*n)).collect();
        build_scene(&labels, rotation, &WheelLayout::default())
    }

    #[test]
    fn test_paint_order() {
        let style = WheelStyle {
            hub: Srgba::new(0.1, 0.2, 0.3, 1.0),
            ..WheelStyle::default()
        };
        let mut surface = Recorder::default();
        render(&scene(&["A", "B"], 0.25), &mut surface, &style).unwrap();

        let ops = &surface.ops;
        assert_eq!(ops[0], Op::Clear);

        let text_at = |name: &str| {
            ops.iter()
                .position(|op| matches!(op, Op::Text(t, TextAlign::Right) if t == name))
                .unwrap()
        };
        let last_text = text_at("B");
        assert!(text_at("A") < last_text);

        let hub_fill = ops.iter().rposition(|op| *op == Op::Fill(style.hub)).unwrap();
        let pointer_fill = ops.len() - 1;
        assert_eq!(ops[pointer_fill], Op::Fill(style.pointer));
        assert!(last_text < hub_fill && hub_fill < pointer_fill);
    }

    #[test]
    fn test_one_wedge_and_label_per_segment() {
        let mut surface = Recorder::default();
        render(
            &scene(&["A", "B", "C"], 1.0),
            &mut surface,
            &WheelStyle::default(),
        )
        .unwrap();

        assert_eq!(surface.count(|op| *op == Op::Stroke), 3);
        assert_eq!(surface.count(|op| matches!(op, Op::Text(..))), 3);
        assert_eq!(surface.count(|op| *op == Op::Save), 3);
        assert_eq!(surface.count(|op| *op == Op::Restore), 3);
        // three wedges + hub
        assert_eq!(surface.count(|op| matches!(op, Op::Arc(..))), 4);
        assert!(surface.ops.contains(&Op::Fill(opaque(PALETTE[0]))));
    }

    #[test]
    fn test_labels_rotated_to_bisector() {
        let scene = scene(&["A", "B"], 0.0);
        let mut surface = Recorder::default();
        render(&scene, &mut surface, &WheelStyle::default()).unwrap();

        let rotations: Vec<f64> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Rotate(a) => Some(*a),
                _ => None,
            })
            .collect();
        let expected: Vec<f64> = scene.segments.iter().map(|s| s.anchor.angle).collect();
        assert_eq!(rotations, expected);
    }

    #[test]
    fn test_empty_scene_draws_only_hub_and_pointer() {
        let style = WheelStyle::default();
        let mut surface = Recorder::default();
        render(&scene(&[], 0.0), &mut surface, &style).unwrap();

        assert_eq!(surface.count(|op| matches!(op, Op::Text(..))), 0);
        assert_eq!(surface.count(|op| *op == Op::Stroke), 0);
        assert_eq!(surface.count(|op| matches!(op, Op::Arc(..))), 1);
        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(surface.ops.last(), Some(&Op::Fill(style.pointer)));
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let result = render_attached::<Recorder>(&scene(&["A"], 0.0), None, &WheelStyle::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_repaint_is_full_every_call() {
        let scene = scene(&["A", "B", "C"], 2.0);
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        render(&scene, &mut first, &WheelStyle::default()).unwrap();
        render(&scene, &mut second, &WheelStyle::default()).unwrap();
        assert_eq!(first.ops, second.ops);
    }
}
