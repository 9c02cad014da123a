use cairo::{Context, FontSlant, FontWeight, Operator};
use palette::Srgba;
use spinwheel::wheel::{DrawSurface, Point, TextAlign, TextStyle};

/// Canvas-style drawing on top of a cairo context. Fills and strokes keep
/// the current path; `begin_path` starts a new one.
pub struct CairoSurface<'a> {
    cr: &'a Context,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    fn set_source(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }
}

impl DrawSurface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn clear(&mut self) -> Result<(), cairo::Error> {
        self.cr.save()?;
        self.cr.set_operator(Operator::Clear);
        self.cr.paint()?;
        self.cr.restore()
    }

    fn begin_path(&mut self) {
        self.cr.new_path();
    }

    fn close_path(&mut self) {
        self.cr.close_path();
    }

    fn move_to(&mut self, to: Point) {
        self.cr.move_to(to.x, to.y);
    }

    fn line_to(&mut self, to: Point) {
        self.cr.line_to(to.x, to.y);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.cr.arc(center.x, center.y, radius, start, end);
    }

    fn fill(&mut self, color: Srgba<f64>) -> Result<(), cairo::Error> {
        self.set_source(color);
        self.cr.fill_preserve()
    }

    fn stroke(&mut self, color: Srgba<f64>, width: f64) -> Result<(), cairo::Error> {
        self.set_source(color);
        self.cr.set_line_width(width);
        self.cr.stroke_preserve()
    }

    fn save(&mut self) -> Result<(), cairo::Error> {
        self.cr.save()
    }

    fn restore(&mut self) -> Result<(), cairo::Error> {
        self.cr.restore()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.cr.translate(dx, dy);
    }

    fn rotate(&mut self, angle: f64) {
        self.cr.rotate(angle);
    }

    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        align: TextAlign,
        style: &TextStyle,
    ) -> Result<(), cairo::Error> {
        let weight = if style.bold {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        };
        self.set_source(style.color);
        self.cr.select_font_face(&style.family, FontSlant::Normal, weight);
        self.cr.set_font_size(style.size);

        let advance = self.cr.text_extents(text)?.x_advance();
        let x = match align {
            TextAlign::Left => at.x,
            TextAlign::Center => at.x - advance / 2.0,
            TextAlign::Right => at.x - advance,
        };
        self.cr.new_path();
        self.cr.move_to(x, at.y);
        self.cr.show_text(text)?;
        self.cr.new_path();
        Ok(())
    }
}
