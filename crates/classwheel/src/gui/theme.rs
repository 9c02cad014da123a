use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use spinwheel::wheel::WheelStyle;

/// Wheel colors taken from the active GTK theme. Segment fills and label
/// text keep their fixed colors so names stay readable on every wedge.
pub fn wheel_style(context: &gtk::StyleContext) -> WheelStyle {
    let defaults = WheelStyle::default();
    WheelStyle {
        outline: lookup_color(context, "borders", defaults.outline, Some(1.0)),
        hub: lookup_color(context, "theme_fg_color", defaults.hub, Some(0.9)),
        pointer: lookup_color(context, "theme_selected_bg_color", defaults.pointer, Some(1.0)),
        label: defaults.label,
    }
}

fn lookup_color(
    context: &gtk::StyleContext,
    name: &str,
    fallback: Srgba<f64>,
    alpha_override: Option<f64>,
) -> Srgba<f64> {
    context
        .lookup_color(name)
        .map(|c| {
            let (r, g, b, a) = (
                c.red() as f64,
                c.green() as f64,
                c.blue() as f64,
                c.alpha() as f64,
            );
            Srgba::new(r, g, b, alpha_override.unwrap_or(a))
        })
        .unwrap_or(fallback)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.classwheel-window, .classwheel-drawing-area {
    background: none;
    background-color: transparent;
}

.classwheel-status {
    font-size: 20px;
    font-weight: bold;
    padding: 8px 16px;
    border-radius: 12px;
    background-color: alpha(@theme_bg_color, 0.85);
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
