use super::ChildLabel;
use super::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use raymenu::menu::TOGGLE;
use raymenu::{ChildVisual, RayMenu};
use std::f64::consts::PI;

const LABEL_SCALE: f64 = 0.8;

struct ChildRenderer<'a> {
    label: &'a ChildLabel,
    visual: &'a ChildVisual,
}

impl<'a> ChildRenderer<'a> {
    fn new(label: &'a ChildLabel, visual: &'a ChildVisual) -> Self {
        Self { label, visual }
    }

    fn radius(&self) -> f64 {
        self.visual.rect.width().min(self.visual.rect.height()) as f64 / 2.0
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let transform = self.visual.transform;
        // a zero scale would leave cairo with a singular matrix
        if !self.visual.visible || transform.is_degenerate() {
            return Ok(());
        }

        let center = self.visual.rect.center();
        cr.save()?;
        cr.translate(center.x, center.y + transform.dy);
        cr.scale(transform.scale, transform.scale);
        self.draw_circle(cr, colors)?;
        self.draw_label(cr, colors)?;
        cr.restore()
    }

    fn draw_circle(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color = ChildState::resolve(self.visual).color(colors);
        set_source(cr, color, self.visual.transform.alpha);
        cr.arc(0.0, 0.0, self.radius(), 0.0, 2.0 * PI);
        cr.fill()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, colors.label, self.visual.transform.alpha);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(self.radius() * LABEL_SCALE);
        if let Ok(ext) = cr.text_extents(self.label) {
            cr.move_to(
                -ext.width() / 2.0 - ext.x_bearing(),
                -ext.height() / 2.0 - ext.y_bearing(),
            );
            cr.show_text(self.label)?;
        }
        Ok(())
    }
}

fn set_source(cr: &Context, color: Srgba<f64>, alpha: f64) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a * alpha);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildState {
    Toggle,
    Enabled,
    Disabled,
}

impl ChildState {
    fn resolve(visual: &ChildVisual) -> Self {
        if visual.index == TOGGLE {
            Self::Toggle
        } else if visual.enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Toggle => colors.toggle,
            Self::Enabled => colors.item,
            Self::Disabled => colors.disabled,
        }
    }
}

/// Draws children in index order so later items paint over earlier ones, the same
/// order touches are resolved in.
pub fn draw(
    cr: &Context,
    menu: &RayMenu<ChildLabel>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    for visual in menu.visuals() {
        if let Some(label) = menu.children().get(visual.index) {
            ChildRenderer::new(label, &visual).draw(cr, colors)?;
        }
    }
    Ok(())
}
