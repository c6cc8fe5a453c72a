//! Editor guides drawn over a card in preview mode.

use crate::color::Color;
use crate::geometry::{CardMetrics, Point, Rect};
use crate::measure::FontSpec;
use crate::pips::PipAnchors;
use crate::surface::{DrawSurface, Layer, Stroke, TextAlign, TextBaseline, TextStyle};

/// Font of the guideline labels.
pub const LABEL_FONT_SIZE: f32 = 14.0;

/// Horizontal position of the guideline labels.
pub const LABEL_X: f32 = 8.0;

/// Card-space y of each pip row guideline, top to bottom.
#[must_use]
pub fn guideline_ys(metrics: &CardMetrics, anchors: &PipAnchors) -> [f32; 5] {
    anchors
        .rows()
        .map(|fy| metrics.bleed + fy * metrics.safe_height)
}

/// Guideline label, e.g. `Y3: 563`.
#[must_use]
pub fn guideline_label(index: usize, y: f32) -> String {
    format!("Y{}: {}", index + 1, y.round())
}

/// Draw the safe-area outline, the optional designer inset and the pip
/// row guidelines on the guides layer.
///
/// `inset` is the designer inset from the card edge, if one is set.
pub fn draw_guides(
    surface: &mut dyn DrawSurface,
    metrics: &CardMetrics,
    anchors: &PipAnchors,
    inset: Option<f32>,
) {
    surface.set_layer(Layer::Guides);
    surface.save();

    surface.stroke_rect(
        metrics.safe_rect(),
        &Stroke {
            color: Color::rgb(148, 163, 184).with_alpha(0.55),
            width: 2.0,
            dash: Some([10.0, 8.0]),
        },
    );

    if let Some(inset) = inset {
        surface.stroke_rect(
            Rect::new(
                inset,
                inset,
                metrics.card_width - inset * 2.0,
                metrics.card_height - inset * 2.0,
            ),
            &Stroke {
                color: Color::BLACK.with_alpha(0.25),
                width: 1.0,
                dash: Some([5.0, 5.0]),
            },
        );
    }

    let line = Stroke {
        color: Color::rgb(80, 80, 80).with_alpha(0.3),
        width: 1.0,
        dash: Some([4.0, 4.0]),
    };
    let font = FontSpec::new("sans-serif", "400", LABEL_FONT_SIZE);
    let label_style = TextStyle::filled(Color::BLACK.with_alpha(0.45));

    for (i, y) in guideline_ys(metrics, anchors).into_iter().enumerate() {
        surface.stroke_line(Point::new(0.0, y), Point::new(metrics.card_width, y), &line);
        surface.fill_text(
            &guideline_label(i, y),
            Point::new(LABEL_X, y),
            &font,
            &label_style,
            TextAlign::Left,
            TextBaseline::Middle,
        );
    }

    surface.restore();
}
