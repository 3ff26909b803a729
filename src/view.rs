// ============================================================================
// HISTOGRAM VIEW — fill + stroke rendering of the channel silhouettes
// ============================================================================

use egui::epaint::PathShape;
use egui::{Color32, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2};

use crate::curve::{CurveStyle, Orientation, baseline_anchor, channel_polygon};
use crate::histogram::HistogramData;

/// Layer colors in draw order. RGB mode uses the first three; luminance mode
/// draws a single white layer.
const RGB_COLORS: [Color32; 3] = [
    Color32::from_rgb(220, 60, 60),
    Color32::from_rgb(60, 180, 60),
    Color32::from_rgb(70, 100, 220),
];
const LUMINANCE_COLOR: Color32 = Color32::WHITE;

/// Overlay widget rendering one [`HistogramData`] as filled + stroked
/// silhouettes inside a rectangle.
///
/// The widget holds rendering-only parameters; all geometry comes from
/// [`channel_polygon`] and is rebuilt on every paint. egui has no per-shape
/// blend modes, so layering translucent fills (`channel_opacity`) stands in
/// for the screen-blend compositing of the channels.
pub struct HistogramView<'a> {
    data: &'a HistogramData,
    channel_opacity: f32,
    scale: f32,
    stroke_width: f32,
    orientation: Orientation,
    style: CurveStyle,
}

impl<'a> HistogramView<'a> {
    pub fn new(data: &'a HistogramData) -> Self {
        Self {
            data,
            channel_opacity: 1.0,
            scale: 1.0,
            stroke_width: 1.0,
            orientation: Orientation::Portrait,
            style: CurveStyle::Smooth,
        }
    }

    /// Opacity of each channel's fill layer (strokes stay fully opaque).
    pub fn channel_opacity(mut self, opacity: f32) -> Self {
        self.channel_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Vertical exaggeration of the curve; 1.0 lets the tallest bin touch
    /// the far edge of the rect.
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn style(mut self, style: CurveStyle) -> Self {
        self.style = style;
        self
    }

    /// Allocate `desired_size` and paint into it.
    pub fn show(self, ui: &mut Ui, desired_size: Vec2) -> Response {
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::hover());
        if ui.is_rect_visible(rect) {
            self.paint(ui.painter(), rect);
        }
        response
    }

    /// Paint all channel layers into `rect`: fill first, outline on top,
    /// channel by channel, so later channels composite over earlier ones.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let colors: &[Color32] = match self.data {
            HistogramData::Rgb { .. } => &RGB_COLORS,
            HistogramData::Luminance(_) => std::slice::from_ref(&LUMINANCE_COLOR),
        };

        for (channel, color) in self.data.channels().into_iter().zip(colors) {
            let polygon =
                channel_polygon(channel, self.scale, self.orientation, self.style, rect);
            if polygon.is_empty() {
                continue;
            }
            self.fill_silhouette(painter, rect, &polygon, *color);
            painter.add(Shape::Path(PathShape::closed_line(
                polygon,
                Stroke::new(self.stroke_width, *color),
            )));
        }
    }

    /// Fill the area between the curve and the baseline edge as one convex
    /// quad per segment (egui's tessellator only fills convex paths, and the
    /// silhouette as a whole is concave).
    fn fill_silhouette(&self, painter: &Painter, rect: Rect, polygon: &[Pos2], color: Color32) {
        let fill = color.linear_multiply(self.channel_opacity);
        // The baseline corners anchor to themselves, so walking the whole
        // polygon covers the leading and trailing segments too. The implied
        // closing edge runs along the baseline and has no area.
        for pair in polygon.windows(2) {
            let quad = vec![
                pair[0],
                pair[1],
                baseline_anchor(self.orientation, rect, pair[1]),
                baseline_anchor(self.orientation, rect, pair[0]),
            ];
            painter.add(Shape::convex_polygon(quad, fill, Stroke::NONE));
        }
    }
}
