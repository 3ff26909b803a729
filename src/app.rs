// ============================================================================
// DEMO VIEWER — loads an image and paints the histogram overlay on top
// ============================================================================

use std::time::Instant;

use eframe::egui;
use eframe::egui::{Color32, Pos2, Rect, Rounding, Stroke, TextureHandle, pos2, vec2};
use image::DynamicImage;

use histoview::{ChannelMode, CurveStyle, HistogramData, HistogramView, Orientation};
use histoview::{log_info, log_warn};

/// Overlay size as a fraction of the displayed image.
const OVERLAY_WIDTH_FRAC: f32 = 0.42;
const OVERLAY_HEIGHT_FRAC: f32 = 0.28;
const OVERLAY_MARGIN: f32 = 12.0;

pub struct HistoViewApp {
    /// The decoded image, kept for histogram recomputation on parameter change.
    image: Option<DynamicImage>,
    image_name: String,
    texture: Option<TextureHandle>,
    histogram: Option<HistogramData>,
    /// (mode, step) the current histogram was computed with.
    computed_for: (ChannelMode, usize),
    load_error: Option<String>,

    // Controls
    mode: ChannelMode,
    step: usize,
    style: CurveStyle,
    orientation: Orientation,
    scale: f32,
    channel_opacity: f32,
    stroke_width: f32,
}

impl Default for HistoViewApp {
    fn default() -> Self {
        Self {
            image: None,
            image_name: String::new(),
            texture: None,
            histogram: None,
            computed_for: (ChannelMode::Rgb, 1),
            load_error: None,
            mode: ChannelMode::Rgb,
            step: 1,
            style: CurveStyle::Smooth,
            orientation: Orientation::Portrait,
            scale: 1.0,
            channel_opacity: 0.6,
            stroke_width: 1.0,
        }
    }
}

impl HistoViewApp {
    /// Open a file via the native dialog and decode it. A file that fails to
    /// decode leaves the app running with no histogram to draw.
    fn open_image(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp", "tga"])
            .pick_file()
        else {
            return;
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let decoded = std::fs::read(&path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| image::load_from_memory(&bytes).map_err(|e| e.to_string()));

        match decoded {
            Ok(img) => {
                log_info!("loaded '{}' ({}x{})", name, img.width(), img.height());
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                self.texture = Some(ctx.load_texture(
                    "image",
                    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()),
                    egui::TextureOptions::LINEAR,
                ));
                self.image = Some(img);
                self.image_name = name;
                self.load_error = None;
                self.histogram = None; // recomputed below
            }
            Err(e) => {
                // No histogram available; the overlay is simply skipped.
                log_warn!("could not load '{}': {}", name, e);
                self.load_error = Some(format!("Could not load {}: {}", name, e));
                self.image = None;
                self.image_name.clear();
                self.texture = None;
                self.histogram = None;
            }
        }
    }

    /// Recompute the histogram when the image, mode, or step changed.
    /// Curve geometry is rebuilt every frame; the bin counts are not.
    fn refresh_histogram(&mut self) {
        let Some(image) = &self.image else { return };
        if self.histogram.is_some() && self.computed_for == (self.mode, self.step) {
            return;
        }
        let start = Instant::now();
        self.histogram = Some(HistogramData::compute(image, self.mode, self.step));
        self.computed_for = (self.mode, self.step);
        log_info!(
            "histogram: {:?} step {} in {:.1}ms",
            self.mode,
            self.step,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            if ui.button("📂 Open…").clicked() {
                self.open_image(ui.ctx());
            }
            if !self.image_name.is_empty() {
                ui.label(&self.image_name);
            }
            ui.separator();

            egui::ComboBox::from_label("Channels")
                .selected_text(match self.mode {
                    ChannelMode::Rgb => "RGB",
                    ChannelMode::Luminance => "Luminance",
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.mode, ChannelMode::Rgb, "RGB");
                    ui.selectable_value(&mut self.mode, ChannelMode::Luminance, "Luminance");
                });

            egui::ComboBox::from_label("Step")
                .selected_text(self.step.to_string())
                .show_ui(ui, |ui| {
                    for step in [1, 2, 4, 8, 16, 32, 64] {
                        ui.selectable_value(&mut self.step, step, step.to_string());
                    }
                });

            egui::ComboBox::from_label("Style")
                .selected_text(match self.style {
                    CurveStyle::Smooth => "Smooth",
                    CurveStyle::Stepped => "Stepped",
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.style, CurveStyle::Smooth, "Smooth");
                    ui.selectable_value(&mut self.style, CurveStyle::Stepped, "Stepped");
                });

            egui::ComboBox::from_label("Orientation")
                .selected_text(orientation_label(self.orientation))
                .show_ui(ui, |ui| {
                    for o in [
                        Orientation::Portrait,
                        Orientation::PortraitUpsideDown,
                        Orientation::LandscapeLeft,
                        Orientation::LandscapeRight,
                    ] {
                        ui.selectable_value(&mut self.orientation, o, orientation_label(o));
                    }
                });
        });

        ui.horizontal_wrapped(|ui| {
            ui.add(egui::Slider::new(&mut self.scale, 0.1..=1.0).text("Scale"));
            ui.add(egui::Slider::new(&mut self.channel_opacity, 0.0..=1.0).text("Opacity"));
            ui.add(egui::Slider::new(&mut self.stroke_width, 0.5..=4.0).text("Stroke"));
        });
    }
}

impl eframe::App for HistoViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_histogram();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(2.0);
            self.controls(ui);
            ui.add_space(2.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.load_error {
                ui.colored_label(Color32::from_rgb(220, 60, 60), err);
            }

            let Some(texture) = &self.texture else {
                ui.centered_and_justified(|ui| {
                    ui.label("Open an image to see its histogram overlay.");
                });
                return;
            };

            let avail = ui.available_rect_before_wrap();
            let image_rect = letterbox(texture.size_vec2(), avail);
            let painter = ui.painter();
            painter.image(
                texture.id(),
                image_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );

            // Overlay inset in the bottom-left corner of the image.
            if let Some(histogram) = &self.histogram {
                let size = vec2(
                    image_rect.width() * OVERLAY_WIDTH_FRAC,
                    image_rect.height() * OVERLAY_HEIGHT_FRAC,
                );
                let overlay = Rect::from_min_size(
                    Pos2::new(
                        image_rect.min.x + OVERLAY_MARGIN,
                        image_rect.max.y - OVERLAY_MARGIN - size.y,
                    ),
                    size,
                );
                painter.rect_filled(
                    overlay.expand(6.0),
                    Rounding::same(4.0),
                    Color32::from_black_alpha(110),
                );
                HistogramView::new(histogram)
                    .scale(self.scale)
                    .channel_opacity(self.channel_opacity)
                    .stroke_width(self.stroke_width)
                    .orientation(self.orientation)
                    .style(self.style)
                    .paint(painter, overlay);
                painter.rect_stroke(
                    overlay.expand(6.0),
                    Rounding::same(4.0),
                    Stroke::new(1.0, Color32::from_gray(90)),
                );
            }
        });
    }
}

fn orientation_label(o: Orientation) -> &'static str {
    match o {
        Orientation::Portrait => "Portrait",
        Orientation::PortraitUpsideDown => "Upside down",
        Orientation::LandscapeLeft => "Landscape left",
        Orientation::LandscapeRight => "Landscape right",
        Orientation::FaceUp | Orientation::FaceDown | Orientation::Unknown => "Portrait",
    }
}

/// Largest rect with `size`'s aspect ratio centered inside `avail`.
fn letterbox(size: egui::Vec2, avail: Rect) -> Rect {
    if size.x <= 0.0 || size.y <= 0.0 {
        return avail;
    }
    let fit = (avail.width() / size.x).min(avail.height() / size.y);
    Rect::from_center_size(avail.center(), size * fit)
}
