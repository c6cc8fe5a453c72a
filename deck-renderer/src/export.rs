//! Scene export to image/document formats.
//!
//! Renders a card [`Scene`] to SVG, then rasterizes that SVG with
//! resvg/tiny-skia for PNG, JPEG and PDF output. Suit icons are tinted per
//! draw and embedded as data URIs; face artwork is embedded from the
//! exporter's [`ImageStore`].

use std::collections::HashMap;
use std::fmt::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use deck_core::{
    Affine, Clip, Color, Element, ElementKind, Paint, Rect, Scene, Stroke, TextAlign,
    TextBaseline, TextStyle,
};
use image::ImageEncoder;

use crate::error::{RenderError, RenderResult};
use crate::icon::{IconSheet, IconTinter};
use crate::image::ImageStore;
use crate::measure::FontMeasurer;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector graphics (returns the SVG XML string as UTF-8 bytes).
    Svg,
    /// PDF document with embedded raster image.
    Pdf,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            other => Err(RenderError::Export(format!("Unknown export format: {other}"))),
        }
    }
}

/// Configuration for scene export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Print resolution used for PDF page size (default: 300).
    pub dpi: f32,
    /// Background behind the card as RGBA bytes.
    pub background: [u8; 4],
    /// JPEG quality 1-100 (default: 92).
    pub jpeg_quality: u8,
    /// Raster scale factor (e.g. 2.0 for double resolution).
    pub scale: f32,
    /// Load installed system fonts for text rasterization.
    pub system_fonts: bool,
    /// Extra directories to load fonts from.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            background: [255, 255, 255, 255],
            jpeg_quality: 92,
            scale: 1.0,
            system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

/// Exports card scenes to image and document formats.
///
/// Holds the icon sheet, face artwork and the icon tinter's scratch buffer;
/// rendering takes `&mut self`, so concurrent renders need separate exporters.
pub struct SceneExporter {
    config: ExportConfig,
    icons: Option<IconSheet>,
    images: ImageStore,
    tinter: IconTinter,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SceneExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        let mut db = usvg::fontdb::Database::new();
        if config.system_fonts {
            db.load_system_fonts();
        }
        for dir in &config.font_dirs {
            db.load_fonts_dir(dir);
        }
        tracing::debug!("Font database holds {} faces", db.len());
        Self {
            config,
            icons: None,
            images: ImageStore::new(),
            tinter: IconTinter::new(),
            fontdb: Arc::new(db),
        }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Use `sheet` for suit icons.
    #[must_use]
    pub fn with_icons(mut self, sheet: IconSheet) -> Self {
        self.set_icons(Some(sheet));
        self
    }

    /// Replace the icon sheet.
    pub fn set_icons(&mut self, sheet: Option<IconSheet>) {
        self.icons = sheet;
        self.tinter.clear_cache();
    }

    /// Face artwork available to scenes.
    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Mutable access to the face artwork.
    pub fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }

    /// Export configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// The font database text is rasterized with.
    #[must_use]
    pub fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        Arc::clone(&self.fontdb)
    }

    /// A text measurer that shapes with this exporter's fonts, so composed
    /// layouts wrap and shrink against the glyphs that get printed.
    #[must_use]
    pub fn text_measurer(&self) -> FontMeasurer {
        FontMeasurer::new(self.fontdb())
    }

    /// Export a scene to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be rendered or encoded.
    pub fn export(&mut self, scene: &Scene, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Png => self.render_to_png(scene),
            ExportFormat::Jpeg => self.render_to_jpeg(scene),
            ExportFormat::Svg => Ok(self.render_to_svg(scene)?.into_bytes()),
            ExportFormat::Pdf => self.render_to_pdf(scene),
        }
    }

    /// Export the scene to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn render_to_png(&mut self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let svg = self.render_to_svg(scene)?;
        let pixmap = self.rasterize_svg(&svg)?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Export the scene to JPEG bytes, flattened onto the configured background.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_to_jpeg(&mut self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let svg = self.render_to_svg(scene)?;
        let pixmap = self.rasterize_svg(&svg)?;

        let (width, height) = (pixmap.width(), pixmap.height());
        let bg = &self.config.background;
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        // tiny-skia pixels are premultiplied.
        for pixel in pixmap.data().chunks_exact(4) {
            let inv = 1.0 - f32::from(pixel[3]) / 255.0;
            for (&src, &back) in pixel[..3].iter().zip(bg.iter()) {
                let value = f32::from(back).mul_add(inv, f32::from(src));
                rgb.push(value.round().clamp(0.0, 255.0) as u8);
            }
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.config.jpeg_quality)
            .write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)
            .map_err(|e| RenderError::Export(format!("JPEG encoding failed: {e}")))?;
        Ok(buf.into_inner())
    }

    /// Export the scene to PDF bytes.
    ///
    /// The page is the card's physical size at the configured DPI, bleed
    /// included, with the raster filling it.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or PDF generation fails.
    pub fn render_to_pdf(&mut self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let png = self.render_to_png(scene)?;
        let dpi = self.config.dpi.max(1.0);
        let page_w = scene.width / dpi * 25.4;
        let page_h = scene.height / dpi * 25.4;

        let (doc, page, layer) = printpdf::PdfDocument::new(
            "Card Export",
            printpdf::Mm(page_w),
            printpdf::Mm(page_h),
            "Card",
        );
        let current_layer = doc.get_page(page).get_layer(layer);

        // Decode with printpdf's bundled image crate for compatibility.
        let dynamic_image = printpdf::image_crate::load_from_memory(&png)
            .map_err(|e| RenderError::Export(format!("Failed to decode PNG for PDF: {e}")))?;
        printpdf::Image::from_dynamic_image(&dynamic_image).add_to_layer(
            current_layer,
            printpdf::ImageTransform {
                translate_x: Some(printpdf::Mm(0.0)),
                translate_y: Some(printpdf::Mm(0.0)),
                dpi: Some(dpi * self.config.scale.max(f32::EPSILON)),
                ..Default::default()
            },
        );

        doc.save_to_bytes()
            .map_err(|e| RenderError::Export(format!("PDF save failed: {e}")))
    }

    /// Export the scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns an error if an icon cannot be encoded.
    pub fn render_to_svg(&mut self, scene: &Scene) -> RenderResult<String> {
        let (out_w, out_h) = self.output_dimensions(scene);
        let mut defs = Defs::default();
        let mut body = String::with_capacity(4096);
        let mut warned_icons = false;

        for element in scene.elements() {
            let groups = defs.open_clips(&mut body, &element.clips);
            self.write_element(&mut body, &mut defs, element, &mut warned_icons)?;
            for _ in 0..groups {
                body.push_str("</g>");
            }
        }

        let bg = &self.config.background;
        let mut svg = String::with_capacity(body.len() + defs.content.len() + 512);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" \
             width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {} {}\">",
            scene.width, scene.height,
        );
        if !defs.content.is_empty() {
            let _ = write!(svg, "<defs>{}</defs>", defs.content);
        }
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" \
             fill=\"#{:02x}{:02x}{:02x}\" fill-opacity=\"{}\"/>",
            bg[0],
            bg[1],
            bg[2],
            f32::from(bg[3]) / 255.0,
        );
        svg.push_str(&body);
        svg.push_str("</svg>");
        Ok(svg)
    }

    fn write_element(
        &mut self,
        svg: &mut String,
        defs: &mut Defs,
        element: &Element,
        warned_icons: &mut bool,
    ) -> RenderResult<()> {
        let tf = matrix(&element.transform);
        match &element.kind {
            ElementKind::Fill { rect, paint } => {
                let fill = defs.paint(paint, rect);
                let _ = write!(svg, "<rect {} {fill} transform=\"{tf}\"/>", rect_attrs(rect));
            }

            ElementKind::StrokeRect { rect, stroke } => {
                let _ = write!(
                    svg,
                    "<rect {} fill=\"none\" {} transform=\"{tf}\"/>",
                    rect_attrs(rect),
                    stroke_attrs(stroke),
                );
            }

            ElementKind::Line { from, to, stroke } => {
                let _ = write!(
                    svg,
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {} transform=\"{tf}\"/>",
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    stroke_attrs(stroke),
                );
            }

            ElementKind::Text {
                content,
                origin,
                font,
                style,
                align,
                baseline,
            } => {
                let base = format!(
                    "x=\"{}\" y=\"{}\" font-family=\"{}, sans-serif\" \
                     font-weight=\"{}\" font-size=\"{}\"{}{} transform=\"{tf}\"",
                    origin.x,
                    origin.y,
                    escape_xml(&format!("'{}'", font.family)),
                    font.numeric_weight(),
                    font.size,
                    anchor_attr(*align),
                    baseline_attr(*baseline),
                );
                write_text(svg, defs, &base, &escape_xml(content), style);
            }

            ElementKind::Icon {
                suit,
                center,
                size,
                tint,
            } => {
                let (x, y) = (center.x - size / 2.0, center.y - size / 2.0);
                if let Some(sheet) = &self.icons {
                    let href = self.tinter.data_uri(sheet, *suit, tint)?;
                    let _ = write!(
                        svg,
                        "<image x=\"{x}\" y=\"{y}\" width=\"{size}\" height=\"{size}\" \
                         preserveAspectRatio=\"none\" href=\"{href}\" transform=\"{tf}\"/>",
                    );
                } else {
                    if !*warned_icons {
                        tracing::warn!("No icon sheet loaded; drawing suit symbols as text");
                        *warned_icons = true;
                    }
                    let _ = write!(
                        svg,
                        "<text x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{size}\" \
                         text-anchor=\"middle\" dominant-baseline=\"central\" {} \
                         transform=\"{tf}\">{}</text>",
                        center.x,
                        center.y,
                        color_attrs("fill", tint.color.with_opacity(tint.opacity)),
                        suit.display(),
                    );
                }
            }

            ElementKind::Image { image, origin } => {
                if let Some(href) = self.images.data_uri(&image.id) {
                    let _ = write!(
                        svg,
                        "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                         preserveAspectRatio=\"none\" href=\"{href}\" transform=\"{tf}\"/>",
                        origin.x, origin.y, image.width, image.height,
                    );
                } else {
                    tracing::warn!("Face image {} not loaded; skipping", image.id);
                }
            }
        }
        Ok(())
    }

    /// Output size in pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn output_dimensions(&self, scene: &Scene) -> (u32, u32) {
        let scale = self.config.scale.max(f32::EPSILON);
        let w = (scene.width * scale).round().max(1.0) as u32;
        let h = (scene.height * scale).round().max(1.0) as u32;
        (w, h)
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize_svg(&self, svg: &str) -> RenderResult<tiny_skia::Pixmap> {
        let opt = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(svg, &opt)
            .map_err(|e| RenderError::Export(format!("SVG parsing failed: {e}")))?;

        let px_w = tree.size().width().round() as u32;
        let px_h = tree.size().height().round() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Export("Failed to create pixmap".to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        Ok(pixmap)
    }
}

/// Shared `<defs>` entries, deduplicated by content.
#[derive(Default)]
struct Defs {
    content: String,
    ids: HashMap<String, String>,
}

impl Defs {
    fn intern(&mut self, prefix: &str, key: String, build: impl FnOnce(&str) -> String) -> String {
        if let Some(id) = self.ids.get(&key) {
            return id.clone();
        }
        let id = format!("{prefix}{}", self.ids.len() + 1);
        self.content.push_str(&build(&id));
        self.ids.insert(key, id.clone());
        id
    }

    /// Open one clipping group per clip; returns how many to close.
    fn open_clips(&mut self, svg: &mut String, clips: &[Clip]) -> usize {
        for clip in clips {
            let key = format!("clip {} {}", rect_attrs(&clip.rect), matrix(&clip.transform));
            let id = self.intern("clip", key, |id| {
                format!(
                    "<clipPath id=\"{id}\"><rect {} transform=\"{}\"/></clipPath>",
                    rect_attrs(&clip.rect),
                    matrix(&clip.transform),
                )
            });
            let _ = write!(svg, "<g clip-path=\"url(#{id})\">");
        }
        clips.len()
    }

    /// Fill attributes, adding a gradient definition when needed.
    fn paint(&mut self, paint: &Paint, rect: &Rect) -> String {
        match paint {
            Paint::Solid { color } => color_attrs("fill", *color),
            Paint::Linear { from, to } => {
                let stops = gradient_stops(*from, *to);
                let key = format!("linear {stops}");
                let id = self.intern("grad", key, |id| {
                    format!(
                        "<linearGradient id=\"{id}\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\">\
                         {stops}</linearGradient>"
                    )
                });
                format!("fill=\"url(#{id})\"")
            }
            Paint::Radial { inner, outer } => {
                let stops = gradient_stops(*inner, *outer);
                let (cx, cy) = (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
                let r = rect.width.max(rect.height) / 2.0;
                let key = format!("radial {cx} {cy} {r} {stops}");
                let id = self.intern("grad", key, |id| {
                    format!(
                        "<radialGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" \
                         cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\">{stops}</radialGradient>"
                    )
                });
                format!("fill=\"url(#{id})\"")
            }
        }
    }

    /// Drop-shadow filter id for a text shadow.
    fn shadow(&mut self, style: &TextStyle) -> Option<String> {
        let shadow = style.shadow.as_ref()?;
        let attrs = format!(
            "dx=\"{}\" dy=\"{}\" stdDeviation=\"{}\" flood-color=\"{}\" flood-opacity=\"{}\"",
            shadow.offset_x,
            shadow.offset_y,
            shadow.blur / 2.0,
            shadow.color.to_hex(),
            shadow.color.a,
        );
        let key = format!("shadow {attrs}");
        Some(self.intern("shadow", key, |id| {
            format!(
                "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
                 <feDropShadow {attrs}/></filter>"
            )
        }))
    }
}

/// Fill first (with its shadow), then the outline on top.
fn write_text(svg: &mut String, defs: &mut Defs, base: &str, content: &str, style: &TextStyle) {
    let filter = defs
        .shadow(style)
        .map(|id| format!(" filter=\"url(#{id})\""))
        .unwrap_or_default();
    let _ = write!(
        svg,
        "<text {base} {}{filter}>{content}</text>",
        color_attrs("fill", style.fill),
    );
    if let Some(stroke) = &style.stroke {
        let _ = write!(
            svg,
            "<text {base} fill=\"none\" {}>{content}</text>",
            stroke_attrs(stroke),
        );
    }
}

fn matrix(t: &Affine) -> String {
    format!("matrix({} {} {} {} {} {})", t.a, t.b, t.c, t.d, t.e, t.f)
}

fn rect_attrs(r: &Rect) -> String {
    format!(
        "x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
        r.x,
        r.y,
        r.width.max(0.0),
        r.height.max(0.0)
    )
}

fn color_attrs(kind: &str, color: Color) -> String {
    format!("{kind}=\"{}\" {kind}-opacity=\"{}\"", color.to_hex(), color.a.clamp(0.0, 1.0))
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        "{} stroke-width=\"{}\"",
        color_attrs("stroke", stroke.color),
        stroke.width
    );
    if let Some([dash, gap]) = stroke.dash {
        let _ = write!(attrs, " stroke-dasharray=\"{dash} {gap}\"");
    }
    attrs
}

fn gradient_stops(from: Color, to: Color) -> String {
    format!(
        "<stop offset=\"0\" stop-color=\"{}\" stop-opacity=\"{}\"/>\
         <stop offset=\"1\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
        from.to_hex(),
        from.a,
        to.to_hex(),
        to.a,
    )
}

fn anchor_attr(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "",
        TextAlign::Center => " text-anchor=\"middle\"",
        TextAlign::Right => " text-anchor=\"end\"",
    }
}

fn baseline_attr(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Top => " dominant-baseline=\"hanging\"",
        TextBaseline::Middle => " dominant-baseline=\"central\"",
        TextBaseline::Alphabetic => "",
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{DrawSurface, FontSpec, IconTint, Layer, Point, Suit};

    fn exporter() -> SceneExporter {
        SceneExporter::new(ExportConfig {
            system_fonts: false,
            ..ExportConfig::default()
        })
    }

    fn text_scene(content: &str) -> Scene {
        let mut scene = Scene::new(100.0, 100.0);
        scene.fill_text(
            content,
            Point::new(10.0, 20.0),
            &FontSpec::new("Roboto", "700", 16.0),
            &TextStyle::filled(Color::BLACK),
            TextAlign::Center,
            TextBaseline::Top,
        );
        scene
    }

    #[test]
    fn test_svg_export_empty_scene() {
        let svg = exporter()
            .render_to_svg(&Scene::new(825.0, 1125.0))
            .expect("svg export");
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"825\""));
        assert!(svg.contains("viewBox=\"0 0 825 1125\""));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_svg_text_attributes() {
        let svg = exporter().render_to_svg(&text_scene("A < B & C")).expect("svg");
        assert!(svg.contains("A &lt; B &amp; C"));
        assert!(svg.contains("font-weight=\"700\""));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("dominant-baseline=\"hanging\""));
        assert!(svg.contains("transform=\"matrix(1 0 0 1 0 0)\""));
    }

    #[test]
    fn test_text_effects() {
        let mut scene = Scene::new(100.0, 100.0);
        let style = TextStyle {
            fill: Color::rgb(200, 0, 0),
            stroke: Some(Stroke {
                color: Color::BLACK,
                width: 2.0,
                dash: None,
            }),
            shadow: Some(deck_core::Shadow {
                color: Color::BLACK.with_alpha(0.35),
                blur: 4.0,
                offset_x: 2.0,
                offset_y: 3.0,
            }),
        };
        for _ in 0..2 {
            scene.fill_text(
                "K",
                Point::new(0.0, 0.0),
                &FontSpec::new("Roboto", "400", 20.0),
                &style,
                TextAlign::Left,
                TextBaseline::Middle,
            );
        }
        let svg = exporter().render_to_svg(&scene).expect("svg");
        assert_eq!(svg.matches("<filter").count(), 1);
        assert!(svg.contains("stdDeviation=\"2\""));
        assert_eq!(svg.matches("fill=\"none\"").count(), 2);
    }

    #[test]
    fn test_clips_and_gradients() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.fill_rect(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &Paint::Linear {
                from: Color::WHITE,
                to: Color::BLACK,
            },
        );
        scene.save();
        scene.translate(10.0, 10.0);
        scene.clip_rect(Rect::new(0.0, 0.0, 50.0, 20.0));
        scene.stroke_line(
            Point::new(0.0, 0.0),
            Point::new(80.0, 0.0),
            &Stroke {
                color: Color::BLACK,
                width: 1.0,
                dash: Some([4.0, 4.0]),
            },
        );
        scene.restore();

        let svg = exporter().render_to_svg(&scene).expect("svg");
        assert!(svg.contains("<linearGradient id=\"grad1\""));
        assert!(svg.contains("<clipPath id=\"clip"));
        assert!(svg.contains("clip-path=\"url(#clip"));
        assert!(svg.contains("stroke-dasharray=\"4 4\""));
    }

    #[test]
    fn test_missing_sheet_falls_back_to_symbols() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.set_layer(Layer::Pips);
        scene.draw_icon(Suit::Hearts, Point::new(50.0, 50.0), 20.0, &IconTint::default());
        let svg = exporter().render_to_svg(&scene).expect("svg");
        assert!(svg.contains('♥'));
    }

    #[test]
    fn test_png_and_jpeg_magic_bytes() {
        let mut exporter = exporter();
        let scene = text_scene("Test");
        let png = exporter.export(&scene, ExportFormat::Png).expect("png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
        let jpeg = exporter.export(&scene, ExportFormat::Jpeg).expect("jpeg");
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_pdf_export_produces_valid_bytes() {
        let pdf = exporter()
            .render_to_pdf(&Scene::new(200.0, 200.0))
            .expect("pdf export");
        assert_eq!(&pdf[0..5], b"%PDF-");
    }

    #[test]
    fn test_scale_factor() {
        let svg = SceneExporter::new(ExportConfig {
            scale: 2.0,
            system_fonts: false,
            ..ExportConfig::default()
        })
        .render_to_svg(&Scene::new(100.0, 100.0))
        .expect("svg");
        assert!(svg.contains("width=\"200\""));
        assert!(svg.contains("viewBox=\"0 0 100 100\""));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JPG".parse::<ExportFormat>().expect("format"), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::Svg.extension(), "svg");
        assert!("webp".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_text_measurer_shares_font_database() {
        let exporter = exporter();
        let measurer = exporter.text_measurer();
        let db = exporter.fontdb();
        assert!(Arc::ptr_eq(&db, &exporter.fontdb));
        assert!(!measurer.resolves(&FontSpec::new("Roboto", "400", 20.0)));
    }
}
