//! PDF rendering
//!
//! Draws a [`Document`] onto A4 portrait pages with the builtin Helvetica
//! faces. Header and footer bands are repeated on every page; the record
//! table breaks across pages and repeats its column titles.
//!
//! Coordinates below are millimetres measured from the top-left corner of
//! the page and converted to PDF space (bottom-left origin) at draw time.

use std::borrow::Cow;
use std::path::Path;

use image::{Rgb, RgbImage};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Rect, Rgb as PdfRgb,
};
use qrcode::QrCode;
use tracing::{debug, warn};

use crate::chart::{self, COVERED_COLOR, NOT_COVERED_COLOR};
use crate::error::{Error, Result};
use crate::report::{Document, FooterBand, HeaderBand, TableBand};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 10.0;
const MARGIN_TOP: f32 = 15.0;
const MARGIN_RIGHT: f32 = 10.0;
const MARGIN_BOTTOM: f32 = 10.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

const HEADER_HEIGHT: f32 = 20.0;
const FOOTER_HEIGHT: f32 = 20.0;
const TITLE_HEIGHT: f32 = 10.0;
const SUMMARY_HEIGHT: f32 = 50.0;
const HEADING_HEIGHT: f32 = 7.0;
const TABLE_HEADER_HEIGHT: f32 = 7.0;
const TABLE_ROW_HEIGHT: f32 = 6.0;
const HEADER_CONTENT_SPACE: f32 = 1.0;

const CONTENT_TOP: f32 = MARGIN_TOP + HEADER_HEIGHT;
const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - MARGIN_BOTTOM - FOOTER_HEIGHT;

const GRID_COLUMNS: f32 = 12.0;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const DARK_GRAY: Rgb<u8> = Rgb([144, 144, 144]);
const GRAY: Rgb<u8> = Rgb([200, 200, 200]);

const LAYER_NAME: &str = "Layer 1";

/// Average Helvetica glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.5;
const PT_TO_MM: f32 = 0.352_778;

#[derive(Debug, Clone, Copy)]
enum Align {
    Center,
    Right,
}

#[derive(Clone)]
struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

/// Dark modules of a QR code, row-major.
struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    fn encode(payload: &str) -> Result<Self> {
        let code = QrCode::new(payload.as_bytes())
            .map_err(|e| Error::Render(format!("QR code for {payload:?}: {e}")))?;
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();
        Ok(Self {
            width: code.width(),
            dark,
        })
    }

    /// Horizontal runs of dark modules as `(row, first column, length)`.
    fn runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = Vec::new();
        for (row, modules) in self.dark.chunks(self.width).enumerate() {
            let mut start = None;
            for (col, &dark) in modules.iter().chain(std::iter::once(&false)).enumerate() {
                match (dark, start) {
                    (true, None) => start = Some(col),
                    (false, Some(first)) => {
                        runs.push((row, first, col - first));
                        start = None;
                    }
                    _ => {}
                }
            }
        }
        runs
    }
}

/// Per-page furniture drawn on every new page.
struct Furniture<'d> {
    header: &'d HeaderBand,
    footer: &'d FooterBand,
    logo: Option<RgbImage>,
    qr: Option<QrMatrix>,
}

struct Canvas<'d> {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    furniture: Furniture<'d>,
    cursor: f32,
    pages: usize,
}

/// Renders the document to PDF bytes.
pub fn render_pdf(document: &Document<'_>) -> Result<Vec<u8>> {
    let furniture = Furniture {
        header: &document.header,
        footer: &document.footer,
        logo: document.header.logo.as_deref().and_then(load_logo),
        qr: document
            .footer
            .qr_payload
            .as_deref()
            .map(QrMatrix::encode)
            .transpose()?,
    };

    let mut canvas = Canvas::new(&document.title, furniture)?;
    canvas.title(&document.title);
    canvas.summary(document)?;
    canvas.table(&document.table)?;
    canvas.finish()
}

fn render_error(e: printpdf::Error) -> Error {
    Error::Render(format!("{e:?}"))
}

/// Loads the logo, flattening transparency onto white.
///
/// A missing or undecodable logo is reported and otherwise ignored.
fn load_logo(path: &Path) -> Option<RgbImage> {
    match image::open(path) {
        Ok(logo) => {
            let rgba = logo.to_rgba8();
            Some(RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
                let [r, g, b, a] = rgba.get_pixel(x, y).0;
                let alpha = f32::from(a) / 255.0;
                Rgb([
                    blend_on_white(r, alpha),
                    blend_on_white(g, alpha),
                    blend_on_white(b, alpha),
                ])
            }))
        }
        Err(e) => {
            warn!("Skipping logo {}: {}", path.display(), e);
            None
        }
    }
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn blend_on_white(channel: u8, alpha: f32) -> u8 {
    let value = f32::from(channel).mul_add(alpha, 255.0 * (1.0 - alpha));
    value.round().clamp(0.0, 255.0) as u8
}

/// Converts a bitmap to the image type of the PDF backend.
fn pdf_image(bitmap: &RgbImage) -> Result<Image> {
    use printpdf::image_crate::{DynamicImage, RgbImage as BackendImage};

    let (width, height) = bitmap.dimensions();
    let buffer = BackendImage::from_raw(width, height, bitmap.as_raw().clone())
        .ok_or_else(|| Error::Render("bitmap buffer size mismatch".to_string()))?;
    Ok(Image::from_dynamic_image(&DynamicImage::ImageRgb8(buffer)))
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_ADVANCE * PT_TO_MM
}

/// Shortens `text` with a trailing `...` so it fits in `width` millimetres.
fn fit(text: &str, size: f32, width: f32) -> Cow<'_, str> {
    if text_width(text, size) <= width {
        return Cow::Borrowed(text);
    }
    let glyph = size * GLYPH_ADVANCE * PT_TO_MM;
    let keep = ((width / glyph) as usize).saturating_sub(3);
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str("...");
    Cow::Owned(shortened)
}

fn pdf_color(color: Rgb<u8>) -> Color {
    let [r, g, b] = color.0;
    Color::Rgb(PdfRgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn column_x(grid: &[u8], index: usize) -> (f32, f32) {
    let unit = CONTENT_WIDTH / GRID_COLUMNS;
    let offset: u8 = grid[..index].iter().sum();
    (
        MARGIN_LEFT + f32::from(offset) * unit,
        f32::from(grid[index]) * unit,
    )
}

impl<'d> Canvas<'d> {
    fn new(title: &str, furniture: Furniture<'d>) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(render_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(render_error)?,
            bold_italic: doc
                .add_builtin_font(BuiltinFont::HelveticaBoldOblique)
                .map_err(render_error)?,
        };
        let layer = doc.get_page(page).get_layer(layer);

        let mut canvas = Self {
            doc,
            layer,
            fonts,
            furniture,
            cursor: CONTENT_TOP,
            pages: 1,
        };
        canvas.draw_furniture()?;
        Ok(canvas)
    }

    fn new_page(&mut self) -> Result<()> {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = CONTENT_TOP;
        self.pages += 1;
        self.draw_furniture()
    }

    /// Starts a new page when `height` does not fit below the cursor.
    ///
    /// Returns `true` if a page break happened.
    fn reserve(&mut self, height: f32) -> Result<bool> {
        if self.cursor + height <= CONTENT_BOTTOM {
            return Ok(false);
        }
        self.new_page()?;
        Ok(true)
    }

    fn finish(self) -> Result<Vec<u8>> {
        debug!(pages = self.pages, "document laid out");
        self.doc.save_to_bytes().map_err(render_error)
    }

    fn draw_furniture(&mut self) -> Result<()> {
        self.draw_header()?;
        self.draw_footer();
        Ok(())
    }

    fn draw_header(&mut self) -> Result<()> {
        let header = self.furniture.header;
        let top = MARGIN_TOP;
        let column = CONTENT_WIDTH * 3.0 / GRID_COLUMNS;

        if let Some(logo) = &self.furniture.logo {
            let (width, height) = fit_box(logo.dimensions(), column * 0.8, HEADER_HEIGHT * 0.8);
            let x = MARGIN_LEFT + (column - width) / 2.0;
            let y = top + (HEADER_HEIGHT - height) / 2.0;
            self.image(logo, x, y, width)?;
        }

        let right = MARGIN_LEFT + CONTENT_WIDTH - column;
        let regular = self.fonts.regular.clone();
        let bold_italic = self.fonts.bold_italic.clone();
        self.text(&header.company_name, 8.0, &regular, right, column, top, Align::Right);
        self.text(&header.phone_line, 8.0, &bold_italic, right, column, top + 12.0, Align::Right);
        self.text(&header.website, 8.0, &bold_italic, right, column, top + 15.0, Align::Right);
        Ok(())
    }

    fn draw_footer(&self) {
        let footer = self.furniture.footer;
        let top = CONTENT_BOTTOM;

        if let Some(qr) = &self.furniture.qr {
            let side = FOOTER_HEIGHT * 0.6;
            let module = side / qr.width as f32;
            let x = MARGIN_LEFT + (CONTENT_WIDTH - side) / 2.0;
            let y = top + 1.0;
            for (row, col, len) in qr.runs() {
                self.fill_rect(
                    x + col as f32 * module,
                    y + row as f32 * module,
                    len as f32 * module,
                    module,
                    BLACK,
                );
            }
        }

        let bold_italic = self.fonts.bold_italic.clone();
        self.text(&footer.text, 8.0, &bold_italic, MARGIN_LEFT, CONTENT_WIDTH, top + 15.0, Align::Center);
    }

    fn title(&mut self, title: &str) {
        let bold = self.fonts.bold.clone();
        self.text(title, 10.0, &bold, MARGIN_LEFT, CONTENT_WIDTH, self.cursor + 3.0, Align::Center);
        self.cursor += TITLE_HEIGHT;
    }

    fn summary(&mut self, document: &Document<'_>) -> Result<()> {
        let top = self.cursor;
        let half = CONTENT_WIDTH / 2.0;
        let summary = &document.summary;

        let pie = chart::rasterize(&summary.chart, chart::DEFAULT_SIZE);
        let side = (half * 0.8).min(SUMMARY_HEIGHT * 0.8);
        self.image(&pie, MARGIN_LEFT + (half - side) / 2.0, top + 2.0, side)?;

        let right = MARGIN_LEFT + half;
        let regular = self.fonts.regular.clone();
        for (line, offset) in summary.lines.iter().zip([13.0, 23.0, 33.0]) {
            self.text(line, 10.0, &regular, right, half, top + offset, Align::Center);
        }

        // legend
        let legend_top = top + 43.0;
        let mut x = right + half / 2.0 - 30.0;
        for (slice, color) in summary
            .chart
            .slices()
            .into_iter()
            .zip([NOT_COVERED_COLOR, COVERED_COLOR])
        {
            self.fill_rect(x, legend_top, 3.0, 3.0, color);
            let label = format!("{} {:.2}%", slice.label, slice.value);
            self.text(&label, 8.0, &regular, x + 4.0, 26.0, legend_top, Align::Center);
            x += 32.0;
        }

        self.cursor += SUMMARY_HEIGHT;
        Ok(())
    }

    fn table(&mut self, table: &TableBand<'_>) -> Result<()> {
        let minimum = HEADING_HEIGHT + TABLE_HEADER_HEIGHT + HEADER_CONTENT_SPACE + TABLE_ROW_HEIGHT;
        self.reserve(minimum)?;

        self.fill_rect(MARGIN_LEFT, self.cursor, CONTENT_WIDTH, HEADING_HEIGHT, DARK_GRAY);
        let bold = self.fonts.bold.clone();
        self.text(table.heading, 10.0, &bold, MARGIN_LEFT, CONTENT_WIDTH, self.cursor + 1.0, Align::Center);
        self.cursor += HEADING_HEIGHT;

        self.table_header(table);

        for (index, row) in table.rows.iter().enumerate() {
            if self.reserve(TABLE_ROW_HEIGHT)? {
                self.table_header(table);
            }

            if index % 2 == 1 {
                self.fill_rect(MARGIN_LEFT, self.cursor, CONTENT_WIDTH, TABLE_ROW_HEIGHT, GRAY);
            }
            self.cells(&row.cells(), &table.grid, 8.0, false, TABLE_ROW_HEIGHT);
            self.cursor += TABLE_ROW_HEIGHT;
        }
        Ok(())
    }

    fn table_header(&mut self, table: &TableBand<'_>) {
        let titles: Vec<&str> = table.columns.iter().map(String::as_str).collect();
        self.cells(&titles, &table.grid, 9.0, true, TABLE_HEADER_HEIGHT);
        self.cursor += TABLE_HEADER_HEIGHT + HEADER_CONTENT_SPACE;
    }

    fn cells(&mut self, cells: &[&str], grid: &[u8], size: f32, bold: bool, height: f32) {
        let font = if bold {
            self.fonts.bold.clone()
        } else {
            self.fonts.regular.clone()
        };
        let top = self.cursor + (height - size * PT_TO_MM) / 2.0;
        for (index, cell) in cells.iter().enumerate() {
            let (x, width) = column_x(grid, index);
            let shown = fit(cell, size, width - 1.0);
            self.text(&shown, size, &font, x, width, top, Align::Center);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &self,
        text: &str,
        size: f32,
        font: &IndirectFontRef,
        x: f32,
        width: f32,
        top: f32,
        align: Align,
    ) {
        if text.is_empty() {
            return;
        }
        let measured = text_width(text, size);
        let x = match align {
            Align::Center => x + (width - measured) / 2.0,
            Align::Right => x + width - measured,
        };
        let baseline = top + size * PT_TO_MM;
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - baseline), font);
    }

    fn fill_rect(&self, x: f32, top: f32, width: f32, height: f32, color: Rgb<u8>) {
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_rect(Rect::new(
            Mm(x),
            Mm(PAGE_HEIGHT - top - height),
            Mm(x + width),
            Mm(PAGE_HEIGHT - top),
        ));
        self.layer.set_fill_color(pdf_color(BLACK));
    }

    /// Places `bitmap` with its top-left corner at (`x`, `top`), scaled to `width`.
    fn image(&self, bitmap: &RgbImage, x: f32, top: f32, width: f32) -> Result<()> {
        let (px_width, px_height) = bitmap.dimensions();
        if px_width == 0 || px_height == 0 {
            return Ok(());
        }
        let dpi = px_width as f32 * 25.4 / width;
        let height = px_height as f32 * 25.4 / dpi;

        pdf_image(bitmap)?.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(PAGE_HEIGHT - top - height)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        Ok(())
    }
}

/// Largest size with the aspect ratio of `pixels` that fits the box.
fn fit_box(pixels: (u32, u32), max_width: f32, max_height: f32) -> (f32, f32) {
    let (w, h) = (pixels.0.max(1) as f32, pixels.1.max(1) as f32);
    let scale = (max_width / w).min(max_height / h);
    (w * scale, h * scale)
}
