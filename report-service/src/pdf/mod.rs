//! Document builder capability.
//!
//! Report layouts are written against [`DocumentBuilder`] and never touch the PDF
//! object model directly. [`PdfDocument`] is the `lopdf` backed implementation.

mod document;
pub mod raster;
mod table;

pub use document::PdfDocument;
pub use raster::RasterImage;
pub use table::{TableGeometry, TableSpec};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("no page has been started")]
    NoPage,

    #[error("PDF object error: {0}")]
    Lopdf(#[from] lopdf::Error),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The two standard 14 faces the reports use. Neither is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name under which the font is registered in a page's resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: StandardFont,
    pub size: f32,
}

/// A position in PDF user space: points, origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// US Letter, 8.5 x 11 in.
pub const LETTER: Size = Size {
    width: 612.0,
    height: 792.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

/// Drawing surface for fixed-position documents.
///
/// Pages are appended with [`begin_page`](DocumentBuilder::begin_page); every drawing
/// call targets the most recently started page. Nothing is clipped or wrapped.
pub trait DocumentBuilder {
    fn begin_page(&mut self, size: Size);

    /// Size of the page currently being drawn, if any.
    fn page_size(&self) -> Option<Size>;

    fn draw_text(&mut self, style: TextStyle, at: Point, text: &str) -> Result<(), PdfError>;

    /// Draws `lines` as one text block, each line `leading` points below the previous.
    fn draw_lines(
        &mut self,
        style: TextStyle,
        at: Point,
        leading: f32,
        lines: &[&str],
    ) -> Result<(), PdfError>;

    /// Embeds `image` and paints it scaled into `area`.
    fn draw_image(&mut self, image: &RasterImage, area: Rect) -> Result<(), PdfError>;

    fn draw_table(&mut self, spec: &TableSpec<'_>, geometry: &TableGeometry) -> Result<(), PdfError> {
        table::draw(self, spec, geometry)
    }

    /// Serializes the finished document.
    fn finish(self) -> Result<Vec<u8>, PdfError>
    where
        Self: Sized;
}
