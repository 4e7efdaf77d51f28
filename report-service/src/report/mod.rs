//! The complex report: a title page followed by a content page with a bullet list,
//! the bundled image and a 3x3 table.

mod error;
pub mod layout;

pub use error::GenerationFailure;

use crate::pdf::{DocumentBuilder, PdfDocument, RasterImage};
use std::path::{Path, PathBuf};

/// Produces the report. Holds only the location of the bundled image, which is read
/// afresh on every call.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    image_path: PathBuf,
}

impl ReportBuilder {
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
        }
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    /// Renders the report to PDF bytes.
    pub fn generate(&self) -> Result<Vec<u8>, GenerationFailure> {
        let mut document = PdfDocument::new().with_title(layout::TITLE);
        self.render(&mut document)?;
        Ok(document.finish()?)
    }

    /// Runs the layout procedure against any builder.
    pub fn render<B: DocumentBuilder>(&self, builder: &mut B) -> Result<(), GenerationFailure> {
        add_title_page(builder)?;
        self.add_content_page(builder)
    }

    fn add_content_page<B: DocumentBuilder>(&self, builder: &mut B) -> Result<(), GenerationFailure> {
        builder.begin_page(layout::PAGE_SIZE);
        builder.draw_lines(
            layout::BODY_STYLE,
            layout::BODY_ORIGIN,
            layout::BODY_LEADING,
            &layout::BODY_LINES,
        )?;

        let image = self.load_image()?;
        builder.draw_image(&image, layout::IMAGE_AREA)?;

        builder.draw_table(&layout::TABLE, &layout::TABLE_GEOMETRY)?;
        Ok(())
    }

    fn load_image(&self) -> Result<RasterImage, GenerationFailure> {
        let bytes =
            std::fs::read(&self.image_path).map_err(|source| GenerationFailure::AssetUnreadable {
                path: self.image_path.clone(),
                source,
            })?;

        let image = RasterImage::decode(&bytes).map_err(|source| GenerationFailure::AssetInvalid {
            path: self.image_path.clone(),
            source,
        })?;

        tracing::debug!(
            width = image.width,
            height = image.height,
            has_alpha = image.alpha.is_some(),
            "Loaded report image asset"
        );

        Ok(image)
    }
}

fn add_title_page<B: DocumentBuilder>(builder: &mut B) -> Result<(), GenerationFailure> {
    builder.begin_page(layout::PAGE_SIZE);
    builder.draw_text(layout::TITLE_STYLE, layout::TITLE_ORIGIN, layout::TITLE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BUNDLED_IMAGE_PATH;
    use crate::pdf::{PdfError, Point, Rect, Size, StandardFont, TextStyle};

    #[derive(Debug, PartialEq)]
    enum Call {
        Page,
        Text(StandardFont, f32, f32, f32, String),
        Image(u32, u32, Rect),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        page: Option<Size>,
    }

    impl DocumentBuilder for Recorder {
        fn begin_page(&mut self, size: Size) {
            self.page = Some(size);
            self.calls.push(Call::Page);
        }

        fn page_size(&self) -> Option<Size> {
            self.page
        }

        fn draw_text(&mut self, style: TextStyle, at: Point, text: &str) -> Result<(), PdfError> {
            self.calls.push(Call::Text(
                style.font,
                style.size,
                at.x,
                at.y,
                text.to_string(),
            ));
            Ok(())
        }

        fn draw_lines(
            &mut self,
            style: TextStyle,
            at: Point,
            leading: f32,
            lines: &[&str],
        ) -> Result<(), PdfError> {
            for (index, line) in lines.iter().enumerate() {
                let y = at.y - index as f32 * leading;
                self.draw_text(style, Point::new(at.x, y), line)?;
            }
            Ok(())
        }

        fn draw_image(&mut self, image: &RasterImage, area: Rect) -> Result<(), PdfError> {
            self.calls.push(Call::Image(image.width, image.height, area));
            Ok(())
        }

        fn finish(self) -> Result<Vec<u8>, PdfError> {
            Ok(Vec::new())
        }
    }

    fn text(font: StandardFont, size: f32, x: f32, y: f32, value: &str) -> Call {
        Call::Text(font, size, x, y, value.to_string())
    }

    #[test]
    fn test_title_page_comes_first() {
        let mut recorder = Recorder::default();
        ReportBuilder::new(BUNDLED_IMAGE_PATH)
            .render(&mut recorder)
            .unwrap();

        assert_eq!(recorder.calls[0], Call::Page);
        assert_eq!(
            recorder.calls[1],
            text(StandardFont::HelveticaBold, 26.0, 100.0, 700.0, "Complex PDF Report")
        );
        assert_eq!(recorder.calls[2], Call::Page);
        assert_eq!(
            recorder.calls.iter().filter(|call| **call == Call::Page).count(),
            2
        );
    }

    #[test]
    fn test_content_page_order_and_positions() {
        let mut recorder = Recorder::default();
        ReportBuilder::new(BUNDLED_IMAGE_PATH)
            .render(&mut recorder)
            .unwrap();

        let content = &recorder.calls[3..];
        let body = StandardFont::Helvetica;
        assert_eq!(
            content[..5],
            [
                text(body, 12.0, 50.0, 700.0, "This is a more complex PDF document that includes:"),
                text(body, 12.0, 50.0, 680.0, "- Multiple pages"),
                text(body, 12.0, 50.0, 660.0, "- Different fonts"),
                text(body, 12.0, 50.0, 640.0, "- Images"),
                text(body, 12.0, 50.0, 620.0, "- Tables"),
            ]
        );

        match &content[5] {
            Call::Image(_, _, area) => assert_eq!(*area, layout::IMAGE_AREA),
            other => panic!("expected image after body text, got {:?}", other),
        }

        let cells = &content[6..];
        assert_eq!(cells.len(), 12);
        let column_width = (612.0 - 100.0) / 3.0;
        for (index, call) in cells.iter().enumerate() {
            let (row, column) = (index / 3, index % 3);
            let Call::Text(font, size, x, y, value) = call else {
                panic!("expected table text, got {:?}", call);
            };
            let expected_font = if row == 0 {
                StandardFont::HelveticaBold
            } else {
                StandardFont::Helvetica
            };
            let expected_text = if row == 0 {
                format!("Header {}", column + 1)
            } else {
                format!("Cell {}", (row - 1) * 3 + column + 1)
            };

            assert_eq!(*font, expected_font);
            assert_eq!(*size, 12.0);
            assert!((x - (50.0 + column as f32 * column_width)).abs() < 1e-3);
            assert_eq!(*y, 430.0 - row as f32 * 20.0);
            assert_eq!(*value, expected_text);
        }
    }

    #[test]
    fn test_missing_asset_is_unreadable() {
        let err = ReportBuilder::new("does/not/exist.png")
            .generate()
            .unwrap_err();
        assert!(matches!(err, GenerationFailure::AssetUnreadable { .. }));
    }

    #[test]
    fn test_corrupt_asset_is_invalid() {
        let path = std::env::temp_dir().join(format!(
            "report-service-corrupt-{}.png",
            std::process::id()
        ));
        std::fs::write(&path, b"\x89PNG but not really").unwrap();

        let err = ReportBuilder::new(&path).generate().unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, GenerationFailure::AssetInvalid { .. }));
    }

    #[test]
    fn test_generate_produces_two_page_pdf() {
        let bytes = ReportBuilder::new(BUNDLED_IMAGE_PATH).generate().unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
