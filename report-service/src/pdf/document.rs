use super::{DocumentBuilder, PdfError, Point, RasterImage, Rect, Size, StandardFont, TextStyle};
use flate2::{write::ZlibEncoder, Compression};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

const PDF_VERSION: &str = "1.5";
const PRODUCER: &str = "report-service";

struct PageDraft {
    size: Size,
    operations: Vec<Operation>,
    fonts: BTreeSet<StandardFont>,
    images: Vec<(String, ObjectId)>,
}

/// [`DocumentBuilder`] backed by `lopdf`.
///
/// Drawing operations are buffered per page; image XObjects are added to the object
/// table as soon as they are drawn. The page tree, fonts and catalog are written in
/// [`finish`](DocumentBuilder::finish). No timestamps or random IDs are emitted, so
/// identical drawing calls yield identical bytes.
pub struct PdfDocument {
    doc: Document,
    pages_id: ObjectId,
    pages: Vec<PageDraft>,
    title: Option<String>,
    image_count: usize,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    pub fn new() -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();

        Self {
            doc,
            pages_id,
            pages: Vec::new(),
            title: None,
            image_count: 0,
        }
    }

    /// Sets the `/Title` entry of the document information dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn current_page(&mut self) -> Result<&mut PageDraft, PdfError> {
        self.pages.last_mut().ok_or(PdfError::NoPage)
    }

    fn add_image_xobject(&mut self, image: &RasterImage) -> Result<ObjectId, PdfError> {
        let width = i64::from(image.width);
        let height = i64::from(image.height);

        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        };

        if let Some(alpha) = &image.alpha {
            let smask = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            };
            let smask_id = self.doc.add_object(Stream::new(smask, deflate(alpha)?));
            dict.set("SMask", smask_id);
        }

        Ok(self.doc.add_object(Stream::new(dict, deflate(&image.rgb)?)))
    }

    fn write_page(
        &mut self,
        page: PageDraft,
        fonts: &BTreeMap<StandardFont, ObjectId>,
    ) -> Result<ObjectId, PdfError> {
        let content = Content {
            operations: page.operations,
        }
        .encode()?;
        let content_id = self.doc.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content)?,
        ));

        let mut font_resources = Dictionary::new();
        for font in &page.fonts {
            if let Some(id) = fonts.get(font) {
                font_resources.set(font.resource_name(), *id);
            }
        }

        let mut xobjects = Dictionary::new();
        for (name, id) in &page.images {
            xobjects.set(name.as_str(), *id);
        }

        let resources = dictionary! {
            "Font" => font_resources,
            "XObject" => xobjects,
        };

        Ok(self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                real(0.0),
                real(0.0),
                real(page.size.width),
                real(page.size.height),
            ],
            "Resources" => resources,
            "Contents" => content_id,
        }))
    }
}

impl DocumentBuilder for PdfDocument {
    fn begin_page(&mut self, size: Size) {
        self.pages.push(PageDraft {
            size,
            operations: Vec::new(),
            fonts: BTreeSet::new(),
            images: Vec::new(),
        });
    }

    fn page_size(&self) -> Option<Size> {
        self.pages.last().map(|page| page.size)
    }

    fn draw_text(&mut self, style: TextStyle, at: Point, text: &str) -> Result<(), PdfError> {
        let page = self.current_page()?;
        page.fonts.insert(style.font);
        page.operations.extend([
            Operation::new("BT", vec![]),
            set_font(style),
            Operation::new("Td", vec![real(at.x), real(at.y)]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);
        Ok(())
    }

    fn draw_lines(
        &mut self,
        style: TextStyle,
        at: Point,
        leading: f32,
        lines: &[&str],
    ) -> Result<(), PdfError> {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            set_font(style),
            Operation::new("Td", vec![real(at.x), real(at.y)]),
        ];
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                operations.push(Operation::new("Td", vec![real(0.0), real(-leading)]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        }
        operations.push(Operation::new("ET", vec![]));

        let page = self.current_page()?;
        page.fonts.insert(style.font);
        page.operations.extend(operations);
        Ok(())
    }

    fn draw_image(&mut self, image: &RasterImage, area: Rect) -> Result<(), PdfError> {
        // Fail before touching the object table.
        self.current_page()?;

        let xobject_id = self.add_image_xobject(image)?;
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);

        let page = self.current_page()?;
        page.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    real(area.size.width),
                    real(0.0),
                    real(0.0),
                    real(area.size.height),
                    real(area.origin.x),
                    real(area.origin.y),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.clone().into_bytes())]),
            Operation::new("Q", vec![]),
        ]);
        page.images.push((name, xobject_id));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, PdfError> {
        let used_fonts: BTreeSet<StandardFont> = self
            .pages
            .iter()
            .flat_map(|page| page.fonts.iter().copied())
            .collect();

        let mut fonts = BTreeMap::new();
        for font in used_fonts {
            let id = self.doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.insert(font, id);
        }

        let drafts = std::mem::take(&mut self.pages);
        let mut kids: Vec<Object> = Vec::with_capacity(drafts.len());
        for page in drafts {
            kids.push(self.write_page(page, &fonts)?.into());
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        };
        if let Some(title) = &self.title {
            info.set("Title", Object::string_literal(title.as_str()));
        }
        let info_id = self.doc.add_object(info);
        self.doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn set_font(style: TextStyle) -> Operation {
    Operation::new(
        "Tf",
        vec![style.font.resource_name().into(), real(style.size)],
    )
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, PdfError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
