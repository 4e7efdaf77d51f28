//! Fixed content and placement of the complex report.

use crate::pdf::{Point, Rect, Size, StandardFont, TableGeometry, TableSpec, TextStyle, LETTER};

pub const PAGE_SIZE: Size = LETTER;

pub const TITLE: &str = "Complex PDF Report";
pub const TITLE_STYLE: TextStyle = TextStyle {
    font: StandardFont::HelveticaBold,
    size: 26.0,
};
pub const TITLE_ORIGIN: Point = Point::new(100.0, 700.0);

pub const BODY_STYLE: TextStyle = TextStyle {
    font: StandardFont::Helvetica,
    size: 12.0,
};
pub const BODY_ORIGIN: Point = Point::new(50.0, 700.0);
pub const BODY_LEADING: f32 = 20.0;
pub const BODY_LINES: [&str; 5] = [
    "This is a more complex PDF document that includes:",
    "- Multiple pages",
    "- Different fonts",
    "- Images",
    "- Tables",
];

pub const IMAGE_AREA: Rect = Rect {
    origin: Point::new(50.0, 500.0),
    size: Size {
        width: 200.0,
        height: 150.0,
    },
};

const HEADER_STYLE: TextStyle = TextStyle {
    font: StandardFont::HelveticaBold,
    size: 12.0,
};

pub const TABLE: TableSpec<'static> = TableSpec {
    header: &["Header 1", "Header 2", "Header 3"],
    rows: &[
        &["Cell 1", "Cell 2", "Cell 3"],
        &["Cell 4", "Cell 5", "Cell 6"],
        &["Cell 7", "Cell 8", "Cell 9"],
    ],
    header_style: HEADER_STYLE,
    body_style: BODY_STYLE,
};

pub const TABLE_GEOMETRY: TableGeometry = TableGeometry {
    margin: 50.0,
    top: 450.0,
    row_height: 20.0,
};
