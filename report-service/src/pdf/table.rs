use super::{DocumentBuilder, PdfError, Point, TextStyle};

/// Literal table content: one header row followed by body rows.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec<'a> {
    pub header: &'a [&'a str],
    pub rows: &'a [&'a [&'a str]],
    pub header_style: TextStyle,
    pub body_style: TextStyle,
}

impl TableSpec<'_> {
    pub fn columns(&self) -> usize {
        self.header.len()
    }
}

/// Placement of a table: the page width minus both margins is split evenly across
/// the columns; rows step down from `top` by `row_height`, header included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableGeometry {
    pub margin: f32,
    pub top: f32,
    pub row_height: f32,
}

impl TableGeometry {
    pub fn column_x(&self, page_width: f32, columns: usize, column: usize) -> f32 {
        let table_width = page_width - 2.0 * self.margin;
        self.margin + column as f32 * (table_width / columns as f32)
    }

    /// Baseline of row `row`, where row 0 is the header.
    pub fn row_y(&self, row: usize) -> f32 {
        self.top - (row + 1) as f32 * self.row_height
    }
}

pub(super) fn draw<B>(
    builder: &mut B,
    table: &TableSpec<'_>,
    geometry: &TableGeometry,
) -> Result<(), PdfError>
where
    B: DocumentBuilder + ?Sized,
{
    let page = builder.page_size().ok_or(PdfError::NoPage)?;
    let columns = table.columns();

    let rows = std::iter::once((table.header_style, table.header))
        .chain(table.rows.iter().map(|row| (table.body_style, *row)));

    for (row, (style, cells)) in rows.enumerate() {
        let y = geometry.row_y(row);
        for (column, text) in cells.iter().enumerate() {
            let x = geometry.column_x(page.width, columns, column);
            builder.draw_text(style, Point::new(x, y), text)?;
        }
    }

    Ok(())
}
