use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::{ExportError, StructuredTable};

// Landscape A4.
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 12.0;
const TITLE_SIZE: f32 = 14.0;
const FONT_SIZE: f32 = 9.0;
const ROW_HEIGHT: f32 = 7.0;

/// Column widths in mm, one per structured header.
const COLUMN_WIDTHS: [f32; 9] = [12.0, 68.0, 30.0, 30.0, 22.0, 26.0, 30.0, 26.0, 26.0];

/// Rough Helvetica capacity at `FONT_SIZE`, used to cut long cells.
const MM_PER_CHAR: f32 = 1.9;

fn fit(text: &str, width: f32) -> String {
    let max_chars = ((width - 2.0) / MM_PER_CHAR).max(3.0) as usize;
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars - 3).collect();
        format!("{cut}...")
    }
}

fn draw_row(layer: &PdfLayerReference, cells: &[String], y: f32, font: &IndirectFontRef) {
    let mut x = MARGIN;
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        layer.use_text(fit(cell, width), FONT_SIZE, Mm(x), Mm(y), font);
        x += width;
    }
}

fn pdf_err<E: std::fmt::Debug>(e: E) -> ExportError {
    ExportError::Pdf(format!("{e:?}"))
}

/// Paginated table: the header row repeats at the top of every page.
pub fn write_pdf(table: &StructuredTable) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new("Suggestions", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

    let head: Vec<String> = table.head.iter().map(|h| h.to_string()).collect();
    let top = PAGE_HEIGHT - MARGIN;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    layer.use_text("Suggestions", TITLE_SIZE, Mm(MARGIN), Mm(top), &bold);
    let mut y = top - 2.0 * ROW_HEIGHT;
    draw_row(&layer, &head, y, &bold);

    for row in &table.body {
        y -= ROW_HEIGHT;
        if y < MARGIN {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table");
            layer = doc.get_page(page).get_layer(page_layer);
            y = top;
            draw_row(&layer, &head, y, &bold);
            y -= ROW_HEIGHT;
        }
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        draw_row(&layer, &cells, y, &regular);
    }

    doc.save_to_bytes().map_err(pdf_err)
}
