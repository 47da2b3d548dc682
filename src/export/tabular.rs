use rust_xlsxwriter::{Format, Workbook};

use super::{Cell, ExportError, Row, TABULAR_HEADERS};

const SHEET_NAME: &str = "Suggestions";

pub fn write_csv(rows: &[Row]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(TABULAR_HEADERS)?;
    for row in rows {
        writer.write_record(row.iter().map(Cell::to_string))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
}

pub fn write_xlsx(rows: &[Row]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in TABULAR_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (index, row) in rows.iter().enumerate() {
        let row_num = index as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => sheet.write_string(row_num, col as u16, s.as_str())?,
                Cell::Int(n) => sheet.write_number(row_num, col as u16, *n as f64)?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}
