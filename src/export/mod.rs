//! Workbook assembly: record tables → multi-sheet xlsx byte buffer.

use crate::models::RecordTable;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use serde_json::Value;

/// Column headers for one table: every key across its rows, in first-seen
/// order.
fn header_order(table: &RecordTable) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in table {
        for key in row.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<(), XlsxError> {
    match value {
        Value::Null => Ok(()),
        Value::Number(n) => match n.as_f64() {
            Some(f) => sheet.write_number(row, col, f).map(|_| ()),
            None => sheet.write_string(row, col, n.to_string()).map(|_| ()),
        },
        Value::Bool(b) => sheet.write_boolean(row, col, *b).map(|_| ()),
        Value::String(s) => sheet.write_string(row, col, s.as_str()).map(|_| ()),
        other => sheet.write_string(row, col, other.to_string()).map(|_| ()),
    }
}

/// Assemble named record tables into one workbook, one sheet per table, in
/// the order supplied. Rows keep their order; keys absent on a row leave the
/// cell blank. Identical input always yields identical sheet content.
pub fn assemble_workbook(sheets: &[(&str, &RecordTable)]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    for (name, table) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name)?;
        let headers = header_order(table);
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, header.as_str())?;
        }
        for (i, row) in table.iter().enumerate() {
            for (col, header) in headers.iter().enumerate() {
                if let Some(value) = row.get(header) {
                    write_cell(sheet, (i + 1) as u32, col as u16, value)?;
                }
            }
        }
    }
    workbook.save_to_buffer()
}
