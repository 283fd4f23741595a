use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};
use serde_json::Value;

use crate::pcs::tools::error::Result;
use crate::pcs::tools::model::IndicatorRecord;

/// Name of the single sheet of the exported workbook.
pub const SHEET_NAME: &str = "Indicadores";

/// Header row of the exported sheet, in column order.
pub const COLUMN_HEADERS: [&str; 13] = [
    "ODS nº",
    "Meta Nº",
    "Meta Descrição",
    "Discriminação",
    "2017",
    "2018",
    "2019",
    "2020",
    "2021",
    "2022",
    "2023",
    "2024",
    "Fonte",
];

/// Display width of each column, index-matched to `COLUMN_HEADERS`.
const COLUMN_WIDTHS: [f64; 13] = [
    8.0, 8.0, 60.0, 40.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 20.0,
];

/// Writes the provided records to the given path, overwriting any existing
/// file.
pub fn write_workbook(path: &Path, records: &[IndicatorRecord]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col_idx, header) in COLUMN_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        write_record(worksheet, (row_idx + 1) as u32, record)?;
    }

    for (col_idx, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col_idx as u16, *width)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_record(worksheet: &mut Worksheet, row: u32, record: &IndicatorRecord) -> Result<()> {
    worksheet.write_number(row, 0, record.goal)?;
    worksheet.write_string(row, 1, &record.target_number)?;
    worksheet.write_string(row, 2, &record.target_description)?;
    worksheet.write_string(row, 3, &record.discrimination)?;

    for (offset, value) in record.years.iter().enumerate() {
        write_value(worksheet, row, 4 + offset as u16, value)?;
    }

    let source_col = (COLUMN_HEADERS.len() - 1) as u16;
    worksheet.write_string(row, source_col, &record.source)?;
    Ok(())
}

/// Writes one year cell, keeping the source's typing: numbers stay numeric,
/// text stays text, and empty values produce a blank cell.
fn write_value(worksheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Null => {}
        Value::String(text) => {
            worksheet.write_string(row, col, text)?;
        }
        Value::Number(number) => match number.as_f64() {
            Some(number) => {
                worksheet.write_number(row, col, number)?;
            }
            None => {
                worksheet.write_string(row, col, number.to_string())?;
            }
        },
        Value::Bool(flag) => {
            worksheet.write_boolean(row, col, *flag)?;
        }
        other => {
            worksheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}
