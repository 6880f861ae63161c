use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::info;

use crate::error::ExportError;
use crate::models::LineItem;
use crate::utils::format_decimal;

pub const HEADERS: [&str; 7] = [
    "Item No",
    "Item Name",
    "Stock Unit",
    "Unit Price",
    "Packing Unit",
    "Order Qty",
    "Net Amount",
];

/// Builds a single-sheet workbook: one header row, then one row per line item.
/// Money columns are written as two-decimal text.
pub fn export_to_spreadsheet(line_items: &[LineItem], sheet_name: &str) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    worksheet.set_column_width(1, 24)?;

    for (index, item) in line_items.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, item.item_no.as_str())?;
        worksheet.write_string(row, 1, item.item_name.as_str())?;
        worksheet.write_string(row, 2, item.stock_unit.as_str())?;
        worksheet.write_string(row, 3, format_decimal(item.unit_price))?;
        worksheet.write_string(row, 4, item.packing_unit.as_str())?;
        worksheet.write_number(row, 5, item.order_qty)?;
        worksheet.write_string(row, 6, format_decimal(item.net_amount))?;
    }

    let bytes = workbook.save_to_buffer()?;
    info!(rows = line_items.len(), bytes = bytes.len(), "spreadsheet built");
    Ok(bytes)
}

pub fn write_export(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    info!(path = %path.display(), "spreadsheet saved");
    Ok(())
}
