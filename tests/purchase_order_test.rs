use std::io::{Cursor, Read};

use chrono::{Local, TimeZone};
use itemdesk::db::InMemoryRepository;
use itemdesk::error::ValidationError;
use itemdesk::models::{DialogState, LineItem, Settings, StockUnit};
use itemdesk::services::export::{export_to_spreadsheet, write_export};
use itemdesk::services::purchase_order::{total, PurchaseOrderScreen};
use itemdesk::services::suppliers::SupplierDirectory;

fn mount() -> PurchaseOrderScreen {
    let now = Local.timestamp_millis_opt(1_717_171_717_171).unwrap();
    PurchaseOrderScreen::mount_at(
        InMemoryRepository::new(),
        SupplierDirectory::builtin(),
        &Settings::default(),
        now,
    )
}

fn add_line(screen: &mut PurchaseOrderScreen, qty: &str, price: &str) -> Result<usize, ValidationError> {
    screen.open_item_form();
    screen.update_draft("item_no", "I1").unwrap();
    screen.update_draft("item_name", "Widget").unwrap();
    screen.update_draft("stock_unit", "pcs").unwrap();
    screen.update_draft("packing_unit", "box").unwrap();
    screen.update_draft("order_qty", qty).unwrap();
    screen.update_draft("unit_price", price).unwrap();
    screen.add_line_item()
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("xlsx is a zip archive");
    let mut part = archive.by_name(name).expect("part present");
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

fn widget() -> LineItem {
    LineItem {
        item_no: "I1".to_string(),
        item_name: "Widget".to_string(),
        stock_unit: StockUnit::Pcs,
        unit_price: 2.0,
        packing_unit: "box".to_string(),
        order_qty: 5.0,
        net_amount: 10.0,
    }
}

#[test]
fn net_amount_and_total_accumulate() {
    let mut screen = mount();
    add_line(&mut screen, "3", "12.50").unwrap();
    assert_eq!(screen.line_items()[0].net_amount, 37.5);

    add_line(&mut screen, "3", "12.50").unwrap();
    assert_eq!(screen.total(), 75.0);
    assert_eq!(screen.view("$").formatted_total, "$75.00");
}

#[test]
fn order_no_is_stable_across_additions() {
    let mut screen = mount();
    let before = screen.header().order_no.clone();
    add_line(&mut screen, "1", "1").unwrap();
    let middle = screen.header().order_no.clone();
    add_line(&mut screen, "2", "1").unwrap();

    assert_eq!(before, middle);
    assert_eq!(middle, screen.header().order_no);
    assert_eq!(before, "PO-1717171717171");
}

#[test]
fn non_numeric_quantity_is_rejected() {
    let mut screen = mount();
    add_line(&mut screen, "2", "1").unwrap();

    let err = add_line(&mut screen, "a dozen", "1").unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidNumber {
            field: "order_qty",
            value: "a dozen".to_string()
        }
    );
    assert_eq!(screen.line_items().len(), 1);
    assert_eq!(screen.dialog(), DialogState::ShowingItemForm);
    assert_eq!(screen.draft().order_qty, "a dozen");
}

#[test]
fn supplier_picker_sets_name_and_closes() {
    let mut screen = mount();
    screen.open_supplier_picker();
    assert_eq!(screen.dialog(), DialogState::ShowingSupplierPicker);

    screen.select_supplier(2).unwrap();
    assert_eq!(screen.header().supplier_name, "Supplier B");
    assert_eq!(screen.dialog(), DialogState::Closed);
}

#[test]
fn total_is_recomputed_from_the_list() {
    let lines = vec![widget(), widget(), widget()];
    assert_eq!(total(&lines), 30.0);
    assert_eq!(total(&lines[..1]), 10.0);
}

#[test]
fn empty_export_has_only_the_header_row() {
    let bytes = export_to_spreadsheet(&[], "Purchase Order").unwrap();
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    assert_eq!(sheet.matches("<row ").count(), 1);

    let strings = read_part(&bytes, "xl/sharedStrings.xml");
    for header in ["Item No", "Item Name", "Stock Unit", "Unit Price", "Packing Unit", "Order Qty", "Net Amount"] {
        assert!(strings.contains(header), "missing header {header}");
    }

    let workbook = read_part(&bytes, "xl/workbook.xml");
    assert!(workbook.contains("name=\"Purchase Order\""));
}

#[test]
fn single_line_export_formats_money_as_text() {
    let bytes = export_to_spreadsheet(&[widget()], "Purchase Order").unwrap();
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    assert_eq!(sheet.matches("<row ").count(), 2);
    assert!(sheet.contains("<v>5</v>"));

    let strings = read_part(&bytes, "xl/sharedStrings.xml");
    for value in ["I1", "Widget", "pcs", "2.00", "box", "10.00"] {
        assert!(strings.contains(&format!(">{value}<")), "missing cell {value}");
    }
}

#[test]
fn many_lines_export_one_row_each() {
    let lines: Vec<LineItem> = (0..25).map(|_| widget()).collect();
    let bytes = export_to_spreadsheet(&lines, "Purchase Order").unwrap();
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    assert_eq!(sheet.matches("<row ").count(), 26);
}

#[test]
fn export_can_be_saved_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("purchase_order.xlsx");
    let bytes = export_to_spreadsheet(&[widget()], "Purchase Order").unwrap();

    write_export(&path, &bytes).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}
