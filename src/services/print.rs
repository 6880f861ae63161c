use std::fmt::Write as _;
use tracing::{debug, warn};

use crate::error::PrintError;
use crate::models::{LineItem, OrderHeader};
use crate::services::purchase_order::total;
use crate::utils::{escape_html, format_money};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub title: String,
    pub html: String,
}

/// The printed page navigates here from its `afterprint` handler so the host
/// knows the print dialog is finished. The navigation itself is never allowed.
pub const AFTERPRINT_URL: &str = "https://itemdesk.localhost/afterprint";

pub fn is_afterprint_signal(url: &str) -> bool {
    url.trim_end_matches('/') == AFTERPRINT_URL
}

/// A transient place to show a document and print it from.
pub trait PrintSurface {
    fn open(&mut self, document: &PrintDocument) -> Result<(), PrintError>;
    /// Starts printing. Some platforms return before the print dialog is done.
    fn print(&mut self) -> Result<(), PrintError>;
    /// Tears the surface down. After a successful `print` this waits for the
    /// page's `afterprint` signal first.
    fn close(&mut self);
}

pub fn render_printable_document(header: &OrderHeader, line_items: &[LineItem], currency_symbol: &str) -> PrintDocument {
    let mut rows = String::new();
    for item in line_items {
        // Writing into a String cannot fail.
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
            escape_html(&item.item_no),
            escape_html(&item.item_name),
            item.stock_unit,
            escape_html(&format_money(currency_symbol, item.unit_price)),
            escape_html(&item.packing_unit),
            item.order_qty,
            escape_html(&format_money(currency_symbol, item.net_amount)),
        );
    }

    let body = if line_items.is_empty() {
        "<p class=\"empty\">No items added.</p>".to_string()
    } else {
        format!(
            "<table><thead><tr><th>Item No</th><th>Item Name</th><th>Stock Unit</th><th>Unit Price</th>\
             <th>Packing Unit</th><th>Order Qty</th><th>Net Amount</th></tr></thead><tbody>{}</tbody></table>",
            rows
        )
    };

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Print Purchase Order</title>
<style>
body {{ font-family: sans-serif; margin: 24px; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #999; padding: 4px 8px; text-align: left; }}
td.num {{ text-align: right; }}
.total {{ margin-top: 16px; font-weight: bold; font-size: 1.2em; }}
</style>
</head>
<body>
<div class="header">
<h1>Purchase Order</h1>
<p>Supplier: {supplier}</p>
<p>Order No: {order_no}</p>
<p>Order Date: {order_date}</p>
</div>
<div>{body}</div>
<div class="total">Total: {total}</div>
<script>window.onafterprint = function () {{ window.location.replace("{afterprint}"); }};</script>
</body>
</html>
"#,
        supplier = escape_html(&header.supplier_name),
        order_no = escape_html(&header.order_no),
        order_date = escape_html(&header.order_date),
        body = body,
        total = escape_html(&format_money(currency_symbol, total(line_items))),
        afterprint = AFTERPRINT_URL,
    );

    PrintDocument {
        title: format!("Purchase Order {}", header.order_no),
        html,
    }
}

/// Opens the surface, prints, and closes it again whatever the outcome.
pub fn print_document<S: PrintSurface>(surface: &mut S, document: &PrintDocument) -> Result<(), PrintError> {
    surface.open(document)?;
    debug!(title = %document.title, "print surface opened");

    let result = surface.print();
    if let Err(err) = &result {
        warn!(error = %err, "printing failed");
    }

    surface.close();
    debug!(title = %document.title, "print surface closed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StockUnit;

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<&'static str>,
        fail_open: bool,
        fail_print: bool,
    }

    impl PrintSurface for RecordingSurface {
        fn open(&mut self, _document: &PrintDocument) -> Result<(), PrintError> {
            self.calls.push("open");
            if self.fail_open {
                return Err(PrintError::Open("no display".to_string()));
            }
            Ok(())
        }

        fn print(&mut self) -> Result<(), PrintError> {
            self.calls.push("print");
            if self.fail_print {
                return Err(PrintError::Print("cancelled".to_string()));
            }
            Ok(())
        }

        fn close(&mut self) {
            self.calls.push("close");
        }
    }

    fn header() -> OrderHeader {
        OrderHeader {
            order_no: "PO-1".to_string(),
            order_date: "01/02/2024".to_string(),
            supplier_name: "Supplier <B>".to_string(),
        }
    }

    fn line(qty: f64, price: f64) -> LineItem {
        LineItem {
            item_no: "I1".to_string(),
            item_name: "Widget".to_string(),
            stock_unit: StockUnit::Pcs,
            unit_price: price,
            packing_unit: "box".to_string(),
            order_qty: qty,
            net_amount: qty * price,
        }
    }

    #[test]
    fn document_carries_header_items_and_total() {
        let doc = render_printable_document(&header(), &[line(3.0, 12.5), line(3.0, 12.5)], "$");
        assert!(doc.html.contains("<h1>Purchase Order</h1>"));
        assert!(doc.html.contains("Supplier: Supplier &lt;B&gt;"));
        assert!(doc.html.contains("Order No: PO-1"));
        assert!(doc.html.contains("Order Date: 01/02/2024"));
        assert!(doc.html.contains("$37.50"));
        assert!(doc.html.contains("Total: $75.00"));
        assert_eq!(doc.title, "Purchase Order PO-1");
    }

    #[test]
    fn empty_order_prints_placeholder() {
        let doc = render_printable_document(&header(), &[], "$");
        assert!(doc.html.contains("No items added."));
        assert!(doc.html.contains("Total: $0.00"));
    }

    #[test]
    fn document_signals_when_printing_is_done() {
        let doc = render_printable_document(&header(), &[], "$");
        assert!(doc
            .html
            .contains(&format!("window.onafterprint = function () {{ window.location.replace(\"{}\"); }};", AFTERPRINT_URL)));
        assert!(!doc.html.contains("window.close()"));
    }

    #[test]
    fn only_the_afterprint_url_is_a_signal() {
        assert!(is_afterprint_signal(AFTERPRINT_URL));
        assert!(is_afterprint_signal("https://itemdesk.localhost/afterprint/"));
        assert!(!is_afterprint_signal("https://itemdesk.localhost/"));
        assert!(!is_afterprint_signal("data:text/html;base64,AAAA"));
    }

    #[test]
    fn surface_is_closed_after_print() {
        let mut surface = RecordingSurface::default();
        let doc = render_printable_document(&header(), &[], "$");
        print_document(&mut surface, &doc).unwrap();
        assert_eq!(surface.calls, ["open", "print", "close"]);
    }

    #[test]
    fn surface_is_closed_when_print_fails() {
        let mut surface = RecordingSurface {
            fail_print: true,
            ..Default::default()
        };
        let doc = render_printable_document(&header(), &[], "$");
        assert!(print_document(&mut surface, &doc).is_err());
        assert_eq!(surface.calls, ["open", "print", "close"]);
    }

    #[test]
    fn nothing_to_close_when_open_fails() {
        let mut surface = RecordingSurface {
            fail_open: true,
            ..Default::default()
        };
        let doc = render_printable_document(&header(), &[], "$");
        assert!(matches!(print_document(&mut surface, &doc), Err(PrintError::Open(_))));
        assert_eq!(surface.calls, ["open"]);
    }
}
