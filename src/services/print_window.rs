use base64::{engine::general_purpose, Engine as _};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc;
use std::time::Duration;
use tauri::webview::PageLoadEvent;
use tauri::{AppHandle, Url, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use tracing::debug;

use crate::error::PrintError;
use crate::services::print::{is_afterprint_signal, PrintDocument, PrintSurface};

static NEXT_PRINT_WINDOW: AtomicU32 = AtomicU32::new(1);
const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(10);
const AFTERPRINT_TIMEOUT: Duration = Duration::from_secs(600);

/// Prints from a throwaway webview window. Must not be driven from the main
/// thread: `print` blocks until the page has loaded and `close` blocks until
/// the print dialog is dismissed.
pub struct WebviewPrintSurface {
    app: AppHandle,
    window: Option<WebviewWindow>,
    loaded: Option<mpsc::Receiver<()>>,
    afterprint: Option<mpsc::Receiver<()>>,
    printing: bool,
}

impl WebviewPrintSurface {
    pub fn new(app: AppHandle) -> Self {
        WebviewPrintSurface {
            app,
            window: None,
            loaded: None,
            afterprint: None,
            printing: false,
        }
    }
}

impl PrintSurface for WebviewPrintSurface {
    fn open(&mut self, document: &PrintDocument) -> Result<(), PrintError> {
        let url = format!(
            "data:text/html;base64,{}",
            general_purpose::STANDARD.encode(document.html.as_bytes())
        );
        let url = Url::parse(&url).map_err(|e| PrintError::Open(e.to_string()))?;
        let label = format!("print-{}", NEXT_PRINT_WINDOW.fetch_add(1, Ordering::Relaxed));

        let (tx, rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();
        let window = WebviewWindowBuilder::new(&self.app, label, WebviewUrl::External(url))
            .title(document.title.as_str())
            .inner_size(820.0, 1000.0)
            .on_page_load(move |_, payload| {
                if matches!(payload.event(), PageLoadEvent::Finished) {
                    let _ = tx.send(());
                }
            })
            .on_navigation(move |url| {
                if is_afterprint_signal(url.as_str()) {
                    let _ = done_tx.send(());
                    return false;
                }
                true
            })
            .build()
            .map_err(|e| PrintError::Open(e.to_string()))?;

        self.window = Some(window);
        self.loaded = Some(rx);
        self.afterprint = Some(done_rx);
        Ok(())
    }

    fn print(&mut self) -> Result<(), PrintError> {
        let window = self
            .window
            .as_ref()
            .ok_or_else(|| PrintError::Print("print window is not open".to_string()))?;
        if let Some(loaded) = self.loaded.take() {
            loaded
                .recv_timeout(PAGE_LOAD_TIMEOUT)
                .map_err(|_| PrintError::Print("print window did not finish loading".to_string()))?;
        }
        window.print().map_err(|e| PrintError::Print(e.to_string()))?;
        self.printing = true;
        Ok(())
    }

    fn close(&mut self) {
        let afterprint = self.afterprint.take();
        if std::mem::take(&mut self.printing) {
            if let Some(afterprint) = afterprint {
                // Disconnected means the user closed the window themselves.
                match afterprint.recv_timeout(AFTERPRINT_TIMEOUT) {
                    Ok(()) => debug!("print dialog finished"),
                    Err(err) => debug!(error = %err, "no afterprint signal"),
                }
            }
        }
        if let Some(window) = self.window.take() {
            if let Err(err) = window.destroy() {
                debug!(error = %err, "print window already gone");
            }
        }
    }
}
