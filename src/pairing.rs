//! Pairing payload display.

use log::{error, info};

/// Renders a one-time pairing payload for a companion device to scan.
pub trait PairingRenderer: Send + Sync {
    fn render(&self, code: &str, compact: bool);
}

/// Draws the payload as a QR code on the terminal.
#[derive(Debug, Clone, Default)]
pub struct QrTerminalRenderer;

impl PairingRenderer for QrTerminalRenderer {
    fn render(&self, code: &str, _compact: bool) {
        // qr2term always draws the dense half-block form.
        if let Err(e) = qr2term::print_qr(code) {
            error!("Failed to render QR code: {e}");
        }
        info!("Raw pairing payload: {code}");
    }
}
