use anyhow::{Result, anyhow};
use clipboard_rs::{Clipboard, ClipboardContext};

/// Write-only clipboard access.
pub trait ClipboardPort: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The host clipboard. A fresh context is opened per write.
pub struct SystemClipboard;

impl ClipboardPort for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let ctx = ClipboardContext::new().map_err(|e| anyhow!("clipboard unavailable: {}", e))?;
        ctx.set_text(text.to_string())
            .map_err(|e| anyhow!("clipboard write failed: {}", e))
    }
}

/// Used on headless hosts; every write fails so no "copied" ack is given.
pub struct DisabledClipboard;

impl ClipboardPort for DisabledClipboard {
    fn write_text(&self, _text: &str) -> Result<()> {
        Err(anyhow!("clipboard disabled"))
    }
}
