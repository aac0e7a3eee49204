use anyhow::{Context, Result};

/// Somewhere summary text can be copied to
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard, opened on demand for each copy
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to write to clipboard")?;
        tracing::debug!("Copied {} chars to clipboard", text.len());
        Ok(())
    }
}
