//! System clipboard access through `arboard`.
//!
//! A clipboard handle is opened per copy; headless sessions have none and
//! the caller falls back to showing the text.

use anyhow::{Context, Result};
use arboard::Clipboard;

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
