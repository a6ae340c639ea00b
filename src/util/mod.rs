//! Small helpers shared by the settings loader and the command handlers.

pub mod config;

use unicode_width::UnicodeWidthStr;

/// What: Pad `text` with spaces to `width` display columns.
///
/// Inputs:
/// - `text`: Cell content.
/// - `width`: Target width in terminal columns.
///
/// Output:
/// - `text` followed by enough spaces to fill `width`; unchanged when already wider.
///
/// Details:
/// - Uses `unicode_width` so labels with wide characters keep columns aligned.
#[must_use]
pub fn pad_display(text: &str, width: usize) -> String {
    let used = text.width();
    let mut out = String::with_capacity(text.len() + width.saturating_sub(used));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

/// Display width of `text` in terminal columns.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}
