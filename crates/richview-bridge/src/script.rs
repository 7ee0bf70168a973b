//! Script builders for the content-runtime bridge surface.
//!
//! The bundled bridge script (`assets/bridge.js`) exposes a single `RV`
//! object inside the document. Everything native code wants from the
//! content side goes through one of these `RV.*` calls, evaluated via the
//! command channel. String arguments are escaped for a single-quoted JS
//! string literal before interpolation.

/// Reserved scheme+host used as a legacy drain signal. Never routed;
/// the navigation handler cancels it unconditionally.
pub const RESERVED_CALLBACK_PREFIX: &str = "richview-callback://";

/// Line height the bundled stylesheet starts from, in CSS pixels.
pub const DEFAULT_LINE_HEIGHT: u32 = 28;

/// Body of the IPC doorbell message the bridge script posts after each
/// enqueue.
pub const DRAIN_SIGNAL: &str = "drain";

/// Drains the content-side event queue: returns the queued event names as
/// a JSON-stringified array and clears the queue.
pub const GET_QUEUE: &str = "RV.getCommandQueue()";

pub const GET_HTML: &str = "RV.getHtml()";
pub const GET_TEXT: &str = "RV.getText()";
pub const GET_HEIGHT: &str = "RV.getHeight()";
pub const RANGE_SELECTION_EXISTS: &str = "RV.rangeSelectionExists()";
pub const GET_SELECTED_HREF: &str = "RV.getSelectedHref()";
pub const SCROLL_CARET_TO_VISIBLE: &str = "RV.scrollCaretToVisible()";

pub fn set_html(html: &str) -> String {
    format!("RV.setHtml('{}')", escape_single_quoted(html))
}

pub fn set_placeholder_text(text: &str) -> String {
    format!("RV.setPlaceholderText('{}')", escape_single_quoted(text))
}

pub fn set_line_height(px: u32) -> String {
    format!("RV.setLineHeight('{px}px')")
}

pub fn set_font_size(px: u32) -> String {
    format!("RV.setFontSize('{px}px')")
}

/// Escape a string for interpolation into a single-quoted JS literal.
///
/// Covers the quote and backslash, control characters that would break the
/// literal, and U+2028/U+2029 which are line terminators in JS source even
/// though they are valid inside JSON strings.
pub fn escape_single_quoted(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0}' => out.push_str("\\0"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape_single_quoted(r"it's a \ test"), r"it\'s a \\ test");
    }

    #[test]
    fn escapes_newlines_and_tabs() {
        assert_eq!(escape_single_quoted("a\nb\r\tc"), "a\\nb\\r\\tc");
    }

    #[test]
    fn escapes_js_line_separators() {
        assert_eq!(
            escape_single_quoted("a\u{2028}b\u{2029}c"),
            "a\\u2028b\\u2029c"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_single_quoted("<b>hi</b>"), "<b>hi</b>");
    }

    #[test]
    fn set_html_wraps_escaped_content() {
        assert_eq!(
            set_html("<p>it's</p>"),
            r"RV.setHtml('<p>it\'s</p>')"
        );
    }

    #[test]
    fn set_line_height_appends_px_unit() {
        assert_eq!(set_line_height(28), "RV.setLineHeight('28px')");
    }

    #[test]
    fn set_placeholder_escapes_text() {
        assert_eq!(
            set_placeholder_text("Type\nhere"),
            "RV.setPlaceholderText('Type\\nhere')"
        );
    }
}
