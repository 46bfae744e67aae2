//! Presentation helpers: lightweight markdown to HTML and back to plain text.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static BOLD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*").expect("bold regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static BULLET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^• (.+)$").expect("bullet regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static LIST_SPAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(<li>.*</li>)").expect("list span regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static BREAK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>").expect("break regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static INLINE_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(strong|b|ul)>").expect("inline tag regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static LIST_OPEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<li>").expect("list open regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static LIST_CLOSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</li>").expect("list close regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static ANY_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]+>").expect("tag regex is valid") // Static pattern, safe to panic
});

/// Escapes the characters that are significant in HTML text and attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Converts summary markdown to an HTML fragment.
///
/// The text is escaped first, so markup quoted from a page stays inert.
/// Bold spans become `<strong>`, `• ` lines become list items inside a single
/// `<ul>`, and newlines become `<br>`.
#[must_use]
pub fn to_html(text: &str) -> String {
    let escaped = escape_html(text);
    let bold = BOLD_PATTERN.replace_all(&escaped, "<strong>$1</strong>");
    let items = BULLET_PATTERN.replace_all(&bold, "<li>$1</li>");
    let listed = LIST_SPAN_PATTERN.replace(&items, "<ul>$1</ul>");
    let broken = listed.replace("\n\n", "<br><br>").replace('\n', "<br>");
    format!("<div style=\"line-height:1.8;font-size:14px;\">{broken}</div>")
}

/// Strips HTML produced by [`to_html`] (or any simple markup) to plain text.
#[must_use]
pub fn to_plain_text(html: &str) -> String {
    let text = BREAK_PATTERN.replace_all(html, "\n");
    let text = INLINE_TAG_PATTERN.replace_all(&text, "");
    let text = LIST_OPEN_PATTERN.replace_all(&text, "• ");
    let text = LIST_CLOSE_PATTERN.replace_all(&text, "\n");
    ANY_TAG_PATTERN.replace_all(&text, "").into_owned()
}

/// Removes every tag, keeping only text.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    ANY_TAG_PATTERN.replace_all(html, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html_bold_and_breaks() {
        assert_eq!(
            to_html("**Title**\n\nLine one\nLine two"),
            "<div style=\"line-height:1.8;font-size:14px;\">\
             <strong>Title</strong><br><br>Line one<br>Line two</div>"
        );
    }

    #[test]
    fn test_to_html_wraps_bullets_in_one_list() {
        let html = to_html("Intro\n• first\n• second\nOutro");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert!(html.contains("<ul><li>first</li><br><li>second</li></ul>"));
        assert!(html.ends_with("<br>Outro</div>"));
    }

    #[test]
    fn test_to_html_bold_does_not_span_lines() {
        let html = to_html("**open\nclose**");
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_to_html_escapes_quoted_markup() {
        let html = to_html("**Tip:** Use <script>alert(1)</script> & \"quotes\".");
        assert!(!html.contains("<script>"));
        assert!(html.contains(
            "<strong>Tip:</strong> Use &lt;script&gt;alert(1)&lt;/script&gt; &amp; &quot;quotes&quot;."
        ));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b && c > \"d\""), "a &lt; b &amp;&amp; c &gt; &quot;d&quot;");
    }

    #[test]
    fn test_to_plain_text_reverses_markup() {
        let html = "<div><strong>Key</strong><br><ul><li>one</li><li>two</li></ul></div>";
        assert_eq!(to_plain_text(html), "Key\n• one\n• two\n");
    }

    #[test]
    fn test_to_plain_text_handles_self_closing_breaks() {
        assert_eq!(to_plain_text("a<BR/>b<br />c"), "a\nb\nc");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello <em>there</em></p>"), "Hello there");
    }
}
