//! Markup helpers for the notification emails.
//!
//! Every user-supplied value interpolated into markup goes through [`escape`]
//! exactly once: helpers take either raw text (escaped here) or
//! already-rendered fragments, never a mix in the same argument.

/// Escape the HTML-significant characters of untrusted text
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap pre-rendered body markup into a complete HTML document
pub fn document(styles: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n<style>\n{}\n</style>\n</head>\n<body>\n{}\n</body>\n</html>",
        styles, body
    )
}

pub fn banner(text: &str) -> String {
    format!("<div class=\"header\"><h2>{}</h2></div>", escape(text))
}

/// `inner` is pre-rendered markup; the title is escaped here
pub fn section(title: &str, inner: &str) -> String {
    format!(
        "<div class=\"section\"><div class=\"section-title\">{}</div><div class=\"divider\"></div>{}</div>",
        escape(title),
        inner
    )
}

pub fn field(label: &str, value: &str) -> String {
    format!(
        "<div class=\"field\"><span class=\"field-label\">{}:</span> {}</div>",
        escape(label),
        escape(value)
    )
}

pub fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", escape(text))
}

/// `fields` is pre-rendered markup; the heading is escaped here
pub fn item_block(heading: &str, fields: &str) -> String {
    format!(
        "<div class=\"item\"><strong>{}</strong><br>{}</div>",
        escape(heading),
        fields
    )
}

/// Free text rendered with preserved line breaks (`white-space: pre-wrap`)
pub fn comment_block(text: &str) -> String {
    format!("<div class=\"comment\">{}</div>", escape(text))
}

/// `inner` is pre-rendered markup
pub fn footer(inner: &str) -> String {
    format!("<div class=\"footer\">{}</div>", inner)
}
