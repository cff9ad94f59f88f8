//! HTML escaping and search-term highlighting.

use regex::RegexBuilder;

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes `text` and wraps case-insensitive occurrences of `term` in a
/// highlight span.
///
/// Matches are found in the raw text and each piece is escaped on its own,
/// so a term never matches inside an entity.
pub fn highlight(text: &str, term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        return escape_html(text);
    }

    let re = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(_) => return escape_html(text),
    };

    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str(r#"<span class="highlight">"#);
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</span>");
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}
