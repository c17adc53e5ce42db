//! HTML escaping.

use std::borrow::Cow;

/// Escape the five HTML-reserved characters in a single pass.
///
/// `&`, `<`, `>`, `"` and `'` are ASCII, so scanning bytes never lands inside
/// a multi-byte UTF-8 sequence. Input without any of them is returned
/// borrowed.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let mut out = String::new();
    let mut last = 0;

    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if out.is_empty() {
            out.reserve(input.len() + 16);
        }
        out.push_str(&input[last..i]);
        out.push_str(esc);
        last = i + 1;
    }

    if last == 0 {
        Cow::Borrowed(input)
    } else {
        out.push_str(&input[last..]);
        Cow::Owned(out)
    }
}

/// Escape `input` and append it to `out`.
pub fn push_escaped(out: &mut String, input: &str) {
    out.push_str(&escape_html(input));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_all_five() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_untouched_input_is_borrowed() {
        let out = escape_html("plain text, ünïcödé 🎉");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "plain text, ünïcödé 🎉");
    }

    #[test]
    fn test_multibyte_neighbours_survive() {
        assert_eq!(escape_html("é<ü>🎉&"), "é&lt;ü&gt;🎉&amp;");
    }

    #[test]
    fn test_not_idempotent() {
        let once = escape_html("&");
        let twice = escape_html(&once).into_owned();
        assert_eq!(once, "&amp;");
        assert_eq!(twice, "&amp;amp;");
    }

    #[test]
    fn test_edges() {
        assert_eq!(escape_html(""), "");
        assert_eq!(escape_html("<"), "&lt;");
        assert_eq!(escape_html("a'"), "a&#39;");
    }

    #[test]
    fn test_push_escaped() {
        let mut out = String::from("Hi ");
        push_escaped(&mut out, "<b>");
        assert_eq!(out, "Hi &lt;b&gt;");
    }
}
