//! HTML escaping and link-target allow-listing.

/// URL schemes allowed in exported anchors. Anything else becomes `#`.
const ALLOWED_SCHEMES: &[&str] = &["http://", "https://", "mailto:"];

/// Escape `& < > " '` for use in element text and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Attribute-ready `href` value: the escaped URL when its scheme is allowed,
/// otherwise `#`.
pub fn safe_href(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if ALLOWED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        escape_html(trimmed)
    } else {
        "#".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn allows_web_and_mail_links() {
        assert_eq!(safe_href("https://acme.com/?a=1&b=2"), "https://acme.com/?a=1&amp;b=2");
        assert_eq!(safe_href(" HTTP://ACME.COM "), "HTTP://ACME.COM");
        assert_eq!(safe_href("mailto:sales@acme.com"), "mailto:sales@acme.com");
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href("JavaScript:alert(1)"), "#");
        assert_eq!(safe_href("data:text/html;base64,PHNjcmlwdD4="), "#");
        assert_eq!(safe_href("//evil.example"), "#");
        assert_eq!(safe_href(""), "#");
    }
}
