//! Text helpers shared by every view node.

/// Strip control characters so content cannot inject terminal escape
/// sequences. Applied to every content-derived string.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\t' || c == '\n' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}

/// Cut `text` to at most `max_len` characters, ending in an ellipsis
pub fn shorten(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_len.saturating_sub(1)).collect();
    out.push('…');
    out
}

const OPENABLE_SCHEMES: &[&str] = &["https://", "http://", "mailto:", "tel:"];

/// Whether `href` may be handed to the desktop opener: web, mail and phone
/// links only, no whitespace.
pub fn is_openable_href(href: &str) -> bool {
    if href.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    OPENABLE_SCHEMES.iter().any(|scheme| {
        href.len() > scheme.len()
            && href
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

pub fn tel_href(phone: &str) -> String {
    format!("tel:{}", urlencoding::encode(phone))
}

/// Build a `mailto:` link with optional subject and body
pub fn mailto_href(email: &str, subject: Option<&str>, body: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(subject) = subject.filter(|s| !s.is_empty()) {
        params.push(format!("subject={}", urlencoding::encode(subject)));
    }
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        params.push(format!("body={}", urlencoding::encode(body)));
    }

    let mut href = format!("mailto:{}", urlencoding::encode(email));
    if !params.is_empty() {
        href.push('?');
        href.push_str(&params.join("&"));
    }
    href
}
