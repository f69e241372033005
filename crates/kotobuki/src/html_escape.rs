//! HTML escaping for rendered text, attributes and inline CSS.

/// Escape HTML special characters: & < > " '
pub fn escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    escape_into(&mut output, input);
    output
}

/// Append `input` to `output` with HTML special characters escaped
pub fn escape_into(output: &mut String, input: &str) {
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
}

/// Make stylesheet text safe to embed in a `<style>` element
pub fn escape_style_text(css: &str) -> String {
    css.replace("</", "<\\/")
}

/// URL schemes allowed in `href` and `src` attributes
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Whether a URL taken from data may be placed in an `href` or `src`.
///
/// Relative references are allowed, as are `http`, `https`, `mailto`, `tel`
/// and `data:image/`. Whitespace and control characters are ignored while
/// reading the scheme, the same way browsers ignore them.
pub fn is_safe_url(reference: &str) -> bool {
    let compact: String = reference
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();

    let Some(colon) = compact.find(':') else {
        return true;
    };
    let scheme = &compact[..colon];
    let is_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !is_scheme {
        // `/`, `?` or `#` before the colon: a relative reference
        return true;
    }

    let scheme = scheme.to_ascii_lowercase();
    if scheme == "data" {
        return compact[colon + 1..]
            .to_ascii_lowercase()
            .starts_with("image/");
    }
    SAFE_SCHEMES.contains(&scheme.as_str())
}

/// Convert a camelCase style property (`animationDelay`) to CSS (`animation-delay`)
pub fn css_property(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut property = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            property.push('-');
            property.push(c.to_ascii_lowercase());
        } else {
            property.push(c);
        }
    }
    property
}
