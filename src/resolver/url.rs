/// Make sure a destination carries a scheme.
///
/// Blank input yields `""`. Anything already starting with `http://` or
/// `https://` is returned trimmed; everything else gets `https://` in front.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.to_string();
    }
    format!("https://{}", trimmed)
}
