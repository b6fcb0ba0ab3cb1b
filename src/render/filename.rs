/// Download name for an export: lower-cased title, whitespace runs as `-`.
pub fn export_filename(title: &str, extension: &str) -> String {
    let slug = title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() { "qr-code".to_string() } else { slug };
    format!("{}.{}", slug, extension)
}
