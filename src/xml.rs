//! XML escaping and small helpers for Alma request payloads.

/// Escape a string for embedding as XML text or attribute content.
///
/// The five reserved characters map to their named entities. `&` is
/// substituted first so the entities produced by the later passes are
/// not escaped a second time.
pub fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Title-case a code such as `PHYSICAL_NON_RETURNABLE` into
/// `Physical Non Returnable` for human-readable `desc` attributes.
pub fn title_case(code: &str) -> String {
    code.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
