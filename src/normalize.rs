/// Names at or below this many characters are dropped
pub const MIN_NAME_LEN: usize = 2;
/// Names at or above this many characters are dropped
pub const MAX_NAME_LEN: usize = 50;

/// Clean a raw ingredient string into a storable name.
///
/// Keeps ASCII letters, ASCII digits, whitespace and hyphens, then trims.
/// Returns `None` when the cleaned name is not strictly longer than
/// [`MIN_NAME_LEN`] and strictly shorter than [`MAX_NAME_LEN`] characters.
/// Dropping is a filtering policy, not an error.
pub fn normalize_name(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    let trimmed = cleaned.trim();

    let len = trimmed.chars().count();
    if len > MIN_NAME_LEN && len < MAX_NAME_LEN {
        Some(trimmed.to_string())
    } else {
        None
    }
}
