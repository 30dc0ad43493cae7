pub const KEY_SEPARATOR: char = ',';

/// Splits a comma-separated key list. All whitespace is dropped first, so
/// `"a, b,c"` and `"a,b,c"` give the same keys. Empty entries are skipped.
pub fn split_keys(image_keys: &str) -> Vec<String> {
    let compact: String = image_keys.chars().filter(|c| !c.is_whitespace()).collect();

    compact
        .split(KEY_SEPARATOR)
        .filter(|key| !key.is_empty())
        .map(|key| key.to_string())
        .collect()
}
