//! String conversion utilities.

/// Returns `None` for empty or whitespace-only input, otherwise the trimmed value.
///
/// # Examples
///
/// ```
/// use ugclab_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank("  hello "), Some("hello"));
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_become_none() {
        assert_eq!(none_if_blank(""), None);
        assert_eq!(none_if_blank("\n\t "), None);
        assert_eq!(none_if_blank(" x "), Some("x"));
    }
}
