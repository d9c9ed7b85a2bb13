//! Data access for venues, artists and shows.
//!
//! Every function takes the pool explicitly. Writes run as a single
//! transaction finished through [`crate::db::finish`]; reads that classify
//! shows take the caller's `now` so one request sees one clock.

pub mod artist;
pub mod show;
pub mod venue;

/// `ILIKE` pattern matching `term` anywhere, with wildcards in `term` taken literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_matches_everything() {
        assert_eq!(contains_pattern(""), "%%");
        assert_eq!(contains_pattern("   "), "%%");
    }

    #[test]
    fn test_wildcards_are_escaped() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_plain_term() {
        assert_eq!(contains_pattern(" band "), "%band%");
    }
}
