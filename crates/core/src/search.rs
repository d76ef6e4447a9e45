//! Helpers for the title/author substring search.

/// Escape character used in generated `ILIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Build a case-insensitive substring pattern for `ILIKE`.
///
/// `%`, `_` and the escape character itself are escaped so user input is
/// matched literally.
///
/// # Examples
///
/// ```
/// use booklib_core::search::substring_pattern;
/// assert_eq!(substring_pattern("tolstoy"), "%tolstoy%");
/// assert_eq!(substring_pattern("100%"), "%100\\%%");
/// ```
pub fn substring_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Accept a raw search query. Returns `None` when it is absent or blank;
/// otherwise the term is returned unchanged, surrounding spaces included.
pub fn normalize_query(raw: Option<&str>) -> Option<&str> {
    raw.filter(|q| !q.trim().is_empty())
}
