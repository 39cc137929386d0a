//! Parsing of user-entered index selections like `1-3,5`.

use thiserror::Error;

/// Invalid selection input. The caller is expected to ask again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Range token that is malformed, inverted, or outside the allowed indices.
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// Single token that is not a number or is outside the allowed indices.
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

/// Parse a comma-separated list of 1-based numbers and inclusive ranges into 0-based indices.
///
/// Every value must be within `1..=max_index`.
/// Duplicates and overlapping ranges are kept in input order.
///
/// ```rust
/// use mvcommon::parse_selection;
///
/// assert_eq!(parse_selection("1-3,5", 5).unwrap(), vec![0, 1, 2, 4]);
/// assert!(parse_selection("3-1", 5).is_err());
/// ```
///
/// # Errors
/// Returns `SelectionError::InvalidRange` or `SelectionError::InvalidNumber` for the first invalid token.
pub fn parse_selection(input: &str, max_index: usize) -> Result<Vec<usize>, SelectionError> {
    let mut indices = Vec::new();
    for token in input.split(',').map(str::trim) {
        if token.contains('-') {
            let (start, end) =
                parse_range(token, max_index).ok_or_else(|| SelectionError::InvalidRange(token.to_string()))?;
            indices.extend((start..=end).map(|number| number - 1));
        } else {
            let number = token
                .parse::<usize>()
                .ok()
                .filter(|number| (1..=max_index).contains(number))
                .ok_or_else(|| SelectionError::InvalidNumber(token.to_string()))?;
            indices.push(number - 1);
        }
    }
    Ok(indices)
}

/// Parse a `start-end` token, returning `None` if it is not a valid range.
fn parse_range(token: &str, max_index: usize) -> Option<(usize, usize)> {
    let (start, end) = token.split_once('-')?;
    if end.contains('-') {
        return None;
    }
    let start = start.trim().parse::<usize>().ok()?;
    let end = end.trim().parse::<usize>().ok()?;
    (start >= 1 && end <= max_index && start <= end).then_some((start, end))
}
