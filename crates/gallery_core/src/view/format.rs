//! Display formatting shared by gallery and admin projections.

use crate::model::memory::parse_memory_date;

/// Characters kept from long text before the ellipsis.
pub const SUMMARY_MAX_CHARS: usize = 100;

/// `July 15, 2023`. Unparseable dates are returned unchanged.
pub fn format_long_date(date: &str) -> String {
    match parse_memory_date(date) {
        Some(parsed) => parsed.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// `Jul 15, 2023`. Unparseable dates are returned unchanged.
pub fn format_short_date(date: &str) -> String {
    match parse_memory_date(date) {
        Some(parsed) => parsed.format("%b %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// First `max_chars` characters of `text` followed by `...`.
///
/// The ellipsis is always appended, matching the gallery's card teasers.
pub fn summarize(text: &str, max_chars: usize) -> String {
    let mut summary: String = text.chars().take(max_chars).collect();
    summary.push_str("...");
    summary
}

#[cfg(test)]
mod tests {
    use super::{format_long_date, format_short_date, summarize};

    #[test]
    fn dates_format_in_us_style() {
        assert_eq!(format_long_date("2023-07-05"), "July 5, 2023");
        assert_eq!(format_short_date("2022-12-25"), "Dec 25, 2022");
        assert_eq!(format_long_date("soon"), "soon");
    }

    #[test]
    fn summarize_counts_chars_not_bytes() {
        assert_eq!(summarize("héllo wörld", 5), "héllo...");
        assert_eq!(summarize("", 100), "...");
    }
}
