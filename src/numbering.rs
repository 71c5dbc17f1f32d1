//! Human-readable sequential document numbers ("OT-00001", "TIC-00042").

/// Prefix for work-order numbers.
pub const WORK_ORDER_PREFIX: &str = "OT";

/// Prefix for support-ticket numbers.
pub const TICKET_PREFIX: &str = "TIC";

/// Minimum digit width of the numeric part.
pub const NUMBER_WIDTH: usize = 5;

/// Format the number following `current_count` existing records.
///
/// The numeric part is zero-padded to five digits and simply widens past
/// 99999.
#[must_use]
pub fn next_number(prefix: &str, current_count: u32) -> String {
    let next = u64::from(current_count) + 1;
    format!("{prefix}-{next:0width$}", width = NUMBER_WIDTH)
}

/// Parse the numeric part of a number minted with `prefix`.
///
/// Returns `None` for numbers with a different prefix or a non-numeric tail.
#[must_use]
pub fn parse_number(prefix: &str, number: &str) -> Option<u32> {
    let digits = number.strip_prefix(prefix)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
#[path = "numbering_tests.rs"]
mod tests;
