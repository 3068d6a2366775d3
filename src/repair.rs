//! Repair of numbers split at their thousands separator.
//!
//! The report generator kerns the comma of values such as `1,000` so widely
//! that the extractor sees two fragments, `"1"` and `"000"`. When a row comes
//! out longer than the table allows, adjacent pairs that look like the two
//! halves of such a number are joined back, one pair at a time.

use tracing::debug;

/// Merge priority: the right half starts with `0`, so it cannot be a
/// standalone column value.
const PRIORITY_LEADING_ZERO: u8 = 3;
/// Merge priority: the left half is a single digit.
const PRIORITY_ONE_DIGIT: u8 = 2;
/// Merge priority: the left half has two digits.
const PRIORITY_TWO_DIGITS: u8 = 1;
/// Merge priority: extending an already merged value.
const PRIORITY_EXTEND: u8 = 0;

/// Merge comma-split numbers until `line` has `expected_len` fields or no
/// candidate pair remains.
///
/// Each round merges the single best pair: highest priority first, earliest
/// position on ties. A line that is already short enough is returned as is.
pub fn merge_comma_split_numbers(mut line: Vec<String>, expected_len: usize) -> Vec<String> {
    while line.len() > expected_len {
        let best = line
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| looks_like_comma_split(&pair[0], &pair[1]))
            .map(|(i, pair)| (i, merge_priority(&pair[0], &pair[1])))
            // Ties keep the earliest pair.
            .fold(None, |best: Option<(usize, u8)>, (i, priority)| match best {
                Some((_, p)) if p >= priority => best,
                _ => Some((i, priority)),
            });

        let Some((idx, priority)) = best else {
            break;
        };

        let right = line.remove(idx + 1);
        debug!(
            "merging {:?} + {:?} (priority {})",
            line[idx], right, priority
        );
        line[idx].push(',');
        line[idx].push_str(&right);
    }
    line
}

/// Whether `left` and `right` look like two halves of one comma-grouped
/// number.
///
/// `right` must be exactly three digits. `left` must end in a digit and be
/// either an already merged value whose last group has three digits, or a
/// one or two digit number with an optional leading `-`. Three digit left
/// halves are rejected: they are indistinguishable from a neighbouring
/// column value.
pub fn looks_like_comma_split(left: &str, right: &str) -> bool {
    if !is_three_digits(right) {
        return false;
    }
    if !left.ends_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    if let Some((_, trailing)) = left.rsplit_once(',') {
        return is_three_digits(trailing);
    }
    let digits = left.strip_prefix('-').unwrap_or(left);
    (1..=2).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

fn merge_priority(left: &str, right: &str) -> u8 {
    if right.starts_with('0') {
        return PRIORITY_LEADING_ZERO;
    }
    let digits = left.strip_prefix('-').unwrap_or(left);
    let digits = digits.rsplit_once(',').map_or(digits, |(_, group)| group);
    match digits.len() {
        1 => PRIORITY_ONE_DIGIT,
        2 => PRIORITY_TWO_DIGITS,
        _ => PRIORITY_EXTEND,
    }
}

fn is_three_digits(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit())
}
