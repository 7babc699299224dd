use std::cmp::Ordering;

use xcodepatch_core::VersionComparator;

/// Numeric value of one dot-separated segment: its leading run of digits, or 0 when it has none.
fn segment_value(segment: &str) -> u64 {
    let digits = segment
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>();
    digits.parse::<u64>().unwrap_or(0)
}

/// Compare two dotted version strings segment by segment, numerically.
///
/// Missing trailing segments count as zero, so `"9"` equals `"9.0"`, and `"8.10"` is
/// greater than `"8.2"`. Surrounding double quotes are ignored.
#[must_use]
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left = left.trim().trim_matches('"').split('.').collect::<Vec<_>>();
    let right = right.trim().trim_matches('"').split('.').collect::<Vec<_>>();
    for index in 0..left.len().max(right.len()) {
        let l = left.get(index).map_or(0, |s| segment_value(s));
        let r = right.get(index).map_or(0, |s| segment_value(s));
        match l.cmp(&r) {
            Ordering::Equal => continue,
            ordering => return ordering,
        }
    }
    Ordering::Equal
}

/// [`VersionComparator`] backed by [`compare_versions`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DottedNumericComparator;

impl VersionComparator for DottedNumericComparator {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        compare_versions(left, right)
    }
}
