use std::{cmp::Ordering, fmt::Debug};

/// Orders version-like setting values.
pub trait VersionComparator: Debug + Send + Sync {
    fn compare(&self, left: &str, right: &str) -> Ordering;

    fn is_below(&self, version: &str, threshold: &str) -> bool {
        self.compare(version, threshold) == Ordering::Less
    }
}
