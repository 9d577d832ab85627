//! Checked arithmetic for token amounts

/// Overflow-aware math on `i128` amounts
///
/// Every operation returns `None` instead of wrapping or panicking so callers can map
/// the failure onto their own contract error.
pub struct SafeMath;

impl SafeMath {
    /// `a + b`, or `None` on overflow
    pub fn add(a: i128, b: i128) -> Option<i128> {
        a.checked_add(b)
    }

    /// `a - b`, or `None` on overflow
    pub fn sub(a: i128, b: i128) -> Option<i128> {
        a.checked_sub(b)
    }

    /// Sum of a sequence of amounts, or `None` on overflow
    pub fn sum<I>(values: I) -> Option<i128>
    where
        I: IntoIterator<Item = i128>,
    {
        values
            .into_iter()
            .try_fold(0i128, |total, value| total.checked_add(value))
    }
}
