//! Armor defense totals

use crate::catalog::Armor;

/// Sum of base defense over the given pieces; missing values count as 0
///
/// Saturates instead of overflowing on absurd imported values.
pub fn total_defense<'a>(armors: impl IntoIterator<Item = &'a Armor>) -> i64 {
    armors
        .into_iter()
        .map(Armor::defense_base)
        .fold(0, i64::saturating_add)
}
