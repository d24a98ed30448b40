use super::{RemovalRule, SubIteration};
use crate::neighborhood::NeighborhoodPattern;

/// Zhang-Suen two-subiteration rule.
///
/// A pixel is deleted when `2 <= B(p1) <= 6`, `A(p1) == 1` and the two
/// corner products of the sub-iteration vanish: `p2·p4·p6` and `p4·p6·p8`
/// in the first one, `p2·p4·p8` and `p2·p6·p8` in the second.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZhangSuen;

impl RemovalRule for ZhangSuen {
    fn should_remove(&self, pattern: NeighborhoodPattern, step: SubIteration) -> bool {
        let b = pattern.foreground_count();
        if !(2..=6).contains(&b) || pattern.transitions() != 1 {
            return false;
        }

        let [p2, _, p4, _, p6, _, p8, _] = pattern.values();
        match step {
            SubIteration::First => p2 * p4 * p6 == 0 && p4 * p6 * p8 == 0,
            SubIteration::Second => p2 * p4 * p8 == 0 && p2 * p6 * p8 == 0,
        }
    }
}
