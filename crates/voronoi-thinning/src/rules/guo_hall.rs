use super::{RemovalRule, SubIteration};
use crate::neighborhood::NeighborhoodPattern;

/// Guo-Hall two-subiteration rule.
///
/// A pixel is deleted when `C(p1) == 1`, `2 <= min(N1, N2) <= 3` and the
/// directional term is zero: `(p6 ∨ p7 ∨ ¬p9) ∧ p8` in the first
/// sub-iteration, `(p2 ∨ p3 ∨ ¬p5) ∧ p4` in the second.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuoHall;

impl RemovalRule for GuoHall {
    fn should_remove(&self, pattern: NeighborhoodPattern, step: SubIteration) -> bool {
        if pattern.connectivity() != 1 {
            return false;
        }

        let n = pattern.n1().min(pattern.n2());
        if !(2..=3).contains(&n) {
            return false;
        }

        let [p2, p3, p4, p5, p6, p7, p8, p9] = pattern.values();
        let m = match step {
            SubIteration::First => (p6 | p7 | (1 - p9)) & p8,
            SubIteration::Second => (p2 | p3 | (1 - p5)) & p4,
        };

        m == 0
    }
}
