use std::sync::OnceLock;

use super::{AlgorithmVariant, GuoHall, RemovalRule, SubIteration, ZhangSuen};
use crate::neighborhood::NeighborhoodPattern;

/// A removal rule precomputed over all 256 neighborhoods, one table per sub-iteration.
///
/// Evaluating a table is a single indexed load, which is what the `_fast`
/// algorithm identifiers select. The decisions are identical to the rule the
/// table was built from.
#[derive(Clone)]
pub struct RuleTable {
    tables: [[bool; 256]; 2],
}

impl RuleTable {
    /// Tabulate `rule` for every neighborhood code and both sub-iterations.
    pub fn build(rule: &dyn RemovalRule) -> Self {
        let mut tables = [[false; 256]; 2];
        for step in SubIteration::ALL {
            for (code, entry) in tables[step.index()].iter_mut().enumerate() {
                *entry = rule.should_remove(NeighborhoodPattern::from_code(code as u8), step);
            }
        }
        Self { tables }
    }

    /// Number of neighborhoods deleted in the given sub-iteration.
    pub fn removable_count(&self, step: SubIteration) -> usize {
        self.tables[step.index()].iter().filter(|&&v| v).count()
    }
}

impl std::fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTable")
            .field("first", &self.removable_count(SubIteration::First))
            .field("second", &self.removable_count(SubIteration::Second))
            .finish()
    }
}

impl RemovalRule for RuleTable {
    #[inline]
    fn should_remove(&self, pattern: NeighborhoodPattern, step: SubIteration) -> bool {
        self.tables[step.index()][pattern.code() as usize]
    }
}

static GUO_HALL_TABLE: OnceLock<RuleTable> = OnceLock::new();
static ZHANG_SUEN_TABLE: OnceLock<RuleTable> = OnceLock::new();

pub(crate) fn table_for(variant: AlgorithmVariant) -> &'static RuleTable {
    match variant {
        AlgorithmVariant::GuoHall => GUO_HALL_TABLE.get_or_init(|| RuleTable::build(&GuoHall)),
        AlgorithmVariant::ZhangSuen => {
            ZHANG_SUEN_TABLE.get_or_init(|| RuleTable::build(&ZhangSuen))
        }
    }
}
