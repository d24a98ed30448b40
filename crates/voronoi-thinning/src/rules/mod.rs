use crate::neighborhood::NeighborhoodPattern;

/// Guo-Hall removal rule.
pub mod guo_hall;

/// Lookup-table evaluation of removal rules.
pub mod lut;

/// Zhang-Suen removal rule.
pub mod zhang_suen;

pub use guo_hall::GuoHall;
pub use lut::RuleTable;
pub use zhang_suen::ZhangSuen;

/// One of the two ordered sub-iterations of a thinning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubIteration {
    /// The first sub-iteration, peeling south-east boundary points.
    First,
    /// The second sub-iteration, peeling north-west boundary points.
    Second,
}

impl SubIteration {
    /// Both sub-iterations in execution order.
    pub const ALL: [SubIteration; 2] = [SubIteration::First, SubIteration::Second];

    /// Zero-based position of the sub-iteration within a pass.
    pub fn index(self) -> usize {
        match self {
            SubIteration::First => 0,
            SubIteration::Second => 1,
        }
    }
}

/// A predicate deciding whether a foreground pixel is deleted during a sub-iteration.
///
/// Rules only see the pixel's neighborhood; the engine guarantees the pixel
/// itself is foreground and that the pattern was read before any deletion of
/// the current sub-iteration was applied.
pub trait RemovalRule: Send + Sync {
    /// Whether a foreground pixel with the given neighborhood is deleted.
    fn should_remove(&self, pattern: NeighborhoodPattern, step: SubIteration) -> bool;
}

/// The closed set of thinning algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AlgorithmVariant {
    /// Guo and Hall, "Parallel thinning with two-subiteration algorithms" (1989).
    GuoHall,
    /// Zhang and Suen, "A fast parallel algorithm for thinning digital patterns" (1984).
    ZhangSuen,
}

impl AlgorithmVariant {
    /// Every variant, in registration order.
    pub const ALL: [AlgorithmVariant; 2] = [AlgorithmVariant::ZhangSuen, AlgorithmVariant::GuoHall];

    /// Base identifier of the variant.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmVariant::GuoHall => "guo_hall",
            AlgorithmVariant::ZhangSuen => "zhang_suen",
        }
    }

    /// The rule evaluated pixel by pixel.
    pub fn rule(self) -> &'static dyn RemovalRule {
        match self {
            AlgorithmVariant::GuoHall => &GuoHall,
            AlgorithmVariant::ZhangSuen => &ZhangSuen,
        }
    }

    /// The rule precomputed over every neighborhood, built on first use.
    pub fn table(self) -> &'static RuleTable {
        lut::table_for(self)
    }
}

impl std::fmt::Display for AlgorithmVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
