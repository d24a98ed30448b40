use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::ThinningError;
use crate::rules::{AlgorithmVariant, RemovalRule};

/// How a variant's removal rule is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RuleEvaluation {
    /// Compute the neighborhood descriptors for every candidate pixel.
    Direct,
    /// Look the decision up in a table precomputed over all 256 neighborhoods.
    #[default]
    LookupTable,
}

/// A thinning algorithm: a variant together with the way its rule is evaluated.
///
/// Both evaluations of a variant produce identical skeletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThinningAlgorithm {
    /// The removal rule family.
    pub variant: AlgorithmVariant,
    /// The evaluation strategy of the rule.
    pub evaluation: RuleEvaluation,
}

impl ThinningAlgorithm {
    /// Guo-Hall, evaluated through its lookup table.
    pub const GUO_HALL_FAST: Self = Self::new(AlgorithmVariant::GuoHall, RuleEvaluation::LookupTable);

    /// Zhang-Suen, evaluated through its lookup table.
    pub const ZHANG_SUEN_FAST: Self =
        Self::new(AlgorithmVariant::ZhangSuen, RuleEvaluation::LookupTable);

    /// Create a new algorithm descriptor.
    pub const fn new(variant: AlgorithmVariant, evaluation: RuleEvaluation) -> Self {
        Self {
            variant,
            evaluation,
        }
    }

    /// Canonical identifier, e.g. `guo_hall` or `guo_hall_fast`.
    pub fn name(&self) -> String {
        match self.evaluation {
            RuleEvaluation::Direct => self.variant.name().to_string(),
            RuleEvaluation::LookupTable => format!("{}_fast", self.variant.name()),
        }
    }

    /// The rule the engine evaluates for this algorithm.
    pub fn rule(&self) -> &'static dyn RemovalRule {
        match self.evaluation {
            RuleEvaluation::Direct => self.variant.rule(),
            RuleEvaluation::LookupTable => self.variant.table(),
        }
    }
}

impl Default for ThinningAlgorithm {
    fn default() -> Self {
        Self::GUO_HALL_FAST
    }
}

impl std::fmt::Display for ThinningAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for ThinningAlgorithm {
    type Err = ThinningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlgorithmRegistry::builtin().lookup(s)
    }
}

/// Maps algorithm identifiers to [`ThinningAlgorithm`]s.
///
/// # Examples
///
/// ```
/// use voronoi_thinning::registry::AlgorithmRegistry;
/// use voronoi_thinning::rules::AlgorithmVariant;
///
/// let registry = AlgorithmRegistry::default();
/// assert_eq!(
///     registry.names_joined(),
///     "zhang_suen, zhang_suen_fast, guo_hall, guo_hall_fast"
/// );
///
/// let algorithm = registry.lookup("guo_hall_fast").unwrap();
/// assert_eq!(algorithm.variant, AlgorithmVariant::GuoHall);
/// assert!(registry.lookup("not_a_real_algorithm").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct AlgorithmRegistry {
    entries: Vec<(String, ThinningAlgorithm)>,
}

impl AlgorithmRegistry {
    /// Create a registry without any algorithm.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The process-wide registry holding the built-in identifiers.
    pub fn builtin() -> &'static AlgorithmRegistry {
        static BUILTIN: OnceLock<AlgorithmRegistry> = OnceLock::new();
        BUILTIN.get_or_init(AlgorithmRegistry::default)
    }

    /// Register `algorithm` under `id`, replacing any previous entry with that id.
    pub fn register(&mut self, id: impl Into<String>, algorithm: ThinningAlgorithm) -> &mut Self {
        let id = id.into();
        match self.entries.iter_mut().find(|(name, _)| *name == id) {
            Some(entry) => entry.1 = algorithm,
            None => self.entries.push((id, algorithm)),
        }
        self
    }

    /// Find the algorithm registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ThinningError::UnsupportedAlgorithm`] if `id` is unknown.
    pub fn lookup(&self, id: &str) -> Result<ThinningAlgorithm, ThinningError> {
        self.entries
            .iter()
            .find(|(name, _)| name == id)
            .map(|(_, algorithm)| *algorithm)
            .ok_or_else(|| ThinningError::UnsupportedAlgorithm(id.to_string(), self.names_joined()))
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == id)
    }

    /// Registered identifiers in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Registered identifiers joined with `", "`.
    pub fn names_joined(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for variant in AlgorithmVariant::ALL {
            for evaluation in [RuleEvaluation::Direct, RuleEvaluation::LookupTable] {
                let algorithm = ThinningAlgorithm::new(variant, evaluation);
                registry.register(algorithm.name(), algorithm);
            }
        }
        registry
    }
}
