use crate::parallel::ExecutionStrategy;

/// Parameters of a thinning run.
///
/// # Examples
///
/// ```
/// use voronoi_thinning::config::ThinningConfig;
/// use voronoi_thinning::parallel::ExecutionStrategy;
///
/// let config = ThinningConfig::default()
///     .with_max_passes(50)
///     .with_crop_to_foreground(true)
///     .with_strategy(ExecutionStrategy::Serial);
///
/// assert_eq!(config.max_passes, Some(50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThinningConfig {
    /// Maximum number of full passes before the run is aborted.
    ///
    /// `None` runs until convergence. Every pass that does not converge deletes
    /// at least one pixel, so an unbounded run still terminates.
    pub max_passes: Option<usize>,

    /// Thin only the foreground bounding box grown by one pixel.
    ///
    /// The result is identical to thinning the whole image; large, mostly
    /// empty masks get faster.
    pub crop_to_foreground: bool,

    /// How the classification of each sub-iteration is executed.
    pub strategy: ExecutionStrategy,
}

impl ThinningConfig {
    /// Set the maximum number of passes.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    /// Enable or disable cropping to the foreground bounding box.
    pub fn with_crop_to_foreground(mut self, crop: bool) -> Self {
        self.crop_to_foreground = crop;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
