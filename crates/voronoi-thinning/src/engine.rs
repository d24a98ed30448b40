use log::{debug, warn};
use voronoi_image::{BinaryImage, BACKGROUND, FOREGROUND};

use crate::config::ThinningConfig;
use crate::error::ThinningError;
use crate::neighborhood::NeighborhoodPattern;
use crate::parallel::Executor;
use crate::rules::{RemovalRule, SubIteration};

/// Lifecycle of a thinning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThinningStatus {
    /// More passes may delete pixels.
    Running,
    /// A full pass deleted no pixel.
    Converged,
    /// The pass limit was reached before a quiet pass; the image may not be fully thinned.
    AbortedBySafetyBound,
}

impl ThinningStatus {
    /// Whether no further pass will run.
    pub fn is_terminal(self) -> bool {
        self != ThinningStatus::Running
    }
}

/// Summary of a finished thinning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinningReport {
    /// How the run ended.
    pub status: ThinningStatus,
    /// Number of full passes executed, including the final quiet one.
    pub passes: usize,
    /// Total number of deleted pixels.
    pub removed: usize,
}

impl ThinningReport {
    /// Whether the run reached a quiet pass.
    pub fn converged(&self) -> bool {
        self.status == ThinningStatus::Converged
    }
}

/// Pixels deleted by one full pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    /// One-based index of the pass.
    pub pass: usize,
    /// Pixels deleted by each sub-iteration.
    pub removed: [usize; 2],
}

impl PassStats {
    /// Pixels deleted by both sub-iterations.
    pub fn total(&self) -> usize {
        self.removed.iter().sum()
    }
}

/// Iterative two-subiteration thinning over an exclusively borrowed image.
///
/// Each sub-iteration classifies every foreground pixel against the image as
/// it was when the sub-iteration started and only then deletes the marked
/// pixels in one batch. The engine holds the only reference to the image until
/// it is dropped.
///
/// # Examples
///
/// ```
/// use voronoi_image::{BinaryImage, ImageSize};
/// use voronoi_thinning::config::ThinningConfig;
/// use voronoi_thinning::engine::{ThinningEngine, ThinningStatus};
/// use voronoi_thinning::rules::AlgorithmVariant;
///
/// let mut image = BinaryImage::from_size_val(ImageSize { width: 3, height: 3 }, 1).unwrap();
/// let rule = AlgorithmVariant::ZhangSuen.rule();
///
/// let mut engine = ThinningEngine::new(&mut image, rule, &ThinningConfig::default()).unwrap();
/// while let Some(stats) = engine.step() {
///     println!("pass {} removed {} pixels", stats.pass, stats.total());
/// }
/// assert_eq!(engine.status(), ThinningStatus::Converged);
/// assert_eq!(engine.image().count_foreground(), 1);
/// ```
pub struct ThinningEngine<'a> {
    image: &'a mut BinaryImage,
    rule: &'a dyn RemovalRule,
    executor: Executor,
    max_passes: Option<usize>,
    status: ThinningStatus,
    passes: usize,
    removed: usize,
}

impl<'a> ThinningEngine<'a> {
    /// Prepare a run of `rule` over `image`.
    ///
    /// The image is not modified until the first call to [`ThinningEngine::step`].
    ///
    /// # Errors
    ///
    /// Returns [`ThinningError::ParallelError`] if the execution strategy cannot be set up.
    pub fn new(
        image: &'a mut BinaryImage,
        rule: &'a dyn RemovalRule,
        config: &ThinningConfig,
    ) -> Result<Self, ThinningError> {
        let executor = Executor::new(config.strategy)?;

        Ok(Self {
            image,
            rule,
            executor,
            max_passes: config.max_passes,
            status: ThinningStatus::Running,
            passes: 0,
            removed: 0,
        })
    }

    /// Current status of the run.
    pub fn status(&self) -> ThinningStatus {
        self.status
    }

    /// Number of passes executed so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Number of pixels deleted so far.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// The image in its current state.
    pub fn image(&self) -> &BinaryImage {
        &*self.image
    }

    /// Run one full pass.
    ///
    /// # Returns
    ///
    /// The pixels deleted by the pass, or `None` once the run is over.
    pub fn step(&mut self) -> Option<PassStats> {
        if self.status.is_terminal() {
            return None;
        }

        if self.max_passes.is_some_and(|max| self.passes >= max) {
            warn!(
                "thinning aborted after {} passes without converging ({} pixels removed)",
                self.passes, self.removed
            );
            self.status = ThinningStatus::AbortedBySafetyBound;
            return None;
        }

        let removed = SubIteration::ALL.map(|step| self.sub_iteration(step));
        self.passes += 1;

        let stats = PassStats {
            pass: self.passes,
            removed,
        };
        self.removed += stats.total();

        debug!(
            "pass {}: removed {} + {} pixels",
            stats.pass, removed[0], removed[1]
        );

        if stats.total() == 0 {
            debug!(
                "thinning converged after {} passes ({} pixels removed)",
                self.passes, self.removed
            );
            self.status = ThinningStatus::Converged;
        }

        Some(stats)
    }

    /// Run passes until the run converges or hits the pass limit.
    pub fn run(mut self) -> ThinningReport {
        while self.step().is_some() {}
        self.report()
    }

    /// Snapshot of the run so far.
    pub fn report(&self) -> ThinningReport {
        ThinningReport {
            status: self.status,
            passes: self.passes,
            removed: self.removed,
        }
    }

    fn sub_iteration(&mut self, step: SubIteration) -> usize {
        let image: &BinaryImage = &*self.image;
        let rule = self.rule;
        let width = image.width();

        // classification only reads, deletions are applied afterwards
        let marked = self.executor.collect_rows(image.height(), |row, out| {
            let line = &image.as_slice()[row * width..(row + 1) * width];
            for (col, &value) in line.iter().enumerate() {
                if value == FOREGROUND
                    && rule.should_remove(NeighborhoodPattern::from_image(image, row, col), step)
                {
                    out.push(row * width + col);
                }
            }
        });

        let data = self.image.as_slice_mut();
        for &idx in &marked {
            data[idx] = BACKGROUND;
        }

        marked.len()
    }
}

#[cfg(test)]
mod tests {
    use voronoi_image::{BinaryImage, ImageSize};

    use super::{ThinningEngine, ThinningStatus};
    use crate::config::ThinningConfig;
    use crate::error::ThinningError;
    use crate::parallel::ExecutionStrategy;
    use crate::rules::{AlgorithmVariant, SubIteration};

    fn square(side: usize, margin: usize) -> Result<BinaryImage, ThinningError> {
        let n = side + 2 * margin;
        let points = (margin..margin + side)
            .flat_map(|r| (margin..margin + side).map(move |c| (r, c)))
            .collect::<Vec<_>>();
        Ok(BinaryImage::from_points(
            ImageSize {
                width: n,
                height: n,
            },
            &points,
        )?)
    }

    #[test]
    fn square_collapses_to_center() -> Result<(), ThinningError> {
        for variant in AlgorithmVariant::ALL {
            let mut image = square(5, 2)?;
            let report =
                ThinningEngine::new(&mut image, variant.rule(), &ThinningConfig::default())?.run();

            assert_eq!(report.status, ThinningStatus::Converged);
            assert_eq!(report.passes, 3);
            assert_eq!(report.removed, 24);
            assert_eq!(image.foreground_points().collect::<Vec<_>>(), vec![(4, 4)]);
        }

        Ok(())
    }

    #[test]
    fn step_by_step() -> Result<(), ThinningError> {
        let mut image = square(5, 2)?;
        let rule = AlgorithmVariant::GuoHall.table();
        let mut engine = ThinningEngine::new(&mut image, rule, &ThinningConfig::default())?;
        assert_eq!(engine.status(), ThinningStatus::Running);

        let mut total = 0;
        while let Some(stats) = engine.step() {
            assert_eq!(stats.pass, engine.passes());
            total += stats.total();
            assert_eq!(engine.image().count_foreground(), 25 - total);
        }

        assert_eq!(engine.status(), ThinningStatus::Converged);
        assert_eq!(engine.removed(), total);
        assert!(engine.step().is_none());
        assert_eq!(engine.passes(), 3);

        Ok(())
    }

    #[test]
    fn empty_image_converges_in_one_pass() -> Result<(), ThinningError> {
        let mut image = BinaryImage::from_size_val(
            ImageSize {
                width: 4,
                height: 3,
            },
            0,
        )?;
        let report = ThinningEngine::new(
            &mut image,
            AlgorithmVariant::ZhangSuen.rule(),
            &ThinningConfig::default(),
        )?
        .run();
        assert_eq!(report.status, ThinningStatus::Converged);
        assert_eq!(report.passes, 1);
        assert_eq!(report.removed, 0);

        Ok(())
    }

    #[test]
    fn safety_bound_aborts() -> Result<(), ThinningError> {
        let mut image = square(5, 2)?;
        let config = ThinningConfig::default().with_max_passes(1);
        let report = ThinningEngine::new(&mut image, AlgorithmVariant::GuoHall.rule(), &config)?.run();

        assert_eq!(report.status, ThinningStatus::AbortedBySafetyBound);
        assert!(!report.converged());
        assert_eq!(report.passes, 1);
        assert!(report.removed > 0);
        assert_eq!(image.count_foreground(), 25 - report.removed);

        Ok(())
    }

    #[test]
    fn zero_passes_leaves_image_untouched() -> Result<(), ThinningError> {
        let mut image = square(5, 2)?;
        let original = image.clone();
        let config = ThinningConfig::default().with_max_passes(0);
        let report =
            ThinningEngine::new(&mut image, AlgorithmVariant::ZhangSuen.rule(), &config)?.run();

        assert_eq!(report.status, ThinningStatus::AbortedBySafetyBound);
        assert_eq!(report.passes, 0);
        assert_eq!(image, original);

        Ok(())
    }

    #[test]
    fn deletions_are_batched() -> Result<(), ThinningError> {
        // a 2x2 block: every pixel qualifies for Zhang-Suen in the first
        // sub-iteration, so batched deletion empties the block
        let mut image = square(2, 1)?;
        let mut engine = ThinningEngine::new(
            &mut image,
            AlgorithmVariant::ZhangSuen.rule(),
            &ThinningConfig::default(),
        )?;
        let stats = engine.step().ok_or_else(|| {
            ThinningError::InvalidInput("engine stopped before the first pass".to_string())
        })?;
        assert_eq!(stats.removed[SubIteration::First.index()], 4);
        assert_eq!(stats.removed[SubIteration::Second.index()], 0);

        Ok(())
    }

    #[test]
    fn strategies_agree() -> Result<(), ThinningError> {
        let reference = {
            let mut image = square(9, 3)?;
            let config = ThinningConfig::default().with_strategy(ExecutionStrategy::Serial);
            ThinningEngine::new(&mut image, AlgorithmVariant::GuoHall.rule(), &config)?.run();
            image
        };

        for strategy in [ExecutionStrategy::ParallelRows, ExecutionStrategy::Fixed(3)] {
            let mut image = square(9, 3)?;
            let config = ThinningConfig::default().with_strategy(strategy);
            ThinningEngine::new(&mut image, AlgorithmVariant::GuoHall.rule(), &config)?.run();
            assert_eq!(image, reference, "{strategy:?}");
        }

        Ok(())
    }

    #[test]
    fn invalid_strategy() -> Result<(), ThinningError> {
        let mut image = square(3, 1)?;
        let config = ThinningConfig::default().with_strategy(ExecutionStrategy::Fixed(0));
        let res = ThinningEngine::new(&mut image, AlgorithmVariant::GuoHall.rule(), &config);
        assert!(matches!(res, Err(ThinningError::ParallelError(_))));

        Ok(())
    }
}
