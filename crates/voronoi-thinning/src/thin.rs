use log::debug;
use voronoi_image::BinaryImage;

use crate::config::ThinningConfig;
use crate::engine::{ThinningEngine, ThinningReport};
use crate::error::ThinningError;
use crate::registry::{AlgorithmRegistry, ThinningAlgorithm};

/// Where the skeleton is written.
///
/// The mode carries the borrow of the input image, so an in-place call holds
/// exclusive access for its whole duration while a copy-on-write call only
/// needs shared access and never modifies the input.
#[derive(Debug)]
pub enum ThinningMode<'a> {
    /// Thin the caller's image directly.
    InPlace(&'a mut BinaryImage),
    /// Thin a copy of the caller's image and return it.
    CopyOnWrite(&'a BinaryImage),
}

impl ThinningMode<'_> {
    /// The input image.
    pub fn image(&self) -> &BinaryImage {
        match self {
            ThinningMode::InPlace(image) => image,
            ThinningMode::CopyOnWrite(image) => image,
        }
    }

    /// Short name of the mode for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ThinningMode::InPlace(_) => "in_place",
            ThinningMode::CopyOnWrite(_) => "copy_on_write",
        }
    }
}

/// Result of a thinning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThinningOutput {
    /// The caller's image now holds the skeleton.
    InPlace(ThinningReport),
    /// The skeleton of the caller's image, which was left untouched.
    Copied {
        /// The thinned copy.
        image: BinaryImage,
        /// Summary of the run.
        report: ThinningReport,
    },
}

impl ThinningOutput {
    /// Summary of the run.
    pub fn report(&self) -> &ThinningReport {
        match self {
            ThinningOutput::InPlace(report) => report,
            ThinningOutput::Copied { report, .. } => report,
        }
    }

    /// The thinned copy, if the call was copy-on-write.
    pub fn into_image(self) -> Option<BinaryImage> {
        match self {
            ThinningOutput::InPlace(_) => None,
            ThinningOutput::Copied { image, .. } => Some(image),
        }
    }
}

/// Thins binary images with a fixed configuration and algorithm registry.
///
/// # Examples
///
/// ```
/// use voronoi_image::{BinaryImage, ImageSize};
/// use voronoi_thinning::config::ThinningConfig;
/// use voronoi_thinning::thin::{Thinner, ThinningMode};
///
/// let image = BinaryImage::from_size_val(ImageSize { width: 7, height: 3 }, 1).unwrap();
///
/// let thinner = Thinner::new(ThinningConfig::default().with_crop_to_foreground(true));
/// let output = thinner.thin(ThinningMode::CopyOnWrite(&image), "guo_hall_fast").unwrap();
///
/// assert!(output.report().converged());
/// let skeleton = output.into_image().unwrap();
/// assert!(skeleton.count_foreground() < image.count_foreground());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Thinner {
    config: ThinningConfig,
    registry: AlgorithmRegistry,
}

impl Thinner {
    /// Create a thinner with the built-in algorithms.
    pub fn new(config: ThinningConfig) -> Self {
        Self {
            config,
            registry: AlgorithmRegistry::default(),
        }
    }

    /// Replace the algorithm registry.
    pub fn with_registry(mut self, registry: AlgorithmRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The configuration used for every call.
    pub fn config(&self) -> &ThinningConfig {
        &self.config
    }

    /// The registry used to resolve algorithm identifiers.
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Thin an image with the algorithm registered under `algorithm_id`.
    ///
    /// # Errors
    ///
    /// Fails without touching the image if the identifier is unknown, if the
    /// image is empty or not binary, or if the execution strategy is invalid.
    /// Reaching the pass limit is not an error: the report status is
    /// [`ThinningStatus::AbortedBySafetyBound`](crate::engine::ThinningStatus::AbortedBySafetyBound).
    pub fn thin(
        &self,
        mode: ThinningMode<'_>,
        algorithm_id: &str,
    ) -> Result<ThinningOutput, ThinningError> {
        let algorithm = self.registry.lookup(algorithm_id)?;
        self.thin_algorithm(mode, algorithm)
    }

    /// Thin an image with the given algorithm.
    ///
    /// # Errors
    ///
    /// See [`Thinner::thin`].
    pub fn thin_algorithm(
        &self,
        mode: ThinningMode<'_>,
        algorithm: ThinningAlgorithm,
    ) -> Result<ThinningOutput, ThinningError> {
        validate_input(mode.image())?;

        debug!(
            "thinning {} with {} ({})",
            mode.image().size(),
            algorithm,
            mode.name()
        );

        match mode {
            ThinningMode::InPlace(image) => {
                let report = self.run(image, algorithm)?;
                Ok(ThinningOutput::InPlace(report))
            }
            ThinningMode::CopyOnWrite(image) => {
                let mut image = image.clone();
                let report = self.run(&mut image, algorithm)?;
                Ok(ThinningOutput::Copied { image, report })
            }
        }
    }

    fn run(
        &self,
        image: &mut BinaryImage,
        algorithm: ThinningAlgorithm,
    ) -> Result<ThinningReport, ThinningError> {
        let rule = algorithm.rule();

        if self.config.crop_to_foreground {
            if let Some(bbox) = image.foreground_bounding_box() {
                // one pixel of background keeps border neighborhoods intact
                let bbox = bbox.expand(1, image.size());
                debug!("cropping to {:?}", bbox);

                let mut roi = image.crop(&bbox)?;
                let report = ThinningEngine::new(&mut roi, rule, &self.config)?.run();
                image.paste(&roi, bbox.row, bbox.col)?;

                return Ok(report);
            }
        }

        Ok(ThinningEngine::new(image, rule, &self.config)?.run())
    }
}

/// Thin an image with the default configuration.
///
/// # Arguments
///
/// * `mode` - The input image, borrowed for in-place or copy-on-write thinning.
/// * `algorithm_id` - One of `zhang_suen`, `zhang_suen_fast`, `guo_hall`, `guo_hall_fast`.
///
/// # Returns
///
/// The report of the run, together with the thinned copy for [`ThinningMode::CopyOnWrite`].
///
/// # Examples
///
/// ```
/// use voronoi_image::{BinaryImage, ImageSize};
/// use voronoi_thinning::thin::{thin, ThinningMode};
///
/// let mut image = BinaryImage::from_size_val(ImageSize { width: 3, height: 3 }, 1).unwrap();
///
/// let output = thin(ThinningMode::InPlace(&mut image), "zhang_suen").unwrap();
///
/// assert!(output.report().converged());
/// assert_eq!(image.count_foreground(), 1);
/// ```
pub fn thin(mode: ThinningMode<'_>, algorithm_id: &str) -> Result<ThinningOutput, ThinningError> {
    Thinner::default().thin(mode, algorithm_id)
}

fn validate_input(image: &BinaryImage) -> Result<(), ThinningError> {
    if image.size().is_empty() {
        return Err(ThinningError::InvalidInput(format!(
            "image has no pixels ({})",
            image.size()
        )));
    }

    if let Some((row, col, value)) = image.first_invalid_pixel() {
        return Err(ThinningError::InvalidInput(format!(
            "pixel (row: {row}, col: {col}) has value {value}, expected 0 or 1"
        )));
    }

    Ok(())
}
