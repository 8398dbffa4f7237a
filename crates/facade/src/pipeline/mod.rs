pub mod builder;

use image::RgbImage;
use tracing::debug;

use crate::{
    algorithms::{classification::reddish_grid, tally_combined, tally_two_mask},
    error::Result,
    traits::{RasterResizer, ResultRenderer, WallClassifier, WindowClassifier},
    types::{Analysis, WindowRatio},
};

/// Classification engine composing a window strategy, a wall strategy, a
/// resolution reconciler and a visualization renderer.
///
/// One `Analyzer` replaces the original family of near-duplicate scripts:
/// the three upstream mask shapes (combined mask, two masks, overlay on
/// photo) differ only in which strategies are plugged in and which
/// `analyze_*` entry point is called.
pub struct Analyzer {
    window_classifier: Box<dyn WindowClassifier>,
    wall_classifier: Box<dyn WallClassifier>,
    resizer: Box<dyn RasterResizer>,
    renderer: Box<dyn ResultRenderer>,
    /// Red floor above which a pixel is stripped from a facade grid in the
    /// two-mask shape.
    red_exclusion_floor: u8,
}

impl Analyzer {
    pub fn builder() -> builder::AnalyzerBuilder {
        builder::AnalyzerBuilder::new()
    }

    pub fn new(
        window_classifier: Box<dyn WindowClassifier>,
        wall_classifier: Box<dyn WallClassifier>,
        resizer: Box<dyn RasterResizer>,
        renderer: Box<dyn ResultRenderer>,
        red_exclusion_floor: u8,
    ) -> Self {
        Self {
            window_classifier,
            wall_classifier,
            resizer,
            renderer,
            red_exclusion_floor,
        }
    }

    /// Classify one combined mask (window, wall and background all encoded
    /// in a single raster).
    ///
    /// `reference` is only consulted by overlay window strategies; flat
    /// mask strategies ignore it. Counts are taken at the mask's native
    /// resolution.
    pub fn analyze(&self, mask: &RgbImage, reference: Option<&RgbImage>) -> Result<Analysis> {
        let windows = self.window_classifier.classify(mask, reference)?;
        let walls = self.wall_classifier.classify(mask)?;
        let result = tally_combined(&windows, &walls);
        debug!(
            window_pixels = result.window_pixels,
            wall_pixels = result.wall_pixels,
            total_pixels = result.total_pixels,
            "combined mask classified"
        );
        Ok(Analysis {
            windows,
            walls,
            result,
        })
    }

    /// Classify the two-mask shape: one mask marks windows, a separate
    /// mask marks the whole facade; wall pixels are obtained by
    /// subtraction.
    ///
    /// When the two masks share dimensions, strongly red pixels from the
    /// window mask are stripped out of the facade grid before counting; a
    /// facade mask should not contain them, but the generator offers no
    /// guarantee.
    pub fn analyze_two_mask(
        &self,
        window_mask: &RgbImage,
        facade_mask: &RgbImage,
        reference: Option<&RgbImage>,
    ) -> Result<Analysis> {
        let windows = self.window_classifier.classify(window_mask, reference)?;
        let mut facade = self.wall_classifier.classify(facade_mask)?;

        if window_mask.dimensions() == facade_mask.dimensions() {
            facade.exclude(&reddish_grid(window_mask, self.red_exclusion_floor)?);
        } else {
            debug!(
                window_dims = ?window_mask.dimensions(),
                facade_dims = ?facade_mask.dimensions(),
                "masks differ in size; skipping red exclusion on the facade grid"
            );
        }

        let result = tally_two_mask(&windows, &facade);

        let mut walls = facade;
        if walls.dimensions() == windows.dimensions() {
            walls.exclude(&windows);
        }
        Ok(Analysis {
            windows,
            walls,
            result,
        })
    }

    /// Render the annotated composite for a combined or overlay mask.
    ///
    /// The mask is reconciled to the reference's dimensions with the
    /// configured resizer and re-classified at that resolution, so the
    /// tint is spatially aligned with the photo. `ratio` is the value to
    /// print in the label; pass the one from the native-resolution
    /// analysis.
    pub fn visualize(
        &self,
        reference: &RgbImage,
        mask: &RgbImage,
        ratio: WindowRatio,
    ) -> Result<RgbImage> {
        let (width, height) = reference.dimensions();
        let aligned = self.resizer.resize(mask, width, height);
        let windows = self.window_classifier.classify(&aligned, Some(reference))?;
        let walls = self.wall_classifier.classify(&aligned)?;
        self.renderer.render(reference, &windows, &walls, ratio)
    }

    /// Render the annotated composite for the two-mask shape.
    pub fn visualize_two_mask(
        &self,
        reference: &RgbImage,
        window_mask: &RgbImage,
        facade_mask: &RgbImage,
        ratio: WindowRatio,
    ) -> Result<RgbImage> {
        let (width, height) = reference.dimensions();
        let aligned_windows = self.resizer.resize(window_mask, width, height);
        let aligned_facade = self.resizer.resize(facade_mask, width, height);

        let windows = self
            .window_classifier
            .classify(&aligned_windows, Some(reference))?;
        let mut walls = self.wall_classifier.classify(&aligned_facade)?;
        walls.exclude(&reddish_grid(&aligned_windows, self.red_exclusion_floor)?);
        walls.exclude(&windows);
        self.renderer.render(reference, &windows, &walls, ratio)
    }
}
