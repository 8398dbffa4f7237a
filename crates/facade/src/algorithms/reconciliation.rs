use image::{RgbImage, imageops};

use crate::traits::RasterResizer;

/// Nearest-neighbor resolution reconciler.
///
/// The mask generator does not guarantee that its output matches the
/// reference photo's pixel dimensions. Nearest-neighbor resampling only
/// duplicates existing pixels, so the hard color boundaries the dominance
/// rules depend on survive; any smoothing filter would invent fractional
/// hues that the thresholds would then misclassify.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborResizer;

impl RasterResizer for NearestNeighborResizer {
    fn resize(&self, mask: &RgbImage, width: u32, height: u32) -> RgbImage {
        if mask.dimensions() == (width, height) {
            return mask.clone();
        }
        imageops::resize(mask, width, height, imageops::FilterType::Nearest)
    }
}
