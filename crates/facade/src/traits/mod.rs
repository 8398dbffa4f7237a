use image::RgbImage;

use crate::{error::Result, types::ClassGrid};

/// Trait for window-pixel classification strategies.
///
/// The upstream mask generator has two structurally different output
/// shapes (flat color mask vs. translucent overlay on the photo), so the
/// window rule is a seam rather than a fixed function.
pub trait WindowClassifier: Send + Sync {
    /// Classify every pixel of `mask` as window / not-window.
    ///
    /// `reference` is the clean photo the mask was generated from. Only
    /// overlay strategies consult it; flat-mask strategies ignore it.
    fn classify(&self, mask: &RgbImage, reference: Option<&RgbImage>) -> Result<ClassGrid>;
}

/// Trait for wall-pixel classification strategies.
pub trait WallClassifier: Send + Sync {
    /// Classify every pixel of `mask` as wall / not-wall.
    fn classify(&self, mask: &RgbImage) -> Result<ClassGrid>;
}

/// Trait for mask-to-reference resolution reconciliation.
pub trait RasterResizer: Send + Sync {
    /// Resize `mask` to `width` x `height`.
    fn resize(&self, mask: &RgbImage, width: u32, height: u32) -> RgbImage;
}

/// Trait for rendering an annotated visualization of a classification.
pub trait ResultRenderer: Send + Sync {
    /// Produce a new raster from `reference` with the class grids
    /// highlighted and the ratio labelled. Grids must already share the
    /// reference's dimensions.
    fn render(
        &self,
        reference: &RgbImage,
        windows: &ClassGrid,
        walls: &ClassGrid,
        ratio: crate::types::WindowRatio,
    ) -> Result<RgbImage>;
}
