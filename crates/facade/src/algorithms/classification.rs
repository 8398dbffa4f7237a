use image::RgbImage;

use crate::{
    error::{FacadeError, Result},
    traits::{WallClassifier, WindowClassifier},
    types::ClassGrid,
};

/// Thresholds for the red-dominance window rule.
///
/// A pixel is a window iff `R > floor`, `R > G + margin` and
/// `R > B + margin`. The margins absorb anti-aliased and compressed
/// near-red hues without letting red pixels satisfy the wall rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct WindowThresholds {
    pub floor: u8,
    pub margin: u8,
}

impl Default for WindowThresholds {
    fn default() -> Self {
        Self { floor: 80, margin: 30 }
    }
}

/// Thresholds for the blue-dominance wall rule.
///
/// A pixel is a wall iff `B > floor`, `B > R + red_margin` and
/// (`B > G` or `G > green_floor`). The trailing disjunct accepts the
/// cyan-leaning blues the mask generator frequently emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct WallThresholds {
    pub floor: u8,
    pub red_margin: u8,
    pub green_floor: u8,
}

impl Default for WallThresholds {
    fn default() -> Self {
        Self {
            floor: 60,
            red_margin: 15,
            green_floor: 60,
        }
    }
}

pub(crate) fn validate_raster(image: &RgbImage) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(FacadeError::InvalidInput(format!(
            "zero-area raster ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

/// Window classifier for flat color masks: red strictly dominant over both
/// other channels by a margin, above an absolute floor.
#[derive(Debug, Clone, Default)]
pub struct DominanceWindowClassifier {
    pub thresholds: WindowThresholds,
}

impl DominanceWindowClassifier {
    pub fn new(thresholds: WindowThresholds) -> Self {
        Self { thresholds }
    }

    #[inline]
    pub fn is_window(&self, r: u8, g: u8, b: u8) -> bool {
        let (r, g, b) = (r as i32, g as i32, b as i32);
        let floor = self.thresholds.floor as i32;
        let margin = self.thresholds.margin as i32;
        r > floor && r > g + margin && r > b + margin
    }
}

impl WindowClassifier for DominanceWindowClassifier {
    fn classify(&self, mask: &RgbImage, _reference: Option<&RgbImage>) -> Result<ClassGrid> {
        validate_raster(mask)?;
        let mut grid = ClassGrid::new(mask.width(), mask.height());
        for (x, y, pixel) in mask.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            grid.set(x, y, self.is_window(r, g, b));
        }
        Ok(grid)
    }
}

/// Window classifier for overlay masks: the "mask" is the reference photo
/// with a translucent red wash painted over the windows, so membership is
/// a red-channel delta against the clean baseline rather than absolute hue.
#[derive(Debug, Clone)]
pub struct OverlayDeltaWindowClassifier {
    /// Minimum increase of the red channel over the reference pixel.
    pub delta: i16,
}

impl Default for OverlayDeltaWindowClassifier {
    fn default() -> Self {
        Self { delta: 30 }
    }
}

impl WindowClassifier for OverlayDeltaWindowClassifier {
    fn classify(&self, mask: &RgbImage, reference: Option<&RgbImage>) -> Result<ClassGrid> {
        validate_raster(mask)?;
        let reference = reference.ok_or_else(|| {
            FacadeError::MissingReference(
                "overlay-delta classification needs the clean photo as baseline".to_string(),
            )
        })?;
        validate_raster(reference)?;
        if mask.dimensions() != reference.dimensions() {
            return Err(FacadeError::dimension_mismatch(
                reference.dimensions(),
                mask.dimensions(),
            ));
        }

        let mut grid = ClassGrid::new(mask.width(), mask.height());
        for (x, y, pixel) in mask.enumerate_pixels() {
            let baseline = reference.get_pixel(x, y);
            let delta = pixel.0[0] as i16 - baseline.0[0] as i16;
            grid.set(x, y, delta > self.delta);
        }
        Ok(grid)
    }
}

/// Wall classifier: blue dominant over red by a margin, above an absolute
/// floor, accepting cyan-leaning hues where green is also bright.
#[derive(Debug, Clone, Default)]
pub struct DominanceWallClassifier {
    pub thresholds: WallThresholds,
}

impl DominanceWallClassifier {
    pub fn new(thresholds: WallThresholds) -> Self {
        Self { thresholds }
    }

    #[inline]
    pub fn is_wall(&self, r: u8, g: u8, b: u8) -> bool {
        let (r, g, b) = (r as i32, g as i32, b as i32);
        let floor = self.thresholds.floor as i32;
        let red_margin = self.thresholds.red_margin as i32;
        let green_floor = self.thresholds.green_floor as i32;
        b > floor && b > r + red_margin && (b > g || g > green_floor)
    }
}

impl WallClassifier for DominanceWallClassifier {
    fn classify(&self, mask: &RgbImage) -> Result<ClassGrid> {
        validate_raster(mask)?;
        let mut grid = ClassGrid::new(mask.width(), mask.height());
        for (x, y, pixel) in mask.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            grid.set(x, y, self.is_wall(r, g, b));
        }
        Ok(grid)
    }
}

/// Grid of pixels whose red channel exceeds `floor`.
///
/// Used by the two-mask path to strip strongly red pixels out of the
/// facade grid; a facade mask should not contain them, but the generator
/// offers no such guarantee.
pub fn reddish_grid(mask: &RgbImage, floor: u8) -> Result<ClassGrid> {
    validate_raster(mask)?;
    let mut grid = ClassGrid::new(mask.width(), mask.height());
    for (x, y, pixel) in mask.enumerate_pixels() {
        grid.set(x, y, pixel.0[0] > floor);
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    #[test]
    fn pure_red_is_window() {
        let classifier = DominanceWindowClassifier::default();
        assert!(classifier.is_window(255, 0, 0));
        assert!(classifier.is_window(200, 40, 40));
    }

    #[test]
    fn boundary_values_near_window_thresholds() {
        let classifier = DominanceWindowClassifier::default();
        // Floor is strict: 80 fails, 81 passes when margins hold.
        assert!(!classifier.is_window(80, 40, 40));
        assert!(classifier.is_window(81, 50, 50));
        // Margin is strict: R == G + 30 fails.
        assert!(!classifier.is_window(100, 70, 40));
        assert!(classifier.is_window(101, 70, 40));
    }

    #[test]
    fn boundary_values_near_wall_thresholds() {
        let classifier = DominanceWallClassifier::default();
        assert!(!classifier.is_wall(40, 40, 60));
        assert!(classifier.is_wall(40, 40, 61));
        // B == R + 15 fails the strict margin.
        assert!(!classifier.is_wall(85, 40, 100));
        // Cyan: B not above G, but G above its floor.
        assert!(classifier.is_wall(20, 180, 180));
        assert!(!classifier.is_wall(20, 61, 61));
    }

    #[test]
    fn window_and_wall_rules_are_mutually_exclusive() {
        let window = DominanceWindowClassifier::default();
        let wall = DominanceWallClassifier::default();
        // Sweep a lattice around both rules' thresholds; no pixel may
        // satisfy both. Window needs R > B + 30 while wall needs
        // B > R + 15, which cannot hold together.
        for r in (0..=255u16).step_by(5) {
            for g in (0..=255u16).step_by(5) {
                for b in (0..=255u16).step_by(5) {
                    let (r, g, b) = (r as u8, g as u8, b as u8);
                    assert!(
                        !(window.is_window(r, g, b) && wall.is_wall(r, g, b)),
                        "({r},{g},{b}) classified as both window and wall"
                    );
                }
            }
        }
    }

    #[test]
    fn classification_is_idempotent() {
        let mut mask = solid(8, 8, [0, 0, 0]);
        mask.put_pixel(3, 3, Rgb([255, 0, 0]));
        let classifier = DominanceWindowClassifier::default();
        let first = classifier.classify(&mask, None).unwrap();
        let second = classifier.classify(&mask, None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.count(), 1);
    }

    #[test]
    fn zero_area_raster_is_invalid() {
        let empty = RgbImage::new(0, 0);
        let classifier = DominanceWindowClassifier::default();
        assert!(matches!(
            classifier.classify(&empty, None),
            Err(FacadeError::InvalidInput(_))
        ));
    }

    #[test]
    fn overlay_delta_flags_reddened_pixels_only() {
        let reference = solid(4, 4, [100, 100, 100]);
        let mut overlay = reference.clone();
        overlay.put_pixel(1, 1, Rgb([160, 90, 90]));
        // Blue channel irrelevant: a blue shift alone is not a window.
        overlay.put_pixel(2, 2, Rgb([100, 100, 255]));

        let classifier = OverlayDeltaWindowClassifier::default();
        let grid = classifier.classify(&overlay, Some(&reference)).unwrap();
        assert_eq!(grid.count(), 1);
        assert!(grid.get(1, 1));
        assert!(!grid.get(2, 2));
    }

    #[test]
    fn overlay_delta_requires_matching_dimensions() {
        let reference = solid(100, 100, [0, 0, 0]);
        let overlay = solid(50, 50, [0, 0, 0]);
        let classifier = OverlayDeltaWindowClassifier::default();
        assert!(matches!(
            classifier.classify(&overlay, Some(&reference)),
            Err(FacadeError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn overlay_delta_requires_a_reference() {
        let overlay = solid(4, 4, [200, 0, 0]);
        let classifier = OverlayDeltaWindowClassifier::default();
        assert!(matches!(
            classifier.classify(&overlay, None),
            Err(FacadeError::MissingReference(_))
        ));
    }

    #[test]
    fn reddish_grid_uses_strict_floor() {
        let mut mask = solid(2, 1, [150, 0, 0]);
        mask.put_pixel(1, 0, Rgb([151, 0, 0]));
        let grid = reddish_grid(&mask, 150).unwrap();
        assert!(!grid.get(0, 0));
        assert!(grid.get(1, 0));
    }
}
