use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::warn;

use crate::{
    error::{FacadeError, Result},
    traits::ResultRenderer,
    types::{ClassGrid, WindowRatio},
};

/// Styling for the corner label drawn on the visualization.
#[derive(Debug, Clone)]
pub struct LabelStyle {
    /// Font for the percentage text. Without one the label rectangle is
    /// still drawn but the text is skipped.
    pub font: Option<FontArc>,
    pub scale: f32,
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font: None,
            scale: 20.0,
            background: Rgb([0, 0, 0]),
            foreground: Rgb([255, 255, 255]),
        }
    }
}

impl LabelStyle {
    /// Load the label font from a TTF/OTF file.
    pub fn with_font_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| {
            FacadeError::InvalidInput(format!("unusable label font: {e}"))
        })?;
        Ok(Self {
            font: Some(font),
            ..Self::default()
        })
    }
}

/// Renders the classification on top of the reference photo: windows
/// tinted red, walls tinted blue, ratio printed in an opaque label box.
#[derive(Debug, Clone)]
pub struct HighlightCompositor {
    pub window_color: Rgb<u8>,
    /// Highlight weight for window pixels, 0.7 = 70% highlight / 30% photo.
    pub window_alpha: f32,
    pub wall_color: Rgb<u8>,
    pub wall_alpha: f32,
    pub label: LabelStyle,
}

impl Default for HighlightCompositor {
    fn default() -> Self {
        Self {
            window_color: Rgb([255, 30, 30]),
            window_alpha: 0.7,
            wall_color: Rgb([50, 100, 255]),
            wall_alpha: 0.5,
            label: LabelStyle::default(),
        }
    }
}

const LABEL_ORIGIN: (i32, i32) = (5, 5);
const LABEL_SIZE: (u32, u32) = (350, 30);

#[inline]
fn blend(base: Rgb<u8>, highlight: Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let mix = |b: u8, h: u8| -> u8 {
        (b as f32 * (1.0 - alpha) + h as f32 * alpha).min(255.0) as u8
    };
    Rgb([
        mix(base.0[0], highlight.0[0]),
        mix(base.0[1], highlight.0[1]),
        mix(base.0[2], highlight.0[2]),
    ])
}

impl HighlightCompositor {
    pub fn label_text(ratio: WindowRatio) -> String {
        match ratio {
            WindowRatio::Ratio(r) => {
                format!("Windows: {:.1}% | Wall: {:.1}%", r * 100.0, (1.0 - r) * 100.0)
            }
            WindowRatio::NoFacadeDetected => "No facade detected".to_string(),
        }
    }
}

impl ResultRenderer for HighlightCompositor {
    fn render(
        &self,
        reference: &RgbImage,
        windows: &ClassGrid,
        walls: &ClassGrid,
        ratio: WindowRatio,
    ) -> Result<RgbImage> {
        crate::algorithms::classification::validate_raster(reference)?;
        for grid in [windows, walls] {
            if grid.dimensions() != reference.dimensions() {
                return Err(FacadeError::dimension_mismatch(
                    reference.dimensions(),
                    grid.dimensions(),
                ));
            }
        }

        // Window membership wins where the grids overlap.
        let mut exclusive_walls = walls.clone();
        exclusive_walls.exclude(windows);

        let mut canvas = reference.clone();
        for (x, y, pixel) in canvas.enumerate_pixels_mut() {
            if windows.get(x, y) {
                *pixel = blend(*pixel, self.window_color, self.window_alpha);
            } else if exclusive_walls.get(x, y) {
                *pixel = blend(*pixel, self.wall_color, self.wall_alpha);
            }
        }

        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(LABEL_ORIGIN.0, LABEL_ORIGIN.1).of_size(LABEL_SIZE.0, LABEL_SIZE.1),
            self.label.background,
        );
        match &self.label.font {
            Some(font) => {
                draw_text_mut(
                    &mut canvas,
                    self.label.foreground,
                    LABEL_ORIGIN.0 + 5,
                    LABEL_ORIGIN.1 + 5,
                    PxScale::from(self.label.scale),
                    font,
                    &Self::label_text(ratio),
                );
            }
            None => {
                warn!("no label font configured; drawing label box without text");
            }
        }

        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grids(width: u32, height: u32) -> (ClassGrid, ClassGrid) {
        (ClassGrid::new(width, height), ClassGrid::new(width, height))
    }

    #[test]
    fn window_blend_is_seventy_thirty() {
        let reference = RgbImage::from_pixel(100, 100, Rgb([100, 100, 100]));
        let (mut windows, walls) = grids(100, 100);
        windows.set(50, 50, true);

        let compositor = HighlightCompositor::default();
        let out = compositor
            .render(&reference, &windows, &walls, WindowRatio::Ratio(1.0))
            .unwrap();

        // 100*0.3 + (255,30,30)*0.7, truncated.
        assert_eq!(out.get_pixel(50, 50), &Rgb([208, 51, 51]));
        // Untouched pixel away from the label box.
        assert_eq!(out.get_pixel(99, 99), &Rgb([100, 100, 100]));
    }

    #[test]
    fn wall_blend_is_fifty_fifty_and_loses_overlap_to_window() {
        let reference = RgbImage::from_pixel(100, 100, Rgb([100, 100, 100]));
        let (mut windows, mut walls) = grids(100, 100);
        walls.set(60, 60, true);
        windows.set(70, 70, true);
        walls.set(70, 70, true);

        let compositor = HighlightCompositor::default();
        let out = compositor
            .render(&reference, &windows, &walls, WindowRatio::Ratio(0.5))
            .unwrap();

        assert_eq!(out.get_pixel(60, 60), &Rgb([75, 100, 177]));
        // Overlap pixel took the window blend, not the wall blend.
        assert_eq!(out.get_pixel(70, 70), &Rgb([208, 51, 51]));
    }

    #[test]
    fn label_box_is_opaque_background() {
        let reference = RgbImage::from_pixel(400, 100, Rgb([200, 200, 200]));
        let (windows, walls) = grids(400, 100);
        let compositor = HighlightCompositor::default();
        let out = compositor
            .render(&reference, &windows, &walls, WindowRatio::NoFacadeDetected)
            .unwrap();
        assert_eq!(out.get_pixel(10, 10), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(300, 20), &Rgb([0, 0, 0]));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let reference = RgbImage::from_pixel(50, 50, Rgb([10, 20, 30]));
        let before = reference.clone();
        let (mut windows, walls) = grids(50, 50);
        windows.set(25, 25, true);
        HighlightCompositor::default()
            .render(&reference, &windows, &walls, WindowRatio::Ratio(1.0))
            .unwrap();
        assert_eq!(reference, before);
    }

    #[test]
    fn mismatched_grid_dimensions_are_rejected() {
        let reference = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let windows = ClassGrid::new(50, 50);
        let walls = ClassGrid::new(50, 50);
        let result = HighlightCompositor::default().render(
            &reference,
            &windows,
            &walls,
            WindowRatio::NoFacadeDetected,
        );
        assert!(matches!(
            result,
            Err(FacadeError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn label_text_formats_both_states() {
        assert_eq!(
            HighlightCompositor::label_text(WindowRatio::Ratio(0.423)),
            "Windows: 42.3% | Wall: 57.7%"
        );
        assert_eq!(
            HighlightCompositor::label_text(WindowRatio::NoFacadeDetected),
            "No facade detected"
        );
    }
}
