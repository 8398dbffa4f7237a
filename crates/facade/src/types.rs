use serde::{Deserialize, Serialize};

/// Semantic class of a single mask pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelClass {
    Window,
    Wall,
    Background,
}

/// Boolean membership grid produced by a classifier.
///
/// One entry per pixel of the classified raster, in row-major order.
/// Grids are what the compositor consumes, and what callers use when they
/// want to exclude one class from another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl ClassGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.cells[(y as usize) * (self.width as usize) + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, member: bool) {
        self.cells[(y as usize) * (self.width as usize) + x as usize] = member;
    }

    /// Number of member pixels.
    pub fn count(&self) -> u64 {
        self.cells.iter().filter(|&&c| c).count() as u64
    }

    /// Remove from `self` every pixel that is a member of `other`.
    ///
    /// Used to enforce Window/Wall mutual exclusion before compositing and
    /// to strip reddish pixels out of a facade grid in the two-mask path.
    pub fn exclude(&mut self, other: &ClassGrid) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        for (cell, excluded) in self.cells.iter_mut().zip(other.cells.iter()) {
            if *excluded {
                *cell = false;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.cells.iter().copied()
    }
}

/// Window-to-facade ratio, or the distinguished state when the mask
/// contained no facade pixels at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum WindowRatio {
    Ratio(f64),
    NoFacadeDetected,
}

impl WindowRatio {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Ratio(r) => Some(*r),
            Self::NoFacadeDetected => None,
        }
    }
}

/// Aggregate pixel counts for one classified mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub window_pixels: u64,
    pub wall_pixels: u64,
    pub total_pixels: u64,
}

impl ClassificationResult {
    /// Union of the Window and Wall classes.
    pub fn facade_pixels(&self) -> u64 {
        self.window_pixels + self.wall_pixels
    }

    /// `window_pixels / facade_pixels`, or `NoFacadeDetected` when the
    /// facade is empty. Never divides by zero.
    pub fn window_ratio(&self) -> WindowRatio {
        let facade = self.facade_pixels();
        if facade == 0 {
            WindowRatio::NoFacadeDetected
        } else {
            WindowRatio::Ratio(self.window_pixels as f64 / facade as f64)
        }
    }

    /// Fraction of the whole raster covered by facade.
    pub fn facade_coverage(&self) -> f64 {
        if self.total_pixels == 0 {
            0.0
        } else {
            self.facade_pixels() as f64 / self.total_pixels as f64
        }
    }
}

/// Full output of one classification pass: the membership grids (reused
/// by the compositor and by callers wanting explicit exclusion) plus the
/// aggregated counts.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub windows: ClassGrid,
    pub walls: ClassGrid,
    pub result: ClassificationResult,
}

impl Analysis {
    /// Class of the pixel at `(x, y)`. Window wins where the grids
    /// overlap, matching how the tally and the compositor resolve it.
    pub fn class_at(&self, x: u32, y: u32) -> PixelClass {
        if self.windows.get(x, y) {
            PixelClass::Window
        } else if self.walls.get(x, y) {
            PixelClass::Wall
        } else {
            PixelClass::Background
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_count_and_exclude() {
        let mut windows = ClassGrid::new(4, 4);
        let mut walls = ClassGrid::new(4, 4);
        windows.set(0, 0, true);
        windows.set(1, 0, true);
        walls.set(1, 0, true);
        walls.set(2, 0, true);

        assert_eq!(windows.count(), 2);
        walls.exclude(&windows);
        assert_eq!(walls.count(), 1);
        assert!(walls.get(2, 0));
        assert!(!walls.get(1, 0));
    }

    #[test]
    fn ratio_is_bounded() {
        let result = ClassificationResult {
            window_pixels: 5,
            wall_pixels: 5,
            total_pixels: 100,
        };
        assert_eq!(result.facade_pixels(), 10);
        assert_eq!(result.window_ratio(), WindowRatio::Ratio(0.5));
    }

    #[test]
    fn empty_facade_is_a_state_not_an_error() {
        let result = ClassificationResult {
            window_pixels: 0,
            wall_pixels: 0,
            total_pixels: 100,
        };
        assert_eq!(result.window_ratio(), WindowRatio::NoFacadeDetected);
        assert_eq!(result.window_ratio().value(), None);
    }

    #[test]
    fn result_json_round_trip() {
        let result = ClassificationResult {
            window_pixels: 42,
            wall_pixels: 58,
            total_pixels: 200,
        };
        let json = serde_json::to_string(&result).unwrap();
        let parsed: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
