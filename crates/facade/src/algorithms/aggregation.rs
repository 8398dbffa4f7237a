use tracing::warn;

use crate::types::{ClassGrid, ClassificationResult};

/// Tally for the combined-mask shape: window and wall are both classified
/// directly from one mask. Any pixel flagged as both counts as window
/// only; the dominance rules cannot overlap, but custom thresholds can.
pub fn tally_combined(windows: &ClassGrid, walls: &ClassGrid) -> ClassificationResult {
    debug_assert_eq!(windows.dimensions(), walls.dimensions());
    let mut exclusive_walls = walls.clone();
    exclusive_walls.exclude(windows);

    ClassificationResult {
        window_pixels: windows.count(),
        wall_pixels: exclusive_walls.count(),
        total_pixels: windows.width() as u64 * windows.height() as u64,
    }
}

/// Tally for the two-mask shape: one mask marks windows, a separate mask
/// marks the whole facade, and the wall count is the difference.
///
/// The two generative masks carry no consistency guarantee, so the window
/// count may exceed the facade count; it is capped so that the reported
/// ratio stays within [0, 1].
pub fn tally_two_mask(windows: &ClassGrid, facade: &ClassGrid) -> ClassificationResult {
    let facade_pixels = facade.count();
    let mut window_pixels = windows.count();
    if window_pixels > facade_pixels {
        warn!(
            window_pixels,
            facade_pixels, "window mask exceeds facade mask; capping window count"
        );
        window_pixels = facade_pixels;
    }

    ClassificationResult {
        window_pixels,
        wall_pixels: facade_pixels - window_pixels,
        total_pixels: facade.width() as u64 * facade.height() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WindowRatio;

    fn grid_with(width: u32, height: u32, members: &[(u32, u32)]) -> ClassGrid {
        let mut grid = ClassGrid::new(width, height);
        for &(x, y) in members {
            grid.set(x, y, true);
        }
        grid
    }

    #[test]
    fn combined_tally_counts_each_class() {
        let windows = grid_with(10, 10, &[(0, 0), (1, 0), (2, 0)]);
        let walls = grid_with(10, 10, &[(3, 0), (4, 0)]);
        let result = tally_combined(&windows, &walls);
        assert_eq!(result.window_pixels, 3);
        assert_eq!(result.wall_pixels, 2);
        assert_eq!(result.total_pixels, 100);
        assert_eq!(result.facade_pixels(), 5);
    }

    #[test]
    fn combined_tally_resolves_overlap_in_favor_of_window() {
        let windows = grid_with(4, 1, &[(0, 0), (1, 0)]);
        let walls = grid_with(4, 1, &[(1, 0), (2, 0)]);
        let result = tally_combined(&windows, &walls);
        assert_eq!(result.window_pixels, 2);
        assert_eq!(result.wall_pixels, 1);
    }

    #[test]
    fn two_mask_wall_is_facade_minus_window() {
        let mut windows = ClassGrid::new(10, 10);
        let mut facade = ClassGrid::new(10, 10);
        for y in 0..10 {
            for x in 0..10 {
                facade.set(x, y, true);
                windows.set(x, y, true);
            }
        }
        let result = tally_two_mask(&windows, &facade);
        assert_eq!(result.window_pixels, 100);
        assert_eq!(result.wall_pixels, 0);
        assert_eq!(result.window_ratio(), WindowRatio::Ratio(1.0));
    }

    #[test]
    fn two_mask_window_count_is_capped_by_facade() {
        let windows = grid_with(4, 1, &[(0, 0), (1, 0), (2, 0)]);
        let facade = grid_with(4, 1, &[(0, 0)]);
        let result = tally_two_mask(&windows, &facade);
        assert_eq!(result.window_pixels, 1);
        assert_eq!(result.wall_pixels, 0);
        match result.window_ratio() {
            WindowRatio::Ratio(r) => assert!((0.0..=1.0).contains(&r)),
            WindowRatio::NoFacadeDetected => panic!("facade present"),
        }
    }

    #[test]
    fn all_background_reports_no_facade() {
        let windows = ClassGrid::new(10, 10);
        let walls = ClassGrid::new(10, 10);
        let result = tally_combined(&windows, &walls);
        assert_eq!(result.facade_pixels(), 0);
        assert_eq!(result.window_ratio(), WindowRatio::NoFacadeDetected);
    }
}
