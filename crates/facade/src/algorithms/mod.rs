pub mod aggregation;
pub mod classification;
pub mod compositing;
pub mod reconciliation;

pub use aggregation::{tally_combined, tally_two_mask};
pub use classification::{
    DominanceWallClassifier, DominanceWindowClassifier, OverlayDeltaWindowClassifier,
    WallThresholds, WindowThresholds, reddish_grid,
};
pub use compositing::{HighlightCompositor, LabelStyle};
pub use reconciliation::NearestNeighborResizer;
