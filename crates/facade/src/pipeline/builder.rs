use crate::{
    algorithms::{
        DominanceWallClassifier, DominanceWindowClassifier, HighlightCompositor,
        NearestNeighborResizer, OverlayDeltaWindowClassifier, WallThresholds, WindowThresholds,
    },
    pipeline::Analyzer,
    traits::{RasterResizer, ResultRenderer, WallClassifier, WindowClassifier},
};

/// Default red floor for stripping window pixels out of a facade grid.
pub const DEFAULT_RED_EXCLUSION_FLOOR: u8 = 150;

/// Builder for [`Analyzer`] with a fluent API.
pub struct AnalyzerBuilder {
    window_classifier: Option<Box<dyn WindowClassifier>>,
    wall_classifier: Option<Box<dyn WallClassifier>>,
    resizer: Option<Box<dyn RasterResizer>>,
    renderer: Option<Box<dyn ResultRenderer>>,
    red_exclusion_floor: u8,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            window_classifier: None,
            wall_classifier: None,
            resizer: None,
            renderer: None,
            red_exclusion_floor: DEFAULT_RED_EXCLUSION_FLOOR,
        }
    }

    /// Set the window classification strategy (replaces any existing one).
    pub fn set_window_classifier<C>(mut self, classifier: C) -> Self
    where
        C: WindowClassifier + 'static,
    {
        self.window_classifier = Some(Box::new(classifier));
        self
    }

    /// Set the wall classification strategy (replaces any existing one).
    pub fn set_wall_classifier<C>(mut self, classifier: C) -> Self
    where
        C: WallClassifier + 'static,
    {
        self.wall_classifier = Some(Box::new(classifier));
        self
    }

    pub fn set_resizer<R>(mut self, resizer: R) -> Self
    where
        R: RasterResizer + 'static,
    {
        self.resizer = Some(Box::new(resizer));
        self
    }

    pub fn set_renderer<R>(mut self, renderer: R) -> Self
    where
        R: ResultRenderer + 'static,
    {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Use red-dominance window classification with custom thresholds.
    pub fn window_thresholds(self, thresholds: WindowThresholds) -> Self {
        self.set_window_classifier(DominanceWindowClassifier::new(thresholds))
    }

    /// Use blue-dominance wall classification with custom thresholds.
    pub fn wall_thresholds(self, thresholds: WallThresholds) -> Self {
        self.set_wall_classifier(DominanceWallClassifier::new(thresholds))
    }

    /// Use overlay-delta window classification (mask is the photo with a
    /// translucent red wash; membership is a red-channel delta against the
    /// clean reference).
    pub fn overlay_delta(self, delta: i16) -> Self {
        self.set_window_classifier(OverlayDeltaWindowClassifier { delta })
    }

    pub fn red_exclusion_floor(mut self, floor: u8) -> Self {
        self.red_exclusion_floor = floor;
        self
    }

    /// Build the analyzer, filling unset seams with the defaults
    /// (dominance rules, nearest-neighbor reconciliation, highlight
    /// compositor).
    pub fn build(self) -> Analyzer {
        let window_classifier = self
            .window_classifier
            .unwrap_or_else(|| Box::new(DominanceWindowClassifier::default()));
        let wall_classifier = self
            .wall_classifier
            .unwrap_or_else(|| Box::new(DominanceWallClassifier::default()));
        let resizer = self
            .resizer
            .unwrap_or_else(|| Box::new(NearestNeighborResizer));
        let renderer = self
            .renderer
            .unwrap_or_else(|| Box::new(HighlightCompositor::default()));

        Analyzer::new(
            window_classifier,
            wall_classifier,
            resizer,
            renderer,
            self.red_exclusion_floor,
        )
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
