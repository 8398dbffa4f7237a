use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

use crate::{
    algorithms::{WallThresholds, WindowThresholds},
    pipeline::Analyzer,
};

fn default_delta() -> i16 {
    30
}

/// The three upstream mask shapes, with their classification parameters.
///
/// The original workflow existed as a family of near-duplicate scripts;
/// this enum is the single configuration surface that replaces them. Each
/// mode builds the same engine with different strategies plugged in.
#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "mode", content = "params")]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisMode {
    /// One flat mask: windows red, wall blue, background black.
    #[serde(rename = "combined_mask")]
    CombinedMask {
        #[serde(default)]
        window_thresholds: WindowThresholds,
        #[serde(default)]
        wall_thresholds: WallThresholds,
    },

    /// Two flat masks: one marks windows vs rest, one marks the whole
    /// facade vs rest; wall pixels are obtained by subtraction.
    #[serde(rename = "two_mask")]
    TwoMask {
        #[serde(default)]
        window_thresholds: WindowThresholds,
        #[serde(default)]
        wall_thresholds: WallThresholds,
    },

    /// The "mask" is the reference photo with a translucent red wash over
    /// the windows; membership is a red-channel delta against the clean
    /// photo.
    #[serde(rename = "overlay_on_photo")]
    OverlayOnPhoto {
        #[serde(default = "default_delta")]
        #[schemars(range(min = 1, max = 255))]
        delta: i16,
        #[serde(default)]
        wall_thresholds: WallThresholds,
    },
}

impl Default for AnalysisMode {
    fn default() -> Self {
        Self::CombinedMask {
            window_thresholds: WindowThresholds::default(),
            wall_thresholds: WallThresholds::default(),
        }
    }
}

impl AnalysisMode {
    /// Get the JSON schema for all modes
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnalysisMode)
    }

    /// Get a list of all available mode names
    pub fn mode_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::CombinedMask { .. } => {
                "Single flat mask with windows red, wall blue, background black"
            }
            Self::TwoMask { .. } => {
                "Separate window and facade masks; wall count by subtraction"
            }
            Self::OverlayOnPhoto { .. } => {
                "Photo with translucent red window overlay; red-channel delta vs reference"
            }
        }
    }

    /// Whether this mode needs the reference photo at classification time
    /// (not just for visualization).
    pub fn needs_reference(&self) -> bool {
        matches!(self, Self::OverlayOnPhoto { .. })
    }

    /// Whether this mode consumes two masks.
    pub fn is_two_mask(&self) -> bool {
        matches!(self, Self::TwoMask { .. })
    }

    /// Builder pre-configured with this mode's strategies; callers may
    /// still swap the renderer or resizer before building.
    pub fn builder(&self) -> crate::pipeline::builder::AnalyzerBuilder {
        match self {
            Self::CombinedMask {
                window_thresholds,
                wall_thresholds,
            }
            | Self::TwoMask {
                window_thresholds,
                wall_thresholds,
            } => Analyzer::builder()
                .window_thresholds(*window_thresholds)
                .wall_thresholds(*wall_thresholds),
            Self::OverlayOnPhoto {
                delta,
                wall_thresholds,
            } => Analyzer::builder()
                .overlay_delta(*delta)
                .wall_thresholds(*wall_thresholds),
        }
    }

    /// Build an [`Analyzer`] configured for this mode.
    pub fn analyzer(&self) -> Analyzer {
        self.builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_are_exposed() {
        let names = AnalysisMode::mode_names();
        assert!(names.contains(&"combined_mask"));
        assert!(names.contains(&"two_mask"));
        assert!(names.contains(&"overlay_on_photo"));
    }

    #[test]
    fn modes_round_trip_through_json_with_defaults() {
        let json = r#"{"mode": "combined_mask", "params": {}}"#;
        let mode: AnalysisMode = serde_json::from_str(json).unwrap();
        match &mode {
            AnalysisMode::CombinedMask {
                window_thresholds,
                wall_thresholds,
            } => {
                assert_eq!(window_thresholds.floor, 80);
                assert_eq!(window_thresholds.margin, 30);
                assert_eq!(wall_thresholds.floor, 60);
                assert_eq!(wall_thresholds.red_margin, 15);
            }
            _ => panic!("wrong mode"),
        }
        assert!(!mode.needs_reference());

        let overlay: AnalysisMode =
            serde_json::from_str(r#"{"mode": "overlay_on_photo", "params": {"delta": 40}}"#)
                .unwrap();
        assert!(overlay.needs_reference());
        let back = serde_json::to_string(&overlay).unwrap();
        let reparsed: AnalysisMode = serde_json::from_str(&back).unwrap();
        assert_eq!(reparsed, overlay);
    }

    #[test]
    fn schema_generation_succeeds() {
        let schema = serde_json::to_value(AnalysisMode::schema()).unwrap();
        assert!(schema.is_object());
    }
}
