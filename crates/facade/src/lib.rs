//! # Facade Window-Ratio Library
//!
//! A color-class pixel classifier and area-ratio calculator for building
//! facade masks. Given an RGB mask raster produced by an external
//! segmentation step, it labels every pixel as window, wall or background
//! using deterministic color-dominance rules, aggregates the counts into a
//! window-to-facade ratio, and renders an annotated composite over the
//! reference photo.
//!
//! ## Core Features
//!
//! - **Trait-based Strategies**: the window rule, wall rule, resolution
//!   reconciler and renderer are all pluggable
//! - **Three Mask Shapes**: combined mask, two-mask (wall by subtraction)
//!   and overlay-on-photo (red-channel delta) workflows
//! - **Pure & Deterministic**: no shared state, inputs never mutated,
//!   identical input yields identical counts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use facade::{Analyzer, io};
//!
//! let analyzer = Analyzer::builder().build();
//!
//! let reference = io::load_rgb("photo.png")?;
//! let mask = io::load_rgb("mask.png")?;
//!
//! let analysis = analyzer.analyze(&mask, None)?;
//! println!("{}", analysis.result.summary());
//!
//! let vis = analyzer.visualize(&reference, &mask, analysis.result.window_ratio())?;
//! io::save_png(&vis, "result.png")?;
//! # Ok::<(), facade::FacadeError>(())
//! ```
//!
//! ## Custom Thresholds
//!
//! ```rust
//! use facade::{Analyzer, algorithms::{WindowThresholds, WallThresholds}};
//!
//! let analyzer = Analyzer::builder()
//!     .window_thresholds(WindowThresholds { floor: 100, margin: 40 })
//!     .wall_thresholds(WallThresholds::default())
//!     .build();
//! ```

// Core modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use algorithms::*;
pub use config::AnalysisMode;
pub use error::{FacadeError, Result};
pub use pipeline::{Analyzer, builder::AnalyzerBuilder};
pub use traits::*;
pub use types::{Analysis, ClassGrid, ClassificationResult, PixelClass, WindowRatio};
