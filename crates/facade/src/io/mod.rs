pub mod raster;
pub mod report;

pub use raster::{load_rgb, save_png};
