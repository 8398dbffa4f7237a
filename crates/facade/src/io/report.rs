use std::fmt::Write as _;
use std::path::Path;

use crate::{
    error::Result,
    types::{ClassificationResult, WindowRatio},
};

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl ClassificationResult {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ReportJson::from(self))?)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Human-readable stats block, as printed by the CLI after a run.
    pub fn summary(&self) -> String {
        let rule = "=".repeat(50);
        let mut out = String::new();
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "  WINDOW-TO-FACADE ANALYSIS");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "  Total pixels:   {:>12}", group_digits(self.total_pixels));
        let _ = writeln!(
            out,
            "  Facade pixels:  {:>12} ({:.1}% of image)",
            group_digits(self.facade_pixels()),
            self.facade_coverage() * 100.0
        );
        let _ = writeln!(out, "  |- Windows:     {:>12}", group_digits(self.window_pixels));
        let _ = writeln!(out, "  |- Opaque wall: {:>12}", group_digits(self.wall_pixels));
        let _ = writeln!(out, "{rule}");
        match self.window_ratio() {
            WindowRatio::Ratio(r) => {
                let _ = writeln!(out, "  WINDOW / FACADE: {:.1}%", r * 100.0);
                let _ = writeln!(out, "  WALL / FACADE:   {:.1}%", (1.0 - r) * 100.0);
            }
            WindowRatio::NoFacadeDetected => {
                let _ = writeln!(out, "  No facade detected");
            }
        }
        let _ = write!(out, "{rule}");
        out
    }
}

/// Flat JSON shape of a result, with the derived fields materialized.
#[derive(serde::Serialize)]
struct ReportJson {
    window_pixels: u64,
    wall_pixels: u64,
    facade_pixels: u64,
    total_pixels: u64,
    window_ratio: WindowRatio,
}

impl From<&ClassificationResult> for ReportJson {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            window_pixels: result.window_pixels,
            wall_pixels: result.wall_pixels,
            facade_pixels: result.facade_pixels(),
            total_pixels: result.total_pixels,
            window_ratio: result.window_ratio(),
        }
    }
}
