use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{colormap::Colormap, error::{PlotError, Result}, type_lib::NumericData};

const MIN_WIDTH: u32 = 400;
const MIN_HEIGHT: u32 = 300;
const MAX_PIXELS: NumericData = 20_000.0;
/// Smallest drawable extent of the plotting area, in pixels.
const MIN_PLOT_EXTENT: u32 = 100;

/// Figure geometry and appearance shared by every rendered plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotStyle {
    #[serde(default = "default_fig_width")]
    pub fig_width: NumericData,
    #[serde(default = "default_fig_height")]
    pub fig_height: NumericData,
    #[serde(default = "default_dpi")]
    pub dpi: NumericData,
    #[serde(default)]
    pub colormap: Colormap,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: u32,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: u32,
}

fn default_fig_width() -> NumericData {
    10.0
}

fn default_fig_height() -> NumericData {
    8.0
}

fn default_dpi() -> NumericData {
    100.0
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

fn default_title_font_size() -> u32 {
    30
}

fn default_label_font_size() -> u32 {
    18
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            fig_width: default_fig_width(),
            fig_height: default_fig_height(),
            dpi: default_dpi(),
            colormap: Colormap::default(),
            font_family: default_font_family(),
            title_font_size: default_title_font_size(),
            label_font_size: default_label_font_size(),
        }
    }
}

impl PlotStyle {
    /// Load a style from a JSON file; omitted keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let style: PlotStyle = serde_json::from_str(&content)
            .map_err(|e| PlotError::Config(format!("'{}': {}", path.display(), e)))?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = self.fig_width.is_finite() && self.fig_height.is_finite();
        if !(finite && self.fig_width > 0.0 && self.fig_height > 0.0) {
            return Err(PlotError::Config(format!(
                "figure size must be positive and finite (width={}, height={})",
                self.fig_width, self.fig_height
            )));
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(PlotError::Config(format!("dpi must be positive and finite, got {}", self.dpi)));
        }
        let (raw_width, raw_height) = (self.fig_width * self.dpi, self.fig_height * self.dpi);
        if !(raw_width.round() <= MAX_PIXELS && raw_height.round() <= MAX_PIXELS) {
            return Err(PlotError::Config(format!(
                "figure of {:.0}x{:.0} pixels exceeds the {} pixel limit",
                raw_width, raw_height, MAX_PIXELS
            )));
        }
        let (width, height) = self.pixel_size();
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(PlotError::Config(format!(
                "figure of {}x{} pixels is too small to draw",
                width, height
            )));
        }
        if self.title_font_size == 0 || self.label_font_size == 0 {
            return Err(PlotError::Config("font sizes must be positive".to_string()));
        }

        // label areas and margins must leave room for the plot itself
        let label = self.label_font_size as u64;
        let needed_width = self.colorbar_width() as u64 + label * 4 + 20 + MIN_PLOT_EXTENT as u64;
        let needed_height = self.title_font_size as u64 * 2 + label * 3 + 20 + MIN_PLOT_EXTENT as u64;
        if needed_width > width as u64 || needed_height > height as u64 {
            return Err(PlotError::Config(format!(
                "fonts (title {}, labels {}) need at least {}x{} pixels, figure is {}x{}",
                self.title_font_size, self.label_font_size, needed_width, needed_height, width, height
            )));
        }
        Ok(())
    }

    /// Width reserved on the right for the colorbar, its ticks and its label.
    pub fn colorbar_width(&self) -> u32 {
        let (width, _) = self.pixel_size();
        let proportional = (width as NumericData * 0.16).round() as u32;
        proportional.max(self.label_font_size.saturating_mul(6).saturating_add(60))
    }

    /// Output image size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.fig_width * self.dpi).round() as u32,
            (self.fig_height * self.dpi).round() as u32,
        )
    }
}
