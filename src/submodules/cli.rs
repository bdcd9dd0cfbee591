use std::path::PathBuf;

use clap::Parser;

use super::{colormap::Colormap, error::Result, plot_style::PlotStyle};

#[derive(Parser, Debug)]
#[command(name = "plot_results_2d")]
#[command(about = "Plot 2D benchmark and calculation results")]
pub struct Args {
    /// Path to folder containing the calculation data
    pub out: PathBuf,

    /// Path to folder with benchmark data
    #[arg(short = 'd', long = "data_path", default_value = "../data")]
    pub data_path: PathBuf,

    /// JSON file overriding figure size, dpi, fonts or colormap
    #[arg(long = "style")]
    pub style: Option<PathBuf>,

    /// Colormap for both plots, takes precedence over the style file
    #[arg(long = "colormap", value_enum)]
    pub colormap: Option<Colormap>,
}

impl Args {
    pub fn plot_style(&self) -> Result<PlotStyle> {
        let mut style = match &self.style {
            Some(path) => PlotStyle::from_file(path)?,
            None => PlotStyle::default(),
        };
        if let Some(colormap) = self.colormap {
            style.colormap = colormap;
        }
        style.validate()?;
        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_path_defaults_to_sibling_data_dir() {
        let args = Args::try_parse_from(["plot_results_2d", "run/out"]).unwrap();
        assert_eq!(args.out, PathBuf::from("run/out"));
        assert_eq!(args.data_path, PathBuf::from("../data"));
        assert!(args.style.is_none());
        assert_eq!(args.plot_style().unwrap(), PlotStyle::default());
    }

    #[test]
    fn short_and_long_data_path_flags() {
        let short = Args::try_parse_from(["plot_results_2d", "out", "-d", "bench"]).unwrap();
        let long = Args::try_parse_from(["plot_results_2d", "--data_path", "bench", "out"]).unwrap();
        assert_eq!(short.data_path, PathBuf::from("bench"));
        assert_eq!(long.data_path, PathBuf::from("bench"));
    }

    #[test]
    fn output_dir_is_required() {
        assert!(Args::try_parse_from(["plot_results_2d"]).is_err());
    }

    #[test]
    fn colormap_flag_overrides_style_file() {
        let dir = tempfile::tempdir().unwrap();
        let style_path = dir.path().join("style.json");
        std::fs::write(&style_path, r#"{ "colormap": "magma", "fig_width": 6 }"#).unwrap();
        let style_arg = style_path.to_string_lossy().into_owned();
        let args = Args::try_parse_from([
            "plot_results_2d",
            "out",
            "--style",
            style_arg.as_str(),
            "--colormap",
            "rd-bu",
        ])
        .unwrap();
        let style = args.plot_style().unwrap();
        assert_eq!(style.colormap, Colormap::RdBu);
        assert_eq!(style.pixel_size(), (600, 800));
    }

    #[test]
    fn unknown_colormap_is_rejected() {
        assert!(Args::try_parse_from(["plot_results_2d", "out", "--colormap", "jet"]).is_err());
    }
}
