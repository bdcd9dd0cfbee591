use clap::ValueEnum;
use colorgrad::Gradient;
use enum_dispatch::enum_dispatch;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use super::type_lib::{Field, NumericData};

/// Named gradients selectable from the command line or a style file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Colormap {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Turbo,
    RdYlBu,
    RdBu,
}

impl Colormap {
    fn gradient(&self) -> Box<dyn Gradient> {
        match self {
            Colormap::Viridis => Box::new(colorgrad::preset::viridis()),
            Colormap::Plasma => Box::new(colorgrad::preset::plasma()),
            Colormap::Inferno => Box::new(colorgrad::preset::inferno()),
            Colormap::Magma => Box::new(colorgrad::preset::magma()),
            Colormap::Cividis => Box::new(colorgrad::preset::cividis()),
            Colormap::Turbo => Box::new(colorgrad::preset::turbo()),
            Colormap::RdYlBu => Box::new(colorgrad::preset::rd_yl_bu()),
            Colormap::RdBu => Box::new(colorgrad::preset::rd_bu()),
        }
    }

    pub fn is_diverging(&self) -> bool {
        matches!(self, Colormap::RdYlBu | Colormap::RdBu)
    }

    pub fn scale(&self) -> ColorScaleKinds {
        let gradient = self.gradient();
        if self.is_diverging() {
            ColorScaleKinds::Diverging(Diverging { gradient })
        } else {
            ColorScaleKinds::Sequential(Sequential { gradient })
        }
    }
}

#[enum_dispatch]
pub trait ColorScale {
    /// Value range mapped onto the ends of the gradient.
    fn bounds(&self, data: &Field) -> (NumericData, NumericData);
    fn color(&self, value: NumericData, bounds: (NumericData, NumericData)) -> RGBColor;
}

/// Linear min..max normalisation.
pub struct Sequential {
    gradient: Box<dyn Gradient>,
}

impl ColorScale for Sequential {
    fn bounds(&self, data: &Field) -> (NumericData, NumericData) {
        let (min, max) = data
            .iter()
            .filter(|v| v.is_finite())
            .fold((NumericData::INFINITY, NumericData::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if min > max {
            return (0.0, 1.0);
        }
        widen(min, max)
    }

    fn color(&self, value: NumericData, bounds: (NumericData, NumericData)) -> RGBColor {
        sample(self.gradient.as_ref(), value, bounds)
    }
}

/// Symmetric normalisation around zero.
pub struct Diverging {
    gradient: Box<dyn Gradient>,
}

impl ColorScale for Diverging {
    fn bounds(&self, data: &Field) -> (NumericData, NumericData) {
        let max_abs = data
            .iter()
            .filter(|v| v.is_finite())
            .fold(0.0, |acc: NumericData, &v| acc.max(v.abs()));
        if max_abs > 0.0 {
            (-max_abs, max_abs)
        } else {
            (-1.0, 1.0)
        }
    }

    fn color(&self, value: NumericData, bounds: (NumericData, NumericData)) -> RGBColor {
        sample(self.gradient.as_ref(), value, bounds)
    }
}

#[enum_dispatch(ColorScale)]
pub enum ColorScaleKinds {
    Sequential(Sequential),
    Diverging(Diverging),
}

fn widen(min: NumericData, max: NumericData) -> (NumericData, NumericData) {
    if max > min {
        (min, max)
    } else {
        let pad = 0.5 * min.abs().max(1.0);
        (min - pad, max + pad)
    }
}

fn normalise(value: NumericData, (min, max): (NumericData, NumericData)) -> NumericData {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

fn sample(gradient: &dyn Gradient, value: NumericData, bounds: (NumericData, NumericData)) -> RGBColor {
    let rgba = gradient.at(normalise(value, bounds) as f32).to_rgba8();
    RGBColor(rgba[0], rgba[1], rgba[2])
}
