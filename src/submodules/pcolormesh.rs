use std::{ops::Range, path::Path};

use ndarray::{Array1, Array2, ArrayView2};
use plotters::prelude::*;
use tracing::debug;

use super::{
    colormap::ColorScale,
    error::{PlotError, Result},
    plot_style::PlotStyle,
    type_lib::NumericData,
};

const COLORBAR_STEPS: usize = 256;

/// Text decorations of one pseudocolor figure.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityPlot {
    pub title: String,
    pub colorbar_label: String,
    pub x_label: String,
    pub y_label: String,
}

impl DensityPlot {
    pub fn new(title: &str, colorbar_label: &str) -> Self {
        DensityPlot {
            title: title.to_string(),
            colorbar_label: colorbar_label.to_string(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
        }
    }

    pub fn electron() -> Self {
        DensityPlot::new("Electron Density", "Electron Density")
    }

    pub fn ion() -> Self {
        DensityPlot::new("Ion Density", "Ion Density")
    }
}

/// Cell boundaries for centred ("nearest") shading: midpoints between
/// neighbours, outer edges pushed out by half the adjacent spacing.
pub fn cell_edges(centres: &Array1<NumericData>) -> Array1<NumericData> {
    let n = centres.len();
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from(vec![centres[0] - 0.5, centres[0] + 0.5]),
        _ => {
            let mut edges = Array1::zeros(n + 1);
            for k in 1..n {
                edges[k] = 0.5 * (centres[k - 1] + centres[k]);
            }
            edges[0] = centres[0] - 0.5 * (centres[1] - centres[0]);
            edges[n] = centres[n - 1] + 0.5 * (centres[n - 1] - centres[n - 2]);
            edges
        }
    }
}

fn axis_range(edges: &Array1<NumericData>) -> Range<NumericData> {
    let lo = edges.iter().copied().fold(NumericData::INFINITY, NumericData::min);
    let hi = edges.iter().copied().fold(NumericData::NEG_INFINITY, NumericData::max);
    if hi > lo {
        lo..hi
    } else {
        (lo - 0.5)..(lo + 0.5)
    }
}

fn render_error<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

/// Draw `values` over the mesh `(mesh_x, mesh_y)` with a colorbar and write a PNG to `path`.
/// All three arrays must share the mesh shape `(ny, nx)`.
pub fn render(
    plot: &DensityPlot,
    values: ArrayView2<NumericData>,
    mesh_x: &Array2<NumericData>,
    mesh_y: &Array2<NumericData>,
    style: &PlotStyle,
    path: &Path,
) -> Result<()> {
    let mesh_shape = mesh_x.dim();
    if mesh_y.dim() != mesh_shape {
        return Err(PlotError::ShapeMismatch {
            name: "Y coordinates".to_string(),
            expected: mesh_shape,
            found: mesh_y.dim(),
        });
    }
    if values.dim() != mesh_shape || mesh_shape.0 == 0 || mesh_shape.1 == 0 {
        return Err(PlotError::ShapeMismatch {
            name: plot.title.clone(),
            expected: mesh_shape,
            found: values.dim(),
        });
    }

    let x_edges = cell_edges(&mesh_x.row(0).to_owned());
    let y_edges = cell_edges(&mesh_y.column(0).to_owned());
    let scale = style.colormap.scale();
    let bounds = scale.bounds(&values.to_owned());
    debug!(title = %plot.title, vmin = bounds.0, vmax = bounds.1, "rendering pseudocolor plot");

    let (width, height) = style.pixel_size();
    let plot_width = width.checked_sub(style.colorbar_width()).ok_or_else(|| {
        PlotError::Render(format!(
            "colorbar of {} pixels does not fit a {} pixel wide figure",
            style.colorbar_width(),
            width
        ))
    })?;
    let font = style.font_family.as_str();
    let label_size = style.label_font_size;
    let label_font = (font, label_size as NumericData);

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;
    let body = root
        .titled(&plot.title, (font, style.title_font_size as NumericData))
        .map_err(render_error)?;
    let (plot_area, colorbar_area) = body.split_horizontally(plot_width);

    let x_label_area = label_size * 3;
    let mut chart = ChartBuilder::on(&plot_area)
        .margin(10)
        .x_label_area_size(x_label_area)
        .y_label_area_size(label_size * 4)
        .build_cartesian_2d(axis_range(&x_edges), axis_range(&y_edges))
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(plot.x_label.as_str())
        .y_desc(plot.y_label.as_str())
        .label_style(label_font)
        .axis_desc_style(label_font)
        .draw()
        .map_err(render_error)?;

    let (ny, nx) = mesh_shape;
    chart
        .draw_series((0..ny).flat_map(|j| (0..nx).map(move |i| (j, i))).filter_map(|(j, i)| {
            let value = values[[j, i]];
            value.is_finite().then(|| {
                Rectangle::new(
                    [(x_edges[i], y_edges[j]), (x_edges[i + 1], y_edges[j + 1])],
                    scale.color(value, bounds).filled(),
                )
            })
        }))
        .map_err(render_error)?;

    let mut colorbar = ChartBuilder::on(&colorbar_area)
        .margin(10)
        .margin_right(label_size)
        .x_label_area_size(x_label_area)
        .right_y_label_area_size(label_size * 5)
        .build_cartesian_2d(0.0..1.0, bounds.0..bounds.1)
        .map_err(render_error)?;

    colorbar
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_desc(plot.colorbar_label.as_str())
        .label_style(label_font)
        .axis_desc_style(label_font)
        .draw()
        .map_err(render_error)?;

    let step = (bounds.1 - bounds.0) / COLORBAR_STEPS as NumericData;
    colorbar
        .draw_series((0..COLORBAR_STEPS).map(|k| {
            let lo = bounds.0 + step * k as NumericData;
            Rectangle::new([(0.0, lo), (1.0, lo + step)], scale.color(lo + 0.5 * step, bounds).filled())
        }))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    debug!(path = %path.display(), width, height, "wrote image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submodules::grid_info::{linspace, meshgrid};
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn edges_straddle_uniform_centres() {
        let edges = cell_edges(&linspace(0.0, 1.0, 3));
        let expected = [-0.25, 0.25, 0.75, 1.25];
        assert_eq!(edges.len(), 4);
        for (edge, want) in edges.iter().zip(expected) {
            assert_relative_eq!(*edge, want);
        }
    }

    #[test]
    fn edges_follow_uneven_spacing() {
        let edges = cell_edges(&Array1::from(vec![0.0, 1.0, 4.0]));
        assert_eq!(edges.to_vec(), vec![-0.5, 0.5, 2.5, 5.5]);
    }

    #[test]
    fn single_centre_gets_unit_cell() {
        assert_eq!(cell_edges(&Array1::from(vec![2.0])).to_vec(), vec![1.5, 2.5]);
        assert_eq!(cell_edges(&Array1::zeros(0)).len(), 0);
    }

    #[test]
    fn labels_match_the_density_kind() {
        let electron = DensityPlot::electron();
        assert_eq!(electron.title, "Electron Density");
        assert_eq!(electron.colorbar_label, "Electron Density");
        assert_eq!((electron.x_label.as_str(), electron.y_label.as_str()), ("X", "Y"));
        assert_eq!(DensityPlot::ion().colorbar_label, "Ion Density");
    }

    #[test]
    fn mismatched_values_are_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("electron_density_2d.png");
        let (mesh_x, mesh_y) = meshgrid(&linspace(0.0, 1.0, 3), &linspace(0.0, 2.0, 4));
        let values = array![[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0], [9.0, 10.0, 11.0, 12.0]];
        let result = render(
            &DensityPlot::electron(),
            values.view(),
            &mesh_x,
            &mesh_y,
            &PlotStyle::default(),
            &path,
        );
        match result {
            Err(PlotError::ShapeMismatch { expected, found, .. }) => {
                assert_eq!(expected, (4, 3));
                assert_eq!(found, (3, 4));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn colorbar_wider_than_figure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("electron_density_2d.png");
        let (mesh_x, mesh_y) = meshgrid(&linspace(0.0, 1.0, 3), &linspace(0.0, 2.0, 4));
        let values = Array2::zeros((4, 3));
        let style = PlotStyle { label_font_size: 200, ..PlotStyle::default() };
        let result = render(&DensityPlot::electron(), values.view(), &mesh_x, &mesh_y, &style, &path);
        assert!(matches!(result, Err(PlotError::Render(_))));
        assert!(!path.exists());
    }

    #[test]
    fn renders_a_png_of_the_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ion_density_2d.png");
        let (mesh_x, mesh_y) = meshgrid(&linspace(0.0, 1.0, 3), &linspace(0.0, 2.0, 4));
        let values = Array2::from_shape_fn((4, 3), |(j, i)| (i + 3 * j) as NumericData);
        let style = PlotStyle { dpi: 40.0, ..PlotStyle::default() };
        render(&DensityPlot::ion(), values.view(), &mesh_x, &mesh_y, &style, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        assert_eq!((width, height), (400, 320));
    }
}
