use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::submodules::{
    cli::Args,
    field_io::load_field,
    grid_info::{meshgrid, GridInfo},
    pcolormesh::{render, DensityPlot},
};

pub const GRID_INFO_FILE: &str = "grid_info.txt";
pub const ELECTRON_FIELD_FILE: &str = "field_e.txt";
pub const ION_DENSITY_FILE: &str = "density_i.txt";
pub const ELECTRON_PLOT_FILE: &str = "electron_density_2d.png";
pub const ION_PLOT_FILE: &str = "ion_density_2d.png";

/// Render the electron and ion density plots for the run stored in `args.out`.
pub fn run(args: &Args) -> Result<()> {
    let style = args.plot_style().context("failed to load plot style")?;
    debug!(data_path = %args.data_path.display(), "benchmark data path is not used by this tool");

    let grid = GridInfo::from_file(&args.out.join(GRID_INFO_FILE))?;
    debug!(?grid, "read grid info");

    let electron_path = args.out.join(ELECTRON_FIELD_FILE);
    println!("Trying to open: {}", electron_path.display());
    let electron = load_field(&electron_path)?;
    let ion = load_field(&args.out.join(ION_DENSITY_FILE))?;
    debug!(electron = ?electron.dim(), ion = ?ion.dim(), "loaded fields");

    let (x, y) = grid.axes();
    let (mesh_x, mesh_y) = meshgrid(&x, &y);

    // fields are stored x-major, the mesh is y-major
    let plots = [
        (DensityPlot::electron(), electron.t(), ELECTRON_PLOT_FILE),
        (DensityPlot::ion(), ion.t(), ION_PLOT_FILE),
    ];
    for (plot, values, file_name) in plots {
        let path = args.out.join(file_name);
        render(&plot, values, &mesh_x, &mesh_y, &style, &path)
            .with_context(|| format!("failed to plot {}", plot.title))?;
        info!(path = %path.display(), "saved plot");
    }

    println!("Plots saved in {}", args.out.display());
    Ok(())
}
