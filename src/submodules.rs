pub mod cli;
pub mod colormap;
pub mod error;
pub mod field_io;
pub mod grid_info;
pub mod pcolormesh;
pub mod plot_style;
pub mod type_lib;
