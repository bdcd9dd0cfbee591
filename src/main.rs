use clap::Parser;
use scripts::plot_results_2d;
use submodules::cli::Args;
use tracing_subscriber::{fmt, EnvFilter};

mod scripts;
mod submodules;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the progress lines, diagnostics go to stderr
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    plot_results_2d::run(&args)
}
