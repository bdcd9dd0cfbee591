pub mod plot_results_2d;
