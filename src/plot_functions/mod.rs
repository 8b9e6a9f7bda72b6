// src/plot_functions/mod.rs

pub mod plot_metric_hexbin;
pub mod plot_metric_scatter;

// src/plot_functions/mod.rs
