// src/data_analysis/mod.rs

pub mod hexbin;
pub mod metric_summary;

// src/data_analysis/mod.rs
