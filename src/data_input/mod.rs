// src/data_input/mod.rs

pub mod sample;
pub mod sample_parser;
pub mod sample_reader;

// src/data_input/mod.rs
