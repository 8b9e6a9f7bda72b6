// src/data_input/sample_reader.rs

use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data_input::sample::SampleColumns;
use crate::data_input::sample_parser::parse_line;
use crate::error::TrackingDataError;

/// Parses every line of `reader` into columns.
///
/// Blank lines are skipped. The first malformed line aborts the read; nothing
/// parsed before it is returned.
pub fn parse_samples<R: BufRead>(reader: R) -> Result<SampleColumns, TrackingDataError> {
    let mut columns = SampleColumns::default();
    let mut blank_lines = 0usize;

    for (line_index, line_result) in reader.lines().enumerate() {
        let line_number = line_index + 1;
        let line =
            line_result.map_err(|source| TrackingDataError::Read { line_number, source })?;

        if line.trim().is_empty() {
            blank_lines += 1;
            continue;
        }

        let sample =
            parse_line(&line).map_err(|source| TrackingDataError::Parse { line_number, source })?;
        columns.push(&sample);
    }

    if blank_lines > 0 {
        debug!("Skipped {blank_lines} blank line(s)");
    }
    Ok(columns)
}

/// Reads and parses the sample file at `input_path`.
pub fn read_samples(input_path: &Path) -> Result<SampleColumns, TrackingDataError> {
    let columns = {
        // The handle is dropped at the end of this block on every path.
        let file = File::open(input_path).map_err(|source| TrackingDataError::Open {
            path: input_path.to_path_buf(),
            source,
        })?;
        parse_samples(BufReader::new(file))?
    };

    info!(
        "Read {} samples from '{}'",
        columns.len(),
        input_path.display()
    );

    let with_confidence = columns.confidence_count();
    if with_confidence == columns.len() && !columns.is_empty() {
        info!("  Confidence: present on every sample");
    } else if with_confidence == 0 {
        info!("  Confidence: not present");
    } else {
        warn!(
            "  Confidence: present on {} of {} samples (mixed formats in one file)",
            with_confidence,
            columns.len()
        );
    }

    let with_prediction = columns.prediction_count();
    if with_prediction > 0 {
        info!(
            "  Predicted positions: present on {} of {} samples",
            with_prediction,
            columns.len()
        );
    }

    Ok(columns)
}


// src/data_input/sample_reader.rs
