// src/data_input/sample.rs

use std::fmt;

/// One parsed line of a tracking log.
///
/// `position` is the true target position and is what gets plotted.
/// Simulator error logs also carry the tracker's `prediction` between the
/// position and the metric; linear-room logs append a `confidence`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: [f64; 3],
    pub prediction: Option<[f64; 3]>,
    pub metric: f64,
    pub confidence: Option<f64>,
}

impl Sample {
    pub fn new(position: [f64; 3], metric: f64) -> Self {
        Self {
            position,
            prediction: None,
            metric,
            confidence: None,
        }
    }

    pub fn with_prediction(mut self, prediction: [f64; 3]) -> Self {
        self.prediction = Some(prediction);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

fn write_tuple(f: &mut fmt::Formatter<'_>, values: &[f64; 3]) -> fmt::Result {
    write!(f, "({}, {}, {})", values[0], values[1], values[2])
}

/// Writes the same layout the parser reads, so a formatted sample parses back
/// to the same values.
impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, &self.position)?;
        if let Some(prediction) = &self.prediction {
            f.write_str(", ")?;
            write_tuple(f, prediction)?;
        }
        write!(f, ", {}", self.metric)?;
        if let Some(confidence) = self.confidence {
            write!(f, ", {confidence}")?;
        }
        Ok(())
    }
}

/// Samples split into parallel columns for the analysis and plotting steps.
/// Index `i` of every column belongs to the same sample.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SampleColumns {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub metric: Vec<f64>,
    pub confidence: Vec<Option<f64>>,
    pub prediction: Vec<Option<[f64; 3]>>,
}

impl SampleColumns {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
            metric: Vec::with_capacity(capacity),
            confidence: Vec::with_capacity(capacity),
            prediction: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: &Sample) {
        let [x, y, z] = sample.position;
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
        self.metric.push(sample.metric);
        self.confidence.push(sample.confidence);
        self.prediction.push(sample.prediction);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of samples that carried a confidence value.
    pub fn confidence_count(&self) -> usize {
        self.confidence.iter().filter(|c| c.is_some()).count()
    }

    /// Number of samples that carried a predicted position.
    pub fn prediction_count(&self) -> usize {
        self.prediction.iter().filter(|p| p.is_some()).count()
    }

    /// Rebuilds the sample at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            position: [*self.x.get(index)?, *self.y.get(index)?, *self.z.get(index)?],
            prediction: *self.prediction.get(index)?,
            metric: *self.metric.get(index)?,
            confidence: *self.confidence.get(index)?,
        })
    }
}

impl FromIterator<Sample> for SampleColumns {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut columns = Self::with_capacity(iter.size_hint().0);
        for sample in iter {
            columns.push(&sample);
        }
        columns
    }
}


// src/data_input/sample.rs
