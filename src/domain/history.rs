// Rolling history window feeding the flow and level charts
use serde::Serialize;
use std::collections::VecDeque;

pub const MAX_HISTORY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct HistorySample {
    pub timestamp_label: String,
    pub flow_in: f64,
    pub flow_out: f64,
    pub level_mm: f64,
}

impl HistorySample {
    pub fn new(timestamp_label: String, flow_in: f64, flow_out: f64, level_mm: f64) -> Self {
        Self {
            timestamp_label,
            flow_in,
            flow_out,
            level_mm,
        }
    }
}

/// Parallel, index-aligned series in insertion order, shaped the way the
/// chart renderer consumes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistorySeries {
    pub timestamps: Vec<String>,
    pub flow_in: Vec<f64>,
    pub flow_out: Vec<f64>,
    pub level: Vec<f64>,
}

/// Fixed-capacity FIFO of samples. Storage is private; readers only get
/// owned copies.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<HistorySample>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push at the tail; evicts the oldest sample once over capacity.
    pub fn append(&mut self, sample: HistorySample) {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Oldest to newest.
    pub fn series(&self) -> HistorySeries {
        let mut series = HistorySeries {
            timestamps: Vec::with_capacity(self.samples.len()),
            flow_in: Vec::with_capacity(self.samples.len()),
            flow_out: Vec::with_capacity(self.samples.len()),
            level: Vec::with_capacity(self.samples.len()),
        };
        for sample in &self.samples {
            series.timestamps.push(sample.timestamp_label.clone());
            series.flow_in.push(sample.flow_in);
            series.flow_out.push(sample.flow_out);
            series.level.push(sample.level_mm);
        }
        series
    }
}
