// Per-Round JSONL Time Series Recorder
// Outputs one JSON line per round for independent analysis

use serde::Serialize;
use resonance_engine::{RoundRecord, TransparencySignal};
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct RoundSnapshot {
    pub round: u64,
    /// Counts after the update.
    pub cooperate_count: u32,
    pub defect_count: u32,
    pub cooperate_ratio: f64,
    /// Scores of the generation that played this round.
    pub mean_score: f64,
    pub best_score: f64,
    pub declining: bool,
}

impl RoundSnapshot {
    pub fn new(record: &RoundRecord, signal: &TransparencySignal, decline_threshold: Option<f64>) -> Self {
        Self {
            round: record.round_index,
            cooperate_count: record.cooperate_count,
            defect_count: record.defect_count,
            cooperate_ratio: record.cooperate_ratio(),
            mean_score: signal.mean_score,
            best_score: signal.best_score,
            declining: decline_threshold.map_or(false, |t| signal.mean_score < t),
        }
    }
}

/// Time series recorder that accumulates snapshots and writes JSONL
pub struct TimeSeriesRecorder {
    snapshots: Vec<RoundSnapshot>,
    decline_threshold: Option<f64>,
}

impl TimeSeriesRecorder {
    pub fn new(decline_threshold: Option<f64>) -> Self {
        Self { snapshots: Vec::new(), decline_threshold }
    }

    pub fn record(&mut self, record: &RoundRecord, signal: &TransparencySignal) {
        self.snapshots.push(RoundSnapshot::new(record, signal, self.decline_threshold));
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_flags_decline() {
        let record = RoundRecord { round_index: 3, cooperate_count: 1, defect_count: 1 };
        let signal = TransparencySignal {
            round_index: 3,
            best_score: 4.0,
            mean_score: 1.5,
            cooperate_count: 0,
            defect_count: 2,
        };
        assert!(RoundSnapshot::new(&record, &signal, Some(2.0)).declining);
        assert!(!RoundSnapshot::new(&record, &signal, None).declining);

        let mut recorder = TimeSeriesRecorder::new(Some(2.0));
        recorder.record(&record, &signal);
        assert_eq!(recorder.len(), 1);
    }
}
