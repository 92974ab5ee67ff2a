// fusion_replay/src/replay/runner.rs

use super::scoring::RmseAccumulator;
use super::writer::EstimateWriter;
use super::{LogRecord, ReplayError};
use fusion_core::config::FilterConfig;
use fusion_core::estimation::fusion::{CycleOutcome, FusionEkf};
use nalgebra::Vector4;
use std::io::Write;
use tracing::{info, warn};

/// Counters collected over one replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    /// Records accepted by the controller (including the initializing one).
    pub processed: usize,
    /// Cycles whose update was dropped for numerical reasons.
    pub skipped_updates: usize,
    /// Records the controller refused (out of order, non-finite).
    pub rejected: usize,
    /// RMSE over records carrying ground truth, if any did.
    pub rmse: Option<Vector4<f64>>,
}

/// Feeds every record through a fresh controller, writing one estimate per
/// accepted record. Rejected records are logged and skipped; only I/O errors
/// stop the replay.
pub fn run_replay<W: Write>(
    records: &[LogRecord],
    config: &FilterConfig,
    writer: &mut EstimateWriter<W>,
) -> Result<ReplaySummary, ReplayError> {
    let mut fusion = FusionEkf::with_config(config.clone());
    let mut rmse = RmseAccumulator::default();
    let mut summary = ReplaySummary::default();

    for record in records {
        let outcome = match fusion.process_measurement(&record.message) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(timestamp = record.message.timestamp, error = %err, "measurement rejected");
                summary.rejected += 1;
                continue;
            }
        };

        summary.processed += 1;
        if matches!(outcome, CycleOutcome::UpdateSkipped(_)) {
            summary.skipped_updates += 1;
        }

        let Some(estimate) = fusion.estimate() else {
            continue;
        };
        writer.write_estimate(record.message.sensor(), &estimate, &outcome)?;
        if let Some(truth) = &record.ground_truth {
            rmse.push(&estimate.state, truth);
        }
    }
    writer.flush()?;

    summary.rmse = rmse.rmse();
    info!(
        processed = summary.processed,
        rejected = summary.rejected,
        skipped_updates = summary.skipped_updates,
        scored = rmse.count(),
        "replay finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_core::messages::MeasurementMessage;

    fn record(message: MeasurementMessage, truth: [f64; 4]) -> LogRecord {
        LogRecord {
            message,
            ground_truth: Some(Vector4::from(truth)),
        }
    }

    #[test]
    fn counts_rejections_and_skipped_updates() {
        let records = vec![
            record(MeasurementMessage::lidar(1_000, 0.0, 0.0), [0.0, 0.0, 0.0, 0.0]),
            // earlier than the previous record
            record(MeasurementMessage::lidar(500, 1.0, 1.0), [1.0, 1.0, 0.0, 0.0]),
            // radar with the state still on the origin
            record(MeasurementMessage::radar(101_000, 1.0, 0.0, 0.0), [0.0, 0.0, 0.0, 0.0]),
            record(MeasurementMessage::lidar(201_000, 0.1, 0.0), [0.1, 0.0, 1.0, 0.0]),
        ];

        let mut writer = EstimateWriter::new(Vec::new());
        let summary = run_replay(&records, &FilterConfig::default(), &mut writer).unwrap();

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.skipped_updates, 1);
        assert!(summary.rmse.is_some());

        let text = String::from_utf8(writer.into_inner()).unwrap();
        // header + one line per accepted record
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().nth(2).unwrap().ends_with("update_skipped"));
    }

    #[test]
    fn empty_log_produces_no_output() {
        let mut writer = EstimateWriter::new(Vec::new());
        let summary = run_replay(&[], &FilterConfig::default(), &mut writer).unwrap();
        assert_eq!(summary, ReplaySummary::default());
        assert!(writer.into_inner().is_empty());
    }
}
