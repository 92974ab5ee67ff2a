// fusion_replay/src/replay/writer.rs

use super::{LogRecord, ReplayError};
use fusion_core::estimation::fusion::CycleOutcome;
use fusion_core::messages::Estimate;
use fusion_core::types::SensorKind;
use std::io::Write;

const HEADER: &str = "timestamp\tsensor\tpx\tpy\tvx\tvy\tvar_px\tvar_py\tvar_vx\tvar_vy\toutcome";

/// Writes one tab-separated line per processed measurement.
pub struct EstimateWriter<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> EstimateWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }

    pub fn write_estimate(
        &mut self,
        sensor: SensorKind,
        estimate: &Estimate,
        outcome: &CycleOutcome,
    ) -> Result<(), ReplayError> {
        if !self.header_written {
            writeln!(self.out, "{HEADER}")?;
            self.header_written = true;
        }

        let outcome = match outcome {
            CycleOutcome::Initialized => "initialized",
            CycleOutcome::Updated => "updated",
            CycleOutcome::UpdateSkipped(_) => "update_skipped",
        };
        let s = &estimate.state;
        let v = &estimate.variances;
        writeln!(
            self.out,
            "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{}",
            estimate.timestamp,
            sensor.tag(),
            s[0],
            s[1],
            s[2],
            s[3],
            v[0],
            v[1],
            v[2],
            v[3],
            outcome
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Serializes records back into the measurement-log format read by
/// [`super::parser::parse_log`].
pub fn write_log<W: Write>(mut out: W, records: &[LogRecord]) -> Result<(), ReplayError> {
    for record in records {
        let message = &record.message;
        write!(out, "{}", message.sensor().tag())?;
        for value in message.data.as_slice() {
            write!(out, "\t{value}")?;
        }
        write!(out, "\t{}", message.timestamp)?;
        if let Some(gt) = &record.ground_truth {
            for value in gt.iter() {
                write!(out, "\t{value}")?;
            }
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
