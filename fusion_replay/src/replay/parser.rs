// fusion_replay/src/replay/parser.rs

use super::{GroundTruth, LogRecord, ReplayError};
use fusion_core::messages::MeasurementMessage;
use fusion_core::types::{SensorKind, Timestamp};
use std::io::BufRead;

/// Number of ground-truth columns that may trail a record.
const TRUTH_FIELDS: usize = 4;

/// Parses a whole measurement log.
///
/// ```text
/// L  <px> <py> <timestamp_us> [<gt_px> <gt_py> <gt_vx> <gt_vy>]
/// R  <rho> <phi> <rho_dot> <timestamp_us> [<gt_px> <gt_py> <gt_vx> <gt_vy>]
/// ```
///
/// Blank lines and lines starting with `#` are skipped. The first bad line
/// aborts parsing.
pub fn parse_log<R: BufRead>(reader: R) -> Result<Vec<LogRecord>, ReplayError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(record) = parse_line(&line, idx + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Parses one log line; `line_no` is only used for error reporting.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<LogRecord>, ReplayError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let sensor = match fields[0] {
        "L" => SensorKind::Lidar,
        "R" => SensorKind::Radar,
        tag => {
            return Err(ReplayError::UnknownSensor {
                line: line_no,
                tag: tag.to_string(),
            })
        }
    };

    // tag + measurement values + timestamp
    let expected = 1 + sensor.measurement_dim() + 1;
    let with_truth = expected + TRUTH_FIELDS;
    if fields.len() != expected && fields.len() != with_truth {
        return Err(ReplayError::FieldCount {
            line: line_no,
            sensor,
            expected,
            with_truth,
            found: fields.len(),
        });
    }

    let dim = sensor.measurement_dim();
    let values = fields[1..=dim]
        .iter()
        .map(|token| parse_number::<f64>(token, line_no))
        .collect::<Result<Vec<_>, _>>()?;
    let timestamp: Timestamp = parse_number(fields[dim + 1], line_no)?;

    let message = MeasurementMessage::from_raw(sensor, &values, timestamp)
        .map_err(|source| ReplayError::Measurement {
            line: line_no,
            source,
        })?;

    let ground_truth = if fields.len() == with_truth {
        let gt = fields[expected..]
            .iter()
            .map(|token| parse_number::<f64>(token, line_no))
            .collect::<Result<Vec<_>, _>>()?;
        Some(GroundTruth::from_column_slice(&gt))
    } else {
        None
    };

    Ok(Some(LogRecord {
        message,
        ground_truth,
    }))
}

fn parse_number<T: std::str::FromStr>(token: &str, line_no: usize) -> Result<T, ReplayError> {
    token.parse().map_err(|_| ReplayError::InvalidNumber {
        line: line_no,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_core::error::FusionError;
    use nalgebra::Vector4;

    const SAMPLE: &str = "\
# sensor log
L\t3.122427e-01\t5.803398e-01\t1477010443000000\t6.000000e-01\t6.000000e-01\t5.199937e+00\t0
R\t1.014892e+00\t5.543292e-01\t4.892807e+00\t1477010443050000\t8.599968e-01\t6.000449e-01\t5.199747e+00\t1.796856e-03

L 1.0 2.0 1477010443100000
";

    #[test]
    fn parses_lidar_and_radar_records() {
        let records = parse_log(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(
            records[0].message,
            MeasurementMessage::lidar(1477010443000000, 0.3122427, 0.5803398)
        );
        assert_eq!(
            records[0].ground_truth,
            Some(Vector4::new(0.6, 0.6, 5.199937, 0.0))
        );

        assert_eq!(records[1].message.sensor(), SensorKind::Radar);
        assert_eq!(records[1].message.timestamp, 1477010443050000);
        assert_eq!(records[1].message.data.as_slice(), &[1.014892, 0.5543292, 4.892807]);

        assert_eq!(records[2].ground_truth, None);
    }

    #[test]
    fn reports_field_count_with_line_number() {
        let err = parse_log("L 1.0 2.0\n".as_bytes()).unwrap_err();
        match err {
            ReplayError::FieldCount {
                line,
                sensor,
                expected,
                with_truth,
                found,
            } => {
                assert_eq!((line, sensor, expected, with_truth, found), (1, SensorKind::Lidar, 4, 8, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_tags_and_bad_numbers() {
        let err = parse_line("X 1 2 3", 7).unwrap_err();
        assert!(matches!(err, ReplayError::UnknownSensor { line: 7, .. }));

        let err = parse_line("R 1.0 abc 0.5 100", 2).unwrap_err();
        assert!(matches!(err, ReplayError::InvalidNumber { line: 2, ref token } if token == "abc"));

        // timestamps are integers
        let err = parse_line("L 1.0 2.0 1.5", 3).unwrap_err();
        assert!(matches!(err, ReplayError::InvalidNumber { line: 3, .. }));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = parse_line("L NaN 2.0 100", 4).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Measurement {
                line: 4,
                source: FusionError::NonFiniteMeasurement { .. }
            }
        ));
    }
}
