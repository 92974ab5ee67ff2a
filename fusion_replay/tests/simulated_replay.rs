// fusion_replay/tests/simulated_replay.rs

use fusion_replay::prelude::*;
use std::io::Cursor;

fn replay_text(records: &[LogRecord]) -> (ReplaySummary, String) {
    let mut log = Vec::new();
    write_log(&mut log, records).unwrap();
    let parsed = parse_log(Cursor::new(log)).unwrap();
    assert_eq!(parsed.len(), records.len());

    let mut writer = EstimateWriter::new(Vec::new());
    let summary = run_replay(&parsed, &FilterConfig::default(), &mut writer).unwrap();
    (summary, String::from_utf8(writer.into_inner()).unwrap())
}

#[test]
fn lemniscate_scenario_tracks_ground_truth() {
    let records = generate(&SimulationConfig::default()).unwrap();
    let (summary, output) = replay_text(&records);

    assert_eq!(summary.processed, records.len());
    assert_eq!(summary.rejected, 0);
    assert_eq!(summary.skipped_updates, 0);
    assert_eq!(output.lines().count(), records.len() + 1);

    let rmse = summary.rmse.unwrap();
    assert!(rmse[0] < 0.25 && rmse[1] < 0.25, "position RMSE too high: {rmse}");
    assert!(rmse[2] < 1.0 && rmse[3] < 1.0, "velocity RMSE too high: {rmse}");
}

#[test]
fn radar_only_turn_is_tracked() {
    let config = SimulationConfig {
        lidar_period_us: 1_000_000_000,
        trajectory: TrajectoryConfig::CoordinatedTurn {
            center: [0.0, 0.0],
            radius: 15.0,
            angular_rate: 0.3,
        },
        ..SimulationConfig::default()
    };
    // One lidar sample at t = 0 initializes, the radar carries the rest.
    let records = generate(&config).unwrap();
    assert_eq!(
        records
            .iter()
            .filter(|r| r.message.sensor() == SensorKind::Lidar)
            .count(),
        1
    );

    let (summary, _) = replay_text(&records);
    assert_eq!(summary.rejected, 0);
    let rmse = summary.rmse.unwrap();
    assert!(rmse[0] < 1.5 && rmse[1] < 1.5, "position RMSE too high: {rmse}");
}
