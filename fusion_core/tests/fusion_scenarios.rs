// fusion_core/tests/fusion_scenarios.rs

use approx::assert_abs_diff_eq;
use fusion_core::prelude::*;
use nalgebra::{Matrix4, Vector2, Vector4};

fn distance_to(state: &State, target: Vector2<f64>) -> f64 {
    (Vector2::new(state[0], state[1]) - target).norm()
}

#[test]
fn first_lidar_measurement_only_initializes() {
    let mut fusion = FusionEkf::new();
    let outcome = fusion
        .process_measurement(&MeasurementMessage::lidar(0, 1.0, 1.0))
        .unwrap();

    assert_eq!(outcome, CycleOutcome::Initialized);
    assert_eq!(fusion.filter().state(), &Vector4::new(1.0, 1.0, 0.0, 0.0));
    assert_eq!(
        fusion.filter().covariance(),
        &StateCovariance::from_diagonal(&Vector4::new(1.0, 1.0, 1000.0, 1000.0))
    );
    assert_eq!(fusion.filter().transition(), &Matrix4::identity());
    assert_eq!(fusion.filter().process_noise(), &Matrix4::zeros());
}

#[test]
fn radar_after_lidar_predicts_then_pulls_towards_measurement() {
    let mut fusion = FusionEkf::new();
    fusion
        .process_measurement(&MeasurementMessage::lidar(0, 1.0, 1.0))
        .unwrap();

    // With zero velocity the prediction keeps the position where it was.
    let predicted = Vector2::new(1.0, 1.0);
    let target = Vector2::new(2.0, 0.0);

    let outcome = fusion
        .process_measurement(&MeasurementMessage::radar(100_000, 2.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(outcome, CycleOutcome::Updated);

    let kf = fusion.filter();
    assert_abs_diff_eq!(kf.transition()[(0, 2)], 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(kf.transition()[(1, 3)], 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(kf.process_noise()[(0, 0)], 0.1f64.powi(4) / 4.0 * 9.0, epsilon = 1e-12);
    assert_abs_diff_eq!(kf.process_noise()[(2, 2)], 0.01 * 9.0, epsilon = 1e-12);

    let after = distance_to(kf.state(), target);
    let before = (predicted - target).norm();
    assert!(after < before, "update moved away: {after} >= {before}");
    assert_eq!(fusion.estimate().unwrap().timestamp, 100_000);
}

#[test]
fn radar_at_origin_keeps_prediction_and_stream_continues() {
    let mut fusion = FusionEkf::new();
    fusion
        .process_measurement(&MeasurementMessage::lidar(0, 0.0, 0.0))
        .unwrap();

    let outcome = fusion
        .process_measurement(&MeasurementMessage::radar(100_000, 1.0, 0.3, 0.0))
        .unwrap();
    assert_eq!(outcome, CycleOutcome::UpdateSkipped(FusionError::DivisionByZero));

    let kf = fusion.filter();
    assert_eq!(kf.state(), &Vector4::zeros());
    // covariance grew by the prediction only
    assert_abs_diff_eq!(kf.covariance()[(0, 0)], 1.0 + 0.01 * 1000.0 + 0.000225, epsilon = 1e-9);

    let outcome = fusion
        .process_measurement(&MeasurementMessage::lidar(200_000, 1.0, 1.0))
        .unwrap();
    assert_eq!(outcome, CycleOutcome::Updated);
    assert!(fusion.filter().state().iter().all(|v| v.is_finite()));
}

#[test]
fn converges_on_a_constant_velocity_target() {
    let mut fusion = FusionEkf::new();
    let (vx, vy): (f64, f64) = (2.0, -1.0);
    let truth = |t: f64| Vector4::new(5.0 + vx * t, 10.0 + vy * t, vx, vy);

    for k in 0..200i64 {
        let ts = k * 50_000;
        let x = truth(ts as f64 / 1e6);
        let message = if k % 2 == 0 {
            MeasurementMessage::lidar(ts, x[0], x[1])
        } else {
            let rho = x[0].hypot(x[1]);
            MeasurementMessage::radar(ts, rho, x[1].atan2(x[0]), (x[0] * vx + x[1] * vy) / rho)
        };
        fusion.process_measurement(&message).unwrap();

        let p = fusion.filter().covariance();
        assert!((p - p.transpose()).norm() < 1e-9);
    }

    let estimate = fusion.estimate().unwrap();
    let expected = truth(199.0 * 0.05);
    assert_abs_diff_eq!(estimate.px(), expected[0], epsilon = 0.05);
    assert_abs_diff_eq!(estimate.py(), expected[1], epsilon = 0.05);
    assert_abs_diff_eq!(estimate.vx(), vx, epsilon = 0.1);
    assert_abs_diff_eq!(estimate.vy(), vy, epsilon = 0.1);
    assert!(estimate.variances.iter().all(|v| *v > 0.0));
}

#[test]
fn bearing_wraparound_does_not_derail_the_track() {
    // Target crossing the negative x axis from above, observed by radar only.
    let mut fusion = FusionEkf::new();
    let (vx, vy): (f64, f64) = (0.0, -1.0);
    let truth = |t: f64| (-10.0 + vx * t, 1.0 + vy * t);

    for k in 0..40i64 {
        let ts = k * 50_000;
        let (px, py) = truth(ts as f64 / 1e6);
        let rho = px.hypot(py);
        let rho_dot = (px * vx + py * vy) / rho;
        fusion
            .process_measurement(&MeasurementMessage::radar(ts, rho, py.atan2(px), rho_dot))
            .unwrap();
    }

    let estimate = fusion.estimate().unwrap();
    let (px, py) = truth(39.0 * 0.05);
    assert_abs_diff_eq!(estimate.px(), px, epsilon = 0.5);
    assert_abs_diff_eq!(estimate.py(), py, epsilon = 0.5);
}
