use std::f64::consts::PI;
use std::thread;

use approx::{assert_abs_diff_eq, assert_relative_eq};

use midquad::configuration::Configuration;
use midquad::math::integration::batchfunction::BatchFunction;
use midquad::math::integration::integrationerror::IntegrationError;
use midquad::math::integration::integrationoutcome::IntegrationOutcome;
use midquad::math::integration::midpointintegrator::{
    integrate,
    MidpointIntegrator,
    MidpointSettings
};

#[test]
fn constants_for_several_intervals() {
    for (c, a, b) in [(1.0, 0.0, 1.0), (4.0, -2.0, 6.0), (-0.5, 3.0, 7.0)] {
        let (estimate, iterations) = integrate(move |_: f64| c, a, b, 1e-12).unwrap();
        assert_relative_eq!(estimate, c * (b - a), epsilon = 1e-12);
        assert_eq!(iterations, 2);
    }
}

#[test]
fn linear_matches_closed_form() {
    let (m, k, a, b) = (0.75, -2.0, -3.0, 5.0);
    let (estimate, _) = integrate(move |x: f64| m * x + k, a, b, 1e-9).unwrap();
    let exact = m * (b * b - a * a) / 2.0 + k * (b - a);
    assert_abs_diff_eq!(estimate, exact, epsilon = 1e-9);
}

#[test]
fn sine_closed_form() {
    let (estimate, _) = integrate(f64::sin, 0.0, PI, 1e-6).unwrap();
    assert_abs_diff_eq!(estimate, 2.0, epsilon = 1e-5);
}

#[test]
fn degenerate_interval() {
    assert_eq!(integrate(f64::cos, 5.0, 5.0, 1e-8), Ok((0.0, 2)));
}

#[test]
fn reversed_bounds_flip_sign() {
    let (forward, _) = integrate(f64::exp, 0.0, 1.0, 1e-10).unwrap();
    let (backward, _) = integrate(f64::exp, 1.0, 0.0, 1e-10).unwrap();
    assert_relative_eq!(backward, -forward, epsilon = 1e-9);
    assert_relative_eq!(forward, 1f64.exp() - 1.0, epsilon = 1e-9);
}

#[test]
fn oscillatory_function_hits_level_bound() {
    let integrator = MidpointIntegrator::new(MidpointSettings {
        max_level: 6,
        ..MidpointSettings::default()
    })
    .unwrap();
    let f = |x: f64| (200.0 * x).sin();
    let outcome = integrator.integrate(&f, 0.0, 1.0, 1e-12).unwrap();
    assert!(matches!(outcome, IntegrationOutcome::NotConverged { iterations_tried: 6, .. }));
}

#[test]
fn configured_integrator_from_json() {
    let configuration = Configuration::from_json_str(
        r#"{"tolerance": 1e-7, "midpoint": {"max_level": 20, "initial_estimate": "LevelOne"}}"#,
    )
    .unwrap();
    let integrator = configuration.integrator().unwrap();
    let outcome = integrator
        .integrate(&|x: f64| x * x, 0.0, 3.0, configuration.tolerance())
        .unwrap();
    assert!(outcome.is_converged());
    assert_abs_diff_eq!(outcome.estimate(), 9.0, epsilon = 1e-6);
}

#[test]
fn trait_objects_are_accepted() {
    let functions: Vec<Box<dyn BatchFunction>> = vec![Box::new(|x: f64| x), Box::new(|x: f64| 2.0 * x)];
    let integrator = MidpointIntegrator::default();
    let estimates: Vec<f64> = functions
        .iter()
        .map(|f| integrator.integrate(f.as_ref(), 0.0, 2.0, 1e-9).unwrap().estimate())
        .collect();
    assert_abs_diff_eq!(estimates[0], 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(estimates[1], 4.0, epsilon = 1e-12);
}

#[test]
fn independent_calls_run_in_parallel() {
    let integrator = MidpointIntegrator::default();
    let serial = integrator.integrate(&f64::sin, 0.0, PI, 1e-6).unwrap();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| integrator.integrate(&f64::sin, 0.0, PI, 1e-6).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), serial);
        }
    });
}

#[test]
fn error_messages_name_the_problem() {
    let error = integrate(f64::sin, 0.0, 1.0, 0.0).unwrap_err();
    assert_eq!(error, IntegrationError::InvalidTolerance(0.0));
    assert_eq!(error.to_string(), "tolerance must be finite and positive, got 0");
}
