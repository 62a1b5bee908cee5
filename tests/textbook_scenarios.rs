//! Worked examples and cross-model laws checked through the public API.

use queuecalc::prelude::*;

const TOL: f64 = 1e-4;

fn assert_close(metrics: &QueueMetrics, metric: Metric, expected: f64) {
    let actual = metrics
        .get(metric)
        .unwrap_or_else(|| panic!("{metric} missing"));
    assert!(
        (actual - expected).abs() <= TOL * expected.abs().max(1.0),
        "{metric}: expected {expected}, got {actual}"
    );
}

// λ=0.75, μ=1.0
#[test]
fn scenario_a_basic_single_server() {
    let m = single_server_metrics(0.75, 1.0, None).unwrap();
    assert_close(&m, Metric::Rho, 0.75);
    assert_close(&m, Metric::P0, 0.25);
    assert_close(&m, Metric::Ls, 3.0);
    assert_close(&m, Metric::Ws, 4.0);
    assert_close(&m, Metric::Lq, 2.25);
    assert_close(&m, Metric::Wq, 3.0);
    assert_eq!(m.len(), 6);
}

// λ=0.75, μ=1.0, n=2
#[test]
fn scenario_b_state_probability() {
    let m = single_server_metrics(0.75, 1.0, Some(2)).unwrap();
    assert_close(&m, Metric::Pn, 0.140_625);
    assert_eq!(m.get_by_name("Pn"), m.get(Metric::Pn));
}

// Car wash: 9 cars/h, one car every 5 minutes.
#[test]
fn scenario_c_car_wash() {
    let m = single_server_metrics(9.0, 12.0, None).unwrap();
    assert_close(&m, Metric::Rho, 0.75);
    assert_close(&m, Metric::P0, 0.25);
    assert_close(&m, Metric::Ls, 3.0);
    assert_close(&m, Metric::Ws, 1.0 / 3.0);
    assert_close(&m, Metric::Lq, 2.25);
    assert_close(&m, Metric::Wq, 0.25);
}

#[test]
fn scenario_c_car_wash_in_minutes() {
    let scenario = Scenario::builder("car wash")
        .rates(0.15, 1.0 / 5.0)
        .lambda_unit(RateUnit::PerMinute)
        .mu_unit(RateUnit::PerMinute)
        .build();
    let m = scenario.evaluate().unwrap();
    assert_close(&m, Metric::Ws, 1.0 / 3.0);
    assert_close(&m, Metric::Wq, 0.25);
}

#[test]
fn scenario_c_car_wash_tail_probabilities() {
    let p = Mm1Params::new(9.0, 12.0, None).unwrap();
    assert!((p.prob_more_than(3) - 0.75_f64.powi(4)).abs() < 1e-12);
    assert!((p.prob_system_time_exceeds(0.5).unwrap() - (-1.5_f64).exp()).abs() < 1e-12);
}

// λ=2, μ=3, s=2
#[test]
fn scenario_d_two_servers() {
    let m = multi_server_metrics(2.0, 3.0, 2).unwrap();
    assert_close(&m, Metric::Rho, 1.0 / 3.0);
    assert_close(&m, Metric::P0, 0.5);
    assert_close(&m, Metric::Lq, 0.083_33);
    assert_close(&m, Metric::Ls, 0.75);
    assert_close(&m, Metric::Wq, 0.041_67);
    assert_close(&m, Metric::Ws, 0.375);
    assert!(!m.contains(Metric::Pn));
}

#[test]
fn scenario_e_equal_rates_unstable() {
    let err = single_server_metrics(5.0, 5.0, None).unwrap_err();
    assert!(matches!(err, QueueError::UnstableSystem { .. }));
    assert!(err.is_input_error());
    assert!(err.to_string().contains("rho"));
}

#[test]
fn scenario_f_zero_servers_invalid() {
    let err = multi_server_metrics(1.0, 1.0, 0).unwrap_err();
    assert!(matches!(err, QueueError::InvalidArgument { .. }));
    assert_eq!(err.parameter(), Some("s"));
}

#[test]
fn overloaded_multi_server_unstable() {
    for (lambda, mu, s) in [(6.0, 3.0, 2), (10.0, 1.0, 5), (100.0, 1.0, 99)] {
        let err = multi_server_metrics(lambda, mu, s).unwrap_err();
        let rho = err.rho().unwrap();
        assert!(rho >= 1.0, "rho {rho} for λ={lambda}, μ={mu}, s={s}");
    }
}

#[test]
fn one_server_erlang_c_equals_single_server() {
    for (lambda, mu) in [(0.75, 1.0), (9.0, 12.0), (0.01, 100.0), (99.0, 100.0)] {
        let single = single_server_metrics(lambda, mu, None).unwrap();
        let multi = multi_server_metrics(lambda, mu, 1).unwrap();
        for (metric, value) in single.iter() {
            assert_close(&multi, metric, value);
        }
    }
}

#[test]
fn repeated_calls_are_bit_identical() {
    let first = multi_server_metrics(40.0, 1.0, 45).unwrap();
    let second = multi_server_metrics(40.0, 1.0, 45).unwrap();
    assert_eq!(first, second);
    for ((_, a), (_, b)) in first.iter().zip(second.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn littles_law_holds_for_both_models() {
    let mm1 = single_server_metrics(9.0, 12.0, None).unwrap();
    assert!(mm1.check_littles_law(9.0, 1e-12).is_ok());

    let mms = multi_server_metrics(2.0, 3.0, 2).unwrap();
    assert!(mms.check_littles_law(2.0, 1e-12).is_ok());
}

#[test]
fn equation_metadata_is_available() {
    let models: [&dyn GoverningEquation; 3] = [
        &SingleServerQueue::new(),
        &MultiServerQueue::new(),
        &LittlesLaw::new(),
    ];
    for model in models {
        assert!(!model.latex().is_empty());
        assert!(!model.variables().is_empty());
        assert!(model.citation().year > 1900);
    }
}

#[test]
fn metrics_serialize_with_published_keys() {
    let m = single_server_metrics(0.75, 1.0, Some(2)).unwrap();
    let json = serde_json::to_value(&m).unwrap();
    let keys: Vec<&str> = json
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    for key in ["rho", "P0", "Ls", "Ws", "Lq", "Wq", "Pn"] {
        assert!(keys.contains(&key), "missing {key}");
    }
}
