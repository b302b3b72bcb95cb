//! Spot-termination metrics regression tests

use super::helpers::*;
use serial_test::serial;
use spot_retry_chaos::SpotTermination;
use spot_retry_core::RunAttempt;

#[test]
#[serial]
fn simulated_termination_counter() {
    init_recorder();

    let probe = SpotTermination::builder().name("metrics_simulated").build();
    let _ = probe.check(RunAttempt::FIRST);
    let _ = probe.check(RunAttempt::new(0));

    assert_eq!(
        counter_value("spot_termination.simulated", "probe", "metrics_simulated"),
        2
    );
}

#[test]
#[serial]
fn passed_through_counter() {
    init_recorder();

    let probe = SpotTermination::builder().name("metrics_passed").build();
    let _ = probe.check(RunAttempt::new(2));

    assert_eq!(
        counter_value("spot_termination.passed_through", "probe", "metrics_passed"),
        1
    );
    assert_eq!(
        counter_value("spot_termination.simulated", "probe", "metrics_passed"),
        0
    );
}
