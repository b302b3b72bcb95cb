//! The layer inside `ServiceBuilder` stacks.

use spot_retry_chaos::SpotTermination;
use spot_retry_core::{ProbeError, RunAttempt};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::{Service, ServiceBuilder, ServiceExt};

#[derive(Debug, PartialEq)]
enum JobError {
    Probe(ProbeError),
    Upload(&'static str),
}

impl From<ProbeError> for JobError {
    fn from(err: ProbeError) -> Self {
        JobError::Probe(err)
    }
}

#[tokio::test]
async fn probe_errors_convert_into_service_error() {
    let layer = SpotTermination::builder()
        .name("upload")
        .build()
        .layer(RunAttempt::FIRST);

    let mut service = ServiceBuilder::new()
        .layer(layer)
        .service_fn(|req: u32| async move { Ok::<_, JobError>(req * 2) });

    let err = service.ready().await.unwrap().call(21).await.unwrap_err();
    assert_eq!(
        err,
        JobError::Probe(ProbeError::SimulatedTransientFailure { attempt: 1 })
    );
}

#[tokio::test]
async fn passing_attempt_is_transparent() {
    let layer = SpotTermination::default().layer(RunAttempt::new(2));

    let mut service = ServiceBuilder::new()
        .layer(layer)
        .service_fn(|req: u32| async move {
            if req == 0 {
                Err(JobError::Upload("empty payload"))
            } else {
                Ok(req * 2)
            }
        });

    assert_eq!(service.ready().await.unwrap().call(21).await, Ok(42));
    assert_eq!(
        service.ready().await.unwrap().call(0).await,
        Err(JobError::Upload("empty payload"))
    );
}

#[tokio::test]
async fn failing_layer_does_not_reach_inner_layers() {
    let inner_calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&inner_calls);

    let outer = SpotTermination::builder()
        .name("outer")
        .build()
        .layer(RunAttempt::FIRST);
    let inner = SpotTermination::builder()
        .name("inner")
        .on_event(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .layer(RunAttempt::FIRST);

    let mut service = ServiceBuilder::new()
        .layer(outer)
        .layer(inner)
        .service_fn(|req: u32| async move { Ok::<_, ProbeError>(req) });

    let err = service.ready().await.unwrap().call(1).await.unwrap_err();
    assert!(err.is_simulated_failure());
    assert_eq!(inner_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn every_call_is_checked_again() {
    let simulated = Arc::new(AtomicUsize::new(0));
    let s = Arc::clone(&simulated);

    let layer = SpotTermination::builder()
        .on_termination_simulated(move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .layer(RunAttempt::FIRST);

    let mut service = ServiceBuilder::new()
        .layer(layer)
        .service_fn(|req: u32| async move { Ok::<_, ProbeError>(req) });

    for _ in 0..5 {
        assert!(service.ready().await.unwrap().call(1).await.is_err());
    }
    assert_eq!(simulated.load(Ordering::SeqCst), 5);
}
