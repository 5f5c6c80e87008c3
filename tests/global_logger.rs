//! End-to-end run of a program handler with a global logging observer.

pub mod common;

use common::harness::{LifecycleRecorder, Transcript, UnhandledLogger, init_tracing};
use reactor_core::{
    ClosureTask, DispatchConfig, Error, LifecycleConfig, Reactor, ReactorConfig, UnhandledPolicy,
};

fn config(policy: UnhandledPolicy) -> ReactorConfig {
    ReactorConfig {
        dispatch: DispatchConfig {
            unhandled_policy: policy,
        },
        lifecycle: LifecycleConfig {
            emit_quiesced: false,
        },
    }
}

fn logged_reactor(transcript: &Transcript, policy: UnhandledPolicy) -> Reactor {
    let mut reactor =
        Reactor::with_config(LifecycleRecorder::new("program", transcript), config(policy));
    reactor.global_handler_mut().add(UnhandledLogger::new(transcript));

    let task_transcript = transcript.clone();
    reactor
        .schedule_secs(
            0.0,
            ClosureTask::new(move |event, _ctx| {
                task_transcript.push(format!("task:{}", event.name()));
                Ok(())
            }),
        )
        .unwrap();
    reactor
}

#[tokio::test(start_paused = true)]
async fn test_logger_sees_lifecycle_but_not_tasks() {
    init_tracing();
    let transcript = Transcript::new();
    let mut reactor = logged_reactor(&transcript, UnhandledPolicy::PerObserver);
    let id = reactor.id();

    reactor.run().await.unwrap();

    assert_eq!(
        transcript.lines(),
        [
            "program:reactor_init".to_string(),
            format!("LOG: reactor_init Event(reactor_init, target=reactor, reactor={id})"),
            "task:timer_task".to_string(),
            "program:reactor_final".to_string(),
            format!("LOG: reactor_final Event(reactor_final, target=reactor, reactor={id})"),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_whole_chain_policy_keeps_logger_quiet() {
    init_tracing();
    let transcript = Transcript::new();
    let mut reactor = logged_reactor(&transcript, UnhandledPolicy::WholeChain);

    reactor.run().await.unwrap();

    assert_eq!(
        transcript.lines(),
        ["program:reactor_init", "task:timer_task", "program:reactor_final"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_second_run_is_rejected() {
    init_tracing();
    let transcript = Transcript::new();
    let mut reactor = logged_reactor(&transcript, UnhandledPolicy::PerObserver);

    reactor.run().await.unwrap();
    let before = transcript.lines().len();

    assert!(matches!(reactor.run().await, Err(Error::AlreadyStopped)));
    assert_eq!(transcript.lines().len(), before);
}
