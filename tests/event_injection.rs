//! Events fed in from outside the reactor thread.

pub mod common;

use bytes::Bytes;
use common::harness::{Transcript, init_tracing};
use reactor_core::{
    Dispatch, Error, Event, EventType, Handler, HandlerResult, LifecycleConfig, Reactor,
    ReactorConfig, ReactorContext, ReactorState, Target,
};
use std::time::Duration;

/// Echoes readable payloads and stops the reactor on `hangup`.
struct Link {
    transcript: Transcript,
}

impl Handler for Link {
    fn on_selectable_readable(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        let payload = event.payload().map(|b| String::from_utf8_lossy(b).into_owned());
        self.transcript.push(format!("read {}", payload.unwrap_or_default()));
        Ok(Dispatch::Handled)
    }

    fn on_custom(&mut self, name: &str, _event: &Event, ctx: &mut ReactorContext<'_>) -> HandlerResult {
        if name != "hangup" {
            return Ok(Dispatch::Unhandled);
        }
        self.transcript.push("hangup");
        ctx.stop();
        Ok(Dispatch::Handled)
    }
}

struct Idle;

impl Handler for Idle {}

fn quiet() -> ReactorConfig {
    ReactorConfig {
        lifecycle: LifecycleConfig {
            emit_quiesced: false,
        },
        ..ReactorConfig::default()
    }
}

#[tokio::test]
async fn test_injected_events_reach_attached_handler() {
    init_tracing();
    let transcript = Transcript::new();
    let mut reactor = Reactor::with_config(Idle, quiet());
    let link = reactor.attach(Link {
        transcript: transcript.clone(),
    });
    let injector = reactor.injector();

    let feeder = std::thread::spawn(move || {
        for chunk in ["alpha", "beta"] {
            std::thread::sleep(Duration::from_millis(5));
            injector
                .post(
                    EventType::SelectableReadable,
                    Target::Handler(link),
                    Some(Bytes::from_static(chunk.as_bytes())),
                )
                .unwrap();
        }
        injector
            .post(EventType::custom("hangup"), Target::Handler(link), None)
            .unwrap();
        injector
    });

    reactor.run().await.unwrap();
    // 注入器仍然存活，但反应器已停止
    let injector = feeder.join().unwrap();

    assert_eq!(transcript.lines(), ["read alpha", "read beta", "hangup"]);
    assert!(matches!(
        injector.post(EventType::SelectableReadable, Target::Handler(link), None),
        Err(Error::ReactorGone)
    ));
}

#[tokio::test]
async fn test_reactor_stops_once_injectors_are_dropped() {
    init_tracing();
    let mut reactor = Reactor::with_config(Idle, quiet());
    let injector = reactor.injector();
    let clone = injector.clone();
    assert_eq!(clone.reactor_id(), reactor.id());

    let feeder = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(10));
        drop(injector);
        drop(clone);
    });

    tokio::time::timeout(Duration::from_secs(5), reactor.run())
        .await
        .expect("reactor should stop after the last injector is dropped")
        .unwrap();
    feeder.join().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_detached_handler_no_longer_receives_events() {
    init_tracing();
    let transcript = Transcript::new();
    let mut reactor = Reactor::with_config(Idle, quiet());
    let link = reactor.attach(Link {
        transcript: transcript.clone(),
    });

    reactor
        .post(
            EventType::SelectableReadable,
            Target::Handler(link),
            Some(Bytes::from_static(b"kept")),
        )
        .unwrap();
    reactor.start().unwrap();
    assert!(!reactor.process().await.unwrap());

    assert!(reactor.detach(link).is_some());
    reactor
        .post(EventType::SelectableReadable, Target::Handler(link), None)
        .unwrap();
    assert!(!reactor.process().await.unwrap());
    reactor.stop().unwrap();

    assert_eq!(transcript.lines(), ["read kept"]);
}

#[test]
fn test_post_then_drop_is_never_lost() {
    init_tracing();
    for _ in 0..200 {
        let transcript = Transcript::new();
        let mut reactor = Reactor::with_config(Idle, quiet());
        let link = reactor.attach(Link {
            transcript: transcript.clone(),
        });
        let injector = reactor.injector();

        let feeder = std::thread::spawn(move || {
            injector
                .post(
                    EventType::SelectableReadable,
                    Target::Handler(link),
                    Some(Bytes::from_static(b"last")),
                )
                .is_ok()
        });

        reactor.run_blocking().unwrap();
        let posted = feeder.join().unwrap();

        if posted {
            assert_eq!(transcript.lines(), ["read last"]);
        } else {
            assert!(transcript.lines().is_empty());
        }
    }
}

#[tokio::test]
async fn test_run_blocking_inside_a_runtime_is_an_error() {
    init_tracing();
    let mut reactor = Reactor::with_config(Idle, quiet());

    assert!(matches!(reactor.run_blocking(), Err(Error::Runtime(_))));
    assert_eq!(reactor.state(), ReactorState::Created);

    reactor.run().await.unwrap();
}
