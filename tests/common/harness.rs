//! tests/common/harness.rs
use reactor_core::{Dispatch, Event, Handler, HandlerError, HandlerResult, ReactorContext};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter =
            std::env::var("RUST_LOG").unwrap_or_else(|_| "reactor_core=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Ordered transcript shared by the handlers of one test.
#[derive(Clone, Default)]
pub struct Transcript(Rc<RefCell<Vec<String>>>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: impl Into<String>) {
        self.0.borrow_mut().push(line.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

/// A global observer that implements nothing but `on_unhandled`.
pub struct UnhandledLogger {
    transcript: Transcript,
}

impl UnhandledLogger {
    pub fn new(transcript: &Transcript) -> Self {
        Self {
            transcript: transcript.clone(),
        }
    }
}

impl Handler for UnhandledLogger {
    fn on_unhandled(
        &mut self,
        name: &str,
        event: &Event,
        _ctx: &mut ReactorContext<'_>,
    ) -> Result<(), HandlerError> {
        self.transcript.push(format!("LOG: {name} {event}"));
        Ok(())
    }
}

/// A handler that records every lifecycle callback it receives.
pub struct LifecycleRecorder {
    label: &'static str,
    transcript: Transcript,
}

impl LifecycleRecorder {
    pub fn new(label: &'static str, transcript: &Transcript) -> Self {
        Self {
            label,
            transcript: transcript.clone(),
        }
    }

    fn record(&self, event: &Event) -> HandlerResult {
        self.transcript.push(format!("{}:{}", self.label, event.name()));
        Ok(Dispatch::Handled)
    }
}

impl Handler for LifecycleRecorder {
    fn on_reactor_init(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        self.record(event)
    }

    fn on_reactor_quiesced(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        self.record(event)
    }

    fn on_reactor_final(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        self.record(event)
    }
}
