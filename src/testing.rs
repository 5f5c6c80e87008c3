//! 测试辅助工具模块
//! Test utilities module

#![cfg(test)]

use crate::{
    error::HandlerError,
    event::Event,
    handler::{Dispatch, Handler, HandlerResult, Task},
    reactor::ReactorContext,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, ordered record of everything the test handlers saw.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(log: &EventLog) -> Vec<String> {
    log.borrow().clone()
}

type InitHook = Box<dyn FnMut(&mut ReactorContext<'_>) -> Result<(), HandlerError>>;

/// A handler that implements exactly the callbacks named in `handles`.
///
/// Implemented callbacks log `"{label}:{event}"`, `on_unhandled` logs
/// `"{label}:unhandled:{event}"`, everything else reports `Unhandled`.
pub struct Recorder {
    label: &'static str,
    log: EventLog,
    handles: Vec<&'static str>,
    on_init: Option<InitHook>,
    fail_on: Option<&'static str>,
}

impl Recorder {
    pub fn new(label: &'static str, log: &EventLog) -> Self {
        Self {
            label,
            log: log.clone(),
            handles: Vec::new(),
            on_init: None,
            fail_on: None,
        }
    }

    pub fn handling(mut self, names: &[&'static str]) -> Self {
        self.handles.extend_from_slice(names);
        self
    }

    /// Runs `hook` after recording `reactor_init`.
    pub fn on_init<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ReactorContext<'_>) -> Result<(), HandlerError> + 'static,
    {
        if !self.handles.contains(&"reactor_init") {
            self.handles.push("reactor_init");
        }
        self.on_init = Some(Box::new(hook));
        self
    }

    /// Fails the named callback after recording it.
    pub fn failing_on(mut self, name: &'static str) -> Self {
        if !self.handles.contains(&name) {
            self.handles.push(name);
        }
        self.fail_on = Some(name);
        self
    }

    fn record(&mut self, event: &Event) -> HandlerResult {
        let name = event.name();
        if !self.handles.iter().any(|h| *h == name) {
            return Ok(Dispatch::Unhandled);
        }
        self.log.borrow_mut().push(format!("{}:{}", self.label, name));
        if self.fail_on == Some(name) {
            return Err(HandlerError::msg(format!("{} refused {}", self.label, name)));
        }
        Ok(Dispatch::Handled)
    }
}

impl Handler for Recorder {
    fn on_reactor_init(&mut self, event: &Event, ctx: &mut ReactorContext<'_>) -> HandlerResult {
        let result = self.record(event)?;
        if let Some(hook) = self.on_init.as_mut() {
            hook(ctx)?;
        }
        Ok(result)
    }

    fn on_reactor_quiesced(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        self.record(event)
    }

    fn on_reactor_final(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        self.record(event)
    }

    fn on_timer_task(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        self.record(event)
    }

    fn on_selectable_readable(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        self.record(event)
    }

    fn on_selectable_writable(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        self.record(event)
    }

    fn on_selectable_error(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        self.record(event)
    }

    fn on_custom(&mut self, _name: &str, event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        self.record(event)
    }

    fn on_unhandled(
        &mut self,
        name: &str,
        _event: &Event,
        _ctx: &mut ReactorContext<'_>,
    ) -> Result<(), HandlerError> {
        self.log
            .borrow_mut()
            .push(format!("{}:unhandled:{}", self.label, name));
        Ok(())
    }
}

/// A task that logs `"{label}:timer_task"` when it fires.
pub struct RecordingTask {
    label: &'static str,
    log: EventLog,
}

impl RecordingTask {
    pub fn new(label: &'static str, log: &EventLog) -> Self {
        Self {
            label,
            log: log.clone(),
        }
    }
}

impl Task for RecordingTask {
    fn on_timer_task(&mut self, event: &Event, _ctx: &mut ReactorContext<'_>) -> Result<(), HandlerError> {
        self.log
            .borrow_mut()
            .push(format!("{}:{}", self.label, event.name()));
        Ok(())
    }
}
