//! A program handler with one delayed task and a global logger that only
//! implements `on_unhandled`.
//!
//! Run with `cargo run --example global_logger`.

use reactor_core::{
    ClosureTask, Dispatch, Event, Handler, HandlerError, HandlerResult, Reactor, ReactorContext,
};

struct Program;

impl Handler for Program {
    fn on_reactor_init(&mut self, _event: &Event, ctx: &mut ReactorContext<'_>) -> HandlerResult {
        println!("Hello, World!");
        ctx.schedule_secs(
            0.0,
            ClosureTask::new(|_event, _ctx| {
                println!("Mission accomplished!");
                Ok(())
            }),
        )
        .map_err(HandlerError::new)?;
        Ok(Dispatch::Handled)
    }

    fn on_reactor_final(&mut self, _event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        println!("Goodbye, World!");
        Ok(Dispatch::Handled)
    }
}

struct Logger;

impl Handler for Logger {
    fn on_unhandled(
        &mut self,
        name: &str,
        event: &Event,
        _ctx: &mut ReactorContext<'_>,
    ) -> Result<(), HandlerError> {
        println!("LOG: {name} {event}");
        Ok(())
    }
}

fn main() -> reactor_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "reactor_core=info".to_string()),
        )
        .init();

    let mut reactor = Reactor::new(Program);
    reactor.global_handler_mut().add(Logger);
    reactor.run_blocking()
}
