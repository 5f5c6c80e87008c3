#![deny(clippy::expect_used, clippy::unwrap_used)]

//! The root of the single-threaded event reactor library.
//! 单线程事件反应器库的根。
//!
//! A [`Reactor`] owns a timer heap and an event queue and drives them until
//! quiescence, delivering each event to the target's own [`Handler`] and to
//! every global handler.
//!
//! 反应器拥有定时器堆和事件队列并驱动它们直到空闲，把每个事件交给
//! 目标对象自己的处理器以及每个全局处理器。

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod handler;
pub mod reactor;
pub mod timer;

#[cfg(test)]
mod testing;

pub use config::{DispatchConfig, LifecycleConfig, ReactorConfig, UnhandledPolicy};
pub use error::{Error, HandlerError, Result};
pub use event::{Event, EventType, HandlerId, ReactorId, Target};
pub use handler::{ClosureTask, Dispatch, GlobalHandler, Handler, HandlerResult, Task};
pub use reactor::{EventInjector, Reactor, ReactorContext, ReactorState};
pub use timer::{TaskHandle, TimerHeapStats};
