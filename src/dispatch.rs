//! 事件分发链
//! Event dispatch chain
//!
//! 对每个事件，先调用目标对象自身的处理器，再调用反应器的每个全局处理器；
//! 全局处理器是并行观察者而不是回退。`on_unhandled` 的触发条件由
//! [`crate::config::UnhandledPolicy`] 决定。定时任务事件直接送达任务，
//! 不进入该分发链。
//!
//! For each event the target's own handler runs first, then every global
//! handler of the reactor; global handlers are parallel observers, not a
//! fallback. When `on_unhandled` fires is decided by
//! [`crate::config::UnhandledPolicy`]. Timer task events are delivered straight
//! to the task and never enter this chain.

pub mod chain;
pub mod outcome;


pub use chain::{DispatchChain, HandlerChain};
pub use outcome::DispatchOutcome;
