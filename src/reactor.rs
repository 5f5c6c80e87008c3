//! 反应器核心
//! Reactor core
//!
//! 反应器拥有定时器堆、事件队列和分发链，驱动单线程协作式运行循环：
//! 取出到期任务并直接交给任务本身，随后按到达顺序分发队列中的事件，
//! 直到既没有待触发的任务也没有待分发的事件为止。生命周期事件
//! `reactor_init` 与 `reactor_final` 各发出一次，包围其余所有活动。
//!
//! The reactor owns the timer heap, the event queue and the dispatch chain, and
//! drives a single-threaded cooperative run-loop: due tasks are handed straight
//! to the task, then queued events are dispatched in arrival order, until
//! neither pending tasks nor pending events remain. The lifecycle events
//! `reactor_init` and `reactor_final` are emitted once each, bracketing all
//! other activity.

pub mod context;
pub(crate) mod core;
pub mod event_loop;
pub mod injector;
pub mod lifecycle;


pub use context::ReactorContext;
pub use event_loop::Reactor;
pub use injector::EventInjector;
pub use lifecycle::ReactorState;
