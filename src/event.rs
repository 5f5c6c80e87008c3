//! 事件模型与事件队列
//! Event model and event queue
//!
//! 该模块定义了反应器分发的事件记录、事件类型、事件目标以及先进先出的
//! 待分发事件队列。
//!
//! This module defines the event records dispatched by the reactor, the event
//! kinds, event targets, and the FIFO queue of events awaiting dispatch.

pub mod queue;
pub mod types;

pub use queue::EventQueue;
pub use types::{Event, EventType, HandlerId, ReactorId, Target};
