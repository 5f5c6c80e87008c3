//! 定时器堆模块
//! Timer Heap Module
//!
//! 该模块实现了反应器的定时任务调度：按到期时间排序保存待执行任务，
//! 到期时间相同的任务按调度顺序（先进先出）出队，以保证可重放的确定顺序。
//!
//! This module implements the reactor's scheduled task bookkeeping: pending
//! tasks are kept ordered by deadline, and tasks sharing a deadline leave in
//! scheduling order (FIFO) so replay is deterministic.

pub mod entry;
pub mod heap;
pub mod stats;


pub use entry::TaskHandle;
pub use heap::TimerHeap;
pub use stats::TimerHeapStats;
