//! 反应器内部状态：定时器堆、事件队列与延迟执行的请求
//! Reactor internal state: timer heap, event queue and deferred requests

use crate::{
    error::Result,
    event::{Event, EventQueue, EventType, HandlerId, ReactorId, Target},
    handler::{Handler, Task},
    timer::{TaskHandle, TimerHeap},
};
use bytes::Bytes;
use std::time::Duration;
use tokio::time::Instant;

/// 回调执行期间可以被修改的反应器状态
/// Reactor state that callbacks may mutate while they run
///
/// 处理器本身不在这里；回调期间附加或移除处理器的请求被记录下来，
/// 在当前回调返回后由运行循环统一执行。
///
/// Handlers themselves do not live here; attach and detach requests made during
/// a callback are recorded and applied by the run-loop once the callback returns.
pub(crate) struct ReactorCore {
    pub(crate) id: ReactorId,
    pub(crate) timers: TimerHeap,
    pub(crate) queue: EventQueue,
    pub(crate) attach_requests: Vec<(HandlerId, Box<dyn Handler>)>,
    pub(crate) detach_requests: Vec<HandlerId>,
    pub(crate) stop_requested: bool,
    /// 当前轮次开始的时间，回调通过 `ReactorContext::now` 读取
    /// Time the current turn began, read by callbacks through `ReactorContext::now`
    pub(crate) turn_started: Instant,
    next_handler_id: u64,
}

impl ReactorCore {
    pub(crate) fn new() -> Self {
        Self {
            id: ReactorId::next(),
            timers: TimerHeap::new(),
            queue: EventQueue::new(),
            attach_requests: Vec::new(),
            detach_requests: Vec::new(),
            stop_requested: false,
            turn_started: Instant::now(),
            next_handler_id: 1,
        }
    }

    /// 开始新的一轮，记录并返回本轮的时间
    /// Begin a new turn, recording and returning its time
    pub(crate) fn begin_turn(&mut self) -> Instant {
        self.turn_started = Instant::now();
        self.turn_started
    }

    pub(crate) fn allocate_handler_id(&mut self) -> HandlerId {
        let id = HandlerId(self.next_handler_id);
        self.next_handler_id += 1;
        id
    }

    pub(crate) fn schedule(&mut self, delay: Duration, task: Box<dyn Task>) -> Result<TaskHandle> {
        self.timers.schedule(Instant::now(), delay, task)
    }

    pub(crate) fn post(&mut self, kind: EventType, target: Target, payload: Option<Bytes>) {
        self.queue.push(Event::new(self.id, kind, target, payload));
    }
}

impl std::fmt::Debug for ReactorCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactorCore")
            .field("id", &self.id)
            .field("timers", &self.timers)
            .field("queued", &self.queue.len())
            .field("attach_requests", &self.attach_requests.len())
            .field("detach_requests", &self.detach_requests)
            .field("stop_requested", &self.stop_requested)
            .finish()
    }
}
