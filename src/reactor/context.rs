//! 回调上下文 - 处理器与任务访问反应器的唯一途径
//! Callback context - the only way handlers and tasks reach the reactor

use super::core::ReactorCore;
use crate::{
    error::Result,
    event::{EventType, HandlerId, ReactorId, Target},
    handler::{Handler, Task},
    timer::{TaskHandle, heap::delay_from_secs},
};
use bytes::Bytes;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// 传给每个回调的反应器视图
/// View of the reactor handed to every callback
///
/// 通过它调度任务、投递事件、附加处理器或请求停止；这些操作与反应器
/// 公共API的语义相同。
///
/// Through it callbacks schedule tasks, post events, attach handlers or request
/// a stop, with the same semantics as the reactor's public API.
pub struct ReactorContext<'a> {
    core: &'a mut ReactorCore,
}

impl<'a> ReactorContext<'a> {
    pub(crate) fn new(core: &'a mut ReactorCore) -> Self {
        Self { core }
    }

    pub fn reactor_id(&self) -> ReactorId {
        self.core.id
    }

    /// 本轮循环开始时反应器单调时钟的时间，同一轮内的所有回调看到相同的值
    /// Reactor monotonic time at the start of the current loop turn; every
    /// callback within one turn sees the same value
    pub fn now(&self) -> Instant {
        self.core.turn_started
    }

    /// 调度任务在 `delay` 之后触发
    /// Schedule a task to fire after `delay`
    pub fn schedule<T: Task + 'static>(&mut self, delay: Duration, task: T) -> Result<TaskHandle> {
        self.core.schedule(delay, Box::new(task))
    }

    /// 以秒为单位调度任务；负数或非有限的延迟返回 `InvalidDelay`
    /// Schedule a task with a delay in seconds; negative or non-finite delays
    /// return `InvalidDelay`
    pub fn schedule_secs<T: Task + 'static>(&mut self, seconds: f64, task: T) -> Result<TaskHandle> {
        let delay = delay_from_secs(seconds)?;
        self.core.schedule(delay, Box::new(task))
    }

    /// 取消任务；对已触发或已取消的任务无效果
    /// Cancel a task; no effect on tasks already fired or cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.core.timers.cancel(handle)
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.core.timers.contains(handle)
    }

    pub fn pending_tasks(&self) -> usize {
        self.core.timers.len()
    }

    /// 投递事件，在本轮循环剩余的工作中分发
    /// Post an event, dispatched within the remaining work of the current loop turn
    pub fn post(&mut self, kind: EventType, target: Target, payload: Option<Bytes>) {
        self.core.post(kind, target, payload);
    }

    /// 附加对象本地处理器；当前回调返回后生效
    /// Attach an object-local handler; takes effect once the current callback returns
    pub fn attach<H: Handler + 'static>(&mut self, handler: H) -> HandlerId {
        let id = self.core.allocate_handler_id();
        self.core.attach_requests.push((id, Box::new(handler)));
        id
    }

    /// 移除对象本地处理器；当前回调返回后生效
    /// Detach an object-local handler; takes effect once the current callback returns
    pub fn detach(&mut self, id: HandlerId) {
        self.core.detach_requests.push(id);
    }

    /// 请求在本轮循环结束后停止反应器
    /// Ask the reactor to stop once the current loop turn ends
    pub fn stop(&mut self) {
        if !self.core.stop_requested {
            debug!(reactor = %self.core.id, "Stop requested");
        }
        self.core.stop_requested = true;
    }

    pub fn is_stopping(&self) -> bool {
        self.core.stop_requested
    }
}
