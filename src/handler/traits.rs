//! 处理器与任务特征
//! Handler and task traits

use crate::error::HandlerError;
use crate::event::Event;
use crate::reactor::ReactorContext;

/// 回调是否处理了事件
/// Whether a callback handled the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// 回调已实现并处理了事件
    /// The callback is implemented and handled the event
    Handled,
    /// 处理器没有该事件的回调
    /// The handler has no callback for this event
    Unhandled,
}

impl Dispatch {
    pub fn is_handled(self) -> bool {
        matches!(self, Dispatch::Handled)
    }
}

/// 具名回调的返回类型
/// Return type of named callbacks
pub type HandlerResult = Result<Dispatch, HandlerError>;

/// 事件处理器特征 - 每种事件类型对应一个回调
/// Event handler trait - one callback per event kind
///
/// 只需覆盖关心的回调并返回 `Ok(Dispatch::Handled)`；其余回调保持默认实现，
/// 分发链会把它们视为"未实现"。
///
/// Override only the callbacks of interest and return `Ok(Dispatch::Handled)`;
/// callbacks left at their default are treated as "not implemented" by the
/// dispatch chain.
pub trait Handler {
    fn on_reactor_init(&mut self, _event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        Ok(Dispatch::Unhandled)
    }

    fn on_reactor_quiesced(
        &mut self,
        _event: &Event,
        _ctx: &mut ReactorContext<'_>,
    ) -> HandlerResult {
        Ok(Dispatch::Unhandled)
    }

    fn on_reactor_final(&mut self, _event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        Ok(Dispatch::Unhandled)
    }

    /// 只有显式投递到处理器链上的 `timer_task` 事件才会到达这里；
    /// 调度的任务会直接收到自己的 `timer_task`。
    ///
    /// Only `timer_task` events explicitly posted into the chain arrive here;
    /// scheduled tasks receive their own `timer_task` directly.
    fn on_timer_task(&mut self, _event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
        Ok(Dispatch::Unhandled)
    }

    fn on_selectable_readable(
        &mut self,
        _event: &Event,
        _ctx: &mut ReactorContext<'_>,
    ) -> HandlerResult {
        Ok(Dispatch::Unhandled)
    }

    fn on_selectable_writable(
        &mut self,
        _event: &Event,
        _ctx: &mut ReactorContext<'_>,
    ) -> HandlerResult {
        Ok(Dispatch::Unhandled)
    }

    fn on_selectable_error(
        &mut self,
        _event: &Event,
        _ctx: &mut ReactorContext<'_>,
    ) -> HandlerResult {
        Ok(Dispatch::Unhandled)
    }

    /// 应用自定义事件，`name` 为自定义事件名
    /// Application-defined events, `name` is the custom event name
    fn on_custom(
        &mut self,
        _name: &str,
        _event: &Event,
        _ctx: &mut ReactorContext<'_>,
    ) -> HandlerResult {
        Ok(Dispatch::Unhandled)
    }

    /// 全局处理器的兜底回调，何时触发由 [`crate::config::UnhandledPolicy`] 决定
    /// Catch-all callback of global handlers; when it fires is decided by
    /// [`crate::config::UnhandledPolicy`]
    fn on_unhandled(
        &mut self,
        _name: &str,
        _event: &Event,
        _ctx: &mut ReactorContext<'_>,
    ) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// 定时任务特征
/// Scheduled task trait
pub trait Task {
    /// 任务到期时调用，事件直接送达任务本身，不经过处理器链
    /// Called when the task becomes due; the event goes straight to the task
    /// and bypasses the handler chain
    fn on_timer_task(&mut self, event: &Event, ctx: &mut ReactorContext<'_>) -> Result<(), HandlerError>;
}

/// 基于闭包的任务实现
/// Closure-based task implementation
pub struct ClosureTask<F>
where
    F: FnMut(&Event, &mut ReactorContext<'_>) -> Result<(), HandlerError>,
{
    callback: F,
}

impl<F> ClosureTask<F>
where
    F: FnMut(&Event, &mut ReactorContext<'_>) -> Result<(), HandlerError>,
{
    /// 创建新的闭包任务
    /// Create new closure task
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> std::fmt::Debug for ClosureTask<F>
where
    F: FnMut(&Event, &mut ReactorContext<'_>) -> Result<(), HandlerError>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureTask")
            .field("callback", &"<closure>")
            .finish()
    }
}

impl<F> Task for ClosureTask<F>
where
    F: FnMut(&Event, &mut ReactorContext<'_>) -> Result<(), HandlerError>,
{
    fn on_timer_task(&mut self, event: &Event, ctx: &mut ReactorContext<'_>) -> Result<(), HandlerError> {
        (self.callback)(event, ctx)
    }
}
