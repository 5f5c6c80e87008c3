//! 分发链实现 - 将事件路由到目标处理器与全局处理器
//! Dispatch chain implementation - routes events to the target and global handlers

use super::outcome::DispatchOutcome;
use crate::{
    config::UnhandledPolicy,
    error::{Error, HandlerError, Result},
    event::{Event, EventType, Target},
    handler::{Dispatch, GlobalHandler, Handler, HandlerRegistry, HandlerResult, Task},
    reactor::ReactorContext,
    timer::TaskHandle,
};
use tracing::{debug, trace, warn};

/// 分发链所需的全部处理器
/// Every handler the dispatch chain needs
pub struct HandlerChain {
    /// 反应器自身的程序处理器，`Target::Reactor` 的目标
    /// The reactor's own program handler, target of `Target::Reactor`
    pub(crate) program: Box<dyn Handler>,
    pub(crate) registry: HandlerRegistry,
    pub(crate) global: GlobalHandler,
}

impl std::fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerChain")
            .field("registry", &self.registry)
            .field("global", &self.global)
            .finish()
    }
}

impl HandlerChain {
    pub fn new(program: Box<dyn Handler>) -> Self {
        Self {
            program,
            registry: HandlerRegistry::new(),
            global: GlobalHandler::new(),
        }
    }

    pub fn global(&self) -> &GlobalHandler {
        &self.global
    }

    pub fn global_mut(&mut self) -> &mut GlobalHandler {
        &mut self.global
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }
}

/// 事件分发器，负责按照分发链规则调用处理器回调
/// Event dispatcher that invokes handler callbacks following the chain rules
pub struct DispatchChain;

impl DispatchChain {
    /// 分发一个事件
    /// Dispatch one event
    ///
    /// 1. 目标处理器（若存在）的具名回调；
    /// 2. 每个全局处理器的具名回调，按添加顺序；
    /// 3. 按 `policy` 调用全局处理器的 `on_unhandled`。
    ///
    /// 1. the target handler's named callback, if there is a target handler;
    /// 2. every global handler's named callback, in the order they were added;
    /// 3. global handlers' `on_unhandled`, according to `policy`.
    ///
    /// 任何回调失败都会立即终止该事件的分发，不会重试。
    /// Any callback failure stops dispatch of the event at once; nothing is retried.
    pub fn dispatch(
        event: &Event,
        chain: &mut HandlerChain,
        ctx: &mut ReactorContext<'_>,
        policy: UnhandledPolicy,
    ) -> Result<DispatchOutcome> {
        trace!(reactor = %event.reactor(), event = event.name(), to = %event.target(), "Dispatching event");

        let HandlerChain {
            program,
            registry,
            global,
        } = chain;
        let mut outcome = DispatchOutcome::default();

        let target: Option<&mut (dyn Handler + 'static)> = match event.target() {
            Target::Reactor => Some(program.as_mut()),
            Target::Handler(id) => {
                let handler = registry.get_mut(id);
                if handler.is_none() {
                    debug!(handler = %id, event = event.name(), "Event target is not attached");
                }
                handler
            }
            Target::Task(_) => None,
        };

        if let Some(handler) = target {
            outcome.handled_by_target = Self::invoke(handler, event, ctx)?.is_handled();
        }

        let mut declined = Vec::new();
        for index in 0..global.len() {
            let Some(observer) = global.observer_mut(index) else {
                continue;
            };
            match Self::invoke(observer, event, ctx)? {
                Dispatch::Handled => outcome.matched_observers += 1,
                Dispatch::Unhandled if policy == UnhandledPolicy::PerObserver => {
                    Self::notify_unhandled(observer, event, ctx)?;
                    outcome.unhandled_notified += 1;
                }
                Dispatch::Unhandled => declined.push(index),
            }
        }

        if policy == UnhandledPolicy::WholeChain && outcome.is_unhandled() {
            for index in declined {
                if let Some(observer) = global.observer_mut(index) {
                    Self::notify_unhandled(observer, event, ctx)?;
                    outcome.unhandled_notified += 1;
                }
            }
        }

        if outcome.is_unhandled() && outcome.unhandled_notified == 0 {
            trace!(event = event.name(), to = %event.target(), "Event unhandled by every handler");
        }
        Ok(outcome)
    }

    /// 将 `timer_task` 事件直接送达任务本身
    /// Deliver a `timer_task` event straight to the task itself
    pub fn deliver_timer_task(
        handle: TaskHandle,
        task: &mut dyn Task,
        ctx: &mut ReactorContext<'_>,
    ) -> Result<()> {
        let event = Event::new(ctx.reactor_id(), EventType::TimerTask, Target::Task(handle), None);
        trace!(reactor = %event.reactor(), task = %handle, "Firing timer task");
        task.on_timer_task(&event, ctx)
            .map_err(|e| Self::failed(&event, e))
    }

    /// 调用与事件类型对应的具名回调
    /// Invoke the named callback matching the event kind
    fn invoke(
        handler: &mut dyn Handler,
        event: &Event,
        ctx: &mut ReactorContext<'_>,
    ) -> Result<Dispatch> {
        let result: HandlerResult = match event.kind() {
            EventType::ReactorInit => handler.on_reactor_init(event, ctx),
            EventType::ReactorQuiesced => handler.on_reactor_quiesced(event, ctx),
            EventType::ReactorFinal => handler.on_reactor_final(event, ctx),
            EventType::TimerTask => handler.on_timer_task(event, ctx),
            EventType::SelectableReadable => handler.on_selectable_readable(event, ctx),
            EventType::SelectableWritable => handler.on_selectable_writable(event, ctx),
            EventType::SelectableError => handler.on_selectable_error(event, ctx),
            EventType::Custom(name) => handler.on_custom(name, event, ctx),
        };
        result.map_err(|e| Self::failed(event, e))
    }

    fn notify_unhandled(
        handler: &mut dyn Handler,
        event: &Event,
        ctx: &mut ReactorContext<'_>,
    ) -> Result<()> {
        handler
            .on_unhandled(event.name(), event, ctx)
            .map_err(|e| Self::failed(event, e))
    }

    fn failed(event: &Event, source: HandlerError) -> Error {
        warn!(reactor = %event.reactor(), event = event.name(), error = %source, "Handler callback failed");
        Error::handler(event.name(), source)
    }
}
