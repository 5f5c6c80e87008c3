//! 反应器运行循环
//! Reactor run-loop

use super::{
    context::ReactorContext,
    core::ReactorCore,
    injector::{EventInjector, Inbox},
    lifecycle::{Lifecycle, ReactorState},
};
use crate::{
    config::ReactorConfig,
    dispatch::{DispatchChain, DispatchOutcome, HandlerChain},
    error::{Error, Result},
    event::{Event, EventType, HandlerId, ReactorId, Target},
    handler::{GlobalHandler, Handler, Task},
    timer::{TaskHandle, TimerHeapStats, heap::delay_from_secs},
};
use bytes::Bytes;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, trace};

/// 单线程协作式事件反应器
/// Single-threaded cooperative event reactor
///
/// # Examples
///
/// ```
/// use reactor_core::{Dispatch, Event, Handler, HandlerResult, Reactor, ReactorContext};
///
/// struct Program;
///
/// impl Handler for Program {
///     fn on_reactor_init(&mut self, _event: &Event, _ctx: &mut ReactorContext<'_>) -> HandlerResult {
///         println!("Hello, World!");
///         Ok(Dispatch::Handled)
///     }
/// }
///
/// let mut reactor = Reactor::new(Program);
/// reactor.run_blocking().unwrap();
/// ```
pub struct Reactor {
    core: ReactorCore,
    handlers: HandlerChain,
    lifecycle: Lifecycle,
    inbox: Inbox,
    config: ReactorConfig,
    /// 当前空闲期是否已发出 `reactor_quiesced`
    /// Whether `reactor_quiesced` was already emitted for the current idle period
    idle_announced: bool,
}

impl std::fmt::Debug for Reactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactor")
            .field("core", &self.core)
            .field("handlers", &self.handlers)
            .field("state", &self.lifecycle.state())
            .field("config", &self.config)
            .finish()
    }
}

impl Reactor {
    /// 以默认配置创建反应器，`program` 是 `Target::Reactor` 事件的处理器
    /// Create a reactor with default configuration; `program` handles
    /// `Target::Reactor` events
    pub fn new<H: Handler + 'static>(program: H) -> Self {
        Self::with_config(program, ReactorConfig::default())
    }

    pub fn with_config<H: Handler + 'static>(program: H, config: ReactorConfig) -> Self {
        let core = ReactorCore::new();
        let lifecycle = Lifecycle::new(core.id);
        Self {
            core,
            handlers: HandlerChain::new(Box::new(program)),
            lifecycle,
            inbox: Inbox::default(),
            config,
            idle_announced: false,
        }
    }

    pub fn id(&self) -> ReactorId {
        self.core.id
    }

    pub fn state(&self) -> ReactorState {
        self.lifecycle.state()
    }

    pub fn config(&self) -> &ReactorConfig {
        &self.config
    }

    pub fn global_handler(&self) -> &GlobalHandler {
        self.handlers.global()
    }

    /// 全局处理器，可通过 `add` 追加观察者
    /// The global handler; append observers with `add`
    pub fn global_handler_mut(&mut self) -> &mut GlobalHandler {
        self.handlers.global_mut()
    }

    /// 调度任务在 `delay` 之后触发
    /// Schedule a task to fire after `delay`
    pub fn schedule<T: Task + 'static>(&mut self, delay: Duration, task: T) -> Result<TaskHandle> {
        self.core.schedule(delay, Box::new(task))
    }

    /// 以秒为单位调度任务；负数或非有限的延迟返回 `InvalidDelay`，状态不变
    /// Schedule a task with a delay in seconds; negative or non-finite delays
    /// return `InvalidDelay` and change nothing
    pub fn schedule_secs<T: Task + 'static>(&mut self, seconds: f64, task: T) -> Result<TaskHandle> {
        let delay = delay_from_secs(seconds)?;
        self.core.schedule(delay, Box::new(task))
    }

    /// 取消任务；对已触发或已取消的任务无效果
    /// Cancel a task; no effect on tasks already fired or cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.core.timers.cancel(handle)
    }

    pub fn timer_stats(&self) -> TimerHeapStats {
        self.core.timers.stats()
    }

    /// 附加对象本地处理器，返回可用于 `Target::Handler` 的ID
    /// Attach an object-local handler, returning the ID used by `Target::Handler`
    pub fn attach<H: Handler + 'static>(&mut self, handler: H) -> HandlerId {
        let id = self.core.allocate_handler_id();
        self.handlers.registry.insert(id, Box::new(handler));
        id
    }

    pub fn detach(&mut self, id: HandlerId) -> Option<Box<dyn Handler>> {
        self.handlers.registry.remove(id)
    }

    /// 投递事件；反应器停止后返回 `AlreadyStopped`
    /// Post an event; returns `AlreadyStopped` once the reactor has stopped
    pub fn post(&mut self, kind: EventType, target: Target, payload: Option<Bytes>) -> Result<()> {
        if self.state() == ReactorState::Stopped {
            return Err(Error::AlreadyStopped);
        }
        self.core.post(kind, target, payload);
        Ok(())
    }

    /// 返回一个可跨线程使用的事件注入器
    /// Hand out an event injector usable from other threads
    pub fn injector(&mut self) -> EventInjector {
        let injector = self.inbox.injector(self.core.id, &mut self.core.queue);
        if self.state() == ReactorState::Stopped {
            self.inbox.close();
        }
        injector
    }

    /// 启动反应器：`Created → Running`，并立即分发 `reactor_init`
    /// Start the reactor: `Created → Running`, then dispatch `reactor_init` at once
    pub fn start(&mut self) -> Result<()> {
        self.lifecycle.check_startable()?;
        self.lifecycle.transition(ReactorState::Running)?;
        info!(reactor = %self.core.id, "Reactor started");

        self.core.begin_turn();
        let init = Event::new(self.core.id, EventType::ReactorInit, Target::Reactor, None);
        self.guard(|reactor| reactor.dispatch(&init).map(|_| ()))
    }

    /// 运行一轮循环；返回 `false` 表示反应器已无工作或被请求停止
    /// Run one loop turn; `false` means the reactor ran out of work or was asked
    /// to stop
    pub async fn process(&mut self) -> Result<bool> {
        self.lifecycle.check_running()?;

        let now = self.core.begin_turn();
        self.guard(|reactor| reactor.fire_due_tasks(now))?;
        self.inbox.drain_into(&mut self.core.queue);
        self.guard(|reactor| reactor.drain_queue())?;

        if self.core.stop_requested {
            debug!(reactor = %self.core.id, "Leaving run-loop on request");
            return Ok(false);
        }

        let next_deadline = self.core.timers.next_deadline();
        if next_deadline.is_some_and(|deadline| deadline <= Instant::now()) {
            return Ok(true);
        }
        // 通道状态必须在取事件之前读取
        // Channel state must be read before this drain
        let inbox_alive = self.inbox.is_alive();
        if self.inbox.drain_into(&mut self.core.queue) > 0 {
            return Ok(true);
        }
        if next_deadline.is_none() && !inbox_alive {
            debug!(reactor = %self.core.id, "No pending tasks or events, reactor is quiescent");
            return Ok(false);
        }

        if self.config.lifecycle.emit_quiesced && !self.idle_announced {
            self.idle_announced = true;
            self.core.post(EventType::ReactorQuiesced, Target::Reactor, None);
            return Ok(true);
        }

        trace!(
            reactor = %self.core.id,
            pending_tasks = self.core.timers.len(),
            inbox_alive,
            "Waiting for work"
        );
        self.wait_for_work(next_deadline, inbox_alive).await;
        self.idle_announced = false;
        Ok(true)
    }

    /// 停止反应器：`Running → Stopped`，并分发 `reactor_final`
    /// Stop the reactor: `Running → Stopped`, then dispatch `reactor_final`
    ///
    /// `reactor_final` 回调中投递的事件和调度的任务会被丢弃。
    /// Events posted and tasks scheduled by `reactor_final` callbacks are discarded.
    pub fn stop(&mut self) -> Result<()> {
        self.lifecycle.check_running()?;
        self.lifecycle.transition(ReactorState::Stopped)?;
        self.inbox.close();

        self.core.begin_turn();
        let final_event = Event::new(self.core.id, EventType::ReactorFinal, Target::Reactor, None);
        let result = self.dispatch(&final_event).map(|_| ());
        self.discard_leftovers();
        info!(reactor = %self.core.id, "Reactor stopped");
        result
    }

    /// 运行反应器直到没有工作：`start`，循环 `process`，最后 `stop`
    /// Run the reactor until it runs out of work: `start`, `process` in a loop,
    /// then `stop`
    ///
    /// # Errors
    /// 第二次调用返回 `AlreadyStopped`。回调失败时返回 `Handler` 错误，
    /// 反应器被标记为已停止且不会发出 `reactor_final`。
    ///
    /// A second call returns `AlreadyStopped`. A failing callback returns the
    /// `Handler` error; the reactor is marked stopped without emitting
    /// `reactor_final`.
    pub async fn run(&mut self) -> Result<()> {
        self.start()?;
        while self.process().await? {}
        self.stop()
    }

    /// 在当前线程的tokio运行时上驱动 [`Reactor::run`]
    /// Drive [`Reactor::run`] on a current-thread tokio runtime
    ///
    /// # Errors
    /// 在已有的tokio运行时中调用时返回 `Runtime` 错误，反应器状态不变；
    /// 这种情况下应直接 `await` [`Reactor::run`]。
    ///
    /// Returns a `Runtime` error, leaving the reactor untouched, when called from
    /// inside a tokio runtime; `.await` [`Reactor::run`] there instead.
    pub fn run_blocking(&mut self) -> Result<()> {
        self.lifecycle.check_startable()?;
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(Error::Runtime(std::io::Error::other(
                "run_blocking called from within a tokio runtime",
            )));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        runtime.block_on(self.run())
    }

    fn fire_due_tasks(&mut self, now: Instant) -> Result<()> {
        for (handle, mut task) in self.core.timers.pop_due(now) {
            let mut ctx = ReactorContext::new(&mut self.core);
            DispatchChain::deliver_timer_task(handle, task.as_mut(), &mut ctx)?;
            self.apply_deferred();
        }
        Ok(())
    }

    fn drain_queue(&mut self) -> Result<()> {
        while let Some(event) = self.core.queue.pop() {
            self.dispatch(&event)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, event: &Event) -> Result<DispatchOutcome> {
        let policy = self.config.dispatch.unhandled_policy;
        let mut ctx = ReactorContext::new(&mut self.core);
        let outcome = DispatchChain::dispatch(event, &mut self.handlers, &mut ctx, policy)?;
        self.apply_deferred();
        Ok(outcome)
    }

    /// 执行回调期间记录的附加/移除请求
    /// Apply attach/detach requests recorded during a callback
    fn apply_deferred(&mut self) {
        for (id, handler) in self.core.attach_requests.drain(..) {
            self.handlers.registry.insert(id, handler);
        }
        for id in self.core.detach_requests.drain(..) {
            self.handlers.registry.remove(id);
        }
    }

    async fn wait_for_work(&mut self, next_deadline: Option<Instant>, inbox_alive: bool) {
        match (next_deadline, inbox_alive) {
            (Some(deadline), false) => sleep_until(deadline).await,
            (Some(deadline), true) => {
                tokio::select! {
                    _ = sleep_until(deadline) => {}
                    event = self.inbox.recv() => {
                        if let Some(event) = event {
                            self.core.queue.push(event);
                        }
                    }
                }
            }
            (None, true) => {
                if let Some(event) = self.inbox.recv().await {
                    self.core.queue.push(event);
                }
            }
            (None, false) => {}
        }
    }

    fn discard_leftovers(&mut self) {
        let dropped_events = self.core.queue.clear();
        let dropped_tasks = self.core.timers.clear();
        if dropped_events > 0 || dropped_tasks > 0 {
            debug!(
                reactor = %self.core.id,
                dropped_events,
                dropped_tasks,
                "Discarded work left after the reactor stopped"
            );
        }
    }

    /// 回调失败时将反应器标记为已停止，不再发出 `reactor_final`
    /// On callback failure mark the reactor stopped without emitting `reactor_final`
    fn guard<T>(&mut self, step: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = step(self);
        if result.is_err() && self.lifecycle.state() == ReactorState::Running {
            // Running → Stopped is always valid here.
            let _ = self.lifecycle.transition(ReactorState::Stopped);
            self.inbox.close();
            self.discard_leftovers();
        }
        result
    }
}
