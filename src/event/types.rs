//! 事件类型定义
//! Event type definitions

use crate::timer::TaskHandle;
use bytes::Bytes;
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// 反应器实例标识
/// Reactor instance identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReactorId(u64);

impl ReactorId {
    /// 分配一个进程内唯一的反应器ID
    /// Allocate a process-unique reactor ID
    pub(crate) fn next() -> Self {
        static NEXT_REACTOR_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_REACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReactorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reactor-{}", self.0)
    }
}

/// 附加到反应器上的对象本地处理器的标识
/// Identifier of an object-local handler attached to a reactor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub(crate) u64);

impl HandlerId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler-{}", self.0)
    }
}

/// 事件的目标对象
/// The object an event is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// 反应器自身，即程序处理器
    /// The reactor itself, i.e. its program handler
    Reactor,
    /// 一个已附加的对象本地处理器
    /// An attached object-local handler
    Handler(HandlerId),
    /// 一个已调度的任务
    /// A scheduled task
    Task(TaskHandle),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Reactor => f.write_str("reactor"),
            Target::Handler(id) => write!(f, "{id}"),
            Target::Task(handle) => write!(f, "{handle}"),
        }
    }
}

/// 事件类型
/// Event kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    /// 反应器启动，先于其他所有事件
    /// Reactor started, precedes every other event
    ReactorInit,
    /// 反应器没有就绪工作，即将等待
    /// Reactor ran out of ready work and is about to wait
    ReactorQuiesced,
    /// 反应器停止，晚于其他所有事件
    /// Reactor stopped, follows every other event
    ReactorFinal,
    /// 已调度任务到期
    /// A scheduled task became due
    TimerTask,
    /// 外部I/O源可读
    /// An external I/O source became readable
    SelectableReadable,
    /// 外部I/O源可写
    /// An external I/O source became writable
    SelectableWritable,
    /// 外部I/O源报告错误
    /// An external I/O source reported an error
    SelectableError,
    /// 应用自定义事件
    /// Application-defined event
    Custom(Cow<'static, str>),
}

impl EventType {
    /// 创建自定义事件类型
    /// Create a custom event kind
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        EventType::Custom(name.into())
    }

    /// 事件名称，例如 `reactor_init`
    /// Event name, e.g. `reactor_init`
    pub fn name(&self) -> &str {
        match self {
            EventType::ReactorInit => "reactor_init",
            EventType::ReactorQuiesced => "reactor_quiesced",
            EventType::ReactorFinal => "reactor_final",
            EventType::TimerTask => "timer_task",
            EventType::SelectableReadable => "selectable_readable",
            EventType::SelectableWritable => "selectable_writable",
            EventType::SelectableError => "selectable_error",
            EventType::Custom(name) => name.as_ref(),
        }
    }

    /// 是否为反应器生命周期事件
    /// Whether this is a reactor lifecycle event
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            EventType::ReactorInit | EventType::ReactorQuiesced | EventType::ReactorFinal
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 由反应器分发的单个事件，创建后不可变
/// A single event dispatched by the reactor, immutable once created
#[derive(Debug)]
pub struct Event {
    kind: EventType,
    target: Target,
    reactor: ReactorId,
    payload: Option<Bytes>,
}

impl Event {
    pub(crate) fn new(
        reactor: ReactorId,
        kind: EventType,
        target: Target,
        payload: Option<Bytes>,
    ) -> Self {
        Self {
            kind,
            target,
            reactor,
            payload,
        }
    }

    pub fn kind(&self) -> &EventType {
        &self.kind
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// 产生该事件的反应器
    /// The reactor that produced this event
    pub fn reactor(&self) -> ReactorId {
        self.reactor
    }

    pub fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event({}, target={}, reactor={}",
            self.kind, self.target, self.reactor
        )?;
        if let Some(payload) = &self.payload {
            write!(f, ", payload={} bytes", payload.len())?;
        }
        f.write_str(")")
    }
}
