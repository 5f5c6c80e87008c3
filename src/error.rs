//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use thiserror::Error;

/// The primary error type for the reactor library.
/// 反应器库的主要错误类型。
#[derive(Debug, Error)]
pub enum Error {
    /// A task was scheduled with a delay the monotonic clock cannot represent.
    /// 任务的调度延迟无效（负数、非有限值或超出单调时钟范围）。
    #[error("invalid scheduling delay: {reason}")]
    InvalidDelay {
        /// Why the delay was rejected.
        reason: String,
    },

    /// `run()` or `start()` was called on a reactor that already reached its terminal state.
    /// 在已经进入终止状态的反应器上调用了 `run()` 或 `start()`。
    #[error("reactor has already stopped and cannot be restarted")]
    AlreadyStopped,

    /// `start()` was called while the reactor is running.
    /// 反应器运行期间再次调用了 `start()`。
    #[error("reactor is already running")]
    AlreadyRunning,

    /// A run-loop operation was attempted outside the `Running` state.
    /// 在 `Running` 状态之外尝试了运行循环操作。
    #[error("reactor is not running")]
    NotRunning,

    /// The lifecycle state machine rejected a transition.
    /// 生命周期状态机拒绝了一次状态转换。
    #[error("invalid lifecycle transition from {from} to {to}")]
    InvalidTransition {
        /// State the reactor was in.
        from: &'static str,
        /// State the transition was aimed at.
        to: &'static str,
    },

    /// A handler or task callback failed while an event was being dispatched.
    /// 事件分发期间处理器或任务回调失败。
    #[error("handler failed while processing `{event}`")]
    Handler {
        /// Name of the event being dispatched.
        event: String,
        /// The error returned by the callback.
        #[source]
        source: HandlerError,
    },

    /// An injector was used after its reactor had been dropped.
    /// 反应器被丢弃后仍然使用了事件注入器。
    #[error("the reactor behind this injector has stopped or been dropped")]
    ReactorGone,

    /// The blocking runtime used by `run_blocking` could not be built.
    /// 无法构建 `run_blocking` 使用的阻塞运行时。
    #[error("failed to build reactor runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_delay(reason: impl Into<String>) -> Self {
        Error::InvalidDelay {
            reason: reason.into(),
        }
    }

    pub(crate) fn handler(event: impl Into<String>, source: HandlerError) -> Self {
        Error::Handler {
            event: event.into(),
            source,
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        use std::io::ErrorKind;
        match err {
            Error::Runtime(e) => e,
            Error::InvalidDelay { reason } => std::io::Error::new(ErrorKind::InvalidInput, reason),
            Error::AlreadyStopped
            | Error::AlreadyRunning
            | Error::NotRunning
            | Error::InvalidTransition { .. } => std::io::Error::other(err.to_string()),
            Error::Handler { .. } => std::io::Error::other(err),
            Error::ReactorGone => ErrorKind::BrokenPipe.into(),
        }
    }
}

/// An error raised by application code inside a handler or task callback.
///
/// 处理器或任务回调中的应用代码抛出的错误。
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl HandlerError {
    /// Wraps an underlying error.
    /// 包装一个底层错误。
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        let source = source.into();
        Self {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates an error from a plain message.
    /// 从纯文本消息创建错误。
    pub fn msg(message: impl std::fmt::Display) -> Self {
        Self {
            message: message.to_string(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
