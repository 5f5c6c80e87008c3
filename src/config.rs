//! 定义了反应器的可配置参数。
//! Defines configurable parameters for the reactor.

/// A structure containing all configurable parameters for a reactor.
///
/// 包含所有反应器可配置参数的结构体。
#[derive(Debug, Clone, Default)]
pub struct ReactorConfig {
    /// Dispatch chain parameters.
    /// 分发链相关参数。
    pub dispatch: DispatchConfig,

    /// Lifecycle and run-loop parameters.
    /// 生命周期和运行循环相关参数。
    pub lifecycle: LifecycleConfig,
}

/// Decides when a global handler's `on_unhandled` fallback is invoked.
///
/// 决定全局处理器的 `on_unhandled` 回退何时被调用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnhandledPolicy {
    /// Every global handler lacking the specific callback gets `on_unhandled`,
    /// regardless of what the target handler did.
    ///
    /// 每个缺少特定回调的全局处理器都会收到 `on_unhandled`，与目标处理器无关。
    #[default]
    PerObserver,
    /// `on_unhandled` fires on every global handler only when no handler in the
    /// whole chain implemented the callback.
    ///
    /// 仅当整条链上都没有处理器实现该回调时，才对每个全局处理器触发 `on_unhandled`。
    WholeChain,
}

/// Dispatch chain parameters.
///
/// 分发链相关参数。
#[derive(Debug, Clone, Default)]
pub struct DispatchConfig {
    /// Fallback policy for events no callback matched.
    /// 未匹配回调事件的回退策略。
    pub unhandled_policy: UnhandledPolicy,
}

/// Lifecycle and run-loop parameters.
///
/// 生命周期和运行循环相关参数。
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Emit `reactor_quiesced` each time the loop runs out of ready work and has
    /// to wait for a timer or an injected event.
    ///
    /// 每当运行循环没有就绪工作、需要等待定时器或注入事件时，发出 `reactor_quiesced`。
    pub emit_quiesced: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            emit_quiesced: true,
        }
    }
}
