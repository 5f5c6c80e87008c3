//! 分发结果
//! Dispatch outcome

/// 单个事件经过分发链后的结果
/// Result of passing a single event through the dispatch chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// 目标处理器实现了该事件的回调
    /// The target handler implemented the callback for the event
    pub handled_by_target: bool,
    /// 实现了该事件回调的全局处理器数量
    /// Number of global handlers implementing the callback for the event
    pub matched_observers: usize,
    /// 收到 `on_unhandled` 的全局处理器数量
    /// Number of global handlers that received `on_unhandled`
    pub unhandled_notified: usize,
}

impl DispatchOutcome {
    /// 整条链上没有任何具名回调匹配
    /// No named callback anywhere in the chain matched
    pub fn is_unhandled(&self) -> bool {
        !self.handled_by_target && self.matched_observers == 0
    }
}
