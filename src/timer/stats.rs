//! 定时器堆统计信息
//! Timer heap statistics

use tokio::time::Instant;

/// 定时器堆统计信息
/// Timer heap statistics
#[derive(Debug, Clone)]
pub struct TimerHeapStats {
    /// 待触发任务数
    /// Number of pending tasks
    pub pending: usize,
    /// 累计调度任务数
    /// Total tasks scheduled
    pub scheduled_total: u64,
    /// 累计触发任务数
    /// Total tasks fired
    pub fired_total: u64,
    /// 累计取消任务数
    /// Total tasks cancelled
    pub cancelled_total: u64,
    /// 最早的待触发到期时间
    /// Earliest pending deadline
    pub next_deadline: Option<Instant>,
}

impl std::fmt::Display for TimerHeapStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let next_in = self
            .next_deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()));
        write!(
            f,
            "TimerHeapStats {{ pending: {}, scheduled: {}, fired: {}, cancelled: {}, next_in: {:?} }}",
            self.pending, self.scheduled_total, self.fired_total, self.cancelled_total, next_in
        )
    }
}
