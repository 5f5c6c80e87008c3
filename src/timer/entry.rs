//! 定时器堆条目实现
//! Timer entry implementation for the timer heap

use std::cmp::Ordering;
use std::fmt;
use tokio::time::Instant;

/// 已调度任务的句柄，可用于取消任务
/// Handle of a scheduled task, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    /// 调度序号，同时用于打破到期时间相同的平局
    /// Schedule sequence number, also breaks ties between equal deadlines
    pub(crate) seq: u64,
    /// 到期时间，调度后不可变
    /// Deadline, immutable once scheduled
    pub(crate) deadline: Instant,
}

impl TaskHandle {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.seq)
    }
}

/// 堆中的定时器条目，只记录排序键，任务本体保存在任务表中
/// Timer entry in the heap; only the ordering key lives here, the task itself
/// is kept in the task table
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimerEntry {
    pub(crate) deadline: Instant,
    pub(crate) seq: u64,
}

impl TimerEntry {
    pub(crate) fn new(handle: TaskHandle) -> Self {
        Self {
            deadline: handle.deadline,
            seq: handle.seq,
        }
    }
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for TimerEntry {}

impl Ord for TimerEntry {
    /// 反向比较，使 `BinaryHeap<TimerEntry>` 成为最小堆：
    /// 最早到期者先出，到期相同时序号小者先出
    ///
    /// Reversed comparison so `BinaryHeap<TimerEntry>` is a min-heap: the
    /// earliest deadline pops first, then the lowest sequence number
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;
    use std::time::Duration;

    #[test]
    fn test_min_heap_order_with_fifo_ties() {
        let base = Instant::now();
        let late = TaskHandle { seq: 1, deadline: base + Duration::from_millis(20) };
        let early_a = TaskHandle { seq: 2, deadline: base + Duration::from_millis(10) };
        let early_b = TaskHandle { seq: 3, deadline: base + Duration::from_millis(10) };

        let mut heap = BinaryHeap::new();
        heap.push(TimerEntry::new(early_b));
        heap.push(TimerEntry::new(late));
        heap.push(TimerEntry::new(early_a));

        let order: Vec<u64> = std::iter::from_fn(|| heap.pop()).map(|e| e.seq).collect();
        assert_eq!(order, [2, 3, 1]);
    }
}
