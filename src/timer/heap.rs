//! 定时器堆核心实现
//! Timer heap core implementation

use crate::error::{Error, Result};
use crate::handler::Task;
use crate::timer::entry::{TaskHandle, TimerEntry};
use crate::timer::stats::TimerHeapStats;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// 按到期时间排序的待执行任务集合
/// Pending tasks ordered by deadline
///
/// 取消在任务表中立即生效，在堆中惰性清理；堆顶始终是一个仍然有效的任务。
///
/// Cancellation takes effect immediately in the task table and lazily in the
/// heap; the head of the heap is always a live task.
pub struct TimerHeap {
    /// 排序键的最小堆
    /// Min-heap of ordering keys
    entries: BinaryHeap<TimerEntry>,
    /// 从调度序号到任务本体的映射
    /// Mapping from schedule sequence number to the task itself
    tasks: HashMap<u64, Box<dyn Task>>,
    /// 下一个分配的调度序号
    /// Next schedule sequence number to allocate
    next_seq: u64,
    scheduled_total: u64,
    fired_total: u64,
    cancelled_total: u64,
}

impl std::fmt::Debug for TimerHeap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHeap")
            .field("pending", &self.tasks.len())
            .field("heap_entries", &self.entries.len())
            .field("next_seq", &self.next_seq)
            .finish()
    }
}

impl Default for TimerHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerHeap {
    pub fn new() -> Self {
        Self {
            entries: BinaryHeap::new(),
            tasks: HashMap::new(),
            next_seq: 1,
            scheduled_total: 0,
            fired_total: 0,
            cancelled_total: 0,
        }
    }

    /// 调度一个任务在 `now + delay` 时触发
    /// Schedule a task to fire at `now + delay`
    ///
    /// # Errors
    /// 到期时间超出单调时钟范围时返回 `InvalidDelay`，堆状态不变。
    /// Returns `InvalidDelay` when the deadline overflows the monotonic clock;
    /// the heap is left untouched.
    pub fn schedule(
        &mut self,
        now: Instant,
        delay: Duration,
        task: Box<dyn Task>,
    ) -> Result<TaskHandle> {
        let deadline = now
            .checked_add(delay)
            .ok_or_else(|| Error::invalid_delay(format!("{delay:?} overflows the monotonic clock")))?;

        let handle = TaskHandle {
            seq: self.next_seq,
            deadline,
        };
        self.next_seq += 1;
        self.scheduled_total += 1;

        self.entries.push(TimerEntry::new(handle));
        self.tasks.insert(handle.seq, task);

        trace!(
            task = %handle,
            delay_ms = delay.as_millis(),
            pending = self.tasks.len(),
            "Task scheduled"
        );
        Ok(handle)
    }

    /// 取消任务；已触发或已取消的任务返回 `false`，不报错
    /// Cancel a task; returns `false` without error for tasks already fired or cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if self.tasks.remove(&handle.seq).is_none() {
            trace!(task = %handle, "Task not pending, cancel ignored");
            return false;
        }
        self.cancelled_total += 1;
        self.purge_stale_head();
        trace!(task = %handle, pending = self.tasks.len(), "Task cancelled");
        true
    }

    /// 最早的待触发到期时间
    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.peek().map(|entry| entry.deadline)
    }

    /// 取出所有到期时间不晚于 `now` 的任务，按到期时间非降序，平局按调度顺序
    /// Take every task whose deadline is `<= now`, in nondecreasing deadline
    /// order with ties in scheduling order
    pub fn pop_due(&mut self, now: Instant) -> Vec<(TaskHandle, Box<dyn Task>)> {
        let mut due = Vec::new();
        while let Some(entry) = self.entries.peek() {
            if entry.deadline > now {
                break;
            }
            let entry = *entry;
            self.entries.pop();
            if let Some(task) = self.tasks.remove(&entry.seq) {
                due.push((
                    TaskHandle {
                        seq: entry.seq,
                        deadline: entry.deadline,
                    },
                    task,
                ));
            }
        }
        self.purge_stale_head();
        self.fired_total += due.len() as u64;

        if !due.is_empty() {
            trace!(due = due.len(), pending = self.tasks.len(), "Popped due tasks");
        }
        due
    }

    pub fn contains(&self, handle: TaskHandle) -> bool {
        self.tasks.contains_key(&handle.seq)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 丢弃所有待触发任务而不触发它们，返回丢弃数量
    /// Drop every pending task without firing it, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        self.entries.clear();
        dropped
    }

    pub fn stats(&self) -> TimerHeapStats {
        TimerHeapStats {
            pending: self.tasks.len(),
            scheduled_total: self.scheduled_total,
            fired_total: self.fired_total,
            cancelled_total: self.cancelled_total,
            next_deadline: self.next_deadline(),
        }
    }

    fn purge_stale_head(&mut self) {
        while let Some(entry) = self.entries.peek() {
            if self.tasks.contains_key(&entry.seq) {
                break;
            }
            self.entries.pop();
        }
    }
}

/// 将以秒为单位的浮点延迟转换为 `Duration`，拒绝负数与非有限值
/// Convert a delay in floating-point seconds to a `Duration`, rejecting
/// negative and non-finite values
pub fn delay_from_secs(seconds: f64) -> Result<Duration> {
    if !seconds.is_finite() {
        return Err(Error::invalid_delay(format!("{seconds} is not finite")));
    }
    if seconds < 0.0 {
        return Err(Error::invalid_delay(format!("{seconds}s is negative")));
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| Error::invalid_delay(e.to_string()))
}
