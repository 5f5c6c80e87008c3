//! 待分发事件队列
//! Queue of events awaiting dispatch

use super::types::Event;
use std::collections::VecDeque;
use tracing::trace;

/// 先进先出的事件队列，严格按照到达顺序出队
/// FIFO event queue, events leave strictly in arrival order
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加事件到队尾
    /// Append an event to the back of the queue
    pub fn push(&mut self, event: Event) {
        trace!(event = event.name(), to = %event.target(), queued = self.events.len(), "Event queued");
        self.events.push_back(event);
    }

    /// 取出最早到达的事件
    /// Take the earliest arrived event
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 丢弃所有待分发事件，返回丢弃数量
    /// Drop every pending event, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let dropped = self.events.len();
        self.events.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventType, ReactorId, Target};

    fn event(reactor: ReactorId, name: &'static str) -> Event {
        Event::new(reactor, EventType::custom(name), Target::Reactor, None)
    }

    #[test]
    fn test_fifo_order() {
        let reactor = ReactorId::next();
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());

        queue.push(event(reactor, "first"));
        queue.push(event(reactor, "second"));
        queue.push(event(reactor, "third"));
        assert_eq!(queue.len(), 3);

        let names: Vec<String> = std::iter::from_fn(|| queue.pop())
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_push_while_draining() {
        let reactor = ReactorId::next();
        let mut queue = EventQueue::new();
        queue.push(event(reactor, "a"));

        let mut seen = Vec::new();
        while let Some(e) = queue.pop() {
            if e.name() == "a" {
                queue.push(event(reactor, "b"));
            }
            seen.push(e.name().to_string());
        }
        assert_eq!(seen, ["a", "b"]);
    }

    #[test]
    fn test_clear() {
        let reactor = ReactorId::next();
        let mut queue = EventQueue::new();
        queue.push(event(reactor, "a"));
        queue.push(event(reactor, "b"));
        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
    }
}
