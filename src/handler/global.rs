//! 全局处理器 - 观察反应器分发的每个事件
//! Global handler - observes every event the reactor dispatches

use super::traits::Handler;

/// 附加在反应器上的观察者集合，按添加顺序调用
/// Observers attached to the reactor, invoked in the order they were added
#[derive(Default)]
pub struct GlobalHandler {
    observers: Vec<Box<dyn Handler>>,
}

impl std::fmt::Debug for GlobalHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalHandler")
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl GlobalHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个观察者；多次添加会串联，所有观察者都能看到所有事件
    /// Append an observer; repeated additions chain and every observer sees every event
    pub fn add<H: Handler + 'static>(&mut self, handler: H) -> &mut Self {
        self.observers.push(Box::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn observer_mut(&mut self, index: usize) -> Option<&mut (dyn Handler + 'static)> {
        self.observers.get_mut(index).map(|h| h.as_mut())
    }
}
