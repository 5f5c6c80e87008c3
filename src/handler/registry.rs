//! 对象本地处理器登记表
//! Registry of object-local handlers

use super::traits::Handler;
use crate::event::HandlerId;
use std::collections::HashMap;
use tracing::trace;

/// 保存以 [`HandlerId`] 寻址的对象本地处理器
/// Holds object-local handlers addressed by [`HandlerId`]
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<HandlerId, Box<dyn Handler>>,
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.handlers.keys().copied().collect();
        ids.sort();
        f.debug_struct("HandlerRegistry").field("ids", &ids).finish()
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: HandlerId, handler: Box<dyn Handler>) {
        trace!(handler = %id, "Handler attached");
        self.handlers.insert(id, handler);
    }

    pub(crate) fn remove(&mut self, id: HandlerId) -> Option<Box<dyn Handler>> {
        let removed = self.handlers.remove(&id);
        if removed.is_some() {
            trace!(handler = %id, "Handler detached");
        }
        removed
    }

    pub(crate) fn get_mut(&mut self, id: HandlerId) -> Option<&mut (dyn Handler + 'static)> {
        self.handlers.get_mut(&id).map(|h| h.as_mut())
    }

    pub fn contains(&self, id: HandlerId) -> bool {
        self.handlers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
