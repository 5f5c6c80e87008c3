//! 事件注入器 - 外部事件源（例如I/O就绪通知）向反应器投递事件的通道
//! Event injector - the channel external event sources (e.g. I/O readiness
//! notifications) use to post events into a reactor

use crate::{
    error::{Error, Result},
    event::{Event, EventQueue, EventType, ReactorId, Target},
};
use bytes::Bytes;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tracing::trace;

/// 可跨线程克隆的事件注入句柄
/// Cloneable event injection handle, usable from any thread
///
/// 只要还有存活的注入器，反应器就不会因空闲而停止，而是等待注入的事件。
/// While any injector is alive the reactor does not stop on quiescence; it
/// waits for injected events instead.
#[derive(Debug, Clone)]
pub struct EventInjector {
    reactor: ReactorId,
    tx: UnboundedSender<Event>,
}

impl EventInjector {
    /// 投递事件；反应器已停止或被丢弃时返回 `ReactorGone`
    /// Post an event; returns `ReactorGone` once the reactor stopped or was dropped
    pub fn post(&self, kind: EventType, target: Target, payload: Option<Bytes>) -> Result<()> {
        let event = Event::new(self.reactor, kind, target, payload);
        self.tx.send(event).map_err(|_| Error::ReactorGone)
    }

    pub fn reactor_id(&self) -> ReactorId {
        self.reactor
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// 反应器一侧的注入事件收件箱
/// Reactor-side inbox of injected events
#[derive(Debug, Default)]
pub(crate) struct Inbox {
    rx: Option<UnboundedReceiver<Event>>,
    weak_tx: Option<WeakUnboundedSender<Event>>,
}

impl Inbox {
    /// 返回一个注入器；已有注入器存活时复用同一通道
    /// Hand out an injector, reusing the channel while an injector is alive
    pub(crate) fn injector(&mut self, reactor: ReactorId, queue: &mut EventQueue) -> EventInjector {
        if let Some(tx) = self.weak_tx.as_ref().and_then(|weak| weak.upgrade()) {
            return EventInjector { reactor, tx };
        }

        // 旧通道的所有发送端都已丢弃，先取出残留事件再换新通道
        // Every sender of the old channel is gone; take leftovers before replacing it
        self.drain_into(queue);
        let (tx, rx) = mpsc::unbounded_channel();
        self.weak_tx = Some(tx.downgrade());
        self.rx = Some(rx);
        EventInjector { reactor, tx }
    }

    /// 将已到达的注入事件移入事件队列，返回移动数量
    /// Move injected events that already arrived into the event queue
    pub(crate) fn drain_into(&mut self, queue: &mut EventQueue) -> usize {
        let Some(rx) = self.rx.as_mut() else {
            return 0;
        };
        let mut moved = 0;
        while let Ok(event) = rx.try_recv() {
            queue.push(event);
            moved += 1;
        }
        if moved > 0 {
            trace!(moved, "Injected events moved into the queue");
        }
        moved
    }

    /// 是否还有存活的注入器
    /// Whether any injector is still alive
    pub(crate) fn is_alive(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| !rx.is_closed())
    }

    /// 等待下一个注入事件；没有通道时永远挂起
    /// Wait for the next injected event; pends forever without a channel
    pub(crate) async fn recv(&mut self) -> Option<Event> {
        match self.rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => std::future::pending().await,
        }
    }

    /// 关闭收件箱，之后的投递都会失败
    /// Close the inbox; later posts fail
    pub(crate) fn close(&mut self) {
        if let Some(rx) = self.rx.as_mut() {
            rx.close();
        }
        self.weak_tx = None;
    }
}
