//! 事件处理器模型
//! Event handler model
//!
//! 处理器按事件类型提供一组具名回调，每个回调的默认实现返回
//! [`Dispatch::Unhandled`]，分发链据此判断处理器是否具备该能力。
//! 全局处理器是附加在反应器上的观察者集合；对象本地处理器登记在
//! [`HandlerRegistry`] 中，通过 [`crate::event::Target::Handler`] 寻址。
//!
//! A handler offers one named callback per event kind. Every callback defaults
//! to returning [`Dispatch::Unhandled`], which is how the dispatch chain tells
//! whether a handler has the capability. The global handler is an ordered set of
//! observers attached to the reactor; object-local handlers live in the
//! [`HandlerRegistry`] and are addressed through [`crate::event::Target::Handler`].

pub mod global;
pub mod registry;
pub mod traits;

pub use global::GlobalHandler;
pub use registry::HandlerRegistry;
pub use traits::{ClosureTask, Dispatch, Handler, HandlerResult, Task};
