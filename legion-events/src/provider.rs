//! 监听器提供者（ListenerProvider）协议
//!
//! 分发器只依赖该协议获取“某个事件实例应当触发的、已排好序的监听器”，
//! 不关心注册方式与存储结构。默认实现见 [`ListenerRegistry`](crate::registry::ListenerRegistry)。
//!
use crate::event::Event;
use crate::listener::Listener;

/// 监听器提供者：为事件实例给出按触发顺序排列的监听器快照
///
/// 该 trait 带有泛型方法，通常以具体实现类型注入使用。
pub trait ListenerProvider: Send + Sync {
    fn listeners_for<E: Event>(&self, event: &E) -> Vec<Listener<E>>;
}

impl<P: ListenerProvider> ListenerProvider for &P {
    fn listeners_for<E: Event>(&self, event: &E) -> Vec<Listener<E>> {
        (**self).listeners_for(event)
    }
}

impl<P: ListenerProvider> ListenerProvider for std::sync::Arc<P> {
    fn listeners_for<E: Event>(&self, event: &E) -> Vec<Listener<E>> {
        (**self).listeners_for(event)
    }
}
