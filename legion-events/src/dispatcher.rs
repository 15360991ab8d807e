//! 事件分发器（EventDispatcher）
//!
//! 向提供者索取监听器快照，并按快照顺序逐个同步调用：
//! - 不重排、不过滤、不批量；
//! - 首个失败的监听器错误原样返回，其后的监听器不再调用（fail-fast），已发生的副作用不回滚；
//! - 没有匹配的监听器时原样返回事件。
//!
use crate::event::Event;
use crate::listener::ListenerResult;
use crate::provider::ListenerProvider;
use crate::registry::ListenerRegistry;
use bon::Builder;
use tracing::trace;

/// 同步事件分发器
#[derive(Builder, Clone, Debug)]
pub struct EventDispatcher<P> {
    provider: P,
}

impl<P: ListenerProvider> EventDispatcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// 分发事件并返回（可能已被监听器修改的）事件
    pub fn dispatch<E: Event>(&self, mut event: E) -> anyhow::Result<E> {
        self.dispatch_mut(&mut event)?;
        Ok(event)
    }

    /// 就地分发，适用于调用方需要保留事件所有权的场景
    pub fn dispatch_mut<E: Event>(&self, event: &mut E) -> ListenerResult {
        let listeners = self.provider.listeners_for(event);
        trace!(
            event = E::event_name(),
            listeners = listeners.len(),
            "dispatching event"
        );

        for listener in listeners {
            listener.call(event)?;
        }
        Ok(())
    }
}

impl Default for EventDispatcher<ListenerRegistry> {
    fn default() -> Self {
        Self::new(ListenerRegistry::new())
    }
}
