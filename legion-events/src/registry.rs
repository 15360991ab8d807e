//! 监听器注册表（ListenerRegistry）
//!
//! 按“事件类型 → 优先级 → 队列”存放监听器，并维护“句柄 → (事件类型, 优先级)”索引以便 O(1) 定位删除：
//! - `add`/`once`：追加到 (类型, 优先级) 队列尾部，返回唯一句柄；
//! - `remove`：幂等删除，未知/过期句柄静默忽略，并清理空队列与空类型条目；
//! - `clear`：清空全部注册（测试隔离、全局重置）；
//! - `resolve`：为事件实例生成一次性快照，高优先级在前，同优先级按注册顺序（FIFO）。
//!
//! 所有状态由一把 `parking_lot::RwLock` 保护，调用监听器时从不持锁，
//! 因此监听器内部可以安全地 `add`/`remove`/再次分发。
//!
use crate::event::{Event, EventType};
use crate::listener::{
    Callback, DEFAULT_PRIORITY, ErasedCallback, Listener, ListenerHandle, ListenerResult,
};
use crate::provider::ListenerProvider;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

struct Entry {
    handle: ListenerHandle,
    callback: ErasedCallback,
}

type Buckets = BTreeMap<i32, Vec<Entry>>;

#[derive(Default)]
struct RegistryState {
    // event => prio => queue
    map: HashMap<EventType, Buckets>,
    index: HashMap<ListenerHandle, (EventType, i32)>,
    last_handle: u64,
}

impl RegistryState {
    fn allocate(&mut self) -> ListenerHandle {
        self.last_handle += 1;
        ListenerHandle::new(self.last_handle)
    }

    fn insert(
        &mut self,
        event_type: EventType,
        priority: i32,
        handle: ListenerHandle,
        callback: ErasedCallback,
    ) {
        self.map
            .entry(event_type)
            .or_default()
            .entry(priority)
            .or_default()
            .push(Entry { handle, callback });
        self.index.insert(handle, (event_type, priority));
    }

    fn remove(&mut self, handle: ListenerHandle) -> Option<(EventType, Entry)> {
        let (event_type, priority) = self.index.remove(&handle)?;
        let buckets = self.map.get_mut(&event_type)?;
        let queue = buckets.get_mut(&priority)?;
        let position = queue.iter().position(|entry| entry.handle == handle)?;
        let entry = queue.remove(position);

        if queue.is_empty() {
            buckets.remove(&priority);
        }
        if buckets.is_empty() {
            self.map.remove(&event_type);
        }

        Some((event_type, entry))
    }
}

/// 监听器注册表
///
/// 克隆开销很小，所有克隆共享同一份注册状态，可作为进程级单例使用。
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以默认优先级注册监听器
    ///
    /// `T` 可以是具体事件类型，也可以是事件声明满足的能力（如 `dyn MessageEvent`）。
    pub fn add<T, F>(&self, listener: F) -> ListenerHandle
    where
        T: ?Sized + 'static,
        F: Fn(&mut T) -> ListenerResult + Send + Sync + 'static,
    {
        self.add_with_priority::<T, F>(listener, DEFAULT_PRIORITY)
    }

    /// 以指定优先级注册监听器（数值越大越先触发，可为负数）
    ///
    /// 重复注册同一监听器是合法的：每次注册都会独立触发，并拥有自己的句柄。
    pub fn add_with_priority<T, F>(&self, listener: F, priority: i32) -> ListenerHandle
    where
        T: ?Sized + 'static,
        F: Fn(&mut T) -> ListenerResult + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(listener);
        self.register::<T>(priority, false, move |_| callback)
    }

    /// 以默认优先级注册一次性监听器
    pub fn once<T, F>(&self, listener: F) -> ListenerHandle
    where
        T: ?Sized + 'static,
        F: Fn(&mut T) -> ListenerResult + Send + Sync + 'static,
    {
        self.once_with_priority::<T, F>(listener, DEFAULT_PRIORITY)
    }

    /// 注册一次性监听器：首次触发时先删除自身注册，再调用被包装的监听器
    ///
    /// 返回的句柄标识包装器；在首次触发前 `remove` 该句柄即可取消。
    /// 即使同一快照被重入分发或并发分发多次命中，被包装的监听器也至多执行一次。
    pub fn once_with_priority<T, F>(&self, listener: F, priority: i32) -> ListenerHandle
    where
        T: ?Sized + 'static,
        F: Fn(&mut T) -> ListenerResult + Send + Sync + 'static,
    {
        let registry = Arc::downgrade(&self.state);

        // 先分配句柄，再以该句柄构造包装器，避免闭包引用自身尚未确定的句柄
        self.register::<T>(priority, true, move |handle| {
            let fired = AtomicBool::new(false);
            let adapter: Callback<T> = Arc::new(move |event: &mut T| {
                if fired.swap(true, Ordering::AcqRel) {
                    return Ok(());
                }
                if let Some(state) = registry.upgrade() {
                    // 写锁随语句结束释放，被移除的条目在锁外析构
                    let _removed = state.write().remove(handle);
                }
                trace!(%handle, "one-shot listener fired");
                listener(event)
            });
            adapter
        })
    }

    fn register<T>(
        &self,
        priority: i32,
        once: bool,
        build: impl FnOnce(ListenerHandle) -> Callback<T>,
    ) -> ListenerHandle
    where
        T: ?Sized + 'static,
    {
        let event_type = EventType::of::<T>();

        // 句柄在写锁内分配，保证句柄顺序与入队顺序一致
        let handle = {
            let mut state = self.state.write();
            let handle = state.allocate();
            state.insert(event_type, priority, handle, ErasedCallback::new(build(handle)));
            handle
        };

        debug!(
            event = event_type.name(),
            %handle,
            priority,
            once,
            "listener registered"
        );
        handle
    }

    /// 删除一次注册；未知或已删除的句柄静默忽略
    pub fn remove(&self, handle: ListenerHandle) {
        let removed = self.state.write().remove(handle);

        // 在锁外释放回调，避免其捕获值的析构逻辑回调注册表
        if let Some((event_type, entry)) = removed {
            drop(entry);
            debug!(event = event_type.name(), %handle, "listener removed");
        }
    }

    /// 清空全部注册与句柄索引；此前发出的句柄全部失效，且不会被再次分配
    pub fn clear(&self) {
        let (map, index) = {
            let mut state = self.state.write();
            (
                std::mem::take(&mut state.map),
                std::mem::take(&mut state.index),
            )
        };

        debug!(discarded = index.len(), "listener registry cleared");
        drop(map);
    }

    /// 解析事件实例应触发的监听器（按触发顺序）
    ///
    /// - 命中：注册在 `E` 本身，或注册在 `E::supertypes()` 中任一类型（含父事件的祖先）上的监听器；
    /// - 排序：按优先级降序分组，组内按注册先后（FIFO），跨类型合并同样按注册先后；
    /// - 快照：每次调用重新计算，返回后与注册表解耦，不修改注册表状态。
    pub fn resolve<E: Event>(&self, _event: &E) -> Vec<Listener<E>> {
        let exact = EventType::of::<E>();
        let supertypes = E::supertypes();
        let mut groups: BTreeMap<Reverse<i32>, Vec<Listener<E>>> = BTreeMap::new();

        {
            let state = self.state.read();

            if let Some(buckets) = state.map.get(&exact) {
                collect_into(&mut groups, buckets, |callback| callback.downcast::<E>());
            }

            let mut seen = HashSet::from([exact]);
            for supertype in &supertypes {
                let event_type = supertype.event_type();
                if !seen.insert(event_type) {
                    continue;
                }
                if let Some(buckets) = state.map.get(&event_type) {
                    collect_into(&mut groups, buckets, |callback| supertype.adapt(callback));
                }
            }
        }

        let listeners: Vec<Listener<E>> = groups
            .into_values()
            .flat_map(|mut group| {
                group.sort_by_key(|listener| listener.handle());
                group
            })
            .collect();

        trace!(
            event = E::event_name(),
            listeners = listeners.len(),
            "listeners resolved"
        );
        listeners
    }

    /// 是否存在会被 `E` 类型事件触发的监听器
    pub fn has_listeners<E: Event>(&self) -> bool {
        let supertypes = E::supertypes();
        let state = self.state.read();

        state.map.contains_key(&EventType::of::<E>())
            || supertypes
                .iter()
                .any(|supertype| state.map.contains_key(&supertype.event_type()))
    }

    /// 句柄是否仍处于注册状态
    pub fn contains(&self, handle: ListenerHandle) -> bool {
        self.state.read().index.contains_key(&handle)
    }

    /// 当前注册总数（含尚未触发的一次性监听器）
    pub fn len(&self) -> usize {
        self.state.read().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn collect_into<E>(
    groups: &mut BTreeMap<Reverse<i32>, Vec<Listener<E>>>,
    buckets: &Buckets,
    adapt: impl Fn(&ErasedCallback) -> Option<Callback<E>>,
) {
    for (&priority, queue) in buckets {
        let group = groups.entry(Reverse(priority)).or_default();
        group.extend(queue.iter().filter_map(|entry| {
            adapt(&entry.callback).map(|callback| Listener::new(entry.handle, priority, callback))
        }));
    }
}

impl ListenerProvider for ListenerRegistry {
    fn listeners_for<E: Event>(&self, event: &E) -> Vec<Listener<E>> {
        self.resolve(event)
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        let event_types: Vec<&'static str> = state.map.keys().map(EventType::name).collect();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &state.index.len())
            .field("event_types", &event_types)
            .finish()
    }
}
