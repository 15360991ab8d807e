//! 监听器（Listener）与注册句柄（ListenerHandle）
//!
//! 监听器对注册表而言是不透明的：注册表只关心其身份（句柄）与注册元信息（优先级），
//! 从不检查其行为。监听器返回 `anyhow::Result<()>`，失败由调用方自行处理。
//!
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 监听器执行结果
pub type ListenerResult = anyhow::Result<()>;

/// 未显式指定时使用的优先级
pub const DEFAULT_PRIORITY: i32 = 0;

/// 某一注册类型 `T`（具体事件或 `dyn Trait` 能力）上的回调
pub(crate) type Callback<T> = Arc<dyn Fn(&mut T) -> ListenerResult + Send + Sync>;

/// 注册句柄：由注册表单调递增分配，用于 `remove`
///
/// 句柄只与一次注册绑定，与闭包的值/地址无关；同一闭包注册两次会得到两个不同句柄。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 类型擦除后的回调，按注册类型存放于同一张表中
#[derive(Clone)]
pub(crate) struct ErasedCallback(Arc<dyn Any + Send + Sync>);

impl ErasedCallback {
    pub(crate) fn new<T: ?Sized + 'static>(callback: Callback<T>) -> Self {
        Self(Arc::new(callback))
    }

    /// 还原为注册类型 `T` 上的回调；键与闭包由同一泛型 `T` 生成，正常情况下不会失败
    pub(crate) fn downcast<T: ?Sized + 'static>(&self) -> Option<Callback<T>> {
        self.0.downcast_ref::<Callback<T>>().cloned()
    }
}

/// 针对具体事件 `E` 解析出的监听器
///
/// 由 [`ListenerRegistry::resolve`](crate::registry::ListenerRegistry::resolve) 产生，
/// 已适配为直接接收 `&mut E`（无论其注册在 `E` 本身还是 `E` 的某个父类型上）。
pub struct Listener<E> {
    handle: ListenerHandle,
    priority: i32,
    callback: Callback<E>,
}

impl<E> Listener<E> {
    pub(crate) fn new(handle: ListenerHandle, priority: i32, callback: Callback<E>) -> Self {
        Self {
            handle,
            priority,
            callback,
        }
    }

    pub fn handle(&self) -> ListenerHandle {
        self.handle
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// 调用监听器
    pub fn call(&self, event: &mut E) -> ListenerResult {
        (self.callback)(event)
    }
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            priority: self.priority,
            callback: self.callback.clone(),
        }
    }
}

impl<E> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("handle", &self.handle)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
