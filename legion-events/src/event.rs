//! 事件类型与多态匹配（Event / EventType / Supertype）
//!
//! 事件载荷本身只是普通数据，注册表只需要它的类型身份：
//! - `EventType`：注册/匹配所用的键，可以是具体事件类型，也可以是 `dyn Trait` 能力；
//! - `Event`：可被分发的事件，通过 `supertypes` 声明自己满足的父类型/能力；
//! - `Supertype`：一条“事件 → 能力”的转换，由编译器检查 `E: Trait` 的成立。
//!
//! 匹配关系：具体类型为 `E` 的事件命中注册类型 `T`，当且仅当 `T == E`，
//! 或 `T` 出现在 `E::supertypes()` 中。以 `Supertype::extends` 声明的父事件会带上
//! 它自己的全部祖先，因此继承链上任意一层的监听器都会被命中。
//!
use crate::listener::{Callback, ErasedCallback};
use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 事件类型标识：`TypeId` 决定相等与哈希，类型名仅用于日志与调试
#[derive(Clone, Copy)]
pub struct EventType {
    id: TypeId,
    name: &'static str,
}

impl EventType {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventType").field(&self.name).finish()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 可分发的事件
///
/// 典型用法：
/// ```rust
/// use legion_events::{Event, Supertype};
///
/// trait Audited {
///     fn actor(&self) -> &str;
/// }
///
/// struct UserCreated {
///     actor: String,
/// }
///
/// impl Audited for UserCreated {
///     fn actor(&self) -> &str {
///         &self.actor
///     }
/// }
///
/// impl Event for UserCreated {
///     fn supertypes() -> Vec<Supertype<Self>> {
///         vec![Supertype::of::<dyn Audited>(|e| e)]
///     }
/// }
/// ```
pub trait Event: Sized + 'static {
    /// 事件名称（用于日志），默认为类型名
    fn event_name() -> &'static str {
        type_name::<Self>()
    }

    /// 该事件声明满足的父类型/能力，按声明顺序参与匹配
    fn supertypes() -> Vec<Supertype<Self>> {
        Vec::new()
    }
}

type Adapter<E> = Box<dyn Fn(&ErasedCallback) -> Option<Callback<E>> + Send + Sync>;

/// 事件 `E` 的一个父类型/能力
///
/// 持有该能力的 `EventType`，以及把注册在该能力上的回调适配为 `&mut E` 回调的转换。
pub struct Supertype<E> {
    event_type: EventType,
    adapt: Adapter<E>,
}

impl<E: Event> Supertype<E> {
    /// 声明 `E` 满足 `T`，`upcast` 通常写作 `|e| e`，由编译器完成到 `&mut T` 的转换
    pub fn of<T>(upcast: fn(&mut E) -> &mut T) -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            event_type: EventType::of::<T>(),
            adapt: Box::new(move |erased| {
                let inner = erased.downcast::<T>()?;
                let adapted: Callback<E> = Arc::new(move |event: &mut E| inner(upcast(event)));
                Some(adapted)
            }),
        }
    }

    /// 声明 `E` 继承父事件 `P`：`P` 本身以及 `P::supertypes()` 中的全部祖先都成为 `E` 的父类型
    ///
    /// `project` 从子事件中取出父事件，如 `|e| &mut e.parent`。
    /// 返回顺序为 `P` 在前，随后是 `P` 的祖先（按 `P` 的声明顺序）。
    pub fn extends<P: Event>(project: fn(&mut E) -> &mut P) -> Vec<Self> {
        let mut chain = vec![Self::of::<P>(project)];
        chain.extend(
            P::supertypes()
                .into_iter()
                .map(|ancestor| ancestor.lift(project)),
        );
        chain
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub(crate) fn adapt(&self, erased: &ErasedCallback) -> Option<Callback<E>> {
        (self.adapt)(erased)
    }

    // 把 `E` 的父类型转换为子事件 `C` 的父类型：先经 `project` 取出 `E`，再沿用原适配
    fn lift<C: Event>(self, project: fn(&mut C) -> &mut E) -> Supertype<C> {
        let Self { event_type, adapt } = self;
        Supertype {
            event_type,
            adapt: Box::new(move |erased| {
                let inner = adapt(erased)?;
                let lifted: Callback<C> = Arc::new(move |event: &mut C| inner(project(event)));
                Some(lifted)
            }),
        }
    }
}

impl<E> fmt::Debug for Supertype<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supertype")
            .field("event_type", &self.event_type)
            .finish_non_exhaustive()
    }
}
