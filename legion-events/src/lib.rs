//! 进程内事件分发库（legion-events）
//!
//! 提供以“类型 + 优先级”为中心的同步事件分发构件：
//! - 事件（`event`）：事件类型标识与父类型/能力声明，支持多态匹配
//! - 监听器（`listener`）：注册句柄、监听器快照与执行结果
//! - 注册表（`registry`）：优先级分桶、FIFO 稳定排序、一次性监听器、幂等删除
//! - 分发器（`dispatcher`）：按快照顺序同步调用监听器，失败即停止并原样返回错误
//! - 生命周期事件（`lifecycle`）：迁移、请求/响应等框架级事件载荷
//!
//! 典型用法：
//! 1. 为事件载荷实现 `Event`（或使用 `legion-events-macros` 提供的 `#[event]`）；
//! 2. 在 `ListenerRegistry` 上以 `add`/`once` 注册监听器，按需指定优先级；
//! 3. 通过 `EventDispatcher::dispatch` 发布事件并取回（可能被修改的）事件实例。
//!
//! ```rust
//! use legion_events::lifecycle::MigrationEvent;
//! use legion_events::{EventDispatcher, ListenerRegistry};
//!
//! let registry = ListenerRegistry::new();
//! registry.add_with_priority::<MigrationEvent, _>(|e| {
//!     println!("audit: {}", e.migration_name());
//!     Ok(())
//! }, 100);
//!
//! let dispatcher = EventDispatcher::new(registry);
//! dispatcher.dispatch(MigrationEvent::start("create_users")).unwrap();
//! ```
//!
pub mod dispatcher;
pub mod event;
pub mod lifecycle;
pub mod listener;
pub mod provider;
pub mod registry;

pub use dispatcher::EventDispatcher;
pub use event::{Event, EventType, Supertype};
pub use listener::{DEFAULT_PRIORITY, Listener, ListenerHandle, ListenerResult};
pub use provider::ListenerProvider;
pub use registry::ListenerRegistry;

// 允许在本 crate 内部通过 ::legion_events 进行自引用，
// 以便过程宏生成的代码在本 crate 的测试中也能解析到 ::legion_events 路径。
extern crate self as legion_events;
