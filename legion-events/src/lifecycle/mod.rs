//! 框架生命周期事件
//!
//! 框架在关键节点发布的事件载荷：
//! - `MigrationEvent`：迁移开始/完成；
//! - `RequestEvent`/`ResponseEvent`：入站请求与出站响应，共同满足 `MessageEvent` 能力，
//!   注册在 `dyn MessageEvent` 上的监听器对两者都会触发。

mod message;
mod migration;

pub use message::{MessageDirection, MessageEvent, RequestEvent, ResponseEvent};
pub use migration::{MigrationEvent, MigrationStage};
