use crate::event::{Event, Supertype};
use serde::{Deserialize, Serialize};
use std::any::type_name;

/// 消息方向
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

/// 能力：一条入站或出站消息已产生
pub trait MessageEvent {
    fn direction(&self) -> MessageDirection;

    /// 消息载荷的类型名
    fn message_type(&self) -> &'static str;
}

/// 入站请求事件，`R` 为请求类型（如 `http::Request<B>`）
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestEvent<R> {
    pub request: R,
}

impl<R> RequestEvent<R> {
    pub fn new(request: R) -> Self {
        Self { request }
    }

    pub fn into_inner(self) -> R {
        self.request
    }
}

impl<R: 'static> MessageEvent for RequestEvent<R> {
    fn direction(&self) -> MessageDirection {
        MessageDirection::Inbound
    }

    fn message_type(&self) -> &'static str {
        type_name::<R>()
    }
}

impl<R: 'static> Event for RequestEvent<R> {
    fn supertypes() -> Vec<Supertype<Self>> {
        vec![Supertype::of::<dyn MessageEvent>(|e| e)]
    }
}

/// 出站响应事件，`R` 为响应类型；监听器可以替换或修改其中的响应
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEvent<R> {
    pub response: R,
}

impl<R> ResponseEvent<R> {
    pub fn new(response: R) -> Self {
        Self { response }
    }

    pub fn into_inner(self) -> R {
        self.response
    }
}

impl<R: 'static> MessageEvent for ResponseEvent<R> {
    fn direction(&self) -> MessageDirection {
        MessageDirection::Outbound
    }

    fn message_type(&self) -> &'static str {
        type_name::<R>()
    }
}

impl<R: 'static> Event for ResponseEvent<R> {
    fn supertypes() -> Vec<Supertype<Self>> {
        vec![Supertype::of::<dyn MessageEvent>(|e| e)]
    }
}
