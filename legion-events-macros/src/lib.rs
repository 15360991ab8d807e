use proc_macro::TokenStream;

mod event;

/// 事件宏
/// - 适用于 struct / enum，原样保留条目，并实现 `::legion_events::Event`
/// - `#[event(extends(dyn A, dyn B))]`：声明事件满足的父类型/能力，按声明顺序参与匹配
/// - `#[event(name = "...")]`：覆写 `Event::event_name`（默认为类型名）
/// - 泛型参数自动追加 `'static` 约束；不支持生命周期参数
///
/// ```rust
/// use legion_events_macros::event;
///
/// trait Audited {}
///
/// #[event(extends(dyn Audited), name = "user.created")]
/// struct UserCreated {
///     id: u64,
/// }
///
/// impl Audited for UserCreated {}
/// ```
#[proc_macro_attribute]
pub fn event(attr: TokenStream, item: TokenStream) -> TokenStream {
    event::expand(attr, item)
}
