/// 生命周期钩子示例
/// 展示迁移事件的一次性审计、请求/响应事件的能力监听，以及监听器改写响应
use anyhow::Result as AnyResult;
use legion_events::lifecycle::{
    MessageDirection, MessageEvent, MigrationEvent, MigrationStage, RequestEvent, ResponseEvent,
};
use legion_events::{EventDispatcher, ListenerRegistry};
use parking_lot::Mutex;
use std::sync::Arc;

// ============================================================================
// 示例载荷
// ============================================================================

#[derive(Debug, Clone)]
struct HttpRequest {
    path: String,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
}

fn main() -> AnyResult<()> {
    let registry = ListenerRegistry::new();
    let journal: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    // 审计只关心第一次迁移，优先级最高
    {
        let journal = journal.clone();
        registry.once_with_priority::<MigrationEvent, _>(
            move |e| {
                journal
                    .lock()
                    .push(format!("audit: first migration {}", e.migration_name()));
                Ok(())
            },
            100,
        );
    }

    // 指标监听器对每次迁移都生效
    {
        let journal = journal.clone();
        registry.add::<MigrationEvent, _>(move |e| {
            let stage = match e.stage() {
                MigrationStage::Start => "start",
                MigrationStage::Complete => "complete",
            };
            journal
                .lock()
                .push(format!("metrics: {} {stage}", e.migration_name()));
            Ok(())
        });
    }

    // 能力监听：所有请求/响应事件都会命中
    {
        let journal = journal.clone();
        registry.add_with_priority::<dyn MessageEvent, _>(
            move |e| {
                let arrow = match e.direction() {
                    MessageDirection::Inbound => "->",
                    MessageDirection::Outbound => "<-",
                };
                journal
                    .lock()
                    .push(format!("trace: {arrow} {}", e.message_type()));
                Ok(())
            },
            50,
        );
    }

    registry.add::<RequestEvent<HttpRequest>, _>(|e| {
        if !e.request.path.starts_with('/') {
            anyhow::bail!("malformed path: {}", e.request.path);
        }
        Ok(())
    });

    registry.add::<ResponseEvent<HttpResponse>, _>(|e| {
        e.response
            .headers
            .push(("x-served-by".to_string(), "legion".to_string()));
        Ok(())
    });

    let dispatcher = EventDispatcher::builder().provider(registry.clone()).build();

    for name in ["2024_01_create_users", "2024_02_add_email"] {
        dispatcher.dispatch(MigrationEvent::start(name))?;
        dispatcher.dispatch(MigrationEvent::complete(name))?;
    }

    dispatcher.dispatch(RequestEvent::new(HttpRequest {
        path: "/users".to_string(),
    }))?;

    let response = dispatcher
        .dispatch(ResponseEvent::new(HttpResponse {
            status: 200,
            headers: Vec::new(),
        }))?
        .into_inner();

    let rejected = dispatcher.dispatch(RequestEvent::new(HttpRequest {
        path: "users".to_string(),
    }));

    for line in journal.lock().iter() {
        println!("{line}");
    }
    println!(
        "response {} with headers {:?}",
        response.status, response.headers
    );
    if let Err(err) = rejected {
        println!("request rejected: {err}");
    }
    println!("listeners still registered: {}", registry.len());

    Ok(())
}
