use legion_events::Event;
use legion_events_macros::event;
use serde::{Deserialize, Serialize};

trait Connection {}

#[event(name = "connection", extends(dyn Connection,))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum ConnectionEvent {
    Opened { peer: String },
    Closed { peer: String, reason: Option<String> },
}

impl Connection for ConnectionEvent {}

fn main() {
    assert_eq!(ConnectionEvent::event_name(), "connection");
    assert_eq!(ConnectionEvent::supertypes().len(), 1);
    let _ = ConnectionEvent::Opened { peer: "a".into() };
    let _ = ConnectionEvent::Closed { peer: "a".into(), reason: None };
}
