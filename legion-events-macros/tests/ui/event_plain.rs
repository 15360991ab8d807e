use legion_events::Event;
use legion_events_macros::event;

#[event]
#[derive(Debug, Clone, PartialEq)]
struct Started {
    job: String,
}

fn main() {
    assert!(Started::supertypes().is_empty());
    assert!(Started::event_name().ends_with("Started"));
    let _ = Started { job: "sync".into() };
}
