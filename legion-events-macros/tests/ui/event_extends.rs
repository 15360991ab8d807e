use legion_events::{Event, EventType};
use legion_events_macros::event;

trait Lifecycle {
    fn stage(&self) -> &'static str;
}

trait Audited {}

#[event(extends(dyn Lifecycle, dyn Audited), name = "job.finished")]
struct Finished;

impl Lifecycle for Finished {
    fn stage(&self) -> &'static str {
        "finished"
    }
}

impl Audited for Finished {}

fn main() {
    let supertypes = Finished::supertypes();
    assert_eq!(supertypes.len(), 2);
    assert_eq!(supertypes[0].event_type(), EventType::of::<dyn Lifecycle>());
    assert_eq!(supertypes[1].event_type(), EventType::of::<dyn Audited>());
    assert_eq!(Finished::event_name(), "job.finished");
}
