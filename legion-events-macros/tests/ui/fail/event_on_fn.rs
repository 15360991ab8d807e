use legion_events_macros::event;

#[event]
fn handler() {}

fn main() {}
