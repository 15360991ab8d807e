use legion_events_macros::event;

#[event(name = "")]
struct Placed;

fn main() {}
