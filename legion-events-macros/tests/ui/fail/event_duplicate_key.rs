use legion_events_macros::event;

#[event(name = "a", name = "b")]
struct Placed;

fn main() {}
