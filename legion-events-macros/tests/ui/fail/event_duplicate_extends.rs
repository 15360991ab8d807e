use legion_events_macros::event;

#[event(extends(dyn std::fmt::Debug, dyn std::fmt::Debug))]
struct Placed;

fn main() {}
