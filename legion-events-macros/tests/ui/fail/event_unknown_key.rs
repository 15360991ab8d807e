use legion_events_macros::event;

#[event(topic = "orders")]
struct Placed;

fn main() {}
