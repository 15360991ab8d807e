use legion_events_macros::event;

#[event]
struct Borrowed<'a> {
    name: &'a str,
}

fn main() {}
