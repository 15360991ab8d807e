use legion_events::{Event, EventDispatcher, ListenerRegistry};
use legion_events_macros::event;

trait Envelope {
    fn topic(&self) -> &str;
}

#[event(extends(dyn Envelope))]
struct Published<T>
where
    T: Clone,
{
    topic: String,
    payload: T,
}

impl<T: Clone + 'static> Envelope for Published<T> {
    fn topic(&self) -> &str {
        &self.topic
    }
}

fn main() {
    assert_eq!(Published::<u8>::supertypes().len(), 1);

    let registry = ListenerRegistry::new();
    registry.add::<dyn Envelope, _>(|e| {
        assert_eq!(e.topic(), "orders");
        Ok(())
    });
    let out = EventDispatcher::new(registry)
        .dispatch(Published {
            topic: "orders".to_string(),
            payload: vec![1_u32, 2, 3],
        })
        .unwrap();
    assert_eq!(out.payload.len(), 3);
}
