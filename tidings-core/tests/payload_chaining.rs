use std::sync::{Arc, Mutex};
use tidings_core::{Emitted, Emitter, Event, Flow, Priority};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Position {
    x: i32,
    y: i32,
    z: i32,
}

struct Move;
impl Event for Move {
    const NAME: &'static str = "move";
    type Payload = Position;
}

struct Label;
impl Event for Label {
    const NAME: &'static str = "label";
    type Payload = String;
}

#[test]
fn replacement_reaches_later_listeners_and_the_result() {
    let emitter: Emitter = Emitter::new();
    let observed = Arc::new(Mutex::new(None));

    emitter.on::<Move, _>(|p| Ok(Flow::Replace(Position { y: 0, ..*p })));
    let o = observed.clone();
    emitter.on::<Move, _>(move |p| {
        *o.lock().unwrap() = Some(*p);
        Ok(Flow::Continue)
    });

    let out = emitter
        .emit_sync::<Move>(Position { x: 1, y: 2, z: 3 })
        .unwrap();
    let expected = Position { x: 1, y: 0, z: 3 };
    assert_eq!(*observed.lock().unwrap(), Some(expected));
    assert_eq!(out, Emitted::Completed(expected));
}

#[test]
fn last_replacement_wins() {
    let emitter: Emitter = Emitter::new();
    emitter.on_at::<Label, _>(Priority::After, |s| Ok(Flow::Replace(format!("{s}!"))));
    emitter.on_at::<Label, _>(Priority::Before, |s| Ok(Flow::Replace(s.to_uppercase())));
    emitter.on::<Label, _>(|_| Ok(Flow::Continue));
    emitter.on::<Label, _>(|s| Ok(Flow::Replace(format!("<{s}>"))));

    let out = emitter.emit_sync::<Label>("hi".into()).unwrap();
    assert_eq!(out.into_payload().as_deref(), Some("<HI>!"));
}

#[tokio::test]
async fn async_listeners_see_and_produce_replacements() {
    let emitter: Emitter = Emitter::new();
    emitter.on_at::<Label, _>(Priority::Before, |s| Ok(Flow::Replace(format!("{s}-sync"))));
    emitter.on_async::<Label, _, _>(|s: String| async move {
        tokio::task::yield_now().await;
        Ok(Flow::Replace(format!("{s}-async")))
    });
    emitter.on_async_at::<Label, _, _>(Priority::After, |s: String| async move {
        assert_eq!(s, "base-sync-async");
        Ok(Flow::Continue)
    });

    let out = emitter.emit::<Label>("base".into()).await.unwrap();
    assert_eq!(out, Emitted::Completed("base-sync-async".to_string()));
}

#[test]
fn cancellation_after_replacement_discards_payload() {
    let emitter: Emitter = Emitter::new();
    emitter.on::<Label, _>(|_| Ok(Flow::Replace("changed".into())));
    emitter.on::<Label, _>(|s| {
        assert_eq!(s, "changed");
        Ok(Flow::stop())
    });

    let out = emitter.emit_sync::<Label>("orig".into()).unwrap();
    assert_eq!(out.payload(), None);
    assert_eq!(out.cancellation().map(|c| c.reason()), Some(None));
}

#[test]
fn each_emission_owns_its_payload_chain() {
    let emitter: Emitter = Emitter::new();
    emitter.on::<Label, _>(|s| Ok(Flow::Replace(format!("{s}+"))));

    assert_eq!(emitter.emit_sync::<Label>("a".into()).unwrap().into_payload(), Some("a+".into()));
    assert_eq!(emitter.emit_sync::<Label>("b".into()).unwrap().into_payload(), Some("b+".into()));
}
