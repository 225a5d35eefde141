use tidings_core::{Emitted, Emitter, Event, EventMap, Flow, Priority};
use tidings_macros::event_map;

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct ClickAt {
    x: i32,
    y: i32,
}

#[event_map]
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    #[event(name = "click")]
    Click(ClickAt),
    /// 三维位移
    Move((i32, i32, i32)),
}

fn main() {
    assert_eq!(Click::NAME, "click");
    assert_eq!(Move::NAME, "UiEvent.Move");

    let emitter: Emitter<UiEvent> = Emitter::new();
    emitter.on_at::<Move, _>(Priority::Before, |&(x, _, z)| Ok(Flow::Replace((x, 0, z))));
    emitter.on::<Click, _>(|_| Ok(Flow::cancel("blocked")));

    let moved = emitter.dispatch_sync(UiEvent::Move((1, 2, 3))).unwrap();
    assert_eq!(moved, Emitted::Completed(UiEvent::Move((1, 0, 3))));

    let click = UiEvent::Click(ClickAt { x: 4, y: 5 });
    assert_eq!(click.key(), Click::key());
    let clicked = emitter.dispatch_sync(click).unwrap();
    assert_eq!(clicked.cancellation().and_then(|c| c.reason()), Some("blocked"));
}
