use tidings_core::{Emitted, Emitter, Event, Flow};
use tidings_macros::event_map;

#[event_map]
#[derive(Debug, PartialEq)]
enum Lifecycle {
    #[event(name = "ready")]
    Ready,
    Shutdown,
}

fn main() {
    assert_eq!(Ready::NAME, "ready");
    assert_eq!(Shutdown::NAME, "Lifecycle.Shutdown");

    let emitter: Emitter<Lifecycle> = Emitter::new();
    emitter.on::<Ready, _>(|()| Ok(Flow::Continue));

    assert_eq!(
        emitter.dispatch_sync(Lifecycle::Ready).unwrap(),
        Emitted::Completed(Lifecycle::Ready)
    );
    assert_eq!(
        emitter.emit_sync::<Shutdown>(()).unwrap(),
        Emitted::Completed(())
    );
}
