use tidings_core::{Emitter, Event, EventMap};
use tidings_macros::event_map;

mod base {
    use tidings_macros::event_map;

    #[event_map]
    pub enum BaseEvent {
        #[event(name = "open")]
        Open(String),
    }
}

// 新的映射复用已有标记类型，并增加自己的事件
#[event_map]
enum EditorEvent {
    #[event(marker = base::Open)]
    Open(String),
    #[event(name = "save")]
    Save(u32),
}

fn accepts_open<M>(emitter: &Emitter<M>)
where
    base::Open: tidings_core::EventOf<M>,
{
    emitter.emit_sync::<base::Open>("doc.txt".to_string()).unwrap();
}

fn main() {
    let editor: Emitter<EditorEvent> = Emitter::new();
    let base: Emitter<base::BaseEvent> = Emitter::new();
    accepts_open(&editor);
    accepts_open(&base);

    assert_eq!(EditorEvent::Open(String::new()).key(), base::Open::key());
    assert_eq!(Save::NAME, "save");
}
