use tidings_macros::event_map;

#[event_map]
enum EditorEvent {
    #[event(name = "open", marker = crate::Open)]
    Open(String),
}

fn main() {}
