use tidings_macros::event_map;

#[event_map]
enum UiEvent {
    Click { x: i32 },
}

fn main() {}
