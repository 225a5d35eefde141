use tidings_macros::event_map;

#[event_map]
enum UiEvent {
    Move(i32, i32),
}

fn main() {}
