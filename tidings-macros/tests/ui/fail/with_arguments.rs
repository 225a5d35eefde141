use tidings_macros::event_map;

#[event_map(strict)]
enum UiEvent {
    Click(u32),
}

fn main() {}
