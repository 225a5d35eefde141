use tidings_macros::event_map;

#[event_map]
enum UiEvent {
    #[event(name = "a", name = "b")]
    Click(u32),
}

fn main() {}
