use tidings_macros::event_map;

#[event_map]
enum UiEvent {
    #[event(title = "click")]
    Click(u32),
}

fn main() {}
