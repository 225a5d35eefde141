use tidings_macros::event_map;

#[event_map]
enum Lifecycle {
    Ready = 1,
}

fn main() {}
