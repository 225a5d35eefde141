use tidings_macros::event_map;

#[event_map]
enum Nothing {}

fn main() {}
