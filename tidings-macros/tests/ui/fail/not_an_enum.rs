use tidings_macros::event_map;

#[event_map]
struct Click(u32);

fn main() {}
