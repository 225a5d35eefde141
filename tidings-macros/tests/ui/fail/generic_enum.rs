use tidings_macros::event_map;

#[event_map]
enum Wrapper<T> {
    Item(T),
}

fn main() {}
