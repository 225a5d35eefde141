use std::sync::{Arc, Mutex, OnceLock};
use tidings_core::{Emitter, Event, Flow, Priority, Subscription};

struct Ping;
impl Event for Ping {
    const NAME: &'static str = "ping";
    type Payload = u8;
}

type Seen = Arc<Mutex<Vec<&'static str>>>;

fn tagged(emitter: &Emitter, seen: &Seen, priority: Priority, tag: &'static str) -> Subscription {
    let seen = seen.clone();
    emitter.on_at::<Ping, _>(priority, move |_| {
        seen.lock().unwrap().push(tag);
        Ok(Flow::Continue)
    })
}

fn drain(seen: &Seen) -> Vec<&'static str> {
    std::mem::take(&mut *seen.lock().unwrap())
}

#[test]
fn off_removes_exactly_one_registration() {
    let emitter: Emitter = Emitter::new();
    let seen = Seen::default();

    let shared = {
        let seen = seen.clone();
        move |_: &u8| {
            seen.lock().unwrap().push("shared");
            Ok(Flow::Continue)
        }
    };
    // 同一个闭包注册两次，得到两个独立实例
    let first = emitter.on::<Ping, _>(shared.clone());
    let second = emitter.on::<Ping, _>(shared);
    assert_ne!(first.id(), second.id());

    assert!(first.off());
    assert!(!first.off(), "second off is a no-op");
    assert!(!first.is_active());
    assert!(second.is_active());

    emitter.emit_sync::<Ping>(0).unwrap();
    assert_eq!(drain(&seen), vec!["shared"]);
    assert_eq!(emitter.listener_count::<Ping>(), 1);
}

#[test]
fn removing_a_later_listener_mid_emission_skips_it() {
    let emitter: Emitter = Emitter::new();
    let seen = Seen::default();
    let victim: Arc<OnceLock<Subscription>> = Arc::default();

    let s = seen.clone();
    let v = victim.clone();
    emitter.on_at::<Ping, _>(Priority::Before, move |_| {
        s.lock().unwrap().push("remover");
        if let Some(sub) = v.get() {
            sub.off();
        }
        Ok(Flow::Continue)
    });
    victim
        .set(tagged(&emitter, &seen, Priority::After, "victim"))
        .unwrap();
    tagged(&emitter, &seen, Priority::After, "bystander");

    emitter.emit_sync::<Ping>(0).unwrap();
    assert_eq!(drain(&seen), vec!["remover", "bystander"]);

    emitter.emit_sync::<Ping>(0).unwrap();
    assert_eq!(drain(&seen), vec!["remover", "bystander"]);
}

#[tokio::test]
async fn listener_can_remove_itself() {
    let emitter: Emitter = Emitter::new();
    let calls = Arc::new(Mutex::new(0));
    let own: Arc<OnceLock<Subscription>> = Arc::default();

    let c = calls.clone();
    let o = own.clone();
    let sub = emitter.on_async::<Ping, _, _>(move |_| {
        let c = c.clone();
        let o = o.clone();
        async move {
            *c.lock().unwrap() += 1;
            if let Some(me) = o.get() {
                me.off();
            }
            Ok(Flow::Continue)
        }
    });
    own.set(sub.clone()).unwrap();

    emitter.emit::<Ping>(1).await.unwrap();
    emitter.emit::<Ping>(2).await.unwrap();
    assert_eq!(*calls.lock().unwrap(), 1);
    assert!(!sub.is_active());
    assert_eq!(emitter.listener_count::<Ping>(), 0);
}

#[test]
fn listeners_added_mid_emission_wait_for_the_next_one() {
    let emitter: Emitter = Emitter::new();
    let seen = Seen::default();

    let e = emitter.clone();
    let s = seen.clone();
    let added = Arc::new(OnceLock::new());
    let a = added.clone();
    emitter.on::<Ping, _>(move |_| {
        s.lock().unwrap().push("registrar");
        if a.get().is_none() {
            let _ = a.set(tagged(&e, &s, Priority::After, "late"));
        }
        Ok(Flow::Continue)
    });

    emitter.emit_sync::<Ping>(0).unwrap();
    assert_eq!(drain(&seen), vec!["registrar"]);

    emitter.emit_sync::<Ping>(0).unwrap();
    assert_eq!(drain(&seen), vec!["registrar", "late"]);
}

#[test]
fn handles_outlive_the_emitter_harmlessly() {
    let emitter: Emitter = Emitter::new();
    let seen = Seen::default();
    let sub = tagged(&emitter, &seen, Priority::Normal, "x");
    assert!(sub.is_active());
    assert_eq!(sub.event().name(), "ping");
    assert_eq!(sub.priority(), Priority::Normal);

    drop(emitter);
    assert!(!sub.is_active());
    sub.off();
    assert!(!sub.off());
}

#[test]
fn clear_invalidates_outstanding_handles() {
    let emitter: Emitter = Emitter::new();
    let seen = Seen::default();
    let subs: Vec<_> = [Priority::Before, Priority::Normal, Priority::After]
        .into_iter()
        .map(|p| tagged(&emitter, &seen, p, "any"))
        .collect();

    assert_eq!(emitter.clear::<Ping>(), 3);
    assert!(subs.iter().all(|s| !s.is_active()));
    assert!(subs.iter().all(|s| !s.off()));
    assert!(emitter.event_names().is_empty());
}
