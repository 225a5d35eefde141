//! 一次性触发原语
//!
//! - `Latch`：保证某个监听器最多被"认领"一次，认领时立即注销绑定的订阅；
//! - `Handoff`：在 `Fn` 监听器内部安全地交出一次性值（`FnOnce` 闭包、oneshot 发送端）。
//!
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};
use tidings_core::Subscription;

#[derive(Default)]
pub(crate) struct Latch {
    fired: AtomicBool,
    subscription: OnceLock<Subscription>,
}

impl Latch {
    /// 首次调用返回 `true` 并注销订阅，此后恒为 `false`
    pub(crate) fn fire(&self) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        if let Some(sub) = self.subscription.get() {
            sub.off();
        }
        true
    }

    /// 绑定注册得到的订阅；注册与绑定之间已被触发时立即注销
    pub(crate) fn bind(&self, subscription: Subscription) {
        let subscription = self.subscription.get_or_init(|| subscription);
        if self.fired.load(Ordering::Acquire) {
            subscription.off();
        }
    }

    pub(crate) fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

pub(crate) struct Handoff<T> {
    value: Mutex<Option<T>>,
}

impl<T> Handoff<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value: Mutex::new(Some(value)),
        }
    }

    pub(crate) fn take(&self) -> Option<T> {
        match self.value.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}
