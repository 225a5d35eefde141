use super::Registry;
use crate::event::EventKey;
use crate::listener::ListenerId;
use crate::priority::Priority;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// 订阅句柄：绑定到某一个已注册的监听器实例
///
/// - `off()` 只移除这一个实例，可重复调用；
/// - 可以在监听器内部调用，包括正在遍历该桶的那次发射；
/// - 只持有注册表的弱引用，发射器销毁后句柄自然失效。
#[derive(Clone)]
pub struct Subscription {
    id: ListenerId,
    key: EventKey,
    priority: Priority,
    active: Arc<AtomicBool>,
    registry: Weak<Registry>,
}

impl Subscription {
    pub(crate) fn new(
        id: ListenerId,
        key: EventKey,
        priority: Priority,
        active: Arc<AtomicBool>,
        registry: Weak<Registry>,
    ) -> Self {
        Self {
            id,
            key,
            priority,
            active,
            registry,
        }
    }

    /// 移除绑定的监听器；仅真正完成移除的那次调用返回 `true`
    pub fn off(&self) -> bool {
        if !self.active.swap(false, Ordering::AcqRel) {
            return false;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.key, self.priority, self.id);
        }
        tracing::debug!(event = self.key.name(), priority = %self.priority, listener = %self.id, "listener removed");
        true
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire) && self.registry.strong_count() > 0
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn event(&self) -> EventKey {
        self.key
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("event", &self.key.name())
            .field("priority", &self.priority)
            .field("active", &self.is_active())
            .finish()
    }
}
