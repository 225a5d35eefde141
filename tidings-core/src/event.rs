//! 事件类型与事件映射
//!
//! 每类事件由一个零大小的标记类型表示，标记类型在编译期绑定事件名与载荷类型。
//! 一个发射器可以通过事件映射 `M` 限定自己接受的事件集合：
//! - `EventOf<M>`：事件属于映射 `M`；
//! - `AnyEvent`：接受任意事件的开放映射；
//! - `EventMap`：由枚举表示的封闭映射（通常由 `#[event_map]` 生成），
//!   支持以枚举值整体发射。
//!
use crate::{emitter::Emitter, error::EmitError, flow::Emitted};
use futures_util::future::BoxFuture;
use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 事件类型：标记类型 + 事件名 + 载荷类型
pub trait Event: 'static {
    /// 事件名（用于日志与诊断）
    const NAME: &'static str;

    /// 事件载荷
    type Payload: Clone + Send + Sync + 'static;

    fn key() -> EventKey
    where
        Self: Sized,
    {
        EventKey::of::<Self>()
    }
}

/// 事件在映射 `M` 中的成员关系
pub trait EventOf<M>: Event {}

/// 开放映射：任何 `Event` 都是它的成员
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyEvent {}

impl<E: Event> EventOf<AnyEvent> for E {}

/// 事件类型的不透明标识（同一进程内稳定）
#[derive(Clone, Copy)]
pub struct EventKey {
    id: TypeId,
    name: &'static str,
}

impl EventKey {
    pub fn of<E: Event>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: E::NAME,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.id
    }
}

// 身份只由 TypeId 决定，事件名仅用于展示
impl PartialEq for EventKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventKey {}

impl Hash for EventKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventKey").field(&self.name).finish()
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 封闭事件映射：枚举的每个变体对应一个事件及其载荷
///
/// 一般不手写实现，使用 `tidings_macros::event_map` 生成。
pub trait EventMap: Sized + Send + 'static {
    /// 当前值对应的事件标识
    fn key(&self) -> EventKey;

    /// 同步发射当前值，最终载荷重新包装为枚举值
    fn emit_sync_on(self, emitter: &Emitter<Self>) -> Result<Emitted<Self>, EmitError>;

    /// 异步发射当前值，最终载荷重新包装为枚举值
    fn emit_on(self, emitter: &Emitter<Self>) -> BoxFuture<'_, Result<Emitted<Self>, EmitError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    struct Click;
    impl Event for Click {
        const NAME: &'static str = "click";
        type Payload = (i32, i32);
    }

    struct Key;
    impl Event for Key {
        const NAME: &'static str = "click";
        type Payload = char;
    }

    #[test]
    fn keys_compare_by_marker_identity() {
        assert_eq!(Click::key(), EventKey::of::<Click>());
        // 事件名相同但标记类型不同，视为不同事件
        assert_ne!(Click::key(), Key::key());

        let set: BTreeSet<EventKey> = [Click::key(), Key::key(), Click::key()].into();
        assert_eq!(set.len(), 2);
        assert_eq!(Click::key().to_string(), "click");
        assert_eq!(format!("{:?}", Key::key()), "EventKey(\"click\")");
    }
}
