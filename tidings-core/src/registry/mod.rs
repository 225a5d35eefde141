//! 监听器注册表
//!
//! 按事件类型保存三档监听器桶：
//! - 以事件标记类型的 `TypeId` 为键，运行时以类型擦除（Any）方式保存各自载荷类型的桶；
//! - 通道与桶在首次注册时惰性创建，之后在发射器生命周期内保留；
//! - 发射前获取快照，锁不会在监听器执行期间持有，监听器内可以自由注册/取消注册。
//!
mod subscription;
mod tiers;

pub use subscription::Subscription;

use crate::event::{Event, EventKey};
use crate::listener::{ListenerFn, ListenerId, Slot};
use crate::priority::Priority;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tiers::Tiers;

/// 被移除的监听器实例（载荷类型已擦除）
type Removed = Arc<dyn Any + Send + Sync>;

/// 与载荷类型无关的桶操作
trait ErasedTiers: Send + Sync {
    fn len(&self) -> usize;
    fn remove(&mut self, priority: Priority, id: ListenerId) -> Option<Removed>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<P: Send + Sync + 'static> ErasedTiers for Tiers<P> {
    fn len(&self) -> usize {
        Tiers::len(self)
    }

    fn remove(&mut self, priority: Priority, id: ListenerId) -> Option<Removed> {
        Tiers::remove(self, priority, id).map(|slot| slot as Removed)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct Channel {
    key: EventKey,
    tiers: Box<dyn ErasedTiers>,
}

impl Channel {
    fn new<E: Event>() -> Self {
        Self {
            key: EventKey::of::<E>(),
            tiers: Box::new(Tiers::<E::Payload>::default()),
        }
    }

    // 通道以 TypeId::of::<E>() 为键创建，E 唯一决定载荷类型，向下转型不会失败
    fn typed<E: Event>(&self) -> &Tiers<E::Payload> {
        match self.tiers.as_any().downcast_ref() {
            Some(tiers) => tiers,
            None => unreachable!("channel `{}` holds another payload type", self.key),
        }
    }

    fn typed_mut<E: Event>(&mut self) -> &mut Tiers<E::Payload> {
        let key = self.key;
        match self.tiers.as_any_mut().downcast_mut() {
            Some(tiers) => tiers,
            None => unreachable!("channel `{key}` holds another payload type"),
        }
    }
}

#[derive(Default)]
pub(crate) struct Registry {
    channels: DashMap<TypeId, Channel>,
}

impl Registry {
    /// 追加监听器到 (E, priority) 桶末尾，返回订阅句柄与该事件当前监听器总数
    pub(crate) fn register<E: Event>(
        self: &Arc<Self>,
        priority: Priority,
        listener: ListenerFn<E::Payload>,
    ) -> (Subscription, usize) {
        let slot = Arc::new(Slot::new(priority, listener));
        let subscription = Subscription::new(
            slot.id,
            EventKey::of::<E>(),
            priority,
            slot.active.clone(),
            Arc::downgrade(self),
        );

        let mut channel = self
            .channels
            .entry(TypeId::of::<E>())
            .or_insert_with(Channel::new::<E>);
        let tiers = channel.typed_mut::<E>();
        tiers.push(slot);

        (subscription, tiers.len())
    }

    /// 移除单个监听器
    ///
    /// 被移除的实例在分片锁释放之后才丢弃：监听器捕获的值在析构时
    /// 可能再次调用 `off()` 并访问同一分片。
    pub(crate) fn remove(&self, key: EventKey, priority: Priority, id: ListenerId) -> bool {
        let removed = self
            .channels
            .get_mut(&key.type_id())
            .and_then(|mut channel| channel.tiers.remove(priority, id));
        removed.is_some()
    }

    /// 按分发顺序取得监听器快照
    pub(crate) fn snapshot<E: Event>(&self) -> Vec<Arc<Slot<E::Payload>>> {
        self.channels
            .get(&TypeId::of::<E>())
            .map(|channel| channel.typed::<E>().snapshot())
            .unwrap_or_default()
    }

    pub(crate) fn listeners_of<E: Event>(&self, priority: Priority) -> Vec<ListenerId> {
        self.channels
            .get(&TypeId::of::<E>())
            .map(|channel| {
                channel
                    .typed::<E>()
                    .bucket(priority)
                    .iter()
                    .map(|slot| slot.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn len_of(&self, key: EventKey) -> usize {
        self.channels
            .get(&key.type_id())
            .map_or(0, |channel| channel.tiers.len())
    }

    /// 至少有一个监听器的事件
    pub(crate) fn keys(&self) -> Vec<EventKey> {
        self.channels
            .iter()
            .filter(|entry| entry.tiers.len() > 0)
            .map(|entry| entry.key)
            .collect()
    }

    /// 移除某事件的全部监听器，同样在锁外丢弃被移除的实例
    pub(crate) fn clear<E: Event>(&self) -> usize {
        let removed = self
            .channels
            .get_mut(&TypeId::of::<E>())
            .map(|mut channel| channel.typed_mut::<E>().clear())
            .unwrap_or_default();
        removed.len()
    }
}
