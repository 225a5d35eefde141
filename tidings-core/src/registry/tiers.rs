use crate::listener::{ListenerId, Slot};
use crate::priority::Priority;
use std::sync::Arc;

/// 单个事件类型的三档监听器桶
pub(crate) struct Tiers<P> {
    buckets: [Vec<Arc<Slot<P>>>; 3],
}

impl<P> Default for Tiers<P> {
    fn default() -> Self {
        Self {
            buckets: [Vec::new(), Vec::new(), Vec::new()],
        }
    }
}

impl<P> Tiers<P> {
    pub(crate) fn push(&mut self, slot: Arc<Slot<P>>) {
        self.buckets[slot.priority.index()].push(slot);
    }

    pub(crate) fn bucket(&self, priority: Priority) -> &[Arc<Slot<P>>] {
        &self.buckets[priority.index()]
    }

    /// 按分发顺序拼接三档桶
    pub(crate) fn snapshot(&self) -> Vec<Arc<Slot<P>>> {
        let mut out = Vec::with_capacity(self.len());
        for bucket in &self.buckets {
            out.extend(bucket.iter().cloned());
        }
        out
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// 移除指定监听器；剩余监听器保持相对顺序
    ///
    /// 返回被移除的实例，由调用方在释放注册表锁之后再丢弃。
    pub(crate) fn remove(&mut self, priority: Priority, id: ListenerId) -> Option<Arc<Slot<P>>> {
        let bucket = &mut self.buckets[priority.index()];
        let pos = bucket.iter().position(|slot| slot.id == id)?;
        let slot = bucket.remove(pos);
        slot.deactivate();
        Some(slot)
    }

    /// 清空全部桶，返回被移除的实例
    pub(crate) fn clear(&mut self) -> Vec<Arc<Slot<P>>> {
        let mut removed = Vec::with_capacity(self.len());
        for bucket in &mut self.buckets {
            for slot in bucket.drain(..) {
                slot.deactivate();
                removed.push(slot);
            }
        }
        removed
    }
}
