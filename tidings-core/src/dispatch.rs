//! 分发器
//!
//! 同步与异步两条路径共享同一算法：
//! 1. 以发射开始时的快照为准，按 `Before` → `Normal` → `After`、档内按注册顺序遍历；
//! 2. 已取消订阅的监听器（`active == false`）直接跳过；
//! 3. `Replace` 更新当前载荷，`Cancel` 立即结束，`Err` 立即作为 `EmitError` 返回；
//! 4. 异步路径逐个等待监听器完成，绝不并发执行同一次发射的两个监听器。
//!
use crate::error::{EmitError, EmitResult};
use crate::flow::{Cancellation, Emitted, Flow, ListenerResult};
use crate::listener::{ListenerFn, Slot};
use std::ops::ControlFlow;
use std::sync::Arc;

/// 同步发射
///
/// 快照中存在仍然有效的异步监听器时，在执行任何监听器之前返回
/// `EmitError::AsyncListenerInSyncEmit`，避免产生部分副作用。
pub(crate) fn dispatch_sync<P>(
    event: &'static str,
    slots: &[Arc<Slot<P>>],
    payload: P,
) -> EmitResult<P> {
    if let Some(slot) = slots.iter().find(|s| s.is_active() && s.listener.is_async()) {
        return Err(EmitError::AsyncListenerInSyncEmit {
            event,
            priority: slot.priority,
        });
    }

    let mut current = payload;
    for slot in slots {
        if !slot.is_active() {
            tracing::trace!(event, listener = %slot.id, "skipping removed listener");
            continue;
        }
        tracing::trace!(event, priority = %slot.priority, listener = %slot.id, "invoking listener");

        let result = match &slot.listener {
            ListenerFn::Sync(f) => f(&current),
            // 失效的槽位不会重新生效，预检查之后仍有效的槽位都是同步的
            ListenerFn::Async(_) => unreachable!("async listener passed the sync pre-scan"),
        };

        if let ControlFlow::Break(cancel) = advance(event, slot, &mut current, result)? {
            return Ok(Emitted::Cancelled(cancel));
        }
    }

    Ok(Emitted::Completed(current))
}

/// 异步发射：同步监听器就地执行，异步监听器逐个等待
pub(crate) async fn dispatch<P>(
    event: &'static str,
    slots: Vec<Arc<Slot<P>>>,
    payload: P,
) -> EmitResult<P>
where
    P: Send + Sync,
{
    let mut current = payload;
    for slot in &slots {
        if !slot.is_active() {
            tracing::trace!(event, listener = %slot.id, "skipping removed listener");
            continue;
        }
        tracing::trace!(event, priority = %slot.priority, listener = %slot.id, "invoking listener");

        let result = match &slot.listener {
            ListenerFn::Sync(f) => f(&current),
            ListenerFn::Async(f) => f(&current).await,
        };

        if let ControlFlow::Break(cancel) = advance(event, slot, &mut current, result)? {
            return Ok(Emitted::Cancelled(cancel));
        }
    }

    Ok(Emitted::Completed(current))
}

/// 应用单个监听器的结果
fn advance<P>(
    event: &'static str,
    slot: &Slot<P>,
    current: &mut P,
    result: ListenerResult<P>,
) -> Result<ControlFlow<Cancellation>, EmitError> {
    match result {
        Ok(Flow::Continue) => Ok(ControlFlow::Continue(())),
        Ok(Flow::Replace(next)) => {
            *current = next;
            Ok(ControlFlow::Continue(()))
        }
        Ok(Flow::Cancel(cancel)) => {
            tracing::debug!(event, priority = %slot.priority, listener = %slot.id, reason = ?cancel.reason(), "emission cancelled by listener");
            Ok(ControlFlow::Break(cancel))
        }
        Err(source) => {
            tracing::debug!(event, priority = %slot.priority, listener = %slot.id, error = %source, "listener failed");
            Err(EmitError::Listener {
                event,
                priority: slot.priority,
                listener: slot.id,
                source,
            })
        }
    }
}
