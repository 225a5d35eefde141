//! 发射器扩展（tidings-ext）
//!
//! 在核心注册/发射接口之上提供常用组合：
//! - `once` / `once_at` / `once_async` / `once_async_at`：最多执行一次的监听器，执行前先注销自身；
//! - `wait` / `next`：以 future 形式等待下一次匹配的事件，可取消；
//! - `fail_on`：匹配事件出现时以错误结束的 future，常与 `wait` 组合做竞争；
//! - `reemit` / `reemit_async`：把一个发射器上的事件转发到另一个发射器，
//!   转发目标的取消与失败会回传给源发射。
//!
mod error;
mod once;
mod pending;

pub use error::WaitError;
pub use pending::Pending;

use once::{Handoff, Latch};
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use tidings_core::{
    BoxFuture, Emitted, Emitter, EventOf, Flow, ListenerResult, Priority, Subscription,
};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

/// `reemit` 返回的同步转发监听器
pub type SyncForward<P> = Box<dyn Fn(&P) -> ListenerResult<P> + Send + Sync>;

/// `reemit_async` 返回的异步转发监听器
pub type AsyncForward<P> = Box<dyn Fn(P) -> BoxFuture<'static, ListenerResult<P>> + Send + Sync>;

pub trait EmitterExt<M> {
    /// 以 `Normal` 优先级注册只执行一次的同步监听器
    fn once<E, F>(&self, listener: F) -> Subscription
    where
        E: EventOf<M>,
        F: FnOnce(&E::Payload) -> ListenerResult<E::Payload> + Send + 'static,
    {
        self.once_at::<E, F>(Priority::Normal, listener)
    }

    /// 以指定优先级注册只执行一次的同步监听器
    fn once_at<E, F>(&self, priority: Priority, listener: F) -> Subscription
    where
        E: EventOf<M>,
        F: FnOnce(&E::Payload) -> ListenerResult<E::Payload> + Send + 'static;

    /// 以 `Normal` 优先级注册只执行一次的异步监听器
    fn once_async<E, F, Fut>(&self, listener: F) -> Subscription
    where
        E: EventOf<M>,
        F: FnOnce(E::Payload) -> Fut + Send + 'static,
        Fut: Future<Output = ListenerResult<E::Payload>> + Send + 'static,
    {
        self.once_async_at::<E, F, Fut>(Priority::Normal, listener)
    }

    /// 以指定优先级注册只执行一次的异步监听器
    fn once_async_at<E, F, Fut>(&self, priority: Priority, listener: F) -> Subscription
    where
        E: EventOf<M>,
        F: FnOnce(E::Payload) -> Fut + Send + 'static,
        Fut: Future<Output = ListenerResult<E::Payload>> + Send + 'static;

    /// 等待调用之后首个满足 `filter` 的事件，得到其载荷
    fn wait<E, F>(&self, priority: Priority, filter: F) -> Pending<E::Payload>
    where
        E: EventOf<M>,
        F: Fn(&E::Payload) -> bool + Send + Sync + 'static;

    /// 等待下一次事件
    fn next<E>(&self) -> Pending<E::Payload>
    where
        E: EventOf<M>,
    {
        self.wait::<E, _>(Priority::Normal, |_| true)
    }

    /// 首个满足 `filter` 的事件出现时以 `WaitError::Raised` 结束
    fn fail_on<E, F>(&self, priority: Priority, filter: F) -> Pending<Infallible, E::Payload>
    where
        E: EventOf<M>,
        F: Fn(&E::Payload) -> bool + Send + Sync + 'static;

    /// 构造把载荷转发为本发射器上 `E` 事件的同步监听器
    fn reemit<E>(&self) -> SyncForward<E::Payload>
    where
        E: EventOf<M>;

    /// 构造把载荷转发为本发射器上 `E` 事件的异步监听器
    fn reemit_async<E>(&self) -> AsyncForward<E::Payload>
    where
        E: EventOf<M>;
}

impl<M: 'static> EmitterExt<M> for Emitter<M> {
    fn once_at<E, F>(&self, priority: Priority, listener: F) -> Subscription
    where
        E: EventOf<M>,
        F: FnOnce(&E::Payload) -> ListenerResult<E::Payload> + Send + 'static,
    {
        let latch = Arc::new(Latch::default());
        let body = Handoff::new(listener);
        let guard = latch.clone();
        let subscription = self.on_at::<E, _>(priority, move |payload| {
            if !guard.fire() {
                return Ok(Flow::Continue);
            }
            tracing::debug!(event = E::NAME, %priority, "once listener fired");
            match body.take() {
                Some(f) => f(payload),
                None => Ok(Flow::Continue),
            }
        });
        latch.bind(subscription.clone());
        subscription
    }

    fn once_async_at<E, F, Fut>(&self, priority: Priority, listener: F) -> Subscription
    where
        E: EventOf<M>,
        F: FnOnce(E::Payload) -> Fut + Send + 'static,
        Fut: Future<Output = ListenerResult<E::Payload>> + Send + 'static,
    {
        let latch = Arc::new(Latch::default());
        let body = Handoff::new(listener);
        let guard = latch.clone();
        let subscription = self.on_async_at::<E, _, _>(priority, move |payload| {
            let claimed = if guard.fire() { body.take() } else { None };
            async move {
                match claimed {
                    Some(f) => {
                        tracing::debug!(event = E::NAME, %priority, "once listener fired");
                        f(payload).await
                    }
                    None => Ok(Flow::Continue),
                }
            }
        });
        latch.bind(subscription.clone());
        subscription
    }

    fn wait<E, F>(&self, priority: Priority, filter: F) -> Pending<E::Payload>
    where
        E: EventOf<M>,
        F: Fn(&E::Payload) -> bool + Send + Sync + 'static,
    {
        settle::<M, E, _, _, _, _>(self, priority, filter, |payload| Ok(payload.clone()))
    }

    fn fail_on<E, F>(&self, priority: Priority, filter: F) -> Pending<Infallible, E::Payload>
    where
        E: EventOf<M>,
        F: Fn(&E::Payload) -> bool + Send + Sync + 'static,
    {
        settle::<M, E, _, _, _, _>(self, priority, filter, |payload| {
            Err(WaitError::Raised {
                event: E::NAME,
                payload: payload.clone(),
            })
        })
    }

    fn reemit<E>(&self) -> SyncForward<E::Payload>
    where
        E: EventOf<M>,
    {
        let target = self.clone();
        Box::new(move |payload: &E::Payload| {
            match target.emit_sync::<E>(payload.clone()) {
                Ok(out) => Ok(forwarded(E::NAME, out)),
                Err(err) => Err(anyhow::Error::new(err)),
            }
        })
    }

    fn reemit_async<E>(&self) -> AsyncForward<E::Payload>
    where
        E: EventOf<M>,
    {
        let target = self.clone();
        Box::new(move |payload: E::Payload| {
            let emission = target.emit::<E>(payload);
            Box::pin(async move {
                match emission.await {
                    Ok(out) => Ok(forwarded(E::NAME, out)),
                    Err(err) => Err(anyhow::Error::new(err)),
                }
            })
        })
    }
}

/// 转发结果回传给源发射：取消沿用原因，完成时源载荷保持不变
fn forwarded<P>(event: &'static str, out: Emitted<P>) -> Flow<P> {
    match out {
        Emitted::Completed(_) => Flow::Continue,
        Emitted::Cancelled(cancel) => {
            tracing::debug!(event, reason = ?cancel.reason(), "forwarded emission cancelled");
            Flow::Cancel(cancel)
        }
    }
}

/// `wait` / `fail_on` 的公共实现
fn settle<M, E, F, R, T, P>(
    emitter: &Emitter<M>,
    priority: Priority,
    filter: F,
    resolve: R,
) -> Pending<T, P>
where
    E: EventOf<M>,
    F: Fn(&E::Payload) -> bool + Send + Sync + 'static,
    R: Fn(&E::Payload) -> Result<T, WaitError<P>> + Send + Sync + 'static,
    T: Send + 'static,
    P: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let token = CancellationToken::new();
    let latch = Arc::new(Latch::default());
    let sender = Handoff::new(tx);

    let guard = latch.clone();
    let cancelled = token.clone();
    let subscription = emitter.on_at::<E, _>(priority, move |payload| {
        if cancelled.is_cancelled() {
            guard.fire();
            return Ok(Flow::Continue);
        }
        if filter(payload) && guard.fire() {
            if let Some(tx) = sender.take() {
                tracing::debug!(event = E::NAME, %priority, "wait settled");
                let _ = tx.send(resolve(payload));
            }
        }
        Ok(Flow::Continue)
    });
    latch.bind(subscription.clone());

    Pending::new(rx, token, subscription)
}
