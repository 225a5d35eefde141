//! 监听器
//!
//! 对外提供两种异步监听器写法：
//! - 闭包：`Fn(P) -> impl Future`，接收载荷的克隆，书写最简单；
//! - `AsyncListener` trait：借用载荷，适合持有状态的处理器对象。
//!
//! 注册后统一擦除为 `ListenerFn`，由分发器以相同方式调用。
//!
use crate::{event::Event, flow::ListenerResult, priority::Priority};
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// 监听器身份（按身份而非行为区分，两个行为相同的监听器互不影响）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// 异步监听器：处理某一类型的事件
#[async_trait]
pub trait AsyncListener<E: Event>: Send + Sync {
    /// 处理事件，返回对本次发射的决定
    async fn on_event(&self, payload: &E::Payload) -> ListenerResult<E::Payload>;
}

pub(crate) type SyncListenerFn<P> = Arc<dyn Fn(&P) -> ListenerResult<P> + Send + Sync>;

pub(crate) type AsyncListenerFn<P> =
    Arc<dyn for<'a> Fn(&'a P) -> BoxFuture<'a, ListenerResult<P>> + Send + Sync>;

/// 类型擦除后的监听器
pub(crate) enum ListenerFn<P> {
    Sync(SyncListenerFn<P>),
    Async(AsyncListenerFn<P>),
}

impl<P> ListenerFn<P> {
    pub(crate) fn is_async(&self) -> bool {
        matches!(self, ListenerFn::Async(_))
    }
}

pub(crate) fn erase_sync<P, F>(f: F) -> ListenerFn<P>
where
    F: Fn(&P) -> ListenerResult<P> + Send + Sync + 'static,
{
    ListenerFn::Sync(Arc::new(f))
}

pub(crate) fn erase_async<P, F>(f: F) -> ListenerFn<P>
where
    F: for<'a> Fn(&'a P) -> BoxFuture<'a, ListenerResult<P>> + Send + Sync + 'static,
{
    ListenerFn::Async(Arc::new(f))
}

/// 桶中的一个监听器实例
///
/// `active` 与对应的 `Subscription` 共享：取消订阅后，
/// 正在进行的发射即使已持有快照也会跳过该监听器。
pub(crate) struct Slot<P> {
    pub(crate) id: ListenerId,
    pub(crate) priority: Priority,
    pub(crate) active: Arc<AtomicBool>,
    pub(crate) listener: ListenerFn<P>,
}

impl<P> Slot<P> {
    pub(crate) fn new(priority: Priority, listener: ListenerFn<P>) -> Self {
        Self {
            id: ListenerId::new(),
            priority,
            active: Arc::new(AtomicBool::new(true)),
            listener,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub(crate) fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }
}
