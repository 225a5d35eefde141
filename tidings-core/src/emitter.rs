//! 发射器（Emitter）
//!
//! 注册与发射的统一入口：
//! - `on` / `on_at`：注册同步监听器（默认 `Normal` 优先级）；
//! - `on_async` / `on_async_at` / `subscribe`：注册异步监听器；
//! - `emit_sync` / `emit`：同步或异步发射，返回 `Emitted`；
//! - `dispatch_sync` / `dispatch`：以事件映射枚举值整体发射。
//!
//! 发射器内部以 `Arc` 共享注册表，克隆成本低，所有克隆共享同一组监听器。
//!
use crate::config::EmitterConfig;
use crate::dispatch;
use crate::error::{EmitError, EmitResult};
use crate::event::{AnyEvent, Event, EventKey, EventMap, EventOf};
use crate::flow::{Emitted, ListenerResult};
use crate::listener::{AsyncListener, ListenerFn, ListenerId, erase_async, erase_sync};
use crate::priority::Priority;
use crate::registry::{Registry, Subscription};
use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::Instrument;

/// 事件发射器，`M` 为其接受的事件映射
pub struct Emitter<M = AnyEvent> {
    registry: Arc<Registry>,
    config: Arc<EmitterConfig>,
    _map: PhantomData<fn() -> M>,
}

impl<M> Clone for Emitter<M> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            config: self.config.clone(),
            _map: PhantomData,
        }
    }
}

impl<M> Default for Emitter<M> {
    fn default() -> Self {
        Self::with_config(EmitterConfig::default())
    }
}

impl<M> fmt::Debug for Emitter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("name", &self.config.name)
            .field("events", &self.registry.keys())
            .finish()
    }
}

impl<M> Emitter<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            registry: Arc::new(Registry::default()),
            config: Arc::new(config),
            _map: PhantomData,
        }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// 以 `Normal` 优先级注册同步监听器
    pub fn on<E, F>(&self, listener: F) -> Subscription
    where
        E: EventOf<M>,
        F: Fn(&E::Payload) -> ListenerResult<E::Payload> + Send + Sync + 'static,
    {
        self.on_at::<E, F>(Priority::Normal, listener)
    }

    /// 以指定优先级注册同步监听器
    pub fn on_at<E, F>(&self, priority: Priority, listener: F) -> Subscription
    where
        E: EventOf<M>,
        F: Fn(&E::Payload) -> ListenerResult<E::Payload> + Send + Sync + 'static,
    {
        self.register::<E>(priority, erase_sync(listener))
    }

    /// 以 `Normal` 优先级注册异步闭包监听器（接收载荷克隆）
    pub fn on_async<E, F, Fut>(&self, listener: F) -> Subscription
    where
        E: EventOf<M>,
        F: Fn(E::Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ListenerResult<E::Payload>> + Send + 'static,
    {
        self.on_async_at::<E, F, Fut>(Priority::Normal, listener)
    }

    /// 以指定优先级注册异步闭包监听器（接收载荷克隆）
    pub fn on_async_at<E, F, Fut>(&self, priority: Priority, listener: F) -> Subscription
    where
        E: EventOf<M>,
        F: Fn(E::Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ListenerResult<E::Payload>> + Send + 'static,
    {
        self.register::<E>(
            priority,
            erase_async(move |payload: &E::Payload| Box::pin(listener(payload.clone()))),
        )
    }

    /// 注册实现了 `AsyncListener` 的处理器（借用载荷）
    pub fn subscribe<E, L>(&self, priority: Priority, listener: Arc<L>) -> Subscription
    where
        E: EventOf<M>,
        L: AsyncListener<E> + 'static,
    {
        self.register::<E>(
            priority,
            erase_async(move |payload| {
                let listener = Arc::clone(&listener);
                Box::pin(async move { listener.on_event(payload).await })
            }),
        )
    }

    fn register<E: Event>(&self, priority: Priority, listener: ListenerFn<E::Payload>) -> Subscription {
        let is_async = listener.is_async();
        let (subscription, count) = self.registry.register::<E>(priority, listener);
        tracing::debug!(
            emitter = %self.config.name,
            event = E::NAME,
            %priority,
            listener = %subscription.id(),
            is_async,
            "listener registered"
        );
        if self.config.exceeds_max_listeners(count) {
            tracing::warn!(
                emitter = %self.config.name,
                event = E::NAME,
                count,
                max = self.config.max_listeners,
                "listener count exceeds max_listeners, possible leak"
            );
        }
        subscription
    }

    /// 同步发射
    pub fn emit_sync<E>(&self, payload: E::Payload) -> EmitResult<E::Payload>
    where
        E: EventOf<M>,
    {
        let span = tracing::debug_span!("emit", emitter = %self.config.name, event = E::NAME, mode = "sync");
        let _enter = span.enter();
        let slots = self.registry.snapshot::<E>();
        dispatch::dispatch_sync(E::NAME, &slots, payload)
    }

    /// 异步发射
    ///
    /// 监听器快照在调用时获取，返回的 future 不借用发射器。
    pub fn emit<E>(
        &self,
        payload: E::Payload,
    ) -> impl Future<Output = EmitResult<E::Payload>> + Send + use<M, E>
    where
        E: EventOf<M>,
    {
        let span = tracing::debug_span!("emit", emitter = %self.config.name, event = E::NAME, mode = "async");
        let slots = self.registry.snapshot::<E>();
        dispatch::dispatch(E::NAME, slots, payload).instrument(span)
    }

    /// 指定档位的监听器（按执行顺序）
    pub fn listeners_of<E>(&self, priority: Priority) -> Vec<ListenerId>
    where
        E: EventOf<M>,
    {
        self.registry.listeners_of::<E>(priority)
    }

    pub fn listener_count<E>(&self) -> usize
    where
        E: EventOf<M>,
    {
        self.registry.len_of(EventKey::of::<E>())
    }

    /// 当前至少有一个监听器的事件
    pub fn event_keys(&self) -> Vec<EventKey> {
        self.registry.keys()
    }

    /// 当前至少有一个监听器的事件名（按字典序）
    pub fn event_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.registry.keys().iter().map(EventKey::name).collect();
        names.sort_unstable();
        names
    }

    /// 移除某事件的全部监听器，返回移除数量
    pub fn clear<E>(&self) -> usize
    where
        E: EventOf<M>,
    {
        let removed = self.registry.clear::<E>();
        tracing::debug!(emitter = %self.config.name, event = E::NAME, removed, "listeners cleared");
        removed
    }
}

impl<M: EventMap> Emitter<M> {
    /// 同步发射事件映射枚举值
    pub fn dispatch_sync(&self, event: M) -> Result<Emitted<M>, EmitError> {
        event.emit_sync_on(self)
    }

    /// 异步发射事件映射枚举值
    pub fn dispatch(&self, event: M) -> BoxFuture<'_, Result<Emitted<M>, EmitError>> {
        event.emit_on(self)
    }
}
