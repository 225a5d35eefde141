//! 可取消的等待（Pending）
//!
//! `wait` / `next` / `fail_on` 返回的 future：
//! - 内部监听器把首个匹配的载荷经 oneshot 通道交给 future；
//! - `cancel()` 或外部取消令牌触发后，立即注销监听器并以 `WaitError::Cancelled` 结束；
//! - 丢弃 `Pending` 时注销监听器；
//! - 监听器先于事件被移除（发射器销毁等）时以 `WaitError::Closed` 结束。
//!
use crate::error::WaitError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tidings_core::Subscription;
use tokio::sync::oneshot;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

pub(crate) type Outcome<T, P> = Result<T, WaitError<P>>;

/// 等待事件的可取消 future
pub struct Pending<T, P = ()> {
    rx: oneshot::Receiver<Outcome<T, P>>,
    token: CancellationToken,
    cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
    subscription: Subscription,
}

impl<T, P> Pending<T, P> {
    pub(crate) fn new(
        rx: oneshot::Receiver<Outcome<T, P>>,
        token: CancellationToken,
        subscription: Subscription,
    ) -> Self {
        let cancelled = Box::pin(token.clone().cancelled_owned());
        Self {
            rx,
            token,
            cancelled,
            subscription,
        }
    }

    /// 取消等待并立即注销内部监听器
    pub fn cancel(&self) {
        self.token.cancel();
        if self.subscription.off() {
            tracing::debug!(event = self.subscription.event().name(), "wait cancelled");
        }
    }

    /// 供外部中止等待的取消令牌
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// 内部监听器的订阅句柄
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<T, P> Unpin for Pending<T, P> {}

impl<T, P> Future for Pending<T, P> {
    type Output = Result<T, WaitError<P>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if this.cancelled.as_mut().poll(cx).is_ready() {
            this.subscription.off();
            return Poll::Ready(Err(WaitError::Cancelled));
        }

        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(WaitError::Closed)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T, P> Drop for Pending<T, P> {
    fn drop(&mut self) {
        self.subscription.off();
    }
}

impl<T, P> fmt::Debug for Pending<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("subscription", &self.subscription)
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
