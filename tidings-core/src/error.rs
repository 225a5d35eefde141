//! 发射错误定义
//!
//! 取消不属于错误；这里只包含会中止本次发射并交由调用方处理的失败。
//!
use crate::{flow::Emitted, listener::ListenerId, priority::Priority};
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EmitError {
    /// 监听器返回了错误，剩余监听器不再执行
    #[error("listener failed: event={event}, priority={priority}, listener={listener}: {source}")]
    Listener {
        event: &'static str,
        priority: Priority,
        listener: ListenerId,
        #[source]
        source: anyhow::Error,
    },

    /// 同步发射遇到异步监听器，在执行任何监听器之前拒绝
    #[error("async listener registered for synchronous emission: event={event}, priority={priority}")]
    AsyncListenerInSyncEmit {
        event: &'static str,
        priority: Priority,
    },
}

impl EmitError {
    /// 事件名
    pub fn event(&self) -> &'static str {
        match self {
            EmitError::Listener { event, .. } | EmitError::AsyncListenerInSyncEmit { event, .. } => {
                *event
            }
        }
    }

    /// 若为监听器失败，取出其原始错误
    pub fn listener_error(&self) -> Option<&anyhow::Error> {
        match self {
            EmitError::Listener { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// 发射结果类型别名
pub type EmitResult<P> = Result<Emitted<P>, EmitError>;
