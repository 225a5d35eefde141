//! 等待类操作的错误定义
//!
use thiserror::Error;

/// `Pending` 的失败结果，`P` 为 `fail_on` 携带的载荷类型
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WaitError<P = ()> {
    /// 通过 `Pending::cancel` 或外部取消令牌中止
    #[error("wait cancelled")]
    Cancelled,

    /// 监听器已被移除（发射器销毁或被 `clear`），事件不可能再到达
    #[error("emitter closed before the event arrived")]
    Closed,

    /// `fail_on` 观察到了匹配的事件
    #[error("event raised: {event}")]
    Raised { event: &'static str, payload: P },
}

impl<P> WaitError<P> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WaitError::Cancelled)
    }

    /// 取出 `Raised` 携带的载荷
    pub fn into_payload(self) -> Option<P> {
        match self {
            WaitError::Raised { payload, .. } => Some(payload),
            _ => None,
        }
    }
}
