//! 监听器返回协议与发射结果
//!
//! 监听器以显式的三态结果表达意图，不再从返回值形状推断：
//! - `Flow::Continue`：不修改载荷，继续执行后续监听器；
//! - `Flow::Replace(p)`：以 `p` 替换当前载荷，后续监听器与最终结果均看到新载荷；
//! - `Flow::Cancel(c)`：终止本次发射，后续监听器全部跳过。
//!
//! 取消不是错误：它总会被分发器转换为 `Emitted::Cancelled`。
//! 监听器返回的 `Err` 才是失败，会直接传播给发射方。
//!
use std::fmt;

/// 监听器调用结果
pub type ListenerResult<P> = anyhow::Result<Flow<P>>;

/// 单个监听器对本次发射的决定
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flow<P> {
    Continue,
    Replace(P),
    Cancel(Cancellation),
}

impl<P> Flow<P> {
    /// 携带原因取消
    pub fn cancel(reason: impl Into<String>) -> Self {
        Flow::Cancel(Cancellation::new(reason))
    }

    /// 不携带原因取消
    pub fn stop() -> Self {
        Flow::Cancel(Cancellation::default())
    }
}

impl<P> From<Cancellation> for Flow<P> {
    fn from(c: Cancellation) -> Self {
        Flow::Cancel(c)
    }
}

/// 取消信号（可选原因）
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cancellation {
    reason: Option<String>,
}

impl Cancellation {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for Cancellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "cancelled: {reason}"),
            None => f.write_str("cancelled"),
        }
    }
}

/// 一次发射的结果
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Emitted<P> {
    /// 全部监听器执行完毕，携带最终载荷（可能已被替换）
    Completed(P),
    /// 某个监听器取消了本次发射
    Cancelled(Cancellation),
}

impl<P> Emitted<P> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Emitted::Cancelled(_))
    }

    pub fn payload(&self) -> Option<&P> {
        match self {
            Emitted::Completed(p) => Some(p),
            Emitted::Cancelled(_) => None,
        }
    }

    pub fn into_payload(self) -> Option<P> {
        match self {
            Emitted::Completed(p) => Some(p),
            Emitted::Cancelled(_) => None,
        }
    }

    pub fn cancellation(&self) -> Option<&Cancellation> {
        match self {
            Emitted::Completed(_) => None,
            Emitted::Cancelled(c) => Some(c),
        }
    }

    /// 变换最终载荷，取消结果原样保留
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Emitted<Q> {
        match self {
            Emitted::Completed(p) => Emitted::Completed(f(p)),
            Emitted::Cancelled(c) => Emitted::Cancelled(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_helpers_carry_reason() {
        let flow: Flow<u8> = Flow::cancel("stop");
        assert_eq!(flow, Flow::Cancel(Cancellation::new("stop")));

        let Flow::<u8>::Cancel(c) = Flow::stop() else {
            panic!("expected cancellation");
        };
        assert_eq!(c.reason(), None);
        assert_eq!(c.to_string(), "cancelled");
        assert_eq!(Cancellation::new("why").to_string(), "cancelled: why");
    }

    #[test]
    fn emitted_accessors() {
        let done = Emitted::Completed(3u32);
        assert!(!done.is_cancelled());
        assert_eq!(done.payload(), Some(&3));
        assert_eq!(done.clone().map(|v| v * 2), Emitted::Completed(6));

        let cancelled: Emitted<u32> = Emitted::Cancelled(Cancellation::new("no"));
        assert!(cancelled.is_cancelled());
        assert_eq!(cancelled.cancellation().and_then(|c| c.reason()), Some("no"));
        assert_eq!(cancelled.map(|v| v + 1).into_payload(), None);
    }
}
