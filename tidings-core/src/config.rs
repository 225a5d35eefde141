use bon::Builder;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_LISTENERS: usize = 64;

/// 发射器配置
///
/// - `name`：出现在发射日志 span 中，用于区分多个发射器；
/// - `max_listeners`：单个事件的监听器数量超过该值时输出告警（疑似泄漏），`0` 表示关闭。
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    #[builder(into, default = String::from("emitter"))]
    pub name: String,
    #[builder(default = DEFAULT_MAX_LISTENERS)]
    pub max_listeners: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            name: "emitter".to_string(),
            max_listeners: DEFAULT_MAX_LISTENERS,
        }
    }
}

impl EmitterConfig {
    pub(crate) fn exceeds_max_listeners(&self, count: usize) -> bool {
        self.max_listeners > 0 && count > self.max_listeners
    }
}
