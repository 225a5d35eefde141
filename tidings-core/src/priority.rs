//! 监听器优先级
//!
//! 三档固定优先级，分发顺序恒为 `Before` → `Normal` → `After`，
//! 同一档内按注册顺序执行。
//!
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 优先级档位（`Before` 最先执行）
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Before,
    #[default]
    Normal,
    After,
}

impl Priority {
    /// `Before` 的别名
    pub const HIGH: Priority = Priority::Before;
    /// `After` 的别名
    pub const LOW: Priority = Priority::After;

    /// 按分发顺序排列的全部档位
    pub const ALL: [Priority; 3] = [Priority::Before, Priority::Normal, Priority::After];

    pub(crate) const fn index(self) -> usize {
        match self {
            Priority::Before => 0,
            Priority::Normal => 1,
            Priority::After => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::Before => "before",
            Priority::Normal => "normal",
            Priority::After => "after",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before" | "high" => Ok(Priority::Before),
            "normal" => Ok(Priority::Normal),
            "after" | "low" => Ok(Priority::After),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_order_is_before_normal_after() {
        let mut tiers = vec![Priority::After, Priority::Before, Priority::Normal];
        tiers.sort();
        assert_eq!(tiers, Priority::ALL.to_vec());
        assert_eq!(Priority::default(), Priority::Normal);
    }

    #[test]
    fn aliases_map_to_outer_tiers() {
        assert_eq!(Priority::HIGH, Priority::Before);
        assert_eq!(Priority::LOW, Priority::After);
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::Before);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::After);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Priority::After).unwrap();
        assert_eq!(json, "\"after\"");
        let back: Priority = serde_json::from_str("\"before\"").unwrap();
        assert_eq!(back, Priority::Before);
    }
}
