//! 追溯方向

use serde::{Deserialize, Serialize};

/// 工單的移動方向（投入或產出）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveSide {
    /// 投入（消耗的物料）
    Inputs,
    /// 產出（生產的成品）
    Outputs,
}

/// 追溯方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// 反向：從成品追溯到消耗的物料
    #[default]
    Backward,
    /// 正向：從物料追溯到產出的成品
    Forward,
}

impl Direction {
    /// 被追溯的一側（請求產品所在的移動）
    pub fn traced_side(self) -> MoveSide {
        match self {
            Direction::Backward => MoveSide::Outputs,
            Direction::Forward => MoveSide::Inputs,
        }
    }

    /// 對手方一側（平衡記錄的產品來源）
    pub fn counterparty_side(self) -> MoveSide {
        match self {
            Direction::Backward => MoveSide::Inputs,
            Direction::Forward => MoveSide::Outputs,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Backward => write!(f, "backward"),
            Direction::Forward => write!(f, "forward"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "backward" => Ok(Direction::Backward),
            "forward" => Ok(Direction::Forward),
            _ => Err(format!("無效的追溯方向: {}（可用 backward 或 forward）", s)),
        }
    }
}
