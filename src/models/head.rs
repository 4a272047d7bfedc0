use std::str::FromStr;

use crate::error::OrderError;

/// 机器人头部型号（订单 CSV 的 Head 列）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadModel {
    RollAThor = 1,
    PeanutCrusher = 2,
    Dave = 3,
    AndyRoid = 4,
    SpannerMate = 5,
    Drillbit2000 = 6,
}

impl HeadModel {
    pub const ALL: [HeadModel; 6] = [
        HeadModel::RollAThor,
        HeadModel::PeanutCrusher,
        HeadModel::Dave,
        HeadModel::AndyRoid,
        HeadModel::SpannerMate,
        HeadModel::Drillbit2000,
    ];

    /// 获取型号代码
    pub fn code(self) -> u8 {
        self as u8
    }

    /// 下拉框中显示的名称
    pub fn label(self) -> &'static str {
        match self {
            HeadModel::RollAThor => "Roll-a-thor head",
            HeadModel::PeanutCrusher => "Peanut crusher head",
            HeadModel::Dave => "D.A.V.E head",
            HeadModel::AndyRoid => "Andy Roid head",
            HeadModel::SpannerMate => "Spanner mate head",
            HeadModel::Drillbit2000 => "Drillbit 2000 head",
        }
    }

    /// 从 CSV 中的代码解析型号
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(HeadModel::RollAThor),
            "2" => Some(HeadModel::PeanutCrusher),
            "3" => Some(HeadModel::Dave),
            "4" => Some(HeadModel::AndyRoid),
            "5" => Some(HeadModel::SpannerMate),
            "6" => Some(HeadModel::Drillbit2000),
            _ => None,
        }
    }
}

impl FromStr for HeadModel {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| OrderError::UnknownHeadCode {
            code: s.to_string(),
        })
    }
}

impl std::fmt::Display for HeadModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
