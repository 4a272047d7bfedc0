use serde::Deserialize;

use crate::error::OrderError;
use crate::models::head::HeadModel;

/// 订单 CSV 中的一行
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderRow {
    #[serde(rename = "Order number")]
    pub order_number: u32,
    /// 头部型号代码，下单时再解析
    #[serde(rename = "Head")]
    pub head: String,
    /// 身体选项序号（从 1 开始）
    #[serde(rename = "Body")]
    pub body: u32,
    #[serde(rename = "Legs")]
    pub legs: String,
    #[serde(rename = "Address")]
    pub address: String,
}

impl OrderRow {
    pub fn head_model(&self) -> Result<HeadModel, OrderError> {
        self.head.parse()
    }
}
