//! 订单处理上下文
//!
//! 封装"我正在处理第几行的哪个订单"这一信息

use std::fmt::Display;

/// 订单处理上下文
#[derive(Debug, Clone, Copy)]
pub struct OrderCtx {
    /// 订单号（所有产出文件的唯一关联键）
    pub order_number: u32,

    /// CSV 中的行号（从1开始，仅用于日志）
    pub row_index: usize,
}

impl OrderCtx {
    pub fn new(order_number: u32, row_index: usize) -> Self {
        Self {
            order_number,
            row_index,
        }
    }
}

impl Display for OrderCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[订单 {} 第{}行]", self.order_number, self.row_index)
    }
}
