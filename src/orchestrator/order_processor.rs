//! 订单处理器 - 编排层
//!
//! 逐行读取订单 CSV，对每一行执行 [`OrderFlow`]。
//! 任何一行失败都会立即终止，后面的行不再处理。

use std::path::Path;

use tracing::info;

use crate::error::AppResult;
use crate::infrastructure::OrderPage;
use crate::models::{OrderArtifacts, OrderReader};
use crate::workflow::{OrderCtx, OrderFlow};

/// 订单处理统计
#[derive(Debug, Default)]
pub struct ProcessStats {
    pub processed: usize,
    pub artifacts: Vec<OrderArtifacts>,
}

/// 处理订单文件中的所有订单（按文件顺序）
pub async fn process_orders<P: OrderPage>(page: &P, flow: &OrderFlow, csv_path: &Path) -> AppResult<ProcessStats> {
    info!("\n📋 正在读取订单: {}", csv_path.display());

    let reader = OrderReader::open(csv_path)?;
    let mut stats = ProcessStats::default();

    for (index, row) in reader.enumerate() {
        let row = row?;
        let ctx = OrderCtx::new(row.order_number, index + 1);

        let artifacts = flow.run(page, &row, &ctx).await?;
        stats.processed += 1;
        stats.artifacts.push(artifacts);
    }

    info!("✓ 共处理 {} 个订单", stats.processed);
    Ok(stats)
}
