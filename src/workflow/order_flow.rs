//! 单个订单处理流程 - 流程层
//!
//! 核心职责：定义"一个订单"的完整处理流程
//!
//! 流程顺序：
//! 1. 填写表单（头部 / 身体 / 腿 / 地址）
//! 2. 提交（有上限的重试，直到出现 #order-another）
//! 3. 收据 → PDF
//! 4. 机器人预览截图
//! 5. 截图嵌入 PDF
//! 6. 点击 "Order another" 并关闭弹窗，回到可下单状态

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, OrderError};
use crate::infrastructure::OrderPage;
use crate::models::{OrderArtifacts, OrderRow, OutputLayout};
use crate::services::receipt;
use crate::utils::logging::truncate_text;
use crate::workflow::order_ctx::OrderCtx;
use crate::workflow::{selectors, site};

/// 单个订单处理流程
///
/// - 编排一个订单从填表到归位的全部步骤
/// - 不持有页面，页面由调用方按引用传入
/// - 任何一步失败都直接返回错误，不做补救
pub struct OrderFlow {
    layout: OutputLayout,
    max_submit_attempts: u32,
    submit_retry_delay: Duration,
}

impl OrderFlow {
    pub fn new(config: &Config) -> Self {
        Self::with_layout(
            OutputLayout::new(&config.output_dir),
            config.max_submit_attempts,
            config.submit_retry_delay(),
        )
    }

    pub fn with_layout(layout: OutputLayout, max_submit_attempts: u32, submit_retry_delay: Duration) -> Self {
        Self {
            layout,
            max_submit_attempts: max_submit_attempts.max(1),
            submit_retry_delay,
        }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub async fn run<P: OrderPage>(&self, page: &P, row: &OrderRow, ctx: &OrderCtx) -> AppResult<OrderArtifacts> {
        info!("{} 🤖 开始下单", ctx);

        self.fill_form(page, row, ctx).await?;
        self.submit_order(page, ctx).await?;

        let receipt = self.store_receipt_as_pdf(page, row.order_number).await?;
        let screenshot = self.screenshot_robot(page, row.order_number).await?;
        embed_screenshot_to_receipt(&screenshot, &receipt)?;

        self.order_another(page).await?;

        info!("{} ✓ 订单完成, 收据: {}", ctx, receipt.display());
        Ok(OrderArtifacts {
            order_number: row.order_number,
            receipt,
            screenshot,
        })
    }

    /// 填写下单表单
    pub async fn fill_form<P: OrderPage>(&self, page: &P, row: &OrderRow, ctx: &OrderCtx) -> AppResult<()> {
        let head = row.head_model()?;
        let body = selectors::body_option(row.body)?;
        debug!(
            "{} 头部: {} | 身体: {} | 腿: {} | 地址: {}",
            ctx,
            head,
            row.body,
            row.legs,
            truncate_text(&row.address, 40)
        );

        page.select_by_label(&selectors::head_select(), head.label()).await?;
        page.click(&body).await?;
        page.fill(&selectors::legs_input(), &row.legs).await?;
        page.fill(&selectors::address_input(), &row.address).await?;
        Ok(())
    }

    /// 点击提交，直到出现 "Order another" 按钮
    ///
    /// # 返回
    /// 成功时所用的点击次数；达到上限仍未成功返回 SubmitRetriesExhausted
    pub async fn submit_order<P: OrderPage>(&self, page: &P, ctx: &OrderCtx) -> AppResult<u32> {
        let order_another = selectors::order_another_button();

        for attempt in 1..=self.max_submit_attempts {
            page.click(&selectors::order_button()).await?;

            if page.is_present(&order_another).await? {
                debug!("{} 提交成功 (第 {} 次)", ctx, attempt);
                return Ok(attempt);
            }

            warn!(
                "{} ⚠️ 提交未成功 (尝试 {}/{})",
                ctx, attempt, self.max_submit_attempts
            );
            if attempt < self.max_submit_attempts {
                sleep(self.submit_retry_delay).await;
            }
        }

        Err(OrderError::SubmitRetriesExhausted {
            order_number: ctx.order_number,
            attempts: self.max_submit_attempts,
        }
        .into())
    }

    /// 把收据保存为 PDF，返回文件路径
    pub async fn store_receipt_as_pdf<P: OrderPage>(&self, page: &P, order_number: u32) -> AppResult<PathBuf> {
        let html = page.inner_html(&selectors::receipt()).await?;
        let pdf = page.render_pdf(&receipt::wrap_receipt_html(&html)).await?;

        let path = self.layout.receipt_path(order_number);
        receipt::write_artifact(&path, &pdf).await?;
        Ok(path)
    }

    /// 截取机器人预览图，返回文件路径
    pub async fn screenshot_robot<P: OrderPage>(&self, page: &P, order_number: u32) -> AppResult<PathBuf> {
        let png = page.screenshot(&selectors::robot_preview()).await?;

        let path = self.layout.screenshot_path(order_number);
        receipt::write_artifact(&path, &png).await?;
        Ok(path)
    }

    /// 回到下单表单
    pub async fn order_another<P: OrderPage>(&self, page: &P) -> AppResult<()> {
        page.click(&selectors::order_another_button()).await?;
        site::dismiss_dialog(page).await
    }
}

/// 截图嵌入收据（原地覆盖）
pub fn embed_screenshot_to_receipt(screenshot: &Path, receipt_pdf: &Path) -> AppResult<()> {
    receipt::embed_image_into_pdf(screenshot, receipt_pdf, receipt_pdf)
}
