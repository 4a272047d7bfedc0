//! # Robot Order Bot
//!
//! 自动在 RobotSpareBin 网站上批量订购机器人的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Browser / Page），只暴露能力
//! - `OrderPage` - 下单流程需要的页面操作
//! - `BrowserSession` - 唯一的 page owner，基于 chromiumoxide 实现 `OrderPage`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程顺序
//! - `OrderFetcher` - 下载订单 CSV
//! - `receipt` - 收据落盘、截图嵌入 PDF
//! - `archive` - 收据打包成 zip
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个订单"的完整处理流程
//! - `OrderCtx` - 上下文封装（订单号 + 行号）
//! - `OrderFlow` - 流程编排（填表 → 提交 → 收据 → 截图 → 嵌入 → 归位）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 浏览器生命周期和整次运行
//! - `orchestrator/order_processor` - 遍历订单 CSV
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{BrowserSession, Locator, OrderPage};
pub use models::{HeadModel, OrderArtifacts, OrderRow, OutputLayout};
pub use orchestrator::{run_order_pipeline, App, RunSummary};
pub use workflow::{OrderCtx, OrderFlow};
