//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整次运行的调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用
//! - 管理浏览器生命周期（启动 / 连接、关闭）
//! - 串起整条流程：打开网站 → 下载订单 → 处理订单 → 打包收据
//! - 输出最终统计信息
//!
//! ### `order_processor` - 订单处理器
//! - 按文件顺序遍历订单 CSV
//! - 每一行交给 `OrderFlow`
//! - 第一处错误即终止
//!
//! ## 层次关系
//!
//! ```text
//! app (整次运行)
//!     ↓
//! order_processor (处理 Vec<OrderRow>)
//!     ↓
//! workflow::OrderFlow (处理单个订单)
//!     ↓
//! services (能力层：下载 / 收据 / 归档)
//!     ↓
//! infrastructure (基础设施：BrowserSession)
//! ```

pub mod app;
pub mod order_processor;

pub use app::{run_order_pipeline, App, RunSummary};
pub use order_processor::{process_orders, ProcessStats};
