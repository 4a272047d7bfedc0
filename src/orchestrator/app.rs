use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{BrowserSession, OrderPage};
use crate::models::OutputLayout;
use crate::orchestrator::order_processor::process_orders;
use crate::services::{archive_folder_with_zip, OrderFetcher};
use crate::utils::logging;
use crate::workflow::{open_robot_order_website, OrderFlow};

/// 下载订单文件的超时
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// 应用主结构
pub struct App {
    config: Config,
    session: BrowserSession,
}

impl App {
    /// 初始化应用：启动或连接浏览器
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let session = match config.browser_debug_port {
            Some(port) => {
                let (browser, page) = browser::connect_to_browser(port).await?;
                BrowserSession::new(browser, page, false, &config)
            }
            None => {
                let (browser, page) = browser::launch_headless_browser(&config).await?;
                BrowserSession::new(browser, page, true, &config)
            }
        };

        Ok(Self { config, session })
    }

    /// 运行应用主逻辑，结束后关闭浏览器
    pub async fn run(self) -> Result<RunSummary> {
        let fetcher = OrderFetcher::with_timeout(DOWNLOAD_TIMEOUT)?;
        let result = run_order_pipeline(&self.session, &fetcher, &self.config).await;

        let summary = settle_run(result, self.session.close().await)?;
        logging::print_final_stats(&summary);
        Ok(summary)
    }
}

/// 合并流程结果与关闭浏览器的结果
///
/// 流程失败时返回流程的错误，关闭失败只记警告；流程成功时才报告关闭失败
fn settle_run(result: AppResult<RunSummary>, closed: AppResult<()>) -> AppResult<RunSummary> {
    match (result, closed) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(run_err), Ok(())) => Err(run_err),
        (Err(run_err), Err(close_err)) => {
            warn!("⚠️ 关闭浏览器失败: {}", close_err);
            Err(run_err)
        }
    }
}

/// 一次运行的结果
#[derive(Debug)]
pub struct RunSummary {
    pub processed: usize,
    pub receipts: Vec<PathBuf>,
    pub archive_path: PathBuf,
    pub archived_files: Vec<String>,
    pub elapsed: Duration,
}

/// 完整流程：打开网站 → 下载订单 → 逐个下单 → 打包收据
pub async fn run_order_pipeline<P: OrderPage>(
    page: &P,
    fetcher: &OrderFetcher,
    config: &Config,
) -> AppResult<RunSummary> {
    let started = Instant::now();
    let layout = OutputLayout::new(&config.output_dir);
    layout.prepare(config.clean_output).await?;

    open_robot_order_website(page, &config.order_page_url).await?;

    fetcher
        .download(&config.orders_csv_url, &config.orders_csv_path, true)
        .await?;

    let flow = OrderFlow::new(config);
    let stats = process_orders(page, &flow, &config.orders_csv_path).await?;

    info!("\n🗜️ 正在打包收据...");
    let archive = archive_folder_with_zip(&layout.receipts_dir(), &layout.archive_path())?;

    Ok(RunSummary {
        processed: stats.processed,
        receipts: stats.artifacts.into_iter().map(|a| a.receipt).collect(),
        archive_path: archive.archive_path,
        archived_files: archive.entries,
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, BrowserError, OrderError};

    fn summary() -> RunSummary {
        RunSummary {
            processed: 1,
            receipts: vec![PathBuf::from("output/receipts/1.pdf")],
            archive_path: PathBuf::from("output/receipts.zip"),
            archived_files: vec!["1.pdf".to_string()],
            elapsed: Duration::from_secs(1),
        }
    }

    fn close_failed() -> AppError {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: "browser already gone".into(),
        })
    }

    fn submit_failed() -> AppError {
        OrderError::SubmitRetriesExhausted {
            order_number: 4,
            attempts: 10,
        }
        .into()
    }

    #[test]
    fn test_pipeline_error_wins_over_close_error() {
        let err = settle_run(Err(submit_failed()), Err(close_failed())).unwrap_err();
        assert!(matches!(
            err,
            AppError::Order(OrderError::SubmitRetriesExhausted { order_number: 4, .. })
        ));
    }

    #[test]
    fn test_pipeline_error_kept_when_close_succeeds() {
        let err = settle_run(Err(submit_failed()), Ok(())).unwrap_err();
        assert!(matches!(err, AppError::Order(_)));
    }

    #[test]
    fn test_close_error_reported_after_successful_run() {
        let err = settle_run(Ok(summary()), Err(close_failed())).unwrap_err();
        assert!(matches!(err, AppError::Browser(_)));
    }

    #[test]
    fn test_successful_run_returns_summary() {
        let summary = settle_run(Ok(summary()), Ok(())).unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.archived_files, vec!["1.pdf"]);
    }
}
