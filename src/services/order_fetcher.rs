//! 订单文件下载服务 - 业务能力层
//!
//! 只负责"把远程 CSV 下载到本地"能力

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// 下载结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// 已下载并写入（字节数）
    Downloaded(u64),
    /// 本地已存在且不允许覆盖
    Skipped,
}

/// 订单文件下载服务
pub struct OrderFetcher {
    client: reqwest::Client,
}

impl OrderFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// 带请求超时的下载服务
    pub fn with_timeout(timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::download_failed("<client>", e))?;
        Ok(Self { client })
    }

    /// 下载 `url` 到 `dest`
    ///
    /// # 参数
    /// - `overwrite`: 为 false 且文件已存在时跳过下载
    pub async fn download(&self, url: &str, dest: &Path, overwrite: bool) -> AppResult<DownloadOutcome> {
        if !overwrite && dest.exists() {
            info!("📄 {} 已存在，跳过下载", dest.display());
            return Ok(DownloadOutcome::Skipped);
        }

        info!("⬇️ 正在下载订单文件: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::download_failed(url, e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::download_failed(url, e))?;

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
        }

        tokio::fs::write(dest, &body)
            .await
            .map_err(|e| AppError::file_write_failed(dest.display().to_string(), e))?;

        debug!("写入 {} ({} 字节)", dest.display(), body.len());
        info!("✓ 订单文件已保存至: {}", dest.display());

        Ok(DownloadOutcome::Downloaded(body.len() as u64))
    }
}

impl Default for OrderFetcher {
    fn default() -> Self {
        Self::new()
    }
}
