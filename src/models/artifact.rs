//! 输出文件布局
//!
//! 收据、截图的路径只由订单号决定

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, AppResult, FileError};

/// 输出目录布局
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn receipts_dir(&self) -> PathBuf {
        self.root.join("receipts")
    }

    pub fn screenshots_dir(&self) -> PathBuf {
        self.root.join("screenshots")
    }

    pub fn receipt_path(&self, order_number: u32) -> PathBuf {
        self.receipts_dir().join(format!("{order_number}.pdf"))
    }

    pub fn screenshot_path(&self, order_number: u32) -> PathBuf {
        self.screenshots_dir().join(format!("{order_number}.png"))
    }

    /// 压缩包放在收据目录之外，避免把自己打包进去
    pub fn archive_path(&self) -> PathBuf {
        self.root.join("receipts.zip")
    }

    /// 创建输出目录；`clean` 为 true 时删除上次运行留下的文件
    pub async fn prepare(&self, clean: bool) -> AppResult<()> {
        for dir in [self.receipts_dir(), self.screenshots_dir()] {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| AppError::file_write_failed(dir.display().to_string(), e))?;

            if clean {
                remove_files_in(&dir).await?;
            }
        }
        Ok(())
    }
}

async fn remove_files_in(dir: &Path) -> AppResult<()> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| AppError::file_read_failed(dir.display().to_string(), e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(dir.display().to_string(), e))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        if file_type.is_file() {
            debug!("删除旧文件: {}", path.display());
            tokio::fs::remove_file(&path).await.map_err(|e| {
                AppError::File(FileError::DeleteFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })
            })?;
        }
    }
    Ok(())
}

/// 单个订单生成的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderArtifacts {
    pub order_number: u32,
    pub receipt: PathBuf,
    pub screenshot: PathBuf,
}
