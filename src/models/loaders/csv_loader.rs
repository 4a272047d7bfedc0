use crate::error::{AppError, AppResult, FileError};
use crate::models::order::OrderRow;
use std::fs::File;
use std::path::{Path, PathBuf};

/// 订单 CSV 读取器
///
/// 按文件顺序逐行产出订单，只能遍历一次
pub struct OrderReader {
    path: PathBuf,
    rows: csv::DeserializeRecordsIntoIter<File, OrderRow>,
}

impl OrderReader {
    /// 打开订单 CSV（按表头映射列）
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(FileError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_path(&path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        Ok(Self {
            rows: reader.into_deserialize(),
            path,
        })
    }
}

impl Iterator for OrderReader {
    type Item = AppResult<OrderRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = &self.path;
        self.rows.next().map(|row| {
            row.map_err(|e| {
                AppError::File(FileError::CsvParseFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })
            })
        })
    }
}

/// 一次性读取所有订单（遇到第一条坏数据即失败）
pub fn load_orders(path: impl AsRef<Path>) -> AppResult<Vec<OrderRow>> {
    OrderReader::open(path)?.collect()
}
