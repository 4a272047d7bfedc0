use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 下载订单文件失败
    #[error("下载失败 ({url}): {source}")]
    Download { url: String, source: BoxError },
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 订单数据 / 下单流程错误
    #[error("订单错误: {0}")]
    Order(#[from] OrderError),
    /// 收据文档处理错误
    #[error("收据错误: {0}")]
    Receipt(#[from] ReceiptError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed { source: BoxError },
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed { port: u16, source: BoxError },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed { source: BoxError },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed { url: String, source: BoxError },
    /// 在等待时间内找不到元素
    #[error("找不到页面元素: {locator}")]
    ElementNotFound { locator: String },
    /// 下拉框中没有对应的选项
    #[error("下拉框 {locator} 中没有选项 '{label}'")]
    OptionNotFound { locator: String, label: String },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed { source: BoxError },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed { path: String, source: BoxError },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed { path: String, source: BoxError },
    /// 删除文件失败
    #[error("删除文件失败 ({path}): {source}")]
    DeleteFailed { path: String, source: BoxError },
    /// CSV 解析失败
    #[error("CSV解析失败 ({path}): {source}")]
    CsvParseFailed { path: String, source: BoxError },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 压缩归档失败
    #[error("压缩归档失败 ({path}): {source}")]
    ArchiveFailed { path: String, source: BoxError },
}

/// 订单相关错误
#[derive(Debug, Error)]
pub enum OrderError {
    /// 头部代码不在目录中
    #[error("未知的头部代码: '{code}'")]
    UnknownHeadCode { code: String },
    /// 身体选项超出范围
    #[error("身体选项 {index} 超出范围 [1, {max}]")]
    BodyOutOfRange { index: u32, max: u32 },
    /// 提交按钮点击次数耗尽
    #[error("订单 {order_number} 提交失败: 已尝试 {attempts} 次仍未出现 #order-another")]
    SubmitRetriesExhausted { order_number: u32, attempts: u32 },
}

/// 收据文档错误
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// PDF 读写失败
    #[error("PDF处理失败 ({path}): {source}")]
    PdfFailed { path: String, source: BoxError },
    /// PDF 中没有页面
    #[error("PDF中没有页面: {path}")]
    NoPages { path: String },
    /// 图片解码失败
    #[error("图片解码失败 ({path}): {source}")]
    ImageDecodeFailed { path: String, source: BoxError },
    /// 渲染 PDF 失败
    #[error("渲染PDF失败: {source}")]
    RenderFailed { source: BoxError },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 浏览器配置无效
    #[error("浏览器配置无效: {message}")]
    InvalidBrowserConfig { message: String },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建下载失败错误
    pub fn download_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Download {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// 创建元素未找到错误
    pub fn element_not_found(locator: impl Into<String>) -> Self {
        AppError::Browser(BrowserError::ElementNotFound {
            locator: locator.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建 PDF 处理错误
    pub fn pdf_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Receipt(ReceiptError::PdfFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 是否为"找不到元素"类错误
    pub fn is_element_not_found(&self) -> bool {
        matches!(
            self,
            AppError::Browser(BrowserError::ElementNotFound { .. })
                | AppError::Browser(BrowserError::OptionNotFound { .. })
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = AppError::from(OrderError::SubmitRetriesExhausted {
            order_number: 7,
            attempts: 3,
        });
        let msg = err.to_string();
        assert!(msg.contains("订单 7"));
        assert!(msg.contains("3 次"));
    }

    #[test]
    fn test_is_element_not_found() {
        assert!(AppError::element_not_found("#head").is_element_not_found());
        let other = AppError::from(OrderError::UnknownHeadCode {
            code: "9".to_string(),
        });
        assert!(!other.is_element_not_found());
    }

    #[test]
    fn test_source_chain_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "磁盘已满");
        let err = AppError::file_write_failed("output/receipts/1.pdf", io);
        let source = std::error::Error::source(&err).expect("应包含 FileError");
        assert!(source.to_string().contains("磁盘已满"));
    }
}
