use std::path::PathBuf;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 下单页面地址
    pub order_page_url: String,
    /// 订单 CSV 下载地址
    pub orders_csv_url: String,
    /// 订单 CSV 本地保存路径
    pub orders_csv_path: PathBuf,
    /// 输出根目录（收据、截图、压缩包）
    pub output_dir: PathBuf,
    /// 浏览器调试端口，设置后连接已有浏览器而不是启动新的
    pub browser_debug_port: Option<u16>,
    /// 是否使用无头模式（打印 PDF 需要无头模式）
    pub headless: bool,
    /// 浏览器可执行文件路径
    pub chrome_executable: Option<PathBuf>,
    /// 每次页面操作后的等待时间（毫秒）
    pub slowmo_ms: u64,
    /// 等待页面元素出现的超时（毫秒）
    pub element_timeout_ms: u64,
    /// 提交按钮最多点击次数
    pub max_submit_attempts: u32,
    /// 两次提交之间的等待时间（毫秒）
    pub submit_retry_delay_ms: u64,
    /// 运行前清空收据和截图目录
    pub clean_output: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order_page_url: "https://robotsparebinindustries.com/#/robot-order".to_string(),
            orders_csv_url: "https://robotsparebinindustries.com/orders.csv".to_string(),
            orders_csv_path: PathBuf::from("orders.csv"),
            output_dir: PathBuf::from("output"),
            browser_debug_port: None,
            headless: true,
            chrome_executable: None,
            slowmo_ms: 300,
            element_timeout_ms: 10_000,
            max_submit_attempts: 10,
            submit_retry_delay_ms: 500,
            clean_output: true,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源读取配置，无法解析的值回退到默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            order_page_url: lookup("ROBOT_ORDER_URL").unwrap_or(default.order_page_url),
            orders_csv_url: lookup("ORDERS_CSV_URL").unwrap_or(default.orders_csv_url),
            orders_csv_path: lookup("ORDERS_CSV_PATH").map(PathBuf::from).unwrap_or(default.orders_csv_path),
            output_dir: lookup("OUTPUT_DIR").map(PathBuf::from).unwrap_or(default.output_dir),
            browser_debug_port: lookup("BROWSER_DEBUG_PORT").and_then(|v| v.parse().ok()).or(default.browser_debug_port),
            headless: lookup("HEADLESS").and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            chrome_executable: lookup("CHROME_EXECUTABLE").map(PathBuf::from).or(default.chrome_executable),
            slowmo_ms: lookup("SLOWMO_MS").and_then(|v| v.parse().ok()).unwrap_or(default.slowmo_ms),
            element_timeout_ms: lookup("ELEMENT_TIMEOUT_MS").and_then(|v| v.parse().ok()).unwrap_or(default.element_timeout_ms),
            max_submit_attempts: lookup("MAX_SUBMIT_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .filter(|n: &u32| *n > 0)
                .unwrap_or(default.max_submit_attempts),
            submit_retry_delay_ms: lookup("SUBMIT_RETRY_DELAY_MS").and_then(|v| v.parse().ok()).unwrap_or(default.submit_retry_delay_ms),
            clean_output: lookup("CLEAN_OUTPUT").and_then(|v| v.parse().ok()).unwrap_or(default.clean_output),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    pub fn slowmo(&self) -> Duration {
        Duration::from_millis(self.slowmo_ms)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn submit_retry_delay(&self) -> Duration {
        Duration::from_millis(self.submit_retry_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_fixed_task() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.order_page_url, "https://robotsparebinindustries.com/#/robot-order");
        assert_eq!(config.orders_csv_url, "https://robotsparebinindustries.com/orders.csv");
        assert_eq!(config.orders_csv_path, PathBuf::from("orders.csv"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.slowmo(), Duration::from_millis(300));
        assert!(config.browser_debug_port.is_none());
        assert!(config.headless);
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("OUTPUT_DIR", "/tmp/robots"),
            ("BROWSER_DEBUG_PORT", "9222"),
            ("MAX_SUBMIT_ATTEMPTS", "0"),
            ("SLOWMO_MS", "abc"),
            ("HEADLESS", "false"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.output_dir, PathBuf::from("/tmp/robots"));
        assert_eq!(config.browser_debug_port, Some(9222));
        assert!(!config.headless);
        // 0 次提交没有意义，回退默认值
        assert_eq!(config.max_submit_attempts, 10);
        assert_eq!(config.slowmo_ms, 300);
    }
}
