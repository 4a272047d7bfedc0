//! 浏览器会话 - 基础设施层
//!
//! 持有唯一的 Browser / Page 资源，对外只暴露 [`OrderPage`] 能力

use std::time::{Duration, Instant};

use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, PrintToPdfParams};
use chromiumoxide::element::Element;
use chromiumoxide::{Browser, Page};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, BrowserError, ReceiptError};
use crate::infrastructure::{Locator, OrderPage};

/// 临时标记元素用的属性名
const TARGET_ATTR: &str = "data-robot-order-target";

/// 轮询元素的间隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 浏览器会话
///
/// 职责：
/// - 持有唯一的 Browser 和 Page
/// - 等待元素出现（超时后报 ElementNotFound）
/// - 每次操作后按 slowmo 放慢节奏
/// - 不认识订单，不处理业务流程
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    /// 是否由本程序启动（连接已有浏览器时不负责关闭）
    owns_browser: bool,
    element_timeout: Duration,
    slowmo: Duration,
}

impl BrowserSession {
    pub fn new(browser: Browser, page: Page, owns_browser: bool, config: &Config) -> Self {
        Self {
            browser,
            page,
            owns_browser,
            element_timeout: config.element_timeout(),
            slowmo: config.slowmo(),
        }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 关闭会话；连接的外部浏览器保持运行
    pub async fn close(mut self) -> AppResult<()> {
        if !self.owns_browser {
            debug!("浏览器不是本程序启动的，保持运行");
            return Ok(());
        }

        self.browser.close().await?;
        if let Err(e) = self.browser.wait().await {
            warn!("等待浏览器进程退出失败: {}", e);
        }
        debug!("浏览器已关闭");
        Ok(())
    }

    /// 等待元素出现，超时返回 ElementNotFound
    async fn wait_for(&self, locator: &Locator) -> AppResult<()> {
        let started = Instant::now();
        loop {
            if self.is_present(locator).await? {
                return Ok(());
            }
            if started.elapsed() >= self.element_timeout {
                debug!("等待元素超时 ({:?}): {}", self.element_timeout, locator);
                return Err(AppError::element_not_found(locator.to_string()));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// 找到元素句柄；非 CSS 定位器先打标记再用属性选择器查找
    async fn resolve(&self, locator: &Locator) -> AppResult<Element> {
        self.wait_for(locator).await?;

        let selector = match locator {
            Locator::Css(selector) => selector.clone(),
            _ => {
                let js = format!(
                    r#"(() => {{
                        document.querySelectorAll('[{attr}]').forEach(el => el.removeAttribute('{attr}'));
                        const el = {lookup};
                        if (!el) return false;
                        el.setAttribute('{attr}', '1');
                        return true;
                    }})()"#,
                    attr = TARGET_ATTR,
                    lookup = locator.js_lookup(),
                );
                if !self.eval_as::<bool>(js).await? {
                    return Err(AppError::element_not_found(locator.to_string()));
                }
                format!("[{TARGET_ATTR}='1']")
            }
        };

        self.page
            .find_element(selector)
            .await
            .map_err(|_| AppError::element_not_found(locator.to_string()))
    }

    async fn pause(&self) {
        if !self.slowmo.is_zero() {
            sleep(self.slowmo).await;
        }
    }
}

impl OrderPage for BrowserSession {
    async fn goto(&self, url: &str) -> AppResult<()> {
        debug!("导航到: {}", url);
        self.page.goto(url).await.map_err(|e| {
            AppError::Browser(BrowserError::NavigationFailed {
                url: url.to_string(),
                source: Box::new(e),
            })
        })?;
        self.pause().await;
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> AppResult<()> {
        debug!("点击: {}", locator);
        let element = self.resolve(locator).await?;
        element.click().await?;
        self.pause().await;
        Ok(())
    }

    async fn is_present(&self, locator: &Locator) -> AppResult<bool> {
        let js = format!("({}) !== null", locator.js_lookup());
        self.eval_as(js).await
    }

    async fn select_by_label(&self, locator: &Locator, label: &str) -> AppResult<()> {
        debug!("选择 {} -> {}", locator, label);
        self.wait_for(locator).await?;

        let js = format!(
            r#"(() => {{
                const el = {lookup};
                if (!el) return 'missing';
                const want = {label};
                const opt = Array.from(el.options || []).find(o => o.label.trim() === want || o.text.trim() === want);
                if (!opt) return 'no-option';
                const setter = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value').set;
                setter.call(el, opt.value);
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return 'ok';
            }})()"#,
            lookup = locator.js_lookup(),
            label = serde_json::Value::String(label.to_string()),
        );

        match self.eval_as::<String>(js).await?.as_str() {
            "ok" => {
                self.pause().await;
                Ok(())
            }
            "no-option" => Err(AppError::Browser(BrowserError::OptionNotFound {
                locator: locator.to_string(),
                label: label.to_string(),
            })),
            _ => Err(AppError::element_not_found(locator.to_string())),
        }
    }

    async fn fill(&self, locator: &Locator, value: &str) -> AppResult<()> {
        debug!("填写 {} -> {}", locator, value);
        self.wait_for(locator).await?;

        let js = format!(
            r#"(() => {{
                const el = {lookup};
                if (!el) return false;
                const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype;
                const setter = Object.getOwnPropertyDescriptor(proto, 'value').set;
                el.focus();
                setter.call(el, {value});
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            lookup = locator.js_lookup(),
            value = serde_json::Value::String(value.to_string()),
        );

        if !self.eval_as::<bool>(js).await? {
            return Err(AppError::element_not_found(locator.to_string()));
        }
        self.pause().await;
        Ok(())
    }

    async fn inner_html(&self, locator: &Locator) -> AppResult<String> {
        self.wait_for(locator).await?;
        let js = format!(
            "(() => {{ const el = {}; return el ? el.innerHTML : null; }})()",
            locator.js_lookup()
        );
        self.eval_as::<Option<String>>(js)
            .await?
            .ok_or_else(|| AppError::element_not_found(locator.to_string()))
    }

    async fn screenshot(&self, locator: &Locator) -> AppResult<Vec<u8>> {
        let element = self.resolve(locator).await?;
        let bytes = element.screenshot(CaptureScreenshotFormat::Png).await?;
        debug!("截图完成: {} ({} 字节)", locator, bytes.len());
        Ok(bytes)
    }

    async fn render_pdf(&self, html: &str) -> AppResult<Vec<u8>> {
        let scratch = self.browser.new_page("about:blank").await.map_err(|e| {
            AppError::Browser(BrowserError::PageCreationFailed {
                source: Box::new(e),
            })
        })?;

        let params = PrintToPdfParams {
            print_background: Some(true),
            ..Default::default()
        };
        let rendered = match scratch.set_content(html).await {
            Ok(_) => scratch.pdf(params).await,
            Err(e) => Err(e),
        };

        if let Err(e) = scratch.close().await {
            warn!("关闭临时页面失败: {}", e);
        }

        rendered.map_err(|e| {
            AppError::Receipt(ReceiptError::RenderFailed {
                source: Box::new(e),
            })
        })
    }
}
