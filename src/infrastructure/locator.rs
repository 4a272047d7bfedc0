//! 页面元素定位器
//!
//! 三种定位方式都可以转换成一段返回元素（或 null）的 JS 表达式

use std::fmt;

/// 页面元素定位器
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// CSS 选择器，如 `#head`
    Css(String),
    /// XPath 表达式
    XPath(String),
    /// 按钮文字完全匹配（去掉首尾空白）
    Text(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::XPath(expr.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Locator::Text(text.into())
    }

    /// 生成查找元素的 JS 表达式，结果为元素或 null
    pub fn js_lookup(&self) -> String {
        match self {
            Locator::Css(selector) => {
                format!("document.querySelector({})", js_string(selector))
            }
            Locator::XPath(expr) => format!(
                "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
                js_string(expr)
            ),
            Locator::Text(text) => format!(
                "(Array.from(document.querySelectorAll('button, [role=button], a, input[type=button], input[type=submit]')).find(el => (el.innerText || el.value || '').trim() === {}) || null)",
                js_string(text)
            ),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => write!(f, "{selector}"),
            Locator::XPath(expr) => write!(f, "xpath={expr}"),
            Locator::Text(text) => write!(f, "text={text}"),
        }
    }
}

/// 转成 JS 字符串字面量
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
