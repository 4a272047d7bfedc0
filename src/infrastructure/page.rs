//! 页面能力接口
//!
//! 下单流程只依赖这里的能力，不直接接触浏览器

use crate::error::AppResult;
use crate::infrastructure::Locator;

/// 下单流程需要的页面操作
///
/// 整个运行期间只有一个实现者持有页面，按引用在流程中传递
#[allow(async_fn_in_trait)]
pub trait OrderPage {
    /// 导航到指定地址
    async fn goto(&self, url: &str) -> AppResult<()>;

    /// 点击元素，找不到时返回 ElementNotFound
    async fn click(&self, locator: &Locator) -> AppResult<()>;

    /// 元素当前是否存在（不等待）
    async fn is_present(&self, locator: &Locator) -> AppResult<bool>;

    /// 按显示文字选择下拉框选项
    async fn select_by_label(&self, locator: &Locator, label: &str) -> AppResult<()>;

    /// 清空并填写输入框
    async fn fill(&self, locator: &Locator, value: &str) -> AppResult<()>;

    /// 读取元素的 innerHTML
    async fn inner_html(&self, locator: &Locator) -> AppResult<String>;

    /// 截取元素的 PNG 图片
    async fn screenshot(&self, locator: &Locator) -> AppResult<Vec<u8>>;

    /// 把一段 HTML 渲染成 PDF
    async fn render_pdf(&self, html: &str) -> AppResult<Vec<u8>>;
}
