//! 打开下单网站

use tracing::{debug, info};

use crate::error::AppResult;
use crate::infrastructure::OrderPage;
use crate::workflow::selectors;

/// 打开下单页面并关闭弹窗
pub async fn open_robot_order_website<P: OrderPage>(page: &P, url: &str) -> AppResult<()> {
    info!("🌐 打开下单页面: {}", url);
    page.goto(url).await?;
    dismiss_dialog(page).await
}

/// 点击弹窗上的 "OK" 按钮
pub async fn dismiss_dialog<P: OrderPage>(page: &P) -> AppResult<()> {
    page.click(&selectors::dialog_ok()).await?;
    debug!("已关闭弹窗");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::infrastructure::Locator;
    use std::cell::Cell;

    /// 只模拟弹窗的页面：`shows_dialog` 为 false 时打开页面后没有弹窗
    struct DialogPage {
        shows_dialog: bool,
        dialog_open: Cell<bool>,
        ok_clicks: Cell<u32>,
    }

    impl DialogPage {
        fn new(shows_dialog: bool) -> Self {
            Self {
                shows_dialog,
                dialog_open: Cell::new(false),
                ok_clicks: Cell::new(0),
            }
        }
    }

    impl OrderPage for DialogPage {
        async fn goto(&self, _url: &str) -> AppResult<()> {
            self.dialog_open.set(self.shows_dialog);
            Ok(())
        }

        async fn click(&self, locator: &Locator) -> AppResult<()> {
            if *locator == selectors::dialog_ok() {
                self.ok_clicks.set(self.ok_clicks.get() + 1);
                if !self.dialog_open.replace(false) {
                    return Err(AppError::element_not_found(locator.to_string()));
                }
            }
            Ok(())
        }

        async fn is_present(&self, _locator: &Locator) -> AppResult<bool> {
            Ok(self.dialog_open.get())
        }

        async fn select_by_label(&self, _locator: &Locator, _label: &str) -> AppResult<()> {
            Ok(())
        }

        async fn fill(&self, _locator: &Locator, _value: &str) -> AppResult<()> {
            Ok(())
        }

        async fn inner_html(&self, _locator: &Locator) -> AppResult<String> {
            Ok(String::new())
        }

        async fn screenshot(&self, _locator: &Locator) -> AppResult<Vec<u8>> {
            Ok(Vec::new())
        }

        async fn render_pdf(&self, _html: &str) -> AppResult<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_open_dismisses_dialog() {
        let page = DialogPage::new(true);
        open_robot_order_website(&page, "https://robotsparebinindustries.com/#/robot-order")
            .await
            .unwrap();
        assert!(!page.dialog_open.get());
        assert_eq!(page.ok_clicks.get(), 1);
    }

    #[tokio::test]
    async fn test_open_without_dialog_fails_without_retry() {
        let page = DialogPage::new(false);
        let err = open_robot_order_website(&page, "https://robotsparebinindustries.com/#/robot-order")
            .await
            .unwrap_err();
        assert!(err.is_element_not_found());
        assert!(err.to_string().contains("text=OK"));
        assert_eq!(page.ok_clicks.get(), 1);
    }

    #[tokio::test]
    async fn test_dismiss_dialog_when_already_closed_fails() {
        let page = DialogPage::new(true);
        dismiss_dialog(&page).await.unwrap_err();

        page.goto("about:blank").await.unwrap();
        dismiss_dialog(&page).await.unwrap();
        let err = dismiss_dialog(&page).await.unwrap_err();
        assert!(err.is_element_not_found());
    }
}
