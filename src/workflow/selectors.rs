//! 下单页面的元素定位

use crate::error::OrderError;
use crate::infrastructure::Locator;

/// 身体选项的数量
pub const BODY_OPTION_COUNT: u32 = 6;

pub const HEAD_SELECT: &str = "#head";
pub const LEGS_INPUT: &str = "input[placeholder='Enter the part number for the legs']";
pub const ADDRESS_INPUT: &str = "#address";
pub const ORDER_BUTTON: &str = "#order";
pub const ORDER_ANOTHER_BUTTON: &str = "#order-another";
pub const RECEIPT: &str = "#receipt";
pub const ROBOT_PREVIEW: &str = "#robot-preview-image";
pub const DIALOG_OK_TEXT: &str = "OK";

pub fn head_select() -> Locator {
    Locator::css(HEAD_SELECT)
}

pub fn legs_input() -> Locator {
    Locator::css(LEGS_INPUT)
}

pub fn address_input() -> Locator {
    Locator::css(ADDRESS_INPUT)
}

pub fn order_button() -> Locator {
    Locator::css(ORDER_BUTTON)
}

pub fn order_another_button() -> Locator {
    Locator::css(ORDER_ANOTHER_BUTTON)
}

pub fn receipt() -> Locator {
    Locator::css(RECEIPT)
}

pub fn robot_preview() -> Locator {
    Locator::css(ROBOT_PREVIEW)
}

pub fn dialog_ok() -> Locator {
    Locator::text(DIALOG_OK_TEXT)
}

/// 第 `index` 个身体选项的 label（从 1 开始）
///
/// 超出范围直接报错，不去页面上碰运气
pub fn body_option(index: u32) -> Result<Locator, OrderError> {
    if index == 0 || index > BODY_OPTION_COUNT {
        return Err(OrderError::BodyOutOfRange {
            index,
            max: BODY_OPTION_COUNT,
        });
    }
    Ok(Locator::xpath(format!(
        r#"//*[@id="root"]/div/div[1]/div/div[1]/form/div[2]/div/div[{index}]/label"#
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_option_in_range() {
        let locator = body_option(3).unwrap();
        assert_eq!(
            locator,
            Locator::xpath(r#"//*[@id="root"]/div/div[1]/div/div[1]/form/div[2]/div/div[3]/label"#)
        );
        assert!(body_option(1).is_ok());
        assert!(body_option(BODY_OPTION_COUNT).is_ok());
    }

    #[test]
    fn test_body_option_out_of_range() {
        for index in [0, BODY_OPTION_COUNT + 1, 42] {
            match body_option(index) {
                Err(OrderError::BodyOutOfRange { index: i, max }) => {
                    assert_eq!(i, index);
                    assert_eq!(max, BODY_OPTION_COUNT);
                }
                other => panic!("应当超出范围: {other:?}"),
            }
        }
    }
}
