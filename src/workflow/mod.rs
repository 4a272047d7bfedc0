pub mod order_ctx;
pub mod order_flow;
pub mod selectors;
pub mod site;

pub use order_ctx::OrderCtx;
pub use order_flow::{embed_screenshot_to_receipt, OrderFlow};
pub use site::{dismiss_dialog, open_robot_order_website};
