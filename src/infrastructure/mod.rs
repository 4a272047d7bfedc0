pub mod locator;
pub mod page;
pub mod session;

pub use locator::Locator;
pub use page::OrderPage;
pub use session::BrowserSession;
