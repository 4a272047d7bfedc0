pub mod archive;
pub mod order_fetcher;
pub mod receipt;

pub use archive::{archive_folder_with_zip, ArchiveSummary};
pub use order_fetcher::{DownloadOutcome, OrderFetcher};
pub use receipt::{embed_image_into_pdf, wrap_receipt_html, write_artifact};
