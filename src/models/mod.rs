pub mod artifact;
pub mod head;
pub mod loaders;
pub mod order;

pub use artifact::{OrderArtifacts, OutputLayout};
pub use head::HeadModel;
pub use loaders::{load_orders, OrderReader};
pub use order::OrderRow;
