pub mod pending;
pub mod registry;

pub use pending::{PendingQuery, QueryState};
pub use registry::TransactionRegistry;
