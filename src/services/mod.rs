pub mod purchase;

pub use purchase::{PurchaseEngine, PurchaseError, PurchaseStage};
