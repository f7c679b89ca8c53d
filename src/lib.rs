pub mod config;
pub mod contract;
pub mod error;
pub mod escape;
pub mod files;
pub mod store;

mod name;

pub use config::NameConfig;
pub use contract::ContractResult;
pub use error::{ContractError, FaultKind};
pub use escape::{DEFAULT_DELIMITER, ESCAPE_CHARACTER};
pub use name::{Name, NameRecord};
pub use store::{ComponentStore, StoreKind};
