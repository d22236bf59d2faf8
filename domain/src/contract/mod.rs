//! Contract helpers that need no chain access.

pub mod template;

pub use template::ContractTemplate;
