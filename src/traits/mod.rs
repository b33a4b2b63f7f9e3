pub mod history;
pub mod reversible_operation;
