#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::correctness)]
#![warn(clippy::complexity)]
#![warn(clippy::suspicious)]
#![warn(clippy::cargo)]

pub mod config;
pub mod error;
pub mod field;
pub mod linear_history;
pub mod set_field;
pub mod shared_history;
pub mod shared_target;
pub mod traits;

pub mod prelude {
	pub use crate::config::HistoryConfig;
	pub use crate::error::{OperationError, TargetError};
	pub use crate::field::Field;
	pub use crate::linear_history::LinearHistory;
	pub use crate::set_field::SetField;
	pub use crate::shared_history::SharedHistory;
	pub use crate::shared_target::SharedTarget;
	pub use crate::traits::history::History;
	pub use crate::traits::reversible_operation::ReversibleOperation;
}
