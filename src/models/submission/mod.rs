mod filter;
mod queries;
mod types;

pub use filter::*;
pub use queries::*;
pub use types::*;
