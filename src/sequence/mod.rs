pub mod actor;
pub mod registry;
pub mod types;

pub use registry::{Handle, Registry};
