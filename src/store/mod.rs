mod connection;
mod pool;
pub mod queries;
pub mod reader;
mod tables;
pub mod types;
pub mod writer;

pub use reader::Reader;
pub use writer::Writer;
