pub mod error;
pub mod export;
pub mod io;
pub mod merge;
pub mod model;

pub use error::{Result, ToolError};
