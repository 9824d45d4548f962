mod build;
pub mod document;
mod request;
mod response;
mod types;

pub use build::*;
pub use request::*;
pub use response::*;
pub use types::*;
