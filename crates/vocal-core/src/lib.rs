pub mod message;
pub mod types;

pub use message::{Action, Envelope, Request, Response};
pub use types::{NOT_AVAILABLE, WordEntry, available};
