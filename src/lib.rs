pub mod config;
pub mod error;
pub mod form;
pub mod protocol;
pub mod services;

pub use error::{EntryError, ErrorKind};
pub use form::FormSession;
pub use protocol::{encode, EncodedLine, Pair, Record, ValidationError};
pub use services::write::{HttpLineWriter, LineWriter};
