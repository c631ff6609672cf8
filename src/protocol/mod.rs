//! InfluxDB line protocol, restricted to the subset the entry form produces:
//! measurement, optional tags, one or more fields, no timestamp, no escaping.

pub mod encoder;
pub mod record;

pub use encoder::{encode, ValidationError};
pub use record::{EncodedLine, Pair, Record};
