pub mod influx;
pub mod proxy;
pub mod write;
