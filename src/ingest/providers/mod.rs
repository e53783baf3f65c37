// src/ingest/providers/mod.rs
pub mod cmc;
pub mod cnn;

pub use cmc::CmcProvider;
pub use cnn::CnnProvider;
