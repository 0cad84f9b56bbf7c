mod config;
mod types;

pub(crate) use config::DATA_STORE;
