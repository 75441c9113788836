use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid buffer layout: {size} bytes aligned to {align}")]
    Layout { size: usize, align: usize },
    #[error("Invalid CHECKASM_SEED value {0:?}, expected a decimal or 0x-prefixed u64")]
    InvalidSeed(String),
    #[error("Unknown CPU flag {0:?}")]
    UnknownCpuFlag(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
