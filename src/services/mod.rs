pub mod preferences;
pub mod storage;
