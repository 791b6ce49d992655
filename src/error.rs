use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid style: {0}")]
    InvalidStyle(String),

    #[error("chart engine failure: {0}")]
    Engine(String),

    #[error("settings storage failure: {0}")]
    Storage(String),
}
