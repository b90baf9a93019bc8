use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemandError {
    #[error("demand graph parse error: {0}")]
    Parse(String),

    #[error("demand graph has no start distribution entries")]
    EmptyStartDistribution,

    #[error("arrival rate must be positive (cars: {cars}, horizon: {horizon_secs} s)")]
    NonPositiveRate { cars: u32, horizon_secs: u32 },

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DemandResult<T> = Result<T, DemandError>;
