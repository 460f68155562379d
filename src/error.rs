use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to load resource `{resource}`: {message}")]
    ResourceLoad { resource: String, message: String },

    #[error("container `{0}` does not exist")]
    MissingContainer(String),

    #[error("schema mismatch: {0}")]
    Schema(String),

    #[error("row {row}: column `{column}` has unparseable value `{value}`")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },

    #[error("chart in container `{0}` was torn down")]
    Detached(String),
}

impl ChartError {
    pub(crate) fn resource_load(resource: impl Into<String>, message: impl ToString) -> Self {
        Self::ResourceLoad {
            resource: resource.into(),
            message: message.to_string(),
        }
    }
}
