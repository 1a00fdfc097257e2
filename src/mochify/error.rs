use thiserror::Error;

#[derive(Error, Debug)]
pub enum MochifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Front matter error: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, MochifyError>;
