use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("No source image loaded")]
    MissingSource,

    #[error("Failed to load asset: {0}")]
    AssetLoad(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Failed to read input file: {0}")]
    InputRead(String),

    #[error("Failed to write output file: {0}")]
    OutputWrite(String),

    #[error("Failed to encode PNG image: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
