use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Could not open output file: {0}")]
    OutputError(String),

    #[error("File read failed: {0}")]
    FileReadError(String),

    #[error("Tokenizer Error: {0}")]
    TokenizerError(String),
}

impl From<std::io::Error> for DumpError {
    fn from(err: std::io::Error) -> Self {
        DumpError::IoError(err.to_string())
    }
}
