pub type NutrigraphResult<T> = Result<T, NutrigraphError>;

#[derive(thiserror::Error, Debug)]
pub enum NutrigraphError {
    /// A malformed serving request (non-integer identifier or serving size).
    /// Aborts the whole request-reading phase.
    #[error("request parse error: {0}")]
    RequestParse(String),

    /// The request list ended in the middle of a triple. Distinct from a
    /// malformed triple; also aborts the read.
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// The dataset itself is malformed (non-numeric non-sentinel value, or
    /// an always-present field missing). Stops the batch.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    /// A layout precondition was violated (empty wheel, unknown core macro,
    /// degenerate calorie total).
    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NutrigraphError {
    pub fn request_parse(msg: impl Into<String>) -> Self {
        Self::RequestParse(msg.into())
    }

    pub fn unexpected_eof(msg: impl Into<String>) -> Self {
        Self::UnexpectedEof(msg.into())
    }

    pub fn data_integrity(msg: impl Into<String>) -> Self {
        Self::DataIntegrity(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
