use derive_more::{Display, Error, From};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, From)]
pub enum Error {
    #[display("{message}")]
    #[from(ignore)]
    Custom { message: String },

    /// Caller handed the pipeline something it cannot work with. Carries the
    /// stage and input so the upstream bug is traceable from the log alone.
    #[display("invalid input ({stage}): {detail}")]
    #[from(ignore)]
    InvalidInput {
        stage: &'static str,
        detail: String,
    },

    #[display("io error: {_0}")]
    Io(std::io::Error),

    #[display("serialization error: {_0}")]
    Json(serde_json::Error),

    #[display("OpenAI error: {_0}")]
    OpenAi(async_openai::error::OpenAIError),

    #[display("http error: {_0}")]
    Http(reqwest::Error),
}

impl Error {
    pub fn custom(message: impl Into<String>) -> Self {
        Error::Custom {
            message: message.into(),
        }
    }

    pub fn invalid_input(stage: &'static str, detail: impl Into<String>) -> Self {
        Error::InvalidInput {
            stage,
            detail: detail.into(),
        }
    }
}
