use crate::source::Edge;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which of an edge's two histograms an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramKind {
    /// The thicker band quantized to 256 colors.
    Full,
    /// The thin band quantized to 16 colors.
    Border,
}

impl std::fmt::Display for HistogramKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistogramKind::Full => f.write_str("full"),
            HistogramKind::Border => f.write_str("border"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// The image engine could not be run, failed, or produced output that isn't a histogram.
    #[error("image engine failed: {message}")]
    Engine {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A histogram had no usable entries, so there is no color to pick.
    #[error("the {kind} histogram of the {edge} edge is empty")]
    EmptyHistogram { edge: Edge, kind: HistogramKind },

    #[error("invalid option: {name} = {value}")]
    InvalidOption { name: &'static str, value: String },
}

impl Error {
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
            source: None,
        }
    }

    pub fn engine_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Engine {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn invalid_option(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidOption {
            name,
            value: value.to_string(),
        }
    }
}
