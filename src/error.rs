use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record at byte {offset}: {reason}")]
    MalformedRecord { offset: usize, reason: &'static str },

    #[error("no line break within {lookback} bytes before byte {offset}")]
    LineTooLong { offset: usize, lookback: usize },

    #[error("mean of {key} does not fit a fixed-point value")]
    MeanOutOfRange { key: String },

    #[error("input contains no records")]
    EmptyInput,

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl Error {
    pub(crate) fn malformed(offset: usize, reason: &'static str) -> Error {
        Error::MalformedRecord { offset, reason }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Error {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
