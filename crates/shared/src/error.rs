#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered 401. Any such answer ends the session.
    #[error("{0}")]
    AuthExpired(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired(_))
    }

    /// Message safe to show to the user: server-supplied messages verbatim,
    /// `fallback` for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(msg) | Self::AuthExpired(msg) => msg.to_owned(),
            _ => fallback.to_owned(),
        }
    }

    /// Keeps server-supplied messages and replaces internal details with
    /// `fallback`, preserving the error kind.
    pub fn or_fallback(self, fallback: &str) -> Self {
        match self {
            Self::Validation(_) | Self::AuthExpired(_) => self,
            Self::Transport(detail) => {
                tracing::warn!(detail = %detail, "transport failure");
                Self::Transport(fallback.to_owned())
            }
            Self::Server(detail) => {
                tracing::error!(detail = %detail, "server failure");
                Self::Server(fallback.to_owned())
            }
            Self::Unknown(err) => {
                tracing::error!(err = %err, "unexpected failure");
                Self::Server(fallback.to_owned())
            }
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(value: validator::ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<time::error::Parse> for Error {
    fn from(value: time::error::Parse) -> Self {
        Self::Validation(format!("Invalid date: {value}"))
    }
}

impl From<time::error::ComponentRange> for Error {
    fn from(value: time::error::ComponentRange) -> Self {
        Self::Validation(format!("Invalid date: {value}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! user {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Validation(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Validation(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Validation(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! server {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Server(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}
