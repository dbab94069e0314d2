use std::fmt;

#[derive(Debug)]
pub struct FetchError {
    pub url: String,
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn transport(url: impl Into<String>, err: impl std::error::Error) -> Self {
        Self {
            url: url.into(),
            status: None,
            message: err.to_string(),
        }
    }

    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status: Some(status),
            message: format!("server responded with status {status}"),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}: {}", self.url, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn invalid(name: &str, value: &str, reason: impl fmt::Display) -> Self {
        Self {
            message: format!("invalid {name}={value:?}: {reason}"),
        }
    }

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

impl From<reqwest::Error> for ConfigError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("failed to build http client: {err}"))
    }
}
