use serde::Deserialize;
use std::io::Read;
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use thiserror::*;
use url::Url;

use crate::model::UserId;
use crate::session::Session;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/";
pub const DEFAULT_SIGNIN_URL: &str = "http://localhost:3000/signin";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error {0} when reading config")]
    IoError(#[from] std::io::Error),
    #[error("cannot open config file '{0}' : {1}")]
    OpeningError(PathBuf, std::io::Error),
    #[error("UTF8 format error when reading config")]
    Utf8Error,
    #[error("format error {0} when reading config")]
    FormatError(#[from] serde_yaml::Error),
    #[error("invalid task store url '{0}': {1}")]
    InvalidUrl(String, url::ParseError),
}

#[derive(Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

#[derive(Clone, Default, Deserialize)]
pub struct SessionConfig {
    pub user_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub signin_url: Option<String>,
    pub log: Option<crate::log::Log>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            session: SessionConfig::default(),
            signin_url: None,
            log: None,
        }
    }
}

impl Config {
    pub fn from_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let p = path.as_ref();
        let mut file = File::open(p).map_err(|e| ConfigError::OpeningError(p.to_owned(), e))?;
        let mut contents = vec![];
        file.read_to_end(&mut contents)?;
        let contents = String::from_utf8(contents).map_err(|_| ConfigError::Utf8Error)?;
        let config = Config::from_str(&contents)?;
        Ok(config)
    }

    /// Values given on the command line or through the environment win over
    /// the file.
    pub fn with_overrides(mut self, api_url: Option<String>, user_id: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.remote.url = url;
        }
        if let Some(user_id) = user_id {
            self.session.user_id = Some(user_id);
        }
        self
    }

    pub fn api_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.remote.url)
            .map_err(|err| ConfigError::InvalidUrl(self.remote.url.clone(), err))
    }

    pub fn signin_url(&self) -> &str {
        self.signin_url.as_deref().unwrap_or(DEFAULT_SIGNIN_URL)
    }

    /// The configured session, if a non blank user id is known.
    pub fn session(&self) -> Option<Session> {
        let user_id = self.session.user_id.as_deref().map(str::trim)?;
        if user_id.is_empty() {
            return None;
        }
        Some(Session {
            user_id: UserId::from(user_id),
            email: self.session.email.clone(),
        })
    }
}
