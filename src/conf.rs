use config::{Config, Environment, File};
use serde::Deserialize;

use crate::prelude::Result;

/// Keys are read in snake case, or in the camelCase of a `config.json`.
/// Anything unset keeps its `Default`.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Settings {
    #[serde(alias = "serverPort", alias = "serverport")]
    pub server_port: u16,
    #[serde(alias = "databaseUrl", alias = "databaseurl")]
    pub database_url: String,
    #[serde(
        alias = "databasePoolMaxConnections",
        alias = "databasepoolmaxconnections"
    )]
    pub database_pool_max_connections: u32,
    //email
    #[serde(alias = "smtpHost", alias = "smtphost")]
    pub smtp_host: String,
    #[serde(alias = "smtpPort", alias = "smtpport")]
    pub smtp_port: u16,
    #[serde(alias = "smtpUsername", alias = "smtpusername")]
    pub smtp_username: String,
    #[serde(alias = "smtpPassword", alias = "smtppassword")]
    pub smtp_password: String,
    #[serde(alias = "smtpFrom", alias = "smtpfrom")]
    pub smtp_from: Option<String>,
    #[serde(alias = "adminAllowedOrigins", alias = "adminallowedorigins")]
    pub admin_allowed_origins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server_port: 8080,
            database_url: "sqlite://vacancies.db?mode=rwc".into(),
            database_pool_max_connections: 5,
            smtp_host: "localhost".into(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            smtp_from: None,
            admin_allowed_origins: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads the optional config file at `path` (any extension `config`
    /// understands), then environment variables, over the defaults.
    pub fn new(path: &str) -> Result<Self> {
        let conf = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::default()
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("admin_allowed_origins"),
            )
            .build()?;
        let mut s: Settings = conf.try_deserialize()?;
        s.admin_allowed_origins.retain(|o| !o.trim().is_empty());
        Ok(s)
    }

    pub fn sender(&self) -> &str {
        self.smtp_from
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or(&self.smtp_username)
    }
}
