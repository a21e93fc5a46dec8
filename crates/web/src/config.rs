use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

const DEFAULT_TOKEN_TTL_HOURS: i64 = 72;
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub release_mode: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
}

#[derive(Clone)]
pub struct AuthConfig {
    /// Login is refused with a configuration error while this is unset.
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT")
                .map(|port| port.parse::<u16>())
                .transpose()
                .context("PORT must be a number")?
                .unwrap_or(8080),
            database: DatabaseConfig {
                url: var("DATABASE_URL"),
                host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: var("DB_PORT")
                    .map(|port| port.parse::<u16>())
                    .transpose()
                    .context("DB_PORT must be a number")?
                    .unwrap_or(5432),
                user: var("DB_USER").unwrap_or_default(),
                password: var("DB_PASSWORD").unwrap_or_default(),
                name: var("DB_NAME").unwrap_or_default(),
                ssl_mode: var("DB_SSLMODE").unwrap_or_else(|| "disable".to_string()),
            },
            auth: AuthConfig {
                jwt_secret: var("JWT_SECRET"),
                token_ttl_hours: var("JWT_EXPIRES_HOURS")
                    .and_then(|hours| hours.trim().parse::<i64>().ok())
                    .filter(|hours| (1..=MAX_TOKEN_TTL_HOURS).contains(hours))
                    .unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
            },
            release_mode: var("APP_MODE").is_some_and(|mode| mode.eq_ignore_ascii_case("release")),
        })
    }
}

impl DatabaseConfig {
    /// `DATABASE_URL` wins over the individual `DB_*` settings.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return url
                .parse::<PgConnectOptions>()
                .context("DATABASE_URL is not a valid Postgres URL");
        }

        let ssl_mode = self
            .ssl_mode
            .parse::<PgSslMode>()
            .with_context(|| format!("Unsupported DB_SSLMODE: {}", self.ssl_mode))?;

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .ssl_mode(ssl_mode);

        if !self.user.is_empty() {
            options = options.username(&self.user);
        }
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if !self.name.is_empty() {
            options = options.database(&self.name);
        }

        Ok(options)
    }

    /// Connection target without credentials, for logging.
    pub fn display_target(&self) -> String {
        match &self.url {
            Some(url) => url.split('@').next_back().unwrap_or("unknown").to_string(),
            None => format!("{}:{}/{}", self.host, self.port, self.name),
        }
    }
}
