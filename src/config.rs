use std::net::{IpAddr, SocketAddr};

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Builds the config from `lookup`, which returns the value of a variable
    /// if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .with_context(|| format!("{} must be set", key))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| String::from("5"))
            .parse()
            .context("DB_MAX_CONNECTIONS must be a valid u32")?;
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| String::from("0.0.0.0"))
            .parse()
            .context("BIND_ADDR must be an IP address")?;
        let port = lookup("PORT")
            .unwrap_or_else(|| String::from("8000"))
            .parse()
            .context("PORT must be a valid u16")?;

        Ok(Config {
            database_url,
            db_max_connections,
            jwt_secret,
            bind_addr,
            port,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
