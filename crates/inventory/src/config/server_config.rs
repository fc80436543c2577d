use super::myconfig::Config;
use anyhow::{Context, Result};
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub http_addr: SocketAddr,
    pub database_url: String,
}

impl ServerConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http_addr = format!("0.0.0.0:{}", config.port)
            .parse()
            .context("Invalid HTTP address")?;

        Ok(Self {
            http_addr,
            database_url: config.database_url.clone(),
        })
    }
}
