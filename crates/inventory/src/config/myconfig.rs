use anyhow::{Context, Result, anyhow};

const DEFAULT_OTEL_ENDPOINT: &str = "http://otel-collector:4317";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub otel_endpoint: String,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;

        let run_migrations = parse_bool("RUN_MIGRATIONS", &run_migrations_str)?;

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = optional_var("DB_MIN_CONN")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("DB_MIN_CONN must be a valid u32 integer")?
            .unwrap_or(1);

        let db_max_conn = optional_var("DB_MAX_CONN")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("DB_MAX_CONN must be a valid u32 integer")?
            .unwrap_or(10);

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONN ({db_min_conn}) cannot exceed DB_MAX_CONN ({db_max_conn})"
            ));
        }

        let otel_endpoint =
            optional_var("OTEL_ENDPOINT").unwrap_or_else(|| DEFAULT_OTEL_ENDPOINT.to_string());

        let is_dev = optional_var("DEV_MODE")
            .map(|v| parse_bool("DEV_MODE", &v))
            .transpose()?
            .unwrap_or(false);

        let enable_file_log = optional_var("ENABLE_FILE_LOG")
            .map(|v| parse_bool("ENABLE_FILE_LOG", &v))
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            database_url,
            run_migrations,
            port,
            db_min_conn,
            db_max_conn,
            otel_endpoint,
            is_dev,
            enable_file_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_boolean_spellings() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "false").unwrap());
        assert!(parse_bool("X", "yes").is_err());
    }
}
