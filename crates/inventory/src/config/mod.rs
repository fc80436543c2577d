pub mod myconfig;
pub mod server_config;
