pub mod client_config;
pub mod record;
pub mod upload;
