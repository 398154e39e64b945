pub mod client_config;
pub mod corrections;
