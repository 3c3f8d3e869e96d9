pub mod article;
pub mod cms;
pub mod config;
pub mod error;
pub mod locale;
pub mod paths;
pub mod render;
pub mod security;
pub mod server;
