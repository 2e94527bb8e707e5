pub mod analysis;
pub mod arguments;
pub mod config;
pub mod errors;
pub mod logger;
pub mod paths;
pub mod run;
pub mod services;
pub mod snapshots;
pub mod sync;

#[cfg(feature = "telegram")]
pub mod telegram;
#[cfg(feature = "web")]
pub mod webserver;
