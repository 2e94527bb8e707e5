pub mod sync_service;
#[cfg(feature = "web")]
pub mod webserver_service;

pub use sync_service::SyncService;
#[cfg(feature = "web")]
pub use webserver_service::WebserverService;
