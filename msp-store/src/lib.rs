pub mod app_config;
pub mod memory_repo;
pub mod settings_store;

pub use app_config::Config;
pub use memory_repo::InMemoryRepository;
pub use settings_store::ConfigSettingsService;
