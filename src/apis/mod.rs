pub mod organizations;
pub mod telegraf_plugins;
pub mod users;

// Re-export all APIs
pub use organizations::OrganizationsApi;
pub use telegraf_plugins::TelegrafPluginsApi;
pub use users::UsersApi;
