//! One thin client per backend resource family. Every method maps to a
//! single endpoint: build a route, delegate to the shared transport,
//! return the envelope. No caching, no retries.

mod actions;
mod assets;
mod group;
mod items;
mod labels;
mod locations;
mod notifiers;
mod reports;
mod stats;
mod users;

pub use actions::ActionsApi;
pub use assets::AssetsApi;
pub use group::GroupApi;
pub use items::{ItemAttachmentsApi, ItemFieldsApi, ItemMaintenanceApi, ItemQuery, ItemsApi};
pub use labels::LabelsApi;
pub use locations::LocationsApi;
pub use notifiers::NotifiersApi;
pub use reports::ReportsApi;
pub use stats::StatsApi;
pub use users::UserApi;
