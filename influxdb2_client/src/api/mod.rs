//! Sub-clients, one per area of the InfluxDB 2 API
//!
//! Obtain them from a [`Client`](crate::Client) rather than constructing them directly.

mod authorization;
mod bucket;
mod delete;
mod label;
mod organization;
mod query;
mod task;
mod user;
mod write;
mod write_blocking;

pub use authorization::AuthorizationsApi;
pub use bucket::BucketsApi;
pub use delete::DeleteApi;
pub use label::LabelsApi;
pub use organization::OrganizationsApi;
pub use query::QueryApi;
pub use task::TasksApi;
pub use user::UsersApi;
pub use write::{WriteApi, WriteClient};
pub use write_blocking::WriteApiBlocking;
