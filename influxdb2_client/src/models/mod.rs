//! Request and response types of the InfluxDB 2 API

mod authorization;
mod bucket;
mod data_point;
mod delete;
mod health;
mod label;
mod links;
mod organization;
mod permission;
mod query;
mod resource;
mod setup;
mod task;
mod user;

pub use authorization::{Authorization, AuthorizationStatus, Authorizations};
pub use bucket::{Bucket, Buckets, RetentionRule, RetentionRuleType};
pub use data_point::{DataPoint, DataPointBuilder, FieldValue};
pub use health::{HealthCheck, HealthStatus};
pub use label::{Label, LabelResponse, LabelsResponse};
pub use links::Links;
pub use organization::{Organization, OrganizationStatus, Organizations};
pub use permission::{Action, Permission};
pub use query::{Annotations, DateTimeFormat, Dialect, Query};
pub use resource::{Resource, ResourceType};
pub use setup::{IsOnboarding, OnboardingResponse};
pub use task::{Task, TaskStatus, Tasks};
pub use user::{User, UserStatus, Users};

pub(crate) use authorization::AuthorizationUpdateRequest;
pub(crate) use bucket::PostBucketRequest;
pub(crate) use delete::DeletePredicateRequest;
pub(crate) use label::{LabelCreateRequest, LabelUpdate};
pub(crate) use organization::PostOrganizationRequest;
pub(crate) use setup::OnboardingRequest;
pub(crate) use task::TaskCreateRequest;
