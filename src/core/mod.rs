pub mod access_package_assignment_policies;
pub mod access_package_assignment_requests;
pub mod access_package_catalogs;
pub mod access_packages;
pub mod client;
pub mod named_locations;

pub use crate::domain::odata::Query;
pub use crate::domain::ports::{Anonymous, Authorizer, StaticToken};
pub use crate::utils::error::Result;
pub use client::{ApiResponse, ApiVersion, Client, RequestInput, Uri};
