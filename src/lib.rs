pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{ClientConfig, Environment, SdkConfig};
pub use crate::core::access_package_assignment_policies::AccessPackageAssignmentPolicyClient;
pub use crate::core::access_package_assignment_requests::AccessPackageAssignmentRequestClient;
pub use crate::core::access_package_catalogs::AccessPackageCatalogClient;
pub use crate::core::access_packages::AccessPackageClient;
pub use crate::core::named_locations::NamedLocationsClient;
pub use domain::ports::{Anonymous, Authorizer, StaticToken};
pub use utils::error::{GraphError, Result};
