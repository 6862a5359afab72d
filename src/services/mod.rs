pub mod credentials;
pub mod provisioning;
pub mod revocation;

pub use credentials::{Claims, CredentialError, TokenService};
pub use provisioning::AccountProvisioner;
pub use revocation::RevocationRegistry;

pub mod workforce_service;
pub mod workforce_service_impl;
pub use workforce_service::{Provisioned, WorkforceError, WorkforceService};
pub use workforce_service_impl::SeaOrmWorkforceService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;
