//! One repository per entity, each wrapping owner- or parent-scoped
//! queries over the shared pool.
//!
//! Lookups return `None`/empty both when a row is absent and when it exists
//! under another owner; the two cases are indistinguishable on purpose and
//! callers must not try to tell them apart.

pub mod auth;
pub mod leases;
pub mod owners;
pub mod payments;
pub mod properties;
pub mod property_images;
pub mod tenants;
pub mod units;

pub use auth::AuthRepository;
pub use leases::LeasesRepository;
pub use owners::OwnersRepository;
pub use payments::PaymentsRepository;
pub use properties::PropertiesRepository;
pub use property_images::PropertyImagesRepository;
pub use tenants::TenantsRepository;
pub use units::UnitsRepository;
