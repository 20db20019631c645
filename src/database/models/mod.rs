pub mod lease;
pub mod owner;
pub mod payment;
pub mod property;
pub mod property_image;
pub mod session;
pub mod tenant;
pub mod unit;
pub mod user;

pub use lease::{CreateLeaseInput, Lease, UpdateLeaseInput};
pub use owner::Owner;
pub use payment::{CreatePaymentInput, Payment, PaymentType};
pub use property::{
    CreatePropertyInput, Property, PropertyType, PropertyWithRelations, UpdatePropertyInput,
};
pub use property_image::{CreatePropertyImageInput, PropertyImage, UploadUrlInput};
pub use session::{Account, Session, Verification};
pub use tenant::{CreateTenantInput, Tenant, UpdateTenantInput};
pub use unit::{CreateUnitInput, Unit, UpdateUnitInput};
pub use user::{SignInInput, SignUpInput, User, UserRole};
