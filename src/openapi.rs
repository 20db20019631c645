//! Generated API documentation, mounted only outside production.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::database::models::payment::PaymentType;
use crate::database::models::property::PropertyType;
use crate::database::models::user::UserRole;
use crate::database::models::{
    Lease, Owner, Payment, Property, PropertyImage, PropertyWithRelations, Session, Tenant, Unit,
    User,
};
use crate::handlers;
use crate::services::property_images::UploadUrl;
use crate::state::AppState;
use crate::validation::Issue;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RMS API",
        version = "1.0.0",
        description = "Rental Management System API Documentation"
    ),
    paths(
        handlers::index::welcome,
        handlers::auth::sign_up,
        handlers::auth::sign_in,
        handlers::auth::sign_out,
        handlers::auth::get_session,
        handlers::auth::verify_email,
        handlers::properties::list_properties,
        handlers::properties::create_property,
        handlers::properties::get_property,
        handlers::properties::update_property,
        handlers::properties::list_units,
        handlers::properties::create_unit,
        handlers::property_images::presigned_url,
        handlers::property_images::create_images,
        handlers::property_images::list_images,
        handlers::property_images::delete_image,
        handlers::units::list_units,
        handlers::units::get_unit,
        handlers::units::update_unit,
        handlers::units::list_leases,
        handlers::units::create_lease,
        handlers::leases::list_leases,
        handlers::leases::get_lease,
        handlers::leases::update_lease,
        handlers::leases::list_payments,
        handlers::leases::create_payment,
        handlers::tenants::list_tenants,
        handlers::tenants::create_tenant,
        handlers::tenants::get_tenant,
        handlers::tenants::update_tenant,
        handlers::tenants::list_leases,
    ),
    components(schemas(
        User,
        UserRole,
        Session,
        Owner,
        Tenant,
        Property,
        PropertyType,
        PropertyWithRelations,
        PropertyImage,
        UploadUrl,
        Unit,
        Lease,
        Payment,
        PaymentType,
        Issue,
    )),
    tags(
        (name = "Index"),
        (name = "Auth"),
        (name = "Properties"),
        (name = "Property images"),
        (name = "Units"),
        (name = "Leases"),
        (name = "Payments"),
        (name = "Tenants"),
    )
)]
pub struct ApiDoc;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/doc", get(doc))
        .merge(Scalar::with_url("/reference", ApiDoc::openapi()))
}

async fn doc() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_covers_the_owner_surface() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/owners/properties"));
        assert!(paths.contains_key("/api/owners/properties/{id}/images/presigned-url"));
        assert!(paths.contains_key("/api/owners/units/{id}/leases"));
        assert!(paths.contains_key("/api/owners/leases/{id}/payments"));
        assert!(paths.contains_key("/api/owners/tenants/{id}"));
        assert!(paths.contains_key("/api/auth/sign-in/email"));
    }
}
