use std::sync::Arc;

use sqlx::PgPool;

use crate::mail::Mailer;
use crate::storage::Storage;

/// Shared per-process resources: the connection pool, the object-storage
/// client and the mail queue handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub storage: Arc<Storage>,
    pub mailer: Mailer,
}
