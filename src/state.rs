use sqlx::PgPool;

/// Handles shared by every request. The pool is the only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
