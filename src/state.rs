use crate::db::DbPool;
use crate::revalidate::Revalidator;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub revalidator: Revalidator,
}
