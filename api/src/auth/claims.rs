use db::models::person::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Person ID.
    pub sub: i64,
    pub exp: usize,
    pub category: Category,
    /// Roll number / faculty ID, in normal (uppercase) form.
    pub natural_key: String,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
