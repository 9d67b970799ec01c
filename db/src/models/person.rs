use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, DbErr, QueryOrder, Set};

/// A registered identity in the `people` table: a student or a faculty
/// member, looked up by their natural key (roll number or faculty ID).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "people")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub display_name: String,
    /// Roll number or faculty ID. Stored uppercased so lookups are
    /// case-insensitive exact matches. Immutable once created.
    #[sea_orm(unique)]
    pub natural_key: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub category: Category,
    pub year: Option<i32>,
    pub course: Option<String>,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "faculty")]
    Faculty,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_entry::Entity")]
    AttendanceEntries,
}

impl Related<super::attendance_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceEntries.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Normal form for natural keys: trimmed and uppercased.
pub fn normalize_natural_key(key: &str) -> String {
    key.trim().to_uppercase()
}

impl Model {
    /// Registers a new person. The password is argon2-hashed with a fresh
    /// salt; plaintext never reaches the database.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        display_name: &str,
        natural_key: &str,
        email: &str,
        password: &str,
        category: Category,
        year: Option<i32>,
        course: Option<&str>,
        department: Option<&str>,
    ) -> Result<Self, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DbErr::Custom(format!("Failed to hash password: {e}")))?
            .to_string();

        let now = Utc::now();
        let person = ActiveModel {
            display_name: Set(display_name.to_owned()),
            natural_key: Set(normalize_natural_key(natural_key)),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash),
            category: Set(category),
            year: Set(year),
            course: Set(course.map(|s| s.to_owned())),
            department: Set(department.map(|s| s.to_owned())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        person.insert(db).await
    }

    /// Case-insensitive exact-match lookup by roll number / faculty ID.
    pub async fn find_by_natural_key(
        db: &DatabaseConnection,
        natural_key: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::NaturalKey.eq(normalize_natural_key(natural_key)))
            .one(db)
            .await
    }

    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await
    }

    /// Authentication boundary: natural-key lookup plus password check.
    /// The category must match so a roll number cannot log in as faculty.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        category: Category,
        natural_key: &str,
        password: &str,
    ) -> Result<Option<Self>, DbErr> {
        let Some(person) = Self::find_by_natural_key(db, natural_key).await? else {
            return Ok(None);
        };
        if person.category != category || !person.verify_password(password) {
            return Ok(None);
        }
        Ok(Some(person))
    }

    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .and_then(|hash| Argon2::default().verify_password(password.as_bytes(), &hash))
            .is_ok()
    }

    /// Identity directory as a flat list, optionally filtered by category.
    pub async fn list(
        db: &DatabaseConnection,
        category: Option<Category>,
    ) -> Result<Vec<Self>, DbErr> {
        let mut query = Entity::find();
        if let Some(cat) = category {
            query = query.filter(Column::Category.eq(cat));
        }
        query.order_by_asc(Column::NaturalKey).all(db).await
    }
}
