use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, DbErr, IntoActiveModel, QueryOrder, Set};

use super::person;

/// One row of the attendance ledger: a person's check-in/check-out for a
/// single calendar day. At most one entry exists per (person, date); the
/// unique index in the migration enforces it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "attendance_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub person_id: i64,
    pub date: NaiveDate,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub status: Status,
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
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "absent")]
    Absent,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id"
    )]
    Person,
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanAction {
    CheckIn,
    CheckOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanRejection {
    /// No person matches the scanned natural key.
    UnknownIdentity,
    /// Both check-in and check-out are already recorded for today.
    AlreadyCompleted,
}

/// Result of feeding one scan event through the session matcher.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Accepted {
        action: ScanAction,
        person: person::Model,
        entry: Model,
    },
    Rejected(ScanRejection),
}

impl Model {
    /// Session matcher: decides whether a scan is a check-in or a
    /// check-out and mutates the ledger accordingly.
    ///
    /// - Unknown natural key → `Rejected(UnknownIdentity)`, ledger untouched.
    /// - No entry for (person, today) → insert a Present entry with
    ///   `check_in_time = now`, check-out empty.
    /// - Entry with empty check-out → set `check_out_time = now` only.
    /// - Entry with both times set → `Rejected(AlreadyCompleted)`, the row
    ///   is left exactly as it was.
    pub async fn record_scan(
        db: &DatabaseConnection,
        natural_key: &str,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome, DbErr> {
        let Some(person) = person::Model::find_by_natural_key(db, natural_key).await? else {
            return Ok(ScanOutcome::Rejected(ScanRejection::UnknownIdentity));
        };

        let today = now.date_naive();
        let time = now.time().with_nanosecond(0).unwrap_or_else(|| now.time());

        let existing = Entity::find()
            .filter(Column::PersonId.eq(person.id))
            .filter(Column::Date.eq(today))
            .one(db)
            .await?;

        match existing {
            None => {
                let entry = ActiveModel {
                    person_id: Set(person.id),
                    date: Set(today),
                    check_in_time: Set(Some(time)),
                    check_out_time: Set(None),
                    status: Set(Status::Present),
                    ..Default::default()
                }
                .insert(db)
                .await?;

                tracing::info!(person = %person.natural_key, %today, "checked in");
                Ok(ScanOutcome::Accepted {
                    action: ScanAction::CheckIn,
                    person,
                    entry,
                })
            }
            Some(entry) if entry.check_out_time.is_none() => {
                // Out-of-order timestamps are stored as-is; the ledger
                // records what was scanned, not what was plausible.
                if entry.check_in_time.is_some_and(|check_in| time < check_in) {
                    tracing::warn!(
                        person = %person.natural_key,
                        %today,
                        "check-out time precedes check-in time"
                    );
                }

                let mut active = entry.into_active_model();
                active.check_out_time = Set(Some(time));
                let entry = active.update(db).await?;

                tracing::info!(person = %person.natural_key, %today, "checked out");
                Ok(ScanOutcome::Accepted {
                    action: ScanAction::CheckOut,
                    person,
                    entry,
                })
            }
            Some(_) => Ok(ScanOutcome::Rejected(ScanRejection::AlreadyCompleted)),
        }
    }

    pub async fn find_for_day(
        db: &DatabaseConnection,
        person_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::PersonId.eq(person_id))
            .filter(Column::Date.eq(date))
            .one(db)
            .await
    }

    /// Ledger query as a flat list, optionally narrowed by day and person.
    pub async fn list(
        db: &DatabaseConnection,
        date: Option<NaiveDate>,
        person_id: Option<i64>,
    ) -> Result<Vec<Self>, DbErr> {
        let mut query = Entity::find();
        if let Some(d) = date {
            query = query.filter(Column::Date.eq(d));
        }
        if let Some(p) = person_id {
            query = query.filter(Column::PersonId.eq(p));
        }
        query
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }
}
