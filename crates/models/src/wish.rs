//! `twishes` table: one row per calendar wish.
//!
//! Rows are created once with a caller-supplied id; afterwards only `status`
//! changes, and only when the stored `calendar_id` and `owner` match.
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Alias, Expr, OnConflict};
use sea_orm::{QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Wire keys follow the deployed client (`Id`, `CalendarId`, `Desc`, ...);
/// snake_case aliases are accepted on input.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "twishes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "Id", alias = "id")]
    pub id: i32,
    #[serde(rename = "CalendarId", alias = "calendar_id")]
    pub calendar_id: i32,
    #[serde(rename = "Owner", alias = "owner")]
    pub owner: String,
    #[serde(rename = "Status", alias = "status")]
    pub status: String,
    #[serde(rename = "Desc", alias = "description")]
    pub description: String,
    #[serde(rename = "Title", alias = "title")]
    pub title: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Result of a conditional upsert.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A row was inserted, or the existing row's status was written.
    Applied,
    /// The id exists but `calendar_id` or `owner` differ; nothing changed.
    Skipped,
}

/// All rows in storage order.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// `Ok(false)` when no row carries `id`; query failures are errors.
pub async fn exists<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let found: Option<i32> = Entity::find_by_id(id)
        .select_only()
        .column(Column::Id)
        .into_tuple()
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(found.is_some())
}

/// Insert the row, or on an id conflict overwrite `status` only when the
/// stored `calendar_id` and `owner` equal the incoming ones.
///
/// Runs as a single `INSERT .. ON CONFLICT (id) DO UPDATE .. WHERE ..`
/// statement, so concurrent writers on one id are ordered by the database.
pub async fn upsert<C: ConnectionTrait>(db: &C, wish: Model) -> Result<UpsertOutcome, ModelError> {
    let am = ActiveModel {
        id: Set(wish.id),
        calendar_id: Set(wish.calendar_id),
        owner: Set(wish.owner),
        status: Set(wish.status),
        description: Set(wish.description),
        title: Set(wish.title),
    };
    let affected = Entity::insert(am)
        .on_conflict(status_on_conflict())
        .exec_without_returning(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(if affected == 0 { UpsertOutcome::Skipped } else { UpsertOutcome::Applied })
}

fn status_on_conflict() -> OnConflict {
    let excluded = || Alias::new("excluded");
    let guard = Expr::col((Entity, Column::CalendarId))
        .eq(Expr::col((excluded(), Column::CalendarId)))
        .and(Expr::col((Entity, Column::Owner)).eq(Expr::col((excluded(), Column::Owner))));
    OnConflict::column(Column::Id)
        .update_column(Column::Status)
        .action_and_where(guard)
        .to_owned()
}
