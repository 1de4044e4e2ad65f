use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QuerySelect, Set,
};
use thiserror::Error;
use tracing::debug;

use crate::db::is_unique_violation;
use crate::domain::EntityKind;
use crate::entities::{clients, prelude::*, servers, users};

/// Returned when a natural key never became visible after repeated
/// insert-or-ignore rounds.
#[derive(Debug, Error)]
#[error("{kind} '{key}' could not be resolved after {attempts} attempts")]
pub struct ResolveContention {
    pub kind: EntityKind,
    pub key: String,
    pub attempts: u32,
}

/// Get-or-create for clients, servers and users, keyed by their unique name.
pub struct DirectoryRepository {
    conn: DatabaseConnection,
    max_attempts: u32,
}

impl DirectoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection, max_attempts: u32) -> Self {
        Self { conn, max_attempts }
    }

    /// Returns the id for `key`, inserting the row first if it does not exist.
    pub async fn resolve(&self, kind: EntityKind, key: &str) -> Result<i32> {
        match kind {
            EntityKind::Client => {
                self.get_or_create(kind, clients::Column::Id, clients::Column::Name, key, || {
                    clients::ActiveModel {
                        name: Set(key.to_string()),
                        ..Default::default()
                    }
                })
                .await
            }
            EntityKind::Server => {
                self.get_or_create(kind, servers::Column::Id, servers::Column::Name, key, || {
                    servers::ActiveModel {
                        name: Set(key.to_string()),
                        ..Default::default()
                    }
                })
                .await
            }
            EntityKind::User => {
                self.get_or_create(kind, users::Column::Id, users::Column::Username, key, || {
                    users::ActiveModel {
                        username: Set(key.to_string()),
                        ..Default::default()
                    }
                })
                .await
            }
        }
    }

    /// Lookup only; never inserts.
    pub async fn find(&self, kind: EntityKind, key: &str) -> Result<Option<i32>> {
        match kind {
            EntityKind::Client => {
                self.lookup::<Clients>(clients::Column::Id, clients::Column::Name, key)
                    .await
            }
            EntityKind::Server => {
                self.lookup::<Servers>(servers::Column::Id, servers::Column::Name, key)
                    .await
            }
            EntityKind::User => {
                self.lookup::<Users>(users::Column::Id, users::Column::Username, key)
                    .await
            }
        }
    }

    pub async fn count(&self, kind: EntityKind) -> Result<u64> {
        let count = match kind {
            EntityKind::Client => Clients::find().count(&self.conn).await?,
            EntityKind::Server => Servers::find().count(&self.conn).await?,
            EntityKind::User => Users::find().count(&self.conn).await?,
        };
        Ok(count)
    }

    async fn get_or_create<E, A, F>(
        &self,
        kind: EntityKind,
        id_column: E::Column,
        key_column: E::Column,
        key: &str,
        new_row: F,
    ) -> Result<i32>
    where
        E: EntityTrait,
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
        F: Fn() -> A + Send + Sync,
    {
        let mut attempts = 0;

        loop {
            if let Some(id) = self.lookup::<E>(id_column, key_column, key).await? {
                return Ok(id);
            }

            if attempts == self.max_attempts {
                return Err(ResolveContention {
                    kind,
                    key: key.to_string(),
                    attempts,
                }
                .into());
            }
            attempts += 1;

            // A concurrent writer may insert the same key between the lookup and
            // this insert; the unique index turns that into a no-op and the next
            // lookup picks up the winner's row.
            let inserted = E::insert(new_row())
                .on_conflict(OnConflict::column(key_column).do_nothing().to_owned())
                .exec_without_returning(&self.conn)
                .await;

            match inserted {
                Ok(0) => debug!(%kind, key, attempts, "Insert skipped, row already exists"),
                Ok(_) => debug!(%kind, key, "Created"),
                Err(e) if is_unique_violation(&e) => {
                    debug!(%kind, key, attempts, "Unique constraint rejected insert, re-reading");
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to insert {kind} '{key}'"));
                }
            }
        }
    }

    async fn lookup<E>(
        &self,
        id_column: E::Column,
        key_column: E::Column,
        key: &str,
    ) -> Result<Option<i32>>
    where
        E: EntityTrait,
    {
        let id = E::find()
            .select_only()
            .column(id_column)
            .filter(key_column.eq(key))
            .into_tuple::<i32>()
            .one(&self.conn)
            .await
            .context("Failed to look up natural key")?;

        Ok(id)
    }
}
