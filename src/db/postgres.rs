//! PostgreSQL-backed repository

use super::queries::{
    COUNT_MISSIONS_BY_SCIENTIST, CREATE_SCHEMA, DELETE_SCIENTIST, FIND_SCIENTIST, INSERT_MISSION,
    INSERT_PLANET, INSERT_SCIENTIST, LIST_PLANETS, LIST_SCIENTISTS, LOCK_SCIENTIST,
    MISSIONS_BY_PLANET, MISSIONS_BY_SCIENTIST, UPDATE_SCIENTIST,
};
use super::{Repository, StoreError};
use crate::models::{Mission, NewMission, NewPlanet, Planet, Scientist, ScientistFields};
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::error::SqlState;
use tokio_postgres::Row;
use tracing::{debug, info};

/// Repository over a deadpool connection pool
pub struct PgRepository {
    pool: Pool,
}

impl PgRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create the tables if they don't exist
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        client.batch_execute(CREATE_SCHEMA).await?;
        info!("Database tables initialized");
        Ok(())
    }
}

fn scientist_from_row(row: &Row) -> Scientist {
    Scientist {
        id: row.get("id"),
        name: row.get("name"),
        field_of_study: row.get("field_of_study"),
    }
}

fn planet_from_row(row: &Row) -> Planet {
    Planet {
        id: row.get("id"),
        name: row.get("name"),
        distance_from_earth: row.get("distance_from_earth"),
        nearest_star: row.get("nearest_star"),
    }
}

fn mission_from_row(row: &Row) -> Mission {
    Mission {
        id: row.get("id"),
        name: row.get("name"),
        scientist_id: row.get("scientist_id"),
        planet_id: row.get("planet_id"),
    }
}

/// Foreign-key violations carry their own meaning; everything else stays opaque
fn classify(e: tokio_postgres::Error) -> StoreError {
    if e.code() == Some(&SqlState::FOREIGN_KEY_VIOLATION) {
        let constraint = e
            .as_db_error()
            .and_then(|db| db.constraint())
            .unwrap_or_default();
        if constraint.contains("planet") {
            StoreError::MissingReference("planet")
        } else {
            StoreError::MissingReference("scientist")
        }
    } else {
        StoreError::Database(e)
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn list_scientists(&self) -> Result<Vec<Scientist>, StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        let rows = tx.query(LIST_SCIENTISTS, &[]).await?;
        tx.commit().await?;

        Ok(rows.iter().map(scientist_from_row).collect())
    }

    async fn find_scientist(&self, id: i32) -> Result<Option<Scientist>, StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        let row = tx.query_opt(FIND_SCIENTIST, &[&id]).await?;
        tx.commit().await?;

        Ok(row.as_ref().map(scientist_from_row))
    }

    async fn insert_scientist(&self, fields: ScientistFields) -> Result<Scientist, StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        let row = tx
            .query_one(INSERT_SCIENTIST, &[&fields.name, &fields.field_of_study])
            .await
            .map_err(classify)?;
        tx.commit().await?;

        Ok(scientist_from_row(&row))
    }

    async fn update_scientist(
        &self,
        id: i32,
        fields: ScientistFields,
    ) -> Result<Option<Scientist>, StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        let row = tx
            .query_opt(UPDATE_SCIENTIST, &[&id, &fields.name, &fields.field_of_study])
            .await
            .map_err(classify)?;
        tx.commit().await?;

        Ok(row.as_ref().map(scientist_from_row))
    }

    async fn delete_scientist(&self, id: i32) -> Result<Option<u64>, StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;

        // A mission insert referencing this row waits on the lock, so the
        // count below is exactly what the cascade removes.
        if tx.query_opt(LOCK_SCIENTIST, &[&id]).await?.is_none() {
            return Ok(None);
        }
        let missions: i64 = tx
            .query_one(COUNT_MISSIONS_BY_SCIENTIST, &[&id])
            .await?
            .get("missions");
        tx.execute(DELETE_SCIENTIST, &[&id]).await?;
        tx.commit().await?;

        debug!("Scientist {} deleted along with {} missions", id, missions);
        Ok(Some(missions.max(0) as u64))
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        let rows = tx.query(LIST_PLANETS, &[]).await?;
        tx.commit().await?;

        Ok(rows.iter().map(planet_from_row).collect())
    }

    async fn insert_planet(&self, planet: NewPlanet) -> Result<Planet, StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        let row = tx
            .query_one(
                INSERT_PLANET,
                &[&planet.name, &planet.distance_from_earth, &planet.nearest_star],
            )
            .await
            .map_err(classify)?;
        tx.commit().await?;

        Ok(planet_from_row(&row))
    }

    async fn insert_mission(&self, mission: NewMission) -> Result<Mission, StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        let row = tx
            .query_one(
                INSERT_MISSION,
                &[&mission.name, &mission.scientist_id, &mission.planet_id],
            )
            .await
            .map_err(classify)?;
        tx.commit().await?;

        Ok(mission_from_row(&row))
    }

    async fn find_missions_by_scientist(&self, scientist_id: i32) -> Result<Vec<Mission>, StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        let rows = tx.query(MISSIONS_BY_SCIENTIST, &[&scientist_id]).await?;
        tx.commit().await?;

        Ok(rows.iter().map(mission_from_row).collect())
    }

    async fn find_missions_by_planet(&self, planet_id: i32) -> Result<Vec<Mission>, StoreError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        let rows = tx.query(MISSIONS_BY_PLANET, &[&planet_id]).await?;
        tx.commit().await?;

        Ok(rows.iter().map(mission_from_row).collect())
    }
}
