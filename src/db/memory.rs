//! In-memory repository used by handler tests
//!
//! Behaves like the PostgreSQL schema: ids come from counters that never go
//! backwards, mission inserts check both references, and deleting a
//! scientist cascades to its missions.

use super::{Repository, StoreError};
use crate::models::{Mission, NewMission, NewPlanet, Planet, Scientist, ScientistFields};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    scientists: BTreeMap<i32, Scientist>,
    planets: BTreeMap<i32, Planet>,
    missions: BTreeMap<i32, Mission>,
    scientist_seq: i32,
    planet_seq: i32,
    mission_seq: i32,
}

fn next_id(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

/// Thread-safe in-memory store
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn list_scientists(&self) -> Result<Vec<Scientist>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.scientists.values().cloned().collect())
    }

    async fn find_scientist(&self, id: i32) -> Result<Option<Scientist>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.scientists.get(&id).cloned())
    }

    async fn insert_scientist(&self, fields: ScientistFields) -> Result<Scientist, StoreError> {
        let mut tables = self.tables.write().await;
        let scientist = Scientist {
            id: next_id(&mut tables.scientist_seq),
            name: fields.name,
            field_of_study: fields.field_of_study,
        };
        tables.scientists.insert(scientist.id, scientist.clone());
        Ok(scientist)
    }

    async fn update_scientist(
        &self,
        id: i32,
        fields: ScientistFields,
    ) -> Result<Option<Scientist>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.scientists.get_mut(&id).map(|scientist| {
            scientist.name = fields.name;
            scientist.field_of_study = fields.field_of_study;
            scientist.clone()
        }))
    }

    async fn delete_scientist(&self, id: i32) -> Result<Option<u64>, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.scientists.remove(&id).is_none() {
            return Ok(None);
        }
        let before = tables.missions.len();
        tables.missions.retain(|_, mission| mission.scientist_id != id);
        Ok(Some((before - tables.missions.len()) as u64))
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.planets.values().cloned().collect())
    }

    async fn insert_planet(&self, planet: NewPlanet) -> Result<Planet, StoreError> {
        let mut tables = self.tables.write().await;
        let planet = Planet {
            id: next_id(&mut tables.planet_seq),
            name: planet.name,
            distance_from_earth: planet.distance_from_earth,
            nearest_star: planet.nearest_star,
        };
        tables.planets.insert(planet.id, planet.clone());
        Ok(planet)
    }

    async fn insert_mission(&self, mission: NewMission) -> Result<Mission, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.scientists.contains_key(&mission.scientist_id) {
            return Err(StoreError::MissingReference("scientist"));
        }
        if !tables.planets.contains_key(&mission.planet_id) {
            return Err(StoreError::MissingReference("planet"));
        }
        let mission = Mission {
            id: next_id(&mut tables.mission_seq),
            name: mission.name,
            scientist_id: mission.scientist_id,
            planet_id: mission.planet_id,
        };
        tables.missions.insert(mission.id, mission.clone());
        Ok(mission)
    }

    async fn find_missions_by_scientist(&self, scientist_id: i32) -> Result<Vec<Mission>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .missions
            .values()
            .filter(|m| m.scientist_id == scientist_id)
            .cloned()
            .collect())
    }

    async fn find_missions_by_planet(&self, planet_id: i32) -> Result<Vec<Mission>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .missions
            .values()
            .filter(|m| m.planet_id == planet_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(name: &str, field_of_study: &str) -> ScientistFields {
        ScientistFields {
            name: name.to_string(),
            field_of_study: field_of_study.to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_increase_and_are_not_reused() {
        let repo = MemoryRepository::new();
        let first = repo.insert_scientist(fields("Ada", "CS")).await.unwrap();
        let second = repo.insert_scientist(fields("Grace", "CS")).await.unwrap();
        assert!(second.id > first.id);

        repo.delete_scientist(second.id).await.unwrap();
        let third = repo.insert_scientist(fields("Katherine", "Math")).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_mission_requires_existing_references() {
        let repo = MemoryRepository::new();
        let scientist = repo.insert_scientist(fields("Ada", "CS")).await.unwrap();
        let planet = repo.insert_planet(NewPlanet::new("Mars", 140, "Sun")).await.unwrap();

        let dangling_planet = repo
            .insert_mission(NewMission {
                name: "Lost".to_string(),
                scientist_id: scientist.id,
                planet_id: planet.id + 1,
            })
            .await;
        assert!(matches!(dangling_planet, Err(StoreError::MissingReference("planet"))));

        let dangling_scientist = repo
            .insert_mission(NewMission {
                name: "Lost".to_string(),
                scientist_id: scientist.id + 1,
                planet_id: planet.id,
            })
            .await;
        assert!(matches!(dangling_scientist, Err(StoreError::MissingReference("scientist"))));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_missions() {
        let repo = MemoryRepository::new();
        let ada = repo.insert_scientist(fields("Ada", "CS")).await.unwrap();
        let grace = repo.insert_scientist(fields("Grace", "CS")).await.unwrap();
        let mars = repo.insert_planet(NewPlanet::new("Mars", 140, "Sun")).await.unwrap();

        for (name, scientist_id) in [("Ares I", ada.id), ("Ares II", ada.id), ("Phobos", grace.id)] {
            repo.insert_mission(NewMission {
                name: name.to_string(),
                scientist_id,
                planet_id: mars.id,
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.delete_scientist(ada.id).await.unwrap(), Some(2));
        assert!(repo.find_missions_by_scientist(ada.id).await.unwrap().is_empty());

        let remaining = repo.find_missions_by_planet(mars.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Phobos");

        assert_eq!(repo.delete_scientist(ada.id).await.unwrap(), None);
    }
}
