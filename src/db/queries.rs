//! SQL query constants
//!
//! Contains all SQL used by the application. Identity columns never hand out
//! a value twice, so ids stay unique after deletes.

/// Creates the three tables if they are missing
pub const CREATE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS scientists (
        id INTEGER GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        name TEXT NOT NULL,
        field_of_study TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS planets (
        id INTEGER GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        name TEXT,
        distance_from_earth INTEGER,
        nearest_star TEXT
    );

    CREATE TABLE IF NOT EXISTS missions (
        id INTEGER GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        name TEXT NOT NULL,
        scientist_id INTEGER NOT NULL REFERENCES scientists(id) ON DELETE CASCADE,
        planet_id INTEGER NOT NULL REFERENCES planets(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_missions_scientist_id ON missions(scientist_id);
    CREATE INDEX IF NOT EXISTS idx_missions_planet_id ON missions(planet_id);
"#;

pub const LIST_SCIENTISTS: &str = r#"
    SELECT id, name, field_of_study
    FROM scientists
    ORDER BY id
"#;

pub const FIND_SCIENTIST: &str = r#"
    SELECT id, name, field_of_study
    FROM scientists
    WHERE id = $1
"#;

pub const INSERT_SCIENTIST: &str = r#"
    INSERT INTO scientists (name, field_of_study)
    VALUES ($1, $2)
    RETURNING id, name, field_of_study
"#;

pub const UPDATE_SCIENTIST: &str = r#"
    UPDATE scientists
    SET name = $2, field_of_study = $3
    WHERE id = $1
    RETURNING id, name, field_of_study
"#;

/// Holds the row until commit so the mission count can't go stale before the delete
pub const LOCK_SCIENTIST: &str = r#"
    SELECT id
    FROM scientists
    WHERE id = $1
    FOR UPDATE
"#;

pub const COUNT_MISSIONS_BY_SCIENTIST: &str = r#"
    SELECT COUNT(*) AS missions
    FROM missions
    WHERE scientist_id = $1
"#;

pub const DELETE_SCIENTIST: &str = r#"
    DELETE FROM scientists
    WHERE id = $1
"#;

pub const LIST_PLANETS: &str = r#"
    SELECT id, name, distance_from_earth, nearest_star
    FROM planets
    ORDER BY id
"#;

pub const INSERT_PLANET: &str = r#"
    INSERT INTO planets (name, distance_from_earth, nearest_star)
    VALUES ($1, $2, $3)
    RETURNING id, name, distance_from_earth, nearest_star
"#;

pub const INSERT_MISSION: &str = r#"
    INSERT INTO missions (name, scientist_id, planet_id)
    VALUES ($1, $2, $3)
    RETURNING id, name, scientist_id, planet_id
"#;

pub const MISSIONS_BY_SCIENTIST: &str = r#"
    SELECT id, name, scientist_id, planet_id
    FROM missions
    WHERE scientist_id = $1
    ORDER BY id
"#;

pub const MISSIONS_BY_PLANET: &str = r#"
    SELECT id, name, scientist_id, planet_id
    FROM missions
    WHERE planet_id = $1
    ORDER BY id
"#;
