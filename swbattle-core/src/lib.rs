//! SWBATTLE Core - Battle logic and reference data
//!
//! This crate provides the game rules and data model:
//! - Battle categories and candidate entities
//! - Comparison of two entities on the category's attribute
//! - Random selection of battle pairs
//! - Score tracking and the player-facing battle session
//! - Resource catalog with JSON snapshot persistence

pub mod battle;
pub mod catalog;
pub mod compare;
pub mod entity;
pub mod error;
pub mod score;
pub mod select;
pub mod session;

// Re-exports for convenient access
pub use battle::{compatible_pool, run_battle, Battle};
pub use catalog::{
    Catalog, NewPerson, NewPlanet, NewSpecies, NewStarship, NewVehicle, Person, PersonPatch,
    Planet, Record, Species, Starship, StarshipPatch, Table, Vehicle,
};
pub use compare::{compare, Outcome, Winner};
pub use entity::{BattleField, Category, Entity};
pub use error::{CatalogError, Result};
pub use score::{apply_outcome, ScoreState};
pub use select::select_sample;
pub use session::{BattleSession, CardView};
