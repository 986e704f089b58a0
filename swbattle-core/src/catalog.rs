//! Resource catalog - people, starships, planets, species and vehicles
//!
//! Rows are kept in id order per table and persisted as a single JSON
//! snapshot. Battle pools for each category are derived from here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::{Category, Entity};
use crate::error::{CatalogError, Result};

const UNKNOWN: &str = "Unknown";

/// A row with an integer primary key
pub trait Record {
    /// Resource name used in error messages
    const KIND: &'static str;

    fn id(&self) -> i64;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub mass: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct Starship {
    pub id: i64,
    pub name: String,
    pub crew: u64,
    pub model: String,
    pub manufacturer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct Planet {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub population: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct Species {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
}

impl Record for Person {
    const KIND: &'static str = "Person";
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Starship {
    const KIND: &'static str = "Starship";
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Planet {
    const KIND: &'static str = "Planet";
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Species {
    const KIND: &'static str = "Species";
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Vehicle {
    const KIND: &'static str = "Vehicle";
    fn id(&self) -> i64 {
        self.id
    }
}

// ============================================================================
// INPUTS
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct NewPerson {
    pub name: String,
    pub mass: u64,
    pub height: Option<u64>,
    pub gender: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct PersonPatch {
    pub name: Option<String>,
    pub mass: Option<u64>,
    pub height: Option<u64>,
    pub gender: Option<String>,
}

/// New starship; model and manufacturer fall back to "Unknown"
#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct NewStarship {
    pub name: String,
    pub crew: u64,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct StarshipPatch {
    pub name: Option<String>,
    pub crew: Option<u64>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct NewPlanet {
    pub name: String,
    pub population: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct NewSpecies {
    pub name: String,
    pub language: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct NewVehicle {
    pub name: String,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
}

// ============================================================================
// TABLE
// ============================================================================

/// Rows of one resource kind, kept in insertion order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Table<T> {
    fn from(rows: Vec<T>) -> Self {
        Self { rows }
    }
}

impl<T: Record> Table<T> {
    pub fn all(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Next free id: one past the largest id in use
    pub fn next_id(&self) -> i64 {
        self.rows.iter().map(Record::id).max().unwrap_or(0) + 1
    }

    /// Insert a row built from a freshly assigned id
    pub fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> &T {
        let row = build(self.next_id());
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    pub fn update(&mut self, id: i64, apply: impl FnOnce(&mut T)) -> Result<&T> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(CatalogError::NotFound { resource: T::KIND, id })?;
        apply(row);
        Ok(row)
    }

    pub fn remove(&mut self, id: i64) -> Result<T> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or(CatalogError::NotFound { resource: T::KIND, id })?;
        Ok(self.rows.remove(index))
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// All reference data served by the API
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub people: Table<Person>,
    #[serde(default)]
    pub starships: Table<Starship>,
    #[serde(default)]
    pub planets: Table<Planet>,
    #[serde(default)]
    pub species: Table<Species>,
    #[serde(default)]
    pub vehicles: Table<Vehicle>,
}

impl Catalog {
    /// Load a catalog snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = serde_json::from_str(&content)?;
        Ok(catalog)
    }

    /// Save the catalog as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Battle candidates for `category`
    pub fn pool(&self, category: Category) -> Vec<Entity> {
        match category {
            Category::People => self.people.all().iter().map(Entity::from).collect(),
            Category::Starships => self.starships.all().iter().map(Entity::from).collect(),
        }
    }

    /// Row counts per resource, for logging
    pub fn counts(&self) -> [(&'static str, usize); 5] {
        [
            ("people", self.people.len()),
            ("starships", self.starships.len()),
            ("planets", self.planets.len()),
            ("species", self.species.len()),
            ("vehicles", self.vehicles.len()),
        ]
    }

    pub fn create_person(&mut self, input: NewPerson) -> Result<Person> {
        require_name(&input.name)?;
        let person = self.people.insert_with(|id| Person {
            id,
            name: input.name,
            mass: input.mass,
            height: input.height,
            gender: input.gender,
        });
        Ok(person.clone())
    }

    pub fn update_person(&mut self, id: i64, patch: PersonPatch) -> Result<Person> {
        if let Some(name) = &patch.name {
            require_name(name)?;
        }
        let person = self.people.update(id, |p| {
            if let Some(name) = patch.name {
                p.name = name;
            }
            if let Some(mass) = patch.mass {
                p.mass = mass;
            }
            if patch.height.is_some() {
                p.height = patch.height;
            }
            if patch.gender.is_some() {
                p.gender = patch.gender;
            }
        })?;
        Ok(person.clone())
    }

    pub fn delete_person(&mut self, id: i64) -> Result<Person> {
        self.people.remove(id)
    }

    pub fn create_starship(&mut self, input: NewStarship) -> Result<Starship> {
        require_name(&input.name)?;
        let ship = self.starships.insert_with(|id| Starship {
            id,
            name: input.name,
            crew: input.crew,
            model: or_unknown(input.model),
            manufacturer: or_unknown(input.manufacturer),
        });
        Ok(ship.clone())
    }

    pub fn update_starship(&mut self, id: i64, patch: StarshipPatch) -> Result<Starship> {
        if let Some(name) = &patch.name {
            require_name(name)?;
        }
        let ship = self.starships.update(id, |s| {
            if let Some(name) = patch.name {
                s.name = name;
            }
            if let Some(crew) = patch.crew {
                s.crew = crew;
            }
            if let Some(model) = patch.model {
                s.model = model;
            }
            if let Some(manufacturer) = patch.manufacturer {
                s.manufacturer = manufacturer;
            }
        })?;
        Ok(ship.clone())
    }

    pub fn delete_starship(&mut self, id: i64) -> Result<Starship> {
        self.starships.remove(id)
    }

    pub fn create_planet(&mut self, input: NewPlanet) -> Result<Planet> {
        require_name(&input.name)?;
        let planet = self.planets.insert_with(|id| Planet {
            id,
            name: input.name,
            population: input.population,
        });
        Ok(planet.clone())
    }

    pub fn delete_planet(&mut self, id: i64) -> Result<Planet> {
        self.planets.remove(id)
    }

    pub fn create_species(&mut self, input: NewSpecies) -> Result<Species> {
        require_name(&input.name)?;
        let species = self.species.insert_with(|id| Species {
            id,
            name: input.name,
            language: input.language,
        });
        Ok(species.clone())
    }

    pub fn delete_species(&mut self, id: i64) -> Result<Species> {
        self.species.remove(id)
    }

    pub fn create_vehicle(&mut self, input: NewVehicle) -> Result<Vehicle> {
        require_name(&input.name)?;
        let vehicle = self.vehicles.insert_with(|id| Vehicle {
            id,
            name: input.name,
            model: input.model,
            manufacturer: input.manufacturer,
        });
        Ok(vehicle.clone())
    }

    pub fn delete_vehicle(&mut self, id: i64) -> Result<Vehicle> {
        self.vehicles.remove(id)
    }
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::MissingField("name"));
    }
    Ok(())
}

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luke() -> NewPerson {
        NewPerson {
            name: "Luke Skywalker".to_string(),
            mass: 77,
            height: Some(172),
            gender: Some("male".to_string()),
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut catalog = Catalog::default();
        let a = catalog.create_person(luke()).unwrap();
        let b = catalog
            .create_person(NewPerson {
                name: "Darth Vader".to_string(),
                mass: 136,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(catalog.people.get(2).unwrap().name, "Darth Vader");
    }

    #[test]
    fn test_ids_follow_largest_after_delete() {
        let mut catalog = Catalog::default();
        for _ in 0..3 {
            catalog.create_person(luke()).unwrap();
        }
        catalog.delete_person(2).unwrap();

        let next = catalog.create_person(luke()).unwrap();
        assert_eq!(next.id, 4);
        assert_eq!(catalog.people.len(), 3);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut catalog = Catalog::default();
        let err = catalog
            .create_person(NewPerson {
                name: "  ".to_string(),
                mass: 10,
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, CatalogError::MissingField("name")));
        assert!(catalog.people.is_empty());
    }

    #[test]
    fn test_starship_defaults_unknown() {
        let mut catalog = Catalog::default();
        let ship = catalog
            .create_starship(NewStarship {
                name: "X-wing".to_string(),
                crew: 1,
                model: Some(String::new()),
                manufacturer: None,
            })
            .unwrap();

        assert_eq!(ship.model, "Unknown");
        assert_eq!(ship.manufacturer, "Unknown");
    }

    #[test]
    fn test_update_person() {
        let mut catalog = Catalog::default();
        catalog.create_person(luke()).unwrap();

        let updated = catalog
            .update_person(
                1,
                PersonPatch {
                    mass: Some(80),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.mass, 80);
        assert_eq!(updated.name, "Luke Skywalker");
        assert_eq!(updated.height, Some(172));
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut catalog = Catalog::default();
        let err = catalog
            .update_starship(9, StarshipPatch::default())
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::NotFound {
                resource: "Starship",
                id: 9
            }
        ));
        assert!(catalog.delete_vehicle(1).is_err());
    }

    #[test]
    fn test_pool_per_category() {
        let mut catalog = Catalog::default();
        catalog.create_person(luke()).unwrap();
        catalog
            .create_starship(NewStarship {
                name: "X-wing".to_string(),
                crew: 1,
                ..Default::default()
            })
            .unwrap();

        let people = catalog.pool(Category::People);
        assert_eq!(people, vec![Entity::new(1, "Luke Skywalker").with_mass(77)]);

        let ships = catalog.pool(Category::Starships);
        assert_eq!(ships, vec![Entity::new(1, "X-wing").with_crew(1)]);
    }

    #[test]
    fn test_save_and_load() {
        let mut catalog = Catalog::default();
        catalog.create_person(luke()).unwrap();
        catalog
            .create_planet(NewPlanet {
                name: "Tatooine".to_string(),
                population: Some(200000),
            })
            .unwrap();
        catalog
            .create_species(NewSpecies {
                name: "Wookie".to_string(),
                language: Some("Shyriiwook".to_string()),
            })
            .unwrap();

        let path = std::env::temp_dir().join(format!("swbattle-catalog-{}.json", std::process::id()));
        catalog.save(&path).unwrap();
        let loaded = Catalog::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_load_partial_snapshot() {
        let json = r#"{ "people": [ { "id": 5, "name": "Yoda", "mass": 17 } ] }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();

        assert_eq!(catalog.people.len(), 1);
        assert!(catalog.starships.is_empty());
        assert_eq!(catalog.people.next_id(), 6);
    }

    #[test]
    fn test_zero_mass_and_crew_accepted() {
        let mut catalog = Catalog::default();
        let droid = catalog
            .create_person(NewPerson {
                name: "R2-D2".to_string(),
                mass: 0,
                ..Default::default()
            })
            .unwrap();
        let pod = catalog
            .create_starship(NewStarship {
                name: "Escape pod".to_string(),
                crew: 0,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(droid.mass, 0);
        assert_eq!(pod.crew, 0);
        assert!(catalog.pool(Category::People)[0].is_compatible(Category::People));
        assert!(catalog.pool(Category::Starships)[0].is_compatible(Category::Starships));
    }
}
