//! Battle categories and battle candidates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Person, Starship};
use crate::error::CatalogError;

/// Battle mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    People,
    Starships,
}

/// The numeric attribute a category compares
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleField {
    Mass,
    Crew,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::People, Category::Starships];

    /// Field compared in this category
    pub fn field(self) -> BattleField {
        match self {
            Category::People => BattleField::Mass,
            Category::Starships => BattleField::Crew,
        }
    }

    /// Display label of the compared attribute
    pub fn label(self) -> &'static str {
        match self.field() {
            BattleField::Mass => "Mass",
            BattleField::Crew => "Crew",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::People => "people",
            Category::Starships => "starships",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "people" => Ok(Category::People),
            "starships" => Ok(Category::Starships),
            _ => Err(CatalogError::UnknownCategory(s.to_string())),
        }
    }
}

/// A battle candidate: a snapshot of a person or starship.
///
/// Only the field matching the battle category matters. An absent field is
/// not the same as zero: it makes the entity incompatible with that category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<u64>,
}

impl Entity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            mass: None,
            crew: None,
        }
    }

    pub fn with_mass(mut self, mass: u64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_crew(mut self, crew: u64) -> Self {
        self.crew = Some(crew);
        self
    }

    /// Value of the given field, if present
    pub fn value(&self, field: BattleField) -> Option<u64> {
        match field {
            BattleField::Mass => self.mass,
            BattleField::Crew => self.crew,
        }
    }

    /// Whether this entity carries the field compared by `category`
    pub fn is_compatible(&self, category: Category) -> bool {
        self.value(category.field()).is_some()
    }
}

impl From<&Person> for Entity {
    fn from(person: &Person) -> Self {
        Entity::new(person.id, person.name.clone()).with_mass(person.mass)
    }
}

impl From<&Starship> for Entity {
    fn from(ship: &Starship) -> Self {
        Entity::new(ship.id, ship.name.clone()).with_crew(ship.crew)
    }
}
