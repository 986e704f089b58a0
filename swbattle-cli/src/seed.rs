//! Seed command - build a catalog snapshot from SWAPI
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: fetch_resources(), build_catalog()
//! - Level 3: fetch_all() - follow SWAPI pagination
//! - Level 4: parse_int() and record conversion

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use swbattle_core::{Catalog, Person, Planet, Species, Starship, Table, Vehicle};

const SWAPI_BASE_URL: &str = "https://swapi.dev/api";

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SeedArgs {
    /// Where to write the catalog snapshot
    #[arg(long, value_name = "FILE", default_value = "swbattle.json")]
    pub output: PathBuf,

    /// SWAPI base URL
    #[arg(long, default_value = SWAPI_BASE_URL)]
    pub base_url: String,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,
}

/// One page of a SWAPI listing
#[derive(Deserialize)]
struct Page<T> {
    results: Vec<T>,
    next: Option<String>,
}

#[derive(Deserialize)]
struct SwapiPerson {
    name: String,
    #[serde(default)]
    height: String,
    #[serde(default)]
    mass: String,
    #[serde(default)]
    gender: String,
}

#[derive(Deserialize)]
struct SwapiStarship {
    name: String,
    #[serde(default)]
    crew: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    manufacturer: String,
}

#[derive(Deserialize)]
struct SwapiPlanet {
    name: String,
    #[serde(default)]
    population: String,
}

#[derive(Deserialize)]
struct SwapiSpecies {
    name: String,
    #[serde(default)]
    language: String,
}

#[derive(Deserialize)]
struct SwapiVehicle {
    name: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    manufacturer: String,
}

/// Raw listings for every resource
struct Resources {
    people: Vec<SwapiPerson>,
    starships: Vec<SwapiStarship>,
    planets: Vec<SwapiPlanet>,
    species: Vec<SwapiSpecies>,
    vehicles: Vec<SwapiVehicle>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run seed command
///
/// 1. Fetch all five listings
/// 2. Convert into a catalog
/// 3. Write the snapshot
pub fn run(args: SeedArgs) -> Result<()> {
    tracing::info!("Seeding catalog from {}", args.base_url);

    let runtime = tokio::runtime::Runtime::new()?;
    let resources = runtime.block_on(fetch_resources(&args))?;

    let catalog = build_catalog(resources);
    catalog
        .save(&args.output)
        .with_context(|| format!("Failed to write catalog: {}", args.output.display()))?;

    for (resource, count) in catalog.counts() {
        tracing::info!("Seeded {} {}", count, resource);
    }
    tracing::info!("Catalog written to {}", args.output.display());

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

async fn fetch_resources(args: &SeedArgs) -> Result<Resources> {
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(args.insecure)
        .build()
        .context("Failed to build HTTP client")?;
    let base = args.base_url.as_str();

    let (people, starships, planets, species, vehicles) = tokio::try_join!(
        fetch_all::<SwapiPerson>(&client, base, "people"),
        fetch_all::<SwapiStarship>(&client, base, "starships"),
        fetch_all::<SwapiPlanet>(&client, base, "planets"),
        fetch_all::<SwapiSpecies>(&client, base, "species"),
        fetch_all::<SwapiVehicle>(&client, base, "vehicles"),
    )?;

    Ok(Resources {
        people,
        starships,
        planets,
        species,
        vehicles,
    })
}

/// Convert raw listings; ids are assigned 1..n in fetch order
fn build_catalog(resources: Resources) -> Catalog {
    Catalog {
        people: numbered(resources.people, |id, p| Person {
            id,
            name: p.name,
            mass: parse_magnitude(&p.mass),
            height: Some(parse_magnitude(&p.height)),
            gender: Some(p.gender),
        }),
        starships: numbered(resources.starships, |id, s| Starship {
            id,
            name: s.name,
            crew: parse_magnitude(&s.crew),
            model: s.model,
            manufacturer: s.manufacturer,
        }),
        planets: numbered(resources.planets, |id, p| Planet {
            id,
            name: p.name,
            population: Some(parse_int(&p.population)),
        }),
        species: numbered(resources.species, |id, s| Species {
            id,
            name: s.name,
            language: Some(s.language),
        }),
        vehicles: numbered(resources.vehicles, |id, v| Vehicle {
            id,
            name: v.name,
            model: Some(v.model),
            manufacturer: Some(v.manufacturer),
        }),
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Fetch every page of a listing, following `next` links
async fn fetch_all<T: DeserializeOwned>(
    client: &reqwest::Client,
    base_url: &str,
    endpoint: &str,
) -> Result<Vec<T>> {
    let mut results = Vec::new();
    let mut url = Some(format!("{}/{}/", base_url.trim_end_matches('/'), endpoint));

    while let Some(current) = url {
        tracing::debug!("GET {}", current);
        let page: Page<T> = client
            .get(&current)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("Request failed: {}", current))?
            .json()
            .await
            .with_context(|| format!("Unexpected response from {}", current))?;

        results.extend(page.results);
        url = page.next;
    }

    tracing::info!("Fetched {} {}", results.len(), endpoint);
    Ok(results)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn numbered<S, T>(rows: Vec<S>, build: impl Fn(i64, S) -> T) -> Table<T> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| build(i as i64 + 1, row))
        .collect::<Vec<_>>()
        .into()
}

/// Leading integer of a SWAPI text field, 0 when there is none.
///
/// "1,358" reads as 1 and "unknown" as 0, the same as `parseInt(x) || 0`.
fn parse_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        value = value.saturating_mul(10).saturating_add(d as i64);
    }

    if negative {
        -value
    } else {
        value
    }
}

fn parse_magnitude(text: &str) -> u64 {
    parse_int(text).max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_like_javascript() {
        assert_eq!(parse_int("77"), 77);
        assert_eq!(parse_int("  136"), 136);
        assert_eq!(parse_int("1,358"), 1);
        assert_eq!(parse_int("78.2"), 78);
        assert_eq!(parse_int("unknown"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("-5"), -5);
        assert_eq!(parse_int("1000000000000"), 1_000_000_000_000);
    }

    #[test]
    fn test_parse_magnitude_never_negative() {
        assert_eq!(parse_magnitude("-3"), 0);
        assert_eq!(parse_magnitude("47060"), 47060);
    }

    #[test]
    fn test_page_parses() {
        let json = r#"{
            "count": 2,
            "next": "https://swapi.dev/api/people/?page=2",
            "results": [
                { "name": "Luke Skywalker", "height": "172", "mass": "77", "gender": "male", "films": [] },
                { "name": "Jabba Desilijic Tiure", "height": "175", "mass": "1,358", "gender": "hermaphrodite" }
            ]
        }"#;

        let page: Page<SwapiPerson> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert!(page.next.is_some());
    }

    #[test]
    fn test_build_catalog_numbers_rows() {
        let resources = Resources {
            people: vec![
                SwapiPerson {
                    name: "Luke Skywalker".to_string(),
                    height: "172".to_string(),
                    mass: "77".to_string(),
                    gender: "male".to_string(),
                },
                SwapiPerson {
                    name: "Mystery".to_string(),
                    height: "unknown".to_string(),
                    mass: "unknown".to_string(),
                    gender: "n/a".to_string(),
                },
            ],
            starships: vec![SwapiStarship {
                name: "CR90 corvette".to_string(),
                crew: "30-165".to_string(),
                model: "CR90 corvette".to_string(),
                manufacturer: "Corellian Engineering Corporation".to_string(),
            }],
            planets: vec![SwapiPlanet {
                name: "Tatooine".to_string(),
                population: "200000".to_string(),
            }],
            species: vec![SwapiSpecies {
                name: "Human".to_string(),
                language: "Galactic Basic".to_string(),
            }],
            vehicles: vec![],
        };

        let catalog = build_catalog(resources);

        assert_eq!(catalog.people.get(1).unwrap().mass, 77);
        assert_eq!(catalog.people.get(2).unwrap().mass, 0);
        assert_eq!(catalog.people.get(2).unwrap().height, Some(0));
        assert_eq!(catalog.starships.get(1).unwrap().crew, 30);
        assert_eq!(catalog.planets.get(1).unwrap().population, Some(200000));
        assert_eq!(catalog.species.all()[0].id, 1);
        assert!(catalog.vehicles.is_empty());
    }
}
