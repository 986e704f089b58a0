//! GraphQL schema for the resource catalog

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Error, Object, Result, Schema, ID};

use swbattle_core::{
    NewPerson, NewPlanet, NewSpecies, NewStarship, NewVehicle, Person, PersonPatch, Planet,
    Species, Starship, StarshipPatch, Vehicle,
};

use crate::state::ServerState;

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with shared state attached
pub fn build_schema(state: Arc<ServerState>) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

fn server<'a>(ctx: &Context<'a>) -> Result<&'a Arc<ServerState>> {
    ctx.data::<Arc<ServerState>>()
}

fn parse_id(id: &ID) -> Result<i64> {
    id.parse::<i64>()
        .map_err(|_| Error::new(format!("Invalid id: {}", id.as_str())))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn people(&self, ctx: &Context<'_>) -> Result<Vec<Person>> {
        Ok(server(ctx)?.read_catalog()?.people.all().to_vec())
    }

    async fn person(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Person>> {
        let id = parse_id(&id)?;
        Ok(server(ctx)?.read_catalog()?.people.get(id).cloned())
    }

    async fn starships(&self, ctx: &Context<'_>) -> Result<Vec<Starship>> {
        Ok(server(ctx)?.read_catalog()?.starships.all().to_vec())
    }

    async fn starship(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Starship>> {
        let id = parse_id(&id)?;
        Ok(server(ctx)?.read_catalog()?.starships.get(id).cloned())
    }

    async fn planets(&self, ctx: &Context<'_>) -> Result<Vec<Planet>> {
        Ok(server(ctx)?.read_catalog()?.planets.all().to_vec())
    }

    async fn planet(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Planet>> {
        let id = parse_id(&id)?;
        Ok(server(ctx)?.read_catalog()?.planets.get(id).cloned())
    }

    async fn species(&self, ctx: &Context<'_>) -> Result<Vec<Species>> {
        Ok(server(ctx)?.read_catalog()?.species.all().to_vec())
    }

    async fn specie(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Species>> {
        let id = parse_id(&id)?;
        Ok(server(ctx)?.read_catalog()?.species.get(id).cloned())
    }

    async fn vehicles(&self, ctx: &Context<'_>) -> Result<Vec<Vehicle>> {
        Ok(server(ctx)?.read_catalog()?.vehicles.all().to_vec())
    }

    async fn vehicle(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Vehicle>> {
        let id = parse_id(&id)?;
        Ok(server(ctx)?.read_catalog()?.vehicles.get(id).cloned())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_person(&self, ctx: &Context<'_>, input: NewPerson) -> Result<Person> {
        let person = server(ctx)?.mutate_roster(|catalog| catalog.create_person(input))?;
        tracing::info!("Created person {} ({})", person.id, person.name);
        Ok(person)
    }

    async fn update_person(&self, ctx: &Context<'_>, id: ID, input: PersonPatch) -> Result<Person> {
        let id = parse_id(&id)?;
        Ok(server(ctx)?.mutate_roster(|catalog| catalog.update_person(id, input))?)
    }

    async fn delete_person(&self, ctx: &Context<'_>, id: ID) -> Result<Person> {
        let id = parse_id(&id)?;
        let person = server(ctx)?.mutate_roster(|catalog| catalog.delete_person(id))?;
        tracing::info!("Deleted person {}", person.id);
        Ok(person)
    }

    async fn create_starship(&self, ctx: &Context<'_>, input: NewStarship) -> Result<Starship> {
        let ship = server(ctx)?.mutate_roster(|catalog| catalog.create_starship(input))?;
        tracing::info!("Created starship {} ({})", ship.id, ship.name);
        Ok(ship)
    }

    async fn update_starship(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: StarshipPatch,
    ) -> Result<Starship> {
        let id = parse_id(&id)?;
        Ok(server(ctx)?.mutate_roster(|catalog| catalog.update_starship(id, input))?)
    }

    async fn delete_starship(&self, ctx: &Context<'_>, id: ID) -> Result<Starship> {
        let id = parse_id(&id)?;
        let ship = server(ctx)?.mutate_roster(|catalog| catalog.delete_starship(id))?;
        tracing::info!("Deleted starship {}", ship.id);
        Ok(ship)
    }

    async fn create_planet(&self, ctx: &Context<'_>, input: NewPlanet) -> Result<Planet> {
        Ok(server(ctx)?.mutate(|catalog| catalog.create_planet(input))?)
    }

    async fn delete_planet(&self, ctx: &Context<'_>, id: ID) -> Result<Planet> {
        let id = parse_id(&id)?;
        Ok(server(ctx)?.mutate(|catalog| catalog.delete_planet(id))?)
    }

    async fn create_species(&self, ctx: &Context<'_>, input: NewSpecies) -> Result<Species> {
        Ok(server(ctx)?.mutate(|catalog| catalog.create_species(input))?)
    }

    async fn delete_species(&self, ctx: &Context<'_>, id: ID) -> Result<Species> {
        let id = parse_id(&id)?;
        Ok(server(ctx)?.mutate(|catalog| catalog.delete_species(id))?)
    }

    async fn create_vehicle(&self, ctx: &Context<'_>, input: NewVehicle) -> Result<Vehicle> {
        Ok(server(ctx)?.mutate(|catalog| catalog.create_vehicle(input))?)
    }

    async fn delete_vehicle(&self, ctx: &Context<'_>, id: ID) -> Result<Vehicle> {
        let id = parse_id(&id)?;
        Ok(server(ctx)?.mutate(|catalog| catalog.delete_vehicle(id))?)
    }
}
