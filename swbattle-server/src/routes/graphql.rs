//! GraphQL endpoint and the GraphiQL explorer

use async_graphql::http::GraphiQLSource;
use axum::response::Html;
use axum::{Extension, Json};

use crate::graphql::CatalogSchema;

/// Execute a GraphQL request
pub async fn graphql_handler(
    Extension(schema): Extension<CatalogSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(schema.execute(request).await)
}

/// Serve the GraphiQL page
pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/api/graphql").finish())
}
