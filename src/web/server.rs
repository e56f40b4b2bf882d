//! Axum server for entity descriptions.
//!
//! Routes:
//!
//! - `GET /entity/desc/{table_name}` - JSON column description of a table
//! - `GET /entity/desc/<table>` - one fixed route per discovered table, when
//!   dynamic routes are enabled

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::describe::{LookupError, MetadataReader};
use crate::projection::TableDescription;
use crate::routes::{discover, RouteRegistrar, RouteSpec};

/// Application state shared across handlers.
pub struct AppState {
    pub reader: MetadataReader,
}

/// Error body returned with 404.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        match self {
            LookupError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: "Table not found".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Build the router, mounting the generic description route and the given
/// dynamic routes.
pub fn router(state: Arc<AppState>, dynamic_routes: &[RouteSpec]) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new().route("/entity/desc/{table_name}", get(describe_table));

    for spec in dynamic_routes {
        let table_name = spec.table_name.clone();
        router = router.route(
            &spec.path,
            get(move |State(state): State<Arc<AppState>>| {
                let table_name = table_name.clone();
                async move { describe(&state.reader, &table_name) }
            }),
        );
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Compose the application: discover and register dynamic routes through
/// `registrar` when `dynamic` is set, then build the router.
pub fn app(reader: MetadataReader, registrar: &mut RouteRegistrar, dynamic: bool) -> Router {
    let dynamic_routes = if dynamic {
        registrar.register_once(discover(&reader))
    } else {
        Vec::new()
    };

    router(Arc::new(AppState { reader }), &dynamic_routes)
}

/// Start the web server.
pub async fn serve(app: Router, host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "entity description server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /entity/desc/{table_name}
async fn describe_table(
    State(state): State<Arc<AppState>>,
    Path(table_name): Path<String>,
) -> Result<Json<TableDescription>, LookupError> {
    describe(&state.reader, &table_name)
}

fn describe(reader: &MetadataReader, table_name: &str) -> Result<Json<TableDescription>, LookupError> {
    let entity = reader.find_by_table_name(table_name)?;
    Ok(Json(TableDescription::from_entity(&entity)))
}
