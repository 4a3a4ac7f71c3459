//! In-memory stand-in for the vegetable inventory API.
//!
//! Serves list/create/update/delete on a single `/vegetables` route, with the
//! record id carried in the query string the way the production endpoint
//! expects it. Every error, including unparseable query strings and bodies,
//! comes back as `{"error": "..."}`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const DEFAULT_LIMIT: i64 = 5;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vegetable {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Page {
    pub page: i64,
    pub pages: u64,
    pub total: u64,
    pub data: Vec<Vegetable>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub message: String,
    pub data: Vegetable,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Updated {
    pub message: String,
    pub updated_fields: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Deserialize)]
pub struct CreateVegetable {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub group: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateVegetable {
    pub price: Option<f64>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

#[derive(Default)]
pub struct Store {
    last_id: i64,
    items: BTreeMap<i64, Vegetable>,
}

pub type Db = Arc<RwLock<Store>>;

type Rejection = (StatusCode, Json<ErrorBody>);

fn reject(status: StatusCode, error: &str) -> Rejection {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
}

/// Unparseable query strings and bodies get the same `{"error"}` shape as
/// every other failure, keeping axum's status code.
fn from_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, Rejection> {
    query
        .map(|Query(inner)| inner)
        .map_err(|e| reject(e.status(), &e.body_text()))
}

fn from_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Rejection> {
    body.map(|Json(inner)| inner)
        .map_err(|e| reject(e.status(), &e.body_text()))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            "/vegetables",
            get(list_vegetables)
                .post(create_vegetable)
                .put(update_vegetable)
                .delete(delete_vegetable),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_vegetables(
    State(db): State<Db>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Page>, Rejection> {
    let query = from_query(query)?;
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if page < 1 || limit < 1 {
        return Err(reject(StatusCode::BAD_REQUEST, "page and limit must be positive"));
    }

    let store = db.read().await;
    let total = store.items.len() as u64;
    let limit = limit as u64;
    let data = store
        .items
        .values()
        .skip(((page as u64) - 1).saturating_mul(limit) as usize)
        .take(limit as usize)
        .cloned()
        .collect();
    Ok(Json(Page {
        page,
        pages: total.div_ceil(limit),
        total,
        data,
    }))
}

async fn create_vegetable(
    State(db): State<Db>,
    input: Result<Json<CreateVegetable>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), Rejection> {
    let input = from_json(input)?;
    let (Some(name), Some(price)) = (
        input.name.filter(|n| !n.is_empty()),
        input.price.filter(|p| *p != 0.0),
    ) else {
        return Err(reject(StatusCode::BAD_REQUEST, "name and price are required"));
    };

    let mut store = db.write().await;
    store.last_id += 1;
    let vegetable = Vegetable {
        id: store.last_id,
        name,
        price,
        group: input.group,
        description: input.description,
    };
    store.items.insert(vegetable.id, vegetable.clone());
    log::info!("created vegetable id={} name={:?}", vegetable.id, vegetable.name);

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "Vegetable created".to_string(),
            data: vegetable,
        }),
    ))
}

async fn update_vegetable(
    State(db): State<Db>,
    query: Result<Query<IdQuery>, QueryRejection>,
    input: Result<Json<UpdateVegetable>, JsonRejection>,
) -> Result<Json<Updated>, Rejection> {
    let query = from_query(query)?;
    let input = from_json(input)?;
    let id = query.id.ok_or_else(|| reject(StatusCode::BAD_REQUEST, "id is required"))?;
    if input.price.is_none() && input.description.is_none() {
        return Err(reject(StatusCode::BAD_REQUEST, "at least one field required"));
    }

    let mut store = db.write().await;
    let vegetable = store
        .items
        .get_mut(&id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "vegetable not found"))?;
    let mut updated_fields = Vec::new();
    if let Some(price) = input.price {
        vegetable.price = price;
        updated_fields.push("price".to_string());
    }
    if let Some(description) = input.description {
        vegetable.description = Some(description);
        updated_fields.push("description".to_string());
    }
    log::info!("updated vegetable id={id} fields={updated_fields:?}");

    Ok(Json(Updated {
        message: "Vegetable updated".to_string(),
        updated_fields,
    }))
}

async fn delete_vegetable(
    State(db): State<Db>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<Message>, Rejection> {
    let query = from_query(query)?;
    let id = query.id.ok_or_else(|| reject(StatusCode::BAD_REQUEST, "id is required"))?;
    let mut store = db.write().await;
    store
        .items
        .remove(&id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "vegetable not found"))?;
    log::info!("deleted vegetable id={id}");

    Ok(Json(Message {
        message: "Vegetable deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vegetable_serializes_to_json() {
        let vegetable = Vegetable {
            id: 1,
            name: "Rau muống".to_string(),
            price: 15000.0,
            group: Some("Lá".to_string()),
            description: None,
        };
        let json = serde_json::to_value(&vegetable).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Rau muống");
        assert_eq!(json["price"], 15000.0);
        assert_eq!(json["group"], "Lá");
        assert!(json["description"].is_null());
    }

    #[test]
    fn create_vegetable_fields_are_optional_on_the_wire() {
        let input: CreateVegetable = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.name.is_none());
        assert!(input.price.is_none());
    }

    #[test]
    fn update_vegetable_partial_fields() {
        let input: UpdateVegetable = serde_json::from_str(r#"{"price":18000}"#).unwrap();
        assert_eq!(input.price, Some(18000.0));
        assert!(input.description.is_none());
    }

    #[test]
    fn update_vegetable_ignores_unknown_fields() {
        let input: UpdateVegetable =
            serde_json::from_str(r#"{"name":"ignored","description":"Tươi"}"#).unwrap();
        assert!(input.price.is_none());
        assert_eq!(input.description.as_deref(), Some("Tươi"));
    }
}
