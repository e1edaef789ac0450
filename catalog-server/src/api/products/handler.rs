//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use shared::models::{Product, ProductCreate, ProductSearch, ProductUpdate};

fn validate_product_fields(
    name: &str,
    description: &Option<String>,
    price: f64,
    sku: &Option<String>,
    size: &Option<String>,
    color: &Option<String>,
) -> AppResult<()> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_price(price)?;
    validate_optional_text(sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(size, "size", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(color, "color", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// GET /api/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_all(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/products/:id - 获取单个商品 (读未命中返回 200/null)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<Product>>> {
    let product = product::find_by_id(&state.pool, id).await?;
    Ok(Json(product))
}

/// GET /api/products/sku/:sku - 按 SKU 查询商品
pub async fn get_by_sku(
    State(state): State<ServerState>,
    Path(sku): Path<String>,
) -> AppResult<Json<Option<Product>>> {
    let product = product::find_by_sku(&state.pool, &sku).await?;
    Ok(Json(product))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_product_fields(
        &payload.name,
        &payload.description,
        payload.price,
        &payload.sku,
        &payload.size,
        &payload.color,
    )?;

    let product = product::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    validate_product_fields(
        &payload.name,
        &payload.description,
        payload.price,
        &payload.sku,
        &payload.size,
        &payload.color,
    )?;

    let product = product::update(&state.pool, id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - 删除商品 (连带删除其库存记录)
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    product::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Search and filter endpoints ─────────────────────────────────────

/// GET /api/products/search - combined filters, every supplied one ANDed
pub async fn search(
    State(state): State<ServerState>,
    Query(filters): Query<ProductSearch>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product::search(&state.pool, &filters).await?;
    Ok(Json(products))
}

#[derive(serde::Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// GET /api/products/search/name?name=xxx - case-insensitive substring match
pub async fn search_by_name(
    State(state): State<ServerState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product::search_by_name(&state.pool, &query.name).await?;
    Ok(Json(products))
}

/// GET /api/products/category/:category_id
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_by_category(&state.pool, category_id).await?;
    Ok(Json(products))
}

/// GET /api/products/category/name/:category_name
pub async fn list_by_category_name(
    State(state): State<ServerState>,
    Path(category_name): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_by_category_name(&state.pool, &category_name).await?;
    Ok(Json(products))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeQuery {
    pub min_price: f64,
    pub max_price: f64,
}

/// GET /api/products/price-range?minPrice=&maxPrice= - inclusive bounds
pub async fn list_by_price_range(
    State(state): State<ServerState>,
    Query(query): Query<PriceRangeQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products =
        product::find_by_price_range(&state.pool, query.min_price, query.max_price).await?;
    Ok(Json(products))
}

/// GET /api/products/size/:size - exact match
pub async fn list_by_size(
    State(state): State<ServerState>,
    Path(size): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_by_size(&state.pool, &size).await?;
    Ok(Json(products))
}

/// GET /api/products/color/:color - exact match
pub async fn list_by_color(
    State(state): State<ServerState>,
    Path(color): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_by_color(&state.pool, &color).await?;
    Ok(Json(products))
}
