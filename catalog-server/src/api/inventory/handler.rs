//! Inventory API Handlers
//!
//! 库存变更接口。所有变更保持 `stockLevel >= 0` 不变式并重置
//! `lastUpdated`；加减库存由仓储层以单条原子 UPDATE 执行。

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::inventory;
use crate::utils::{AppError, AppResult};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_optional_text};
use shared::models::{Inventory, InventoryCreate, InventoryUpdate};

/// PUT .../stock 请求体: `{"stockLevel": 25}`
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevelBody {
    #[serde(default)]
    pub stock_level: Option<i64>,
}

/// add-stock / remove-stock 请求体: `{"quantity": 5}`
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityBody {
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// GET /api/inventory - 获取所有库存记录
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Inventory>>> {
    let records = inventory::find_all(&state.pool).await?;
    Ok(Json(records))
}

/// GET /api/inventory/:id - 获取单条库存 (读未命中返回 200/null)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<Inventory>>> {
    let record = inventory::find_by_id(&state.pool, id).await?;
    Ok(Json(record))
}

/// GET /api/inventory/product/:product_id - 按商品查询库存
pub async fn get_by_product_id(
    State(state): State<ServerState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<Option<Inventory>>> {
    let record = inventory::find_by_product_id(&state.pool, product_id).await?;
    Ok(Json(record))
}

/// POST /api/inventory/product/:product_id - 为商品创建库存记录
pub async fn create(
    State(state): State<ServerState>,
    Path(product_id): Path<i64>,
    Json(payload): Json<InventoryCreate>,
) -> AppResult<(StatusCode, Json<Inventory>)> {
    validate_optional_text(&payload.location, "location", MAX_SHORT_TEXT_LEN)?;

    let record = inventory::create(&state.pool, product_id, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/inventory/:id - 更新库存记录 (字段逐项覆盖)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryUpdate>,
) -> AppResult<Json<Inventory>> {
    validate_optional_text(&payload.location, "location", MAX_SHORT_TEXT_LEN)?;

    let record = inventory::update(&state.pool, id, payload).await?;
    Ok(Json(record))
}

/// PUT /api/inventory/:id/stock - 设置库存水平
pub async fn set_stock_level(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<StockLevelBody>,
) -> AppResult<Json<Inventory>> {
    let stock_level = body
        .stock_level
        .ok_or_else(|| AppError::required_field("Stock level is required"))?;

    let record = inventory::set_stock_level(&state.pool, id, stock_level).await?;
    Ok(Json(record))
}

/// PUT /api/inventory/product/:product_id/stock - 按商品设置库存水平
pub async fn set_stock_level_by_product_id(
    State(state): State<ServerState>,
    Path(product_id): Path<i64>,
    Json(body): Json<StockLevelBody>,
) -> AppResult<Json<Inventory>> {
    let stock_level = body
        .stock_level
        .ok_or_else(|| AppError::required_field("Stock level is required"))?;

    let record =
        inventory::set_stock_level_by_product_id(&state.pool, product_id, stock_level).await?;
    Ok(Json(record))
}

/// POST /api/inventory/:id/add-stock - 入库
pub async fn add_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<QuantityBody>,
) -> AppResult<Json<Inventory>> {
    let quantity = body
        .quantity
        .ok_or_else(|| AppError::required_field("Quantity is required"))?;

    let record = inventory::add_stock(&state.pool, id, quantity).await?;
    Ok(Json(record))
}

/// POST /api/inventory/:id/remove-stock - 出库 (库存不足时拒绝)
pub async fn remove_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<QuantityBody>,
) -> AppResult<Json<Inventory>> {
    let quantity = body
        .quantity
        .ok_or_else(|| AppError::required_field("Quantity is required"))?;

    let record = inventory::remove_stock(&state.pool, id, quantity).await?;
    Ok(Json(record))
}

/// DELETE /api/inventory/:id - 删除库存记录
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    inventory::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/inventory/low-stock - stockLevel <= reorderLevel (inclusive)
pub async fn list_low_stock(State(state): State<ServerState>) -> AppResult<Json<Vec<Inventory>>> {
    let records = inventory::find_low_stock(&state.pool).await?;
    Ok(Json(records))
}

/// GET /api/inventory/below/:stock_level - stockLevel < threshold (strict)
pub async fn list_below_stock_level(
    State(state): State<ServerState>,
    Path(stock_level): Path<i64>,
) -> AppResult<Json<Vec<Inventory>>> {
    let records = inventory::find_below_stock_level(&state.pool, stock_level).await?;
    Ok(Json(records))
}

/// GET /api/inventory/location/:location - 按库位精确匹配
pub async fn list_by_location(
    State(state): State<ServerState>,
    Path(location): Path<String>,
) -> AppResult<Json<Vec<Inventory>>> {
    let records = inventory::find_by_location(&state.pool, &location).await?;
    Ok(Json(records))
}
