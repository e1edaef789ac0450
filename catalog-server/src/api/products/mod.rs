//! Product API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/sku/{sku}", get(handler::get_by_sku))
        .route("/search", get(handler::search))
        .route("/search/name", get(handler::search_by_name))
        .route("/category/{category_id}", get(handler::list_by_category))
        .route(
            "/category/name/{category_name}",
            get(handler::list_by_category_name),
        )
        .route("/price-range", get(handler::list_by_price_range))
        .route("/size/{size}", get(handler::list_by_size))
        .route("/color/{color}", get(handler::list_by_color))
}
