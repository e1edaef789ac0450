//! Inventory API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", inventory_routes())
}

fn inventory_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/product/{product_id}",
            get(handler::get_by_product_id).post(handler::create),
        )
        .route("/{id}/stock", put(handler::set_stock_level))
        .route(
            "/product/{product_id}/stock",
            put(handler::set_stock_level_by_product_id),
        )
        .route("/{id}/add-stock", post(handler::add_stock))
        .route("/{id}/remove-stock", post(handler::remove_stock))
        .route("/low-stock", get(handler::list_low_stock))
        .route("/below/{stock_level}", get(handler::list_below_stock_level))
        .route("/location/{location}", get(handler::list_by_location))
}
