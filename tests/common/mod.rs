//! A small consumer of `hyperax::Client` used to exercise the fake end to end.

#![allow(dead_code)]

use hyperax::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub product: String,
    pub quantity: u32,
}

impl Order {
    pub fn new(id: u32, product: &str, quantity: u32) -> Self {
        Self {
            id,
            product: product.to_string(),
            quantity,
        }
    }
}

#[derive(Error, Debug)]
pub enum OrdersError {
    #[error("order {0} was not found")]
    NotFound(u32),

    #[error("unexpected status: {0}")]
    Status(StatusCode),

    #[error("response is missing the order66 header")]
    MissingHeader,

    #[error("HTTP error: {0}")]
    Http(#[from] hyperax::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub struct OrdersController {
    client: Client,
}

impl OrdersController {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn order(&self, id: u32) -> Result<Order, OrdersError> {
        let response = self.client.get(&format!("/orders/{id}")).await?;

        match response.status() {
            StatusCode::OK => Ok(serde_json::from_slice(response.body())?),
            StatusCode::BAD_REQUEST => Err(OrdersError::NotFound(id)),
            status => Err(OrdersError::Status(status)),
        }
    }

    pub async fn orders(&self) -> Result<Vec<Order>, OrdersError> {
        let response = self.client.get("/orders").await?;

        if !response.status().is_success() {
            return Err(OrdersError::Status(response.status()));
        }
        if response.headers().get("order66").map_or(true, |v| v != "babyyoda") {
            return Err(OrdersError::MissingHeader);
        }

        Ok(serde_json::from_slice(response.body())?)
    }

    pub async fn create(&self, order: &Order) -> Result<StatusCode, OrdersError> {
        let response = self.client.post_json("/orders", order).await?;
        Ok(response.status())
    }
}

/// Client rooted at the fake orders service.
pub fn orders_client(handler: fake_handler::FakeHandler) -> Client {
    Client::builder()
        .base_url("http://orders.test")
        .header("accept", "application/json")
        .transport(handler)
        .build()
}
