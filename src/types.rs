// src/types.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatQuery {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyPriceResponse {
    pub ticker: String,
    pub data: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyRatiosResponse {
    pub ticker: String,
    pub ratios: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}
