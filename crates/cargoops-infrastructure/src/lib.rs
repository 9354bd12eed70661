//! # CargoOps Infrastructure
//!
//! Remote data adapter: the HTTP implementation of `WarehouseRepository`.

pub mod http;

pub use http::HttpWarehouseRepository;
