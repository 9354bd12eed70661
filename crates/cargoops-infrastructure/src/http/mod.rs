//! HTTP adapter (warehouse REST API)

pub mod client;
pub mod dto;
pub mod envelope;
pub mod normalize;

pub use client::HttpWarehouseRepository;
