//! Repository traits (ports)

pub mod warehouse_repository;

pub use warehouse_repository::WarehouseRepository;
