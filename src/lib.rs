//! Data access for the invoices dashboard: revenue, invoices, customers and
//! users over a SQLite store, with currency formatting at the read boundary.

pub mod config;
pub mod currency;
pub mod db;
pub mod error;
pub mod facade;
pub mod model;
pub mod password;
pub mod seed;

pub use error::FacadeError;
pub use facade::Dashboard;
