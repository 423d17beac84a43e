pub mod batch;
pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod files;
pub mod models;
pub mod report;
pub mod routes;
pub mod solve;
