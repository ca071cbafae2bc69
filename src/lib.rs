#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain model (users, tasks, value objects), the"]
#![doc = "credential and token components, the storage-agnostic repository contract"]
#![doc = "with its in-memory and Postgres backends, the use-case layer, and the HTTP"]
#![doc = "routing and error handling for the TaskDesk application. It is used by the"]
#![doc = "main binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod routes;
pub mod state;
pub mod usecases;

// lib.rs primarily declares modules for the library crate; the application
// setup (app factory) lives in main.rs, and integration tests assemble their
// own App against the in-memory backend.
