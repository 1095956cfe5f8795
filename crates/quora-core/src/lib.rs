//! Core types, business rules, and the storage trait for the Quora Q&A
//! backend.
//!
//! This crate is free of HTTP and database dependencies. The API and storage
//! crates depend on it; it depends on neither.

// Native `async fn` in traits; the `Send` bounds are spelled out on the trait.
#![allow(async_fn_in_trait)]

pub mod answer;
pub mod auth;
pub mod error;
pub mod question;
pub mod service;
pub mod store;
pub mod user;

pub use error::{Error, ErrorKind, Result};

#[cfg(test)]
mod testing;
