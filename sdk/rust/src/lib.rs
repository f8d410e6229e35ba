//! Async client for the item service API.

pub mod client;

pub use client::{Item, ItemsClient, ItemUpdate, NewItem};
