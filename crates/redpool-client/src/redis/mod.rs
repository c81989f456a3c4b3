//! Redis-backed connection implementation.

pub mod client;

pub use client::RedisConnection;
