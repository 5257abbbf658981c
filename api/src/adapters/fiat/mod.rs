//! Fiat price adapters

pub mod client;

pub use client::CryptoCompareClient;
