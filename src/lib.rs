//! Library exports for the URL shortener and QR service
//!
//! This module exposes internal components for testing and potential library usage.

pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod qr;
pub mod route;
pub mod store;
pub mod validation;
