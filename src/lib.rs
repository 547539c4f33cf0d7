// lib.rs - Library exports for integration tests

pub mod config;
pub mod bootstrap;
pub mod chain;
pub mod discovery;
pub mod models;
pub mod provider;
pub mod web;
