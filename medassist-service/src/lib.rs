//! medassist-service: relays chat messages, health metrics and medical
//! documents to a hosted generative model and returns its text.
pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod services;
pub mod startup;
