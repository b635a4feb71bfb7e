//! Service layer: external API client and collection pipeline

pub mod cocktaildb;
pub mod collector;
