//! # stagehub-entity
//!
//! Domain entity models for StageHub. Every struct in this crate represents
//! a database table row or a domain value object. All database-backed
//! entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! `sqlx::FromRow`.
//!
//! Each content kind (agency, group, talent, song) is published per
//! language: one row per language variant, tied together by a shared
//! translation set id. Cross-kind references (`agency_id`, `group_ids`,
//! `talent_ids`) always point at the *translation set* of the referenced
//! item, never at a single language variant.

pub mod agency;
pub mod content;
pub mod group;
pub mod history;
pub mod permission;
pub mod principal;
pub mod song;
pub mod store;
pub mod talent;

pub use content::{ContentSnapshot, PublishedContent};
pub use store::{ContentStore, PrincipalStore};
