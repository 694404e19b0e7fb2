//! Eligibility gates and deterministic knowledge packs for candidate matching.
//!
//! - [`gates`]: ordered hard gates between a job profile and a candidate profile.
//! - [`kp`]: canonical save and frozen load of knowledge packs.
//! - [`config`]: user settings for the `cand` binary.

pub mod config;
pub mod gates;
pub mod kp;
