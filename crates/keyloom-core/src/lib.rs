//! Keyloom Core Types
//!
//! This crate provides the in-memory keyboard model produced by the Keyloom
//! layout loader. It includes:
//!
//! - **Geometry**: Points and rectangles ([`geometry`] module)
//! - **Outlines**: Key silhouettes and their interning table ([`outline`] module)
//! - **Symbols**: What a key produces per group and level ([`symbol`] module)
//! - **Keys and sections**: Key arena entries and their row structure
//! - **Keyboard**: The assembled, immutable [`keyboard::KeyboardModel`]

pub mod descriptor;
pub mod geometry;
pub mod key;
pub mod keyboard;
pub mod outline;
pub mod section;
pub mod symbol;
