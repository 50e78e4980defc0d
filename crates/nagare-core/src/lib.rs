//! Nagare Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Nagare parser and
//! layout engine. It includes:
//!
//! - **Geometry**: Points, sizes and bounds in canvas space ([`geometry`] module)
//! - **Anchors**: Directional attachment points on shape boundaries ([`anchor::Anchor`])
//! - **Colors**: Validated CSS colors ([`color::Color`])
//! - **Properties**: The `key: value` property block mini-parser ([`properties`] module)

pub mod anchor;
pub mod color;
pub mod geometry;
pub mod properties;
