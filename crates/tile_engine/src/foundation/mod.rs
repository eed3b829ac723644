//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Integer geometry (points, rectangles, boxes, isometric projection)
//! - 2D affine transforms
//! - Component arena handles
//! - Logging utilities

pub mod geometry;
pub mod transform;
pub mod collections;
pub mod logging;
