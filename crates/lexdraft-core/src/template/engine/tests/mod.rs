//! Tests for template engine
//!
//! Organized into focused submodules, one per area of behavior.

use super::*;

// Test helper functions
mod helpers;


mod render_blocks;
mod render_escaping;
