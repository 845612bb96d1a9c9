//! # Accord Test Suite
//!
//! Unified test crate for workflow-level coverage:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs            # Engine + behaviour driving helpers
//!     ├── price_flow.rs         # Default workflow, end to end
//!     ├── data_publish_flow.rs  # Extended workflow with dataset publication
//!     └── failure_modes.rs      # Disagreement, timeouts, partial participation
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p accord-tests
//! cargo test -p accord-tests integration::price_flow
//! ```

#![allow(dead_code)]

pub mod integration;
