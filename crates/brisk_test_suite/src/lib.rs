//! Brisk Scenario Suite
//!
//! Scripted interaction scenarios for the Brisk combobox. Each scenario hosts a
//! combobox the way a page would (filtering options by the typed query, mounting
//! and unmounting option parts, feeding controlled props back in) and drives it
//! with keyboard and pointer input.
//!
//! # Suites
//!
//! - **single_select**: the single-select demo flow
//! - **multi_select**: the multi-select demo flow, including chip removal
//! - **navigation**: clamping, document order, disabled options, filtering
//! - **dismissal**: Escape, outside presses, trigger toggling
//! - **controlled**: proposals, rejected changes, external prop updates

pub mod harness;
pub mod runner;
pub mod tests;

pub use harness::{Scenario, TestContext, TestHarness, TestResult};
pub use runner::{RunResult, TestRunner, TestSuite};
