//! Interaction scenarios organized by category

pub mod controlled;
pub mod dismissal;
pub mod navigation;

use crate::runner::TestSuite;

/// Create all scenario suites
pub fn all_suites() -> Vec<TestSuite> {
    vec![
        single_select::suite(),
        multi_select::suite(),
        navigation::suite(),
        dismissal::suite(),
        controlled::suite(),
    ]
}
