//! Accuracy tests for elementary functions in the style of Cody and Waite's
//! ELEFUNT package.

pub mod functions;
pub mod harness;
pub mod machine;
pub mod opts;
pub mod random;
pub mod report;
