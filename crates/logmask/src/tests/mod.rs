//! Test module for logmask
//!
//! Unit tests and proptest properties for the masking engine and the logger.


#[cfg(test)]
pub mod masking_tests;
