//! Batch processing module
//!
//! This module handles:
//! - Creating the output folder and the one-time input backup (setup.rs)
//! - Finding candidate paintings (scan.rs)
//! - Signing every candidate and reporting the tally (driver.rs)
//! - Copying signed files back over the originals on request (replace.rs)
//! - Timestamp-preserving file copies shared by backup and replace (copy.rs)

pub mod copy;
pub mod driver;
pub mod replace;
pub mod scan;
pub mod setup;
