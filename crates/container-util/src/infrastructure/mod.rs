//! Infrastructure layer: file storage and log output.
//!
//! **Dependency rule**: this layer implements the traits declared by
//! `application`; the application layer never imports it outside tests.

pub mod logging;
pub mod storage;
