pub mod bump;
pub mod classifier;
pub mod commands;
pub mod config;
pub mod context;
pub mod docs;
pub mod domain;
pub mod error;
pub mod executor;
pub mod git;
pub mod hash;
pub mod manifest;
pub mod orchestration;
pub mod planner;
pub mod registry;
pub mod ui;

pub use error::{ReleaseError, Result};
