#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for repo-census
//!
//! This library consolidates all functionality for the repo-census tool, which collects
//! hosting metadata and line-count statistics for a curated list of repositories.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and logging setup
//! - [`census`]: Per-repository orchestration and console summary
//! - [`repos`]: Repository list loading and validation
//! - [`slices`]: Glob-based file selection and chunked extraction
//! - [`stats`]: The persisted statistics document
//! - [`forge`]: GitHub API client
//! - [`sync`]: Local repository mirrors via git
//! - [`cloc`]: Line counting via cloc

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod census;
pub mod cloc;
pub mod commands;
pub mod forge;
mod path_utils;
mod process;
pub mod repos;
pub mod slices;
pub mod stats;
pub mod sync;

pub use crate::commands::{Host, run};
