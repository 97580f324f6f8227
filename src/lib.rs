//! nuscan - NuGet dependency checker library
//!
//! This library provides the core functionality for checking .NET project
//! dependencies against NuGet package sources:
//! - SDK-style projects (PackageReference with Version attribute)
//! - UWP projects (PackageReference with Version element)
//! - packages.config package lists

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod resolver;
