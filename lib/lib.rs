//! This library crate parses `build.ninja` files, the build description
//! format of the `ninja` build system.
//!
//! # Parsing
//!
//! The [`manifest`] module reads a `build.ninja` file into a
//! [`Manifest`](manifest::Manifest): the file-level variables (evaluated),
//! the rules (with their variables kept as unevaluated
//! [`EvalTemplate`](manifest::EvalTemplate)s), the build definitions, and the
//! default targets.
//!
//! Syntax errors are reported as a [`Diagnostic`](manifest::error::Diagnostic),
//! which shows the offending line with a caret under the unexpected byte.
//!
//! # Resolving
//!
//! [`resolve()`](manifest::resolve()) applies the rules to the build
//! definitions, resulting in the actual commands, with `$in` and `$out`
//! expanded.
//!
//! Everything after that (deciding what is outdated, and running commands)
//! is not part of this crate.

pub mod error;
pub mod manifest;
