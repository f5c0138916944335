//! Workspace-level tooling package.
//!
//! Carries the pre-commit hook configuration; see `crates/waymark-lib` and
//! `crates/waymark-cli` for the actual code.
