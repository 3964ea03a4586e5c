//! Subway line section management.
//!
//! Keeps the sections of a line a simple path under insertion and removal,
//! and reconstructs station order on demand. A small HTTP service exposes
//! in-memory lines.

pub mod config;
pub mod domain;
pub mod web;
