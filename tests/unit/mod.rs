//! Unit tests module

mod error_test;
mod plan_test;
mod profile_test;
