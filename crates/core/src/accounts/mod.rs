//! Accounts module - account metadata and grouping helpers.

mod accounts_model;

pub use accounts_model::{assign_group, clear_group, Account};
