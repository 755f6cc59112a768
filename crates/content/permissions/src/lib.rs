//! # content-permissions
//!
//! Backoffice access to the content tree, decided from materialized paths.
//!
//! - [`has_path_access`] and [`is_in_branch_of_start_node`] are pure
//!   functions over path strings and start-node ids
//! - [`ContentPermissions`] computes a user's effective start nodes and
//!   inherited permission sets, and answers [`ContentAccess`] checks

#![deny(unsafe_code)]

pub mod error;
pub mod mocks;
pub mod path;
pub mod service;
pub mod user;

pub use error::PermissionError;
pub use path::{has_path_access, is_in_branch_of_start_node, BranchAccess};
pub use service::{
    calculate_content_start_node_ids, ContentAccess, ContentAccessCheck, ContentPermissions,
    EntityService, EntitySlim, StartNodes,
};
pub use user::{BackofficeUser, EntityPermissionSet, UserGroup, UserId};
