//! Access decisions from materialized paths alone.
//!
//! Nothing here walks the tree: a node's path already names all of its
//! ancestors, so containment and prefix tests on the path strings are enough.

use content_types::path::{is_segment_prefix, wrap};
use content_types::{system, NodeId};
use serde::{Deserialize, Serialize};

use crate::error::PermissionError;

/// Where a node sits relative to a user's start nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchAccess {
    /// Outside every start node's branch
    NotInBranch,
    /// An ancestor of a start node: visible for navigation, not accessible
    Navigable,
    /// A start node, one of its descendants, or anything under root access
    Accessible,
}

impl BranchAccess {
    pub fn is_in_branch(self) -> bool {
        !matches!(self, BranchAccess::NotInBranch)
    }

    pub fn has_path_access(self) -> bool {
        matches!(self, BranchAccess::Accessible)
    }

    /// `(is_in_branch, has_path_access)`
    pub fn into_flags(self) -> (bool, bool) {
        (self.is_in_branch(), self.has_path_access())
    }
}

/// Whether a user with the given start nodes may access the node at `path`.
///
/// Root access grants everything, the recycle bin included. Otherwise the
/// recycle bin is off limits and some start node must appear on the path.
pub fn has_path_access(
    path: &str,
    start_node_ids: &[NodeId],
    recycle_bin_id: NodeId,
) -> Result<bool, PermissionError> {
    path_access(path, start_node_ids, system::ROOT, recycle_bin_id)
}

/// Classify the node at `path` against the user's start nodes.
///
/// `start_node_paths` are the materialized paths of `start_node_ids`.
/// Ancestor and descendant tests compare whole path segments rather than
/// raw string prefixes, so `-1,5` is not taken for an ancestor of `-1,50`.
pub fn is_in_branch_of_start_node<S: AsRef<str>>(
    path: &str,
    start_node_ids: &[NodeId],
    start_node_paths: &[S],
) -> Result<BranchAccess, PermissionError> {
    branch_access(path, start_node_ids, start_node_paths, system::ROOT)
}

pub(crate) fn path_access(
    path: &str,
    start_node_ids: &[NodeId],
    root_id: NodeId,
    recycle_bin_id: NodeId,
) -> Result<bool, PermissionError> {
    ensure_path(path)?;

    if start_node_ids.is_empty() {
        return Ok(false);
    }
    if start_node_ids.contains(&root_id) {
        return Ok(true);
    }

    let wrapped = wrap(path);
    // only root access reaches the recycle bin
    if wrapped.contains(&wrap(&recycle_bin_id.to_string())) {
        return Ok(false);
    }

    Ok(start_node_ids
        .iter()
        .any(|id| wrapped.contains(&wrap(&id.to_string()))))
}

pub(crate) fn branch_access<S: AsRef<str>>(
    path: &str,
    start_node_ids: &[NodeId],
    start_node_paths: &[S],
    root_id: NodeId,
) -> Result<BranchAccess, PermissionError> {
    ensure_path(path)?;

    if start_node_ids.is_empty() {
        return Ok(BranchAccess::NotInBranch);
    }
    if start_node_ids.contains(&root_id) {
        return Ok(BranchAccess::Accessible);
    }

    let start_paths = || start_node_paths.iter().map(AsRef::<str>::as_ref);

    if start_paths().any(|start| start == path) {
        return Ok(BranchAccess::Accessible);
    }
    if start_paths().any(|start| is_segment_prefix(path, start)) {
        return Ok(BranchAccess::Navigable);
    }
    if start_paths().any(|start| is_segment_prefix(start, path)) {
        return Ok(BranchAccess::Accessible);
    }

    Ok(BranchAccess::NotInBranch)
}

fn ensure_path(path: &str) -> Result<(), PermissionError> {
    if path.trim().is_empty() {
        return Err(PermissionError::EmptyPath);
    }
    Ok(())
}
