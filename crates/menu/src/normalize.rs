use thiserror::Error;
use tracing::warn;

use wayfinder_auth::Permission;
use wayfinder_core::MenuId;

use crate::node::{ActionNode, DirectoryNode, LeafNode, MenuNode, Status, Visibility};
use crate::raw::{LooseValue, RawMenuRecord};

/// Maximum nesting the normalizer will follow. The menu collaborator is
/// contractually acyclic, but a malformed payload must fail loudly instead
/// of exhausting the call stack.
pub const MAX_DEPTH: usize = 32;

/// Structurally invalid input from the menu-tree collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed menu tree: {0}")]
pub struct MalformedTreeError(pub String);

/// Canonicalize a raw backend menu tree into `MenuNode`s.
///
/// Kind mapping: 0 → Directory, 1 → Leaf, 2 → Action (letter forms M/C/F
/// are accepted too). Missing sort keys default to 0; visibility and status
/// accept integer or string encodings. Siblings are ordered by sort key,
/// stable within equal keys.
pub fn normalize_tree(records: &[RawMenuRecord]) -> Result<Vec<MenuNode>, MalformedTreeError> {
    normalize_level(records, 0)
}

fn normalize_level(
    records: &[RawMenuRecord],
    depth: usize,
) -> Result<Vec<MenuNode>, MalformedTreeError> {
    if depth >= MAX_DEPTH {
        return Err(MalformedTreeError(format!(
            "nesting exceeds {MAX_DEPTH} levels"
        )));
    }

    let mut nodes = Vec::with_capacity(records.len());
    for record in records {
        normalize_record(record, depth, &mut nodes)?;
    }
    nodes.sort_by_key(MenuNode::sort_key);
    Ok(nodes)
}

fn normalize_record(
    record: &RawMenuRecord,
    depth: usize,
    out: &mut Vec<MenuNode>,
) -> Result<(), MalformedTreeError> {
    let id = record.record_id().map(MenuId::new).ok_or_else(|| {
        MalformedTreeError(format!("menu record '{}' has no id", record.menu_name))
    })?;
    let parent = (record.parent_id != 0).then(|| MenuId::new(record.parent_id));
    let sort_key = record
        .record_sort_key()
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    let visibility = if flag(record.visible.as_ref()) {
        Visibility::Hidden
    } else {
        Visibility::Visible
    };
    let status = if flag(record.status.as_ref()) {
        Status::Disabled
    } else {
        Status::Active
    };
    let permission = non_empty(&record.perms).map(Permission::from);
    let icon = non_empty(&record.icon);

    match resolve_kind(record.menu_type.as_ref()) {
        ResolvedKind::Directory => {
            let children = normalize_level(&record.children, depth + 1)?;
            // "Layout" is the backend's spelling of "use the default shell".
            let component = non_empty(&record.component).filter(|c| c != "Layout");
            out.push(MenuNode::Directory(DirectoryNode {
                id,
                label: record.menu_name.clone(),
                parent,
                sort_key,
                path: record.path.clone(),
                component,
                icon,
                visibility,
                status,
                permission,
                children,
            }));
        }
        ResolvedKind::Leaf => {
            let children = normalize_level(&record.children, depth + 1)?;
            out.push(MenuNode::Leaf(LeafNode {
                id,
                label: record.menu_name.clone(),
                parent,
                sort_key,
                path: record.path.clone(),
                component: record.component.clone(),
                query: record.query.clone().filter(|q| !q.is_empty()),
                icon,
                is_external_link: flag(record.is_frame.as_ref()),
                is_cached: flag(record.is_cache.as_ref()),
                visibility,
                status,
                permission,
                children,
            }));
        }
        ResolvedKind::Action => {
            out.push(MenuNode::Action(ActionNode {
                id,
                label: record.menu_name.clone(),
                parent,
                sort_key,
                status,
                permission,
            }));
            flatten_stray_children(record, "action", depth, out)?;
        }
        ResolvedKind::Unknown(code) => {
            // Out-of-range kinds are kept loudly rather than dropped: the
            // node still contributes its permission, it just never routes.
            warn!(
                kind = %code,
                label = %record.menu_name,
                "unknown menu kind; keeping as permission-only entry"
            );
            out.push(MenuNode::Action(ActionNode {
                id,
                label: record.menu_name.clone(),
                parent,
                sort_key,
                status,
                permission,
            }));
            flatten_stray_children(record, "unknown-kind", depth, out)?;
        }
    }
    Ok(())
}

/// Children under a non-container node keep their permissions by being
/// lifted to the parent's sibling level.
fn flatten_stray_children(
    record: &RawMenuRecord,
    kind: &str,
    depth: usize,
    out: &mut Vec<MenuNode>,
) -> Result<(), MalformedTreeError> {
    if record.children.is_empty() {
        return Ok(());
    }
    warn!(
        label = %record.menu_name,
        count = record.children.len(),
        "{kind} menu entry has children; lifting them to the parent level"
    );
    out.extend(normalize_level(&record.children, depth + 1)?);
    Ok(())
}

enum ResolvedKind {
    Directory,
    Leaf,
    Action,
    Unknown(String),
}

fn resolve_kind(value: Option<&LooseValue>) -> ResolvedKind {
    let Some(value) = value else {
        return ResolvedKind::Unknown("<missing>".to_string());
    };
    match value.as_code().as_str() {
        "0" | "M" => ResolvedKind::Directory,
        "1" | "C" => ResolvedKind::Leaf,
        "2" | "F" => ResolvedKind::Action,
        other => ResolvedKind::Unknown(other.to_string()),
    }
}

fn flag(value: Option<&LooseValue>) -> bool {
    value.is_some_and(LooseValue::is_set)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
