use wayfinder_auth::PermissionSet;

use crate::node::MenuNode;

/// Flatten a normalized menu tree into the session's permission set.
///
/// Every node is visited regardless of kind, visibility, or status: hidden
/// and disabled entries still carry grants that must hold for entry points
/// reached outside the visible menu. Empty tokens are never inserted and
/// duplicates collapse.
pub fn extract_permissions(nodes: &[MenuNode]) -> PermissionSet {
    let mut set = PermissionSet::new();
    visit(nodes, &mut set);
    set
}

fn visit(nodes: &[MenuNode], set: &mut PermissionSet) {
    for node in nodes {
        if let Some(permission) = node.permission() {
            set.insert(permission.clone());
        }
        visit(node.children(), set);
    }
}
