use serde::{Deserialize, Serialize};

use wayfinder_auth::Permission;
use wayfinder_core::MenuId;

/// Display state of a menu entry. Hidden entries still produce routes and
/// contribute permissions; they only disappear from the rendered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Administrative state of a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Disabled,
}

/// A container entry: groups children, renders the layout shell, never a
/// page of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub id: MenuId,
    pub label: String,
    pub parent: Option<MenuId>,
    pub sort_key: i32,
    pub path: String,
    /// Explicit container component override; `None` means the default
    /// layout shell.
    pub component: Option<String>,
    pub icon: Option<String>,
    pub visibility: Visibility,
    pub status: Status,
    pub permission: Option<Permission>,
    pub children: Vec<MenuNode>,
}

/// A navigable page entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    pub id: MenuId,
    pub label: String,
    pub parent: Option<MenuId>,
    pub sort_key: i32,
    pub path: String,
    pub component: String,
    pub query: Option<String>,
    pub icon: Option<String>,
    pub is_external_link: bool,
    pub is_cached: bool,
    pub visibility: Visibility,
    pub status: Status,
    pub permission: Option<Permission>,
    pub children: Vec<MenuNode>,
}

/// A non-navigable entry that exists only to carry a permission token
/// (e.g. a button-level grant). Never produces a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionNode {
    pub id: MenuId,
    pub label: String,
    pub parent: Option<MenuId>,
    pub sort_key: i32,
    pub status: Status,
    pub permission: Option<Permission>,
}

/// Canonical menu tree node.
///
/// Built bottom-up by the normalizer and never mutated afterwards; each
/// regeneration builds a new tree and swaps it in atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MenuNode {
    Directory(DirectoryNode),
    Leaf(LeafNode),
    Action(ActionNode),
}

impl MenuNode {
    pub fn id(&self) -> MenuId {
        match self {
            MenuNode::Directory(n) => n.id,
            MenuNode::Leaf(n) => n.id,
            MenuNode::Action(n) => n.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MenuNode::Directory(n) => &n.label,
            MenuNode::Leaf(n) => &n.label,
            MenuNode::Action(n) => &n.label,
        }
    }

    pub fn sort_key(&self) -> i32 {
        match self {
            MenuNode::Directory(n) => n.sort_key,
            MenuNode::Leaf(n) => n.sort_key,
            MenuNode::Action(n) => n.sort_key,
        }
    }

    pub fn permission(&self) -> Option<&Permission> {
        match self {
            MenuNode::Directory(n) => n.permission.as_ref(),
            MenuNode::Leaf(n) => n.permission.as_ref(),
            MenuNode::Action(n) => n.permission.as_ref(),
        }
    }

    /// Child nodes; actions have none.
    pub fn children(&self) -> &[MenuNode] {
        match self {
            MenuNode::Directory(n) => &n.children,
            MenuNode::Leaf(n) => &n.children,
            MenuNode::Action(_) => &[],
        }
    }

    /// Display state; actions are never displayed.
    pub fn visibility(&self) -> Visibility {
        match self {
            MenuNode::Directory(n) => n.visibility,
            MenuNode::Leaf(n) => n.visibility,
            MenuNode::Action(_) => Visibility::Hidden,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            MenuNode::Directory(n) => n.status,
            MenuNode::Leaf(n) => n.status,
            MenuNode::Action(n) => n.status,
        }
    }
}
