// ============================================================================
// CargoOps Core - Menu Tree
// File: crates/cargoops-core/src/domain/menu.rs
// Description: Immutable menu hierarchy built once at startup
// ============================================================================

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// A navigable section of the console.
///
/// Keys are path-like (`"binning/assign"`); a child's key always extends its
/// parent's key by exactly one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    pub key: String,
    pub label: String,
    pub parent_key: Option<String>,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn leaf(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            parent_key: None,
            children: Vec::new(),
        }
    }

    pub fn branch(key: &str, label: &str, children: Vec<MenuNode>) -> Self {
        let children = children
            .into_iter()
            .map(|mut child| {
                child.parent_key = Some(key.to_string());
                child
            })
            .collect();
        Self {
            key: key.to_string(),
            label: label.to_string(),
            parent_key: None,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuTreeError {
    #[error("Menu key must not be empty")]
    EmptyKey,

    #[error("Menu key has an empty path segment: {0}")]
    EmptySegment(String),

    #[error("Duplicate menu key: {0}")]
    DuplicateKey(String),

    #[error("Menu key {key} does not extend its parent {parent}")]
    NotUnderParent { key: String, parent: String },

    #[error("Menu key {0} is deeper than two segments")]
    TooDeep(String),
}

/// Validated menu hierarchy with a flat key → label index in tree order.
#[derive(Debug, Clone)]
pub struct MenuTree {
    roots: Vec<MenuNode>,
    labels: IndexMap<String, String>,
}

impl MenuTree {
    pub fn new(roots: Vec<MenuNode>) -> Result<Self, MenuTreeError> {
        let mut labels = IndexMap::new();
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(roots.len());

        for root in roots {
            normalized.push(Self::index_node(root, None, &mut seen, &mut labels)?);
        }

        Ok(Self { roots: normalized, labels })
    }

    fn index_node(
        mut node: MenuNode,
        parent: Option<&str>,
        seen: &mut HashSet<String>,
        labels: &mut IndexMap<String, String>,
    ) -> Result<MenuNode, MenuTreeError> {
        if node.key.is_empty() {
            return Err(MenuTreeError::EmptyKey);
        }
        let segments: Vec<&str> = node.key.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(MenuTreeError::EmptySegment(node.key));
        }
        if segments.len() > 2 {
            return Err(MenuTreeError::TooDeep(node.key));
        }
        if let Some(parent) = parent {
            let extends = node
                .key
                .strip_prefix(parent)
                .and_then(|rest| rest.strip_prefix('/'))
                .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'));
            if !extends {
                return Err(MenuTreeError::NotUnderParent {
                    key: node.key,
                    parent: parent.to_string(),
                });
            }
        }
        if !seen.insert(node.key.clone()) {
            return Err(MenuTreeError::DuplicateKey(node.key));
        }

        node.parent_key = parent.map(str::to_string);
        labels.insert(node.key.clone(), node.label.clone());

        let children = std::mem::take(&mut node.children);
        let mut indexed = Vec::with_capacity(children.len());
        for child in children {
            indexed.push(Self::index_node(child, Some(&node.key), seen, labels)?);
        }
        node.children = indexed;

        Ok(node)
    }

    /// The warehouse console menu.
    pub fn warehouse() -> Result<Self, MenuTreeError> {
        Self::new(vec![
            MenuNode::leaf("dashboard", "Dashboard"),
            MenuNode::leaf("master", "Master"),
            MenuNode::branch(
                "storingorder",
                "Storing Order",
                vec![MenuNode::leaf("storingorder/list", "Storing Order List")],
            ),
            MenuNode::branch(
                "receiving",
                "Receiving",
                vec![
                    MenuNode::leaf("receiving/soreceiving", "SO Receiving"),
                    MenuNode::leaf("receiving/list", "Receiving List"),
                ],
            ),
            MenuNode::branch(
                "tq",
                "Technical Query",
                vec![MenuNode::leaf("tq/package", "Package Technical Query")],
            ),
            MenuNode::branch(
                "binning",
                "Binning",
                vec![MenuNode::leaf("binning/assign", "Bin Assignment List")],
            ),
            MenuNode::branch(
                "inventory",
                "Inventory",
                vec![
                    MenuNode::leaf("inventory/management", "Inventory Management"),
                    MenuNode::leaf("inventory/reconciliation", "Inventory Reconciliation"),
                ],
            ),
            MenuNode::branch(
                "picking",
                "Picking",
                vec![
                    MenuNode::leaf("picking/mypicking", "My Picking"),
                    MenuNode::leaf("picking/pickslip", "Pick Slip"),
                ],
            ),
            MenuNode::branch(
                "dispatch",
                "Dispatch",
                vec![
                    MenuNode::leaf("dispatch/mypacking", "My Packing"),
                    MenuNode::leaf("dispatch/inspection", "Dispatch Inspection"),
                ],
            ),
        ])
    }

    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.labels.contains_key(key)
    }

    /// Every key, in tree (pre-)order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Pre-order walk with depth (roots are depth 0).
    pub fn walk(&self) -> Vec<(usize, &MenuNode)> {
        fn visit<'a>(node: &'a MenuNode, depth: usize, out: &mut Vec<(usize, &'a MenuNode)>) {
            out.push((depth, node));
            for child in &node.children {
                visit(child, depth + 1, out);
            }
        }

        let mut out = Vec::with_capacity(self.labels.len());
        for root in &self.roots {
            visit(root, 0, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warehouse_tree_builds() {
        let tree = MenuTree::warehouse().unwrap();
        assert_eq!(tree.len(), 20);
        assert_eq!(tree.label("binning/assign"), Some("Bin Assignment List"));
        assert_eq!(tree.keys().next(), Some("dashboard"));
    }

    #[test]
    fn test_children_get_parent_key() {
        let tree = MenuTree::warehouse().unwrap();
        let picking = tree.roots().iter().find(|n| n.key == "picking").unwrap();
        assert!(picking.children.iter().all(|c| c.parent_key.as_deref() == Some("picking")));
        assert!(picking.parent_key.is_none());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = MenuTree::new(vec![
            MenuNode::leaf("dashboard", "Dashboard"),
            MenuNode::leaf("dashboard", "Again"),
        ])
        .unwrap_err();
        assert_eq!(err, MenuTreeError::DuplicateKey("dashboard".into()));
    }

    #[test]
    fn test_child_must_extend_parent() {
        let err = MenuTree::new(vec![MenuNode::branch(
            "binning",
            "Binning",
            vec![MenuNode::leaf("picking/pickslip", "Pick Slip")],
        )])
        .unwrap_err();
        assert!(matches!(err, MenuTreeError::NotUnderParent { .. }));
    }

    #[test]
    fn test_empty_segment_and_depth_rejected() {
        assert!(matches!(
            MenuTree::new(vec![MenuNode::leaf("a//b", "x")]),
            Err(MenuTreeError::EmptySegment(_))
        ));
        assert!(matches!(
            MenuTree::new(vec![MenuNode::leaf("a/b/c", "x")]),
            Err(MenuTreeError::TooDeep(_))
        ));
        assert_eq!(MenuTree::new(vec![MenuNode::leaf("", "x")]).unwrap_err(), MenuTreeError::EmptyKey);
    }

    #[test]
    fn test_walk_reports_depth() {
        let tree = MenuTree::warehouse().unwrap();
        let walk = tree.walk();
        assert_eq!(walk.len(), tree.len());
        let (depth, node) = walk[3];
        assert_eq!((depth, node.key.as_str()), (1, "storingorder/list"));
    }
}
