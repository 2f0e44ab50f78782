//! Flat table-of-contents lists to outline trees and back.
//!
//! The tree is an arena addressed by [`NodeId`]. Nodes are stored in document
//! order, so a child always has a larger index than its parent. Building and
//! flattening both run on explicit stacks, which keeps very deep or very long
//! outlines off the call stack.

use serde_json::Value;

use crate::error::{OutlineError, Result};
use crate::model::{EditedOutlineNode, OutlineNode, TocEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct ArenaNode {
    entry: TocEntry,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct OutlineTree {
    nodes: Vec<ArenaNode>,
    roots: Vec<NodeId>,
}

impl OutlineTree {
    /// Builds the tree in one pass over `entries`.
    ///
    /// Levels may skip (level 1 followed by level 3); an entry is nested under
    /// the nearest preceding entry with a strictly smaller level.
    pub fn build(entries: &[TocEntry]) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(entries.len()),
            roots: Vec::new(),
        };

        // (level, node); `None` is the implicit level-0 root.
        let mut open: Vec<(u32, Option<NodeId>)> = vec![(0, None)];

        for entry in entries {
            while open.len() > 1 && open.last().is_some_and(|(level, _)| *level >= entry.level) {
                open.pop();
            }

            let id = NodeId(tree.nodes.len());
            tree.nodes.push(ArenaNode {
                entry: entry.clone(),
                children: Vec::new(),
            });

            match open.last().and_then(|(_, parent)| *parent) {
                Some(parent) => tree.nodes[parent.0].children.push(id),
                None => tree.roots.push(id),
            }

            open.push((entry.level, Some(id)));
        }

        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn entry(&self, id: NodeId) -> &TocEntry {
        &self.nodes[id.0].entry
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Pre-order traversal, parents before their children.
    pub fn flatten(&self) -> Vec<TocEntry> {
        let mut flat = Vec::with_capacity(self.nodes.len());
        let mut pending: Vec<NodeId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = pending.pop() {
            let node = &self.nodes[id.0];
            flat.push(node.entry.clone());
            pending.extend(node.children.iter().rev().copied());
        }

        flat
    }

    /// Converts the arena into the nested presentation shape.
    pub fn to_nodes(&self) -> Vec<OutlineNode> {
        let mut built: Vec<Option<OutlineNode>> = vec![None; self.nodes.len()];

        // Children sit at higher indices, so a reverse sweep always finds
        // them finished.
        for index in (0..self.nodes.len()).rev() {
            let node = &self.nodes[index];
            let children = node
                .children
                .iter()
                .filter_map(|child| built[child.0].take())
                .collect();
            built[index] = Some(OutlineNode {
                title: node.entry.title.clone(),
                page: node.entry.page,
                level: node.entry.level,
                children,
            });
        }

        self.roots
            .iter()
            .filter_map(|root| built[root.0].take())
            .collect()
    }
}

pub fn build_outline(entries: &[TocEntry]) -> Vec<OutlineNode> {
    OutlineTree::build(entries).to_nodes()
}

/// Flattens a nested outline in pre-order. Each node's stored `level` is kept
/// as-is; it is not derived from nesting depth.
pub fn flatten_outline(nodes: &[OutlineNode]) -> Vec<TocEntry> {
    let mut flat = Vec::new();
    let mut pending: Vec<&OutlineNode> = nodes.iter().rev().collect();

    while let Some(node) = pending.pop() {
        flat.push(TocEntry::new(node.level, node.title.clone(), node.page));
        pending.extend(node.children.iter().rev());
    }

    flat
}

/// Flattens an externally edited outline in pre-order and validates every
/// node against the document's page count. Titles are trimmed and the stored
/// `level` is kept. The first invalid node rejects the whole outline.
pub fn flatten_edited_outline(
    nodes: &[EditedOutlineNode],
    total_pages: u32,
) -> Result<Vec<TocEntry>> {
    let mut flat = Vec::new();
    let mut pending: Vec<&EditedOutlineNode> = nodes.iter().rev().collect();

    while let Some(node) = pending.pop() {
        flat.push(edited_entry(node, total_pages)?);
        pending.extend(node.children.iter().rev());
    }

    Ok(flat)
}

fn edited_entry(node: &EditedOutlineNode, total_pages: u32) -> Result<TocEntry> {
    let title = node.title.trim();
    let page = integer_field(&node.page);
    let reported_page = page.unwrap_or(0);

    if title.is_empty() {
        return Err(OutlineError::invalid_entry(
            title,
            reported_page,
            "title must not be empty",
        ));
    }
    let Some(page) = page else {
        return Err(OutlineError::invalid_entry(
            title,
            reported_page,
            format!("page is not an integer: {}", node.page),
        ));
    };
    let Some(level) = integer_field(&node.level)
        .and_then(|level| u32::try_from(level).ok())
        .filter(|level| *level >= 1)
    else {
        return Err(OutlineError::invalid_entry(
            title,
            page,
            format!("level must be an integer of at least 1, got {}", node.level),
        ));
    };
    if page < 1 || page > i64::from(total_pages) {
        return Err(OutlineError::invalid_entry(
            title,
            page,
            format!("page out of range (1-{total_pages})"),
        ));
    }

    Ok(TocEntry::new(level, title, page as u32))
}

/// Integers, or strings holding one, as editing front ends send either.
fn integer_field(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn validate_entries(entries: &[TocEntry], total_pages: u32) -> Result<()> {
    for entry in entries {
        validate_entry(entry, total_pages)?;
    }
    Ok(())
}

fn validate_entry(entry: &TocEntry, total_pages: u32) -> Result<()> {
    let page = i64::from(entry.page);

    if entry.title.trim().is_empty() {
        return Err(OutlineError::invalid_entry(
            &entry.title,
            page,
            "title must not be empty",
        ));
    }
    if entry.level == 0 {
        return Err(OutlineError::invalid_entry(
            &entry.title,
            page,
            "level must be at least 1",
        ));
    }
    if entry.page < 1 || entry.page > total_pages {
        return Err(OutlineError::invalid_entry(
            &entry.title,
            page,
            format!("page out of range (1-{total_pages})"),
        ));
    }

    Ok(())
}
