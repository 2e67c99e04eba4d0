//! # Arena AST
//!
//! The tree lives in a single arena; every node is addressed by a stable
//! `NodeId` index. The transformation engine never holds node references,
//! only ids, so a merge can read one loop chain while rewriting another
//! without aliasing.
//!
//! Document order is the order of a depth-first walk from the root and is
//! stable for the duration of one driver run: removal detaches a node from
//! its parent but never reuses its slot.

use crate::kind::NodeKind;

/// Stable index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Payload of one arena slot.
#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    /// Raw text payload: identifier for `Var`, literal for `Constant`,
    /// directive text for `PragmaStatement`, raw statement otherwise.
    text: String,
    /// 1-based source line, 0 for synthesized nodes.
    line: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Set when the node has been removed from the tree. Slots are never
    /// reclaimed, so ids stay valid for diagnostics.
    detached: bool,
}

/// Arena-backed abstract syntax tree.
///
/// ## Example
///
/// ```rust
/// use fortex_ast::{Ast, NodeKind};
///
/// let mut ast = Ast::new();
/// let body = ast.new_node(NodeKind::Body, "", 0);
/// ast.append_child(ast.root(), body);
/// assert_eq!(ast.children(ast.root()), &[body]);
/// ```
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Ast {
    /// Creates an empty tree holding only a `Program` root.
    pub fn new() -> Self {
        let root_data = NodeData {
            kind: NodeKind::Program,
            text: String::new(),
            line: 0,
            parent: None,
            children: Vec::new(),
            detached: false,
        };
        Ast {
            nodes: vec![root_data],
            root: NodeId(0),
        }
    }

    /// Root `Program` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of arena slots, detached nodes included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocates a detached node. Attach it with [`Ast::append_child`],
    /// [`Ast::insert_before`] or [`Ast::insert_after`].
    pub fn new_node(&mut self, kind: NodeKind, text: impl Into<String>, line: u32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            text: text.into(),
            line,
            parent: None,
            children: Vec::new(),
            detached: true,
        });
        id
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.data(id).kind
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.data(id).text
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.data_mut(id).text = text.into();
    }

    pub fn line(&self, id: NodeId) -> u32 {
        self.data(id).line
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    /// True once the node has been removed from the tree.
    pub fn is_detached(&self, id: NodeId) -> bool {
        self.data(id).detached
    }

    /// First child of the given kind, if any.
    pub fn child_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(id).iter().copied().find(|&c| self.kind(c) == kind)
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Appends `child` as the last child of `parent`.
    ///
    /// Panics if `child` is already attached; detach it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.data(child).parent.is_none(),
            "node is already attached"
        );
        self.data_mut(child).parent = Some(parent);
        self.data_mut(child).detached = false;
        self.data_mut(parent).children.push(child);
    }

    /// Inserts `node` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, node: NodeId) {
        assert!(self.data(node).parent.is_none(), "node is already attached");
        self.data_mut(node).parent = Some(parent);
        self.data_mut(node).detached = false;
        self.data_mut(parent).children.insert(0, node);
    }

    /// Inserts `node` as the sibling directly before `anchor`.
    pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) {
        self.insert_at_offset(anchor, node, 0);
    }

    /// Inserts `node` as the sibling directly after `anchor`.
    pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) {
        self.insert_at_offset(anchor, node, 1);
    }

    fn insert_at_offset(&mut self, anchor: NodeId, node: NodeId, offset: usize) {
        assert!(self.data(node).parent.is_none(), "node is already attached");
        let parent = self
            .data(anchor)
            .parent
            .expect("anchor node has no parent");
        let pos = self.position_in_parent(anchor).expect("anchor not in parent") + offset;
        self.data_mut(node).parent = Some(parent);
        self.data_mut(node).detached = false;
        self.data_mut(parent).children.insert(pos, node);
    }

    /// Detaches `id` from its parent. Removing an already-detached node is
    /// a no-op, so pragma cleanup stays idempotent across merge chains.
    pub fn remove(&mut self, id: NodeId) {
        let parent = match self.data(id).parent {
            Some(p) => p,
            None => {
                self.data_mut(id).detached = true;
                return;
            }
        };
        self.data_mut(parent).children.retain(|&c| c != id);
        let data = self.data_mut(id);
        data.parent = None;
        data.detached = true;
    }

    /// Detaches `child` from `from` and appends it to `to`, preserving
    /// relative order across repeated moves.
    pub fn reparent_append(&mut self, child: NodeId, to: NodeId) {
        if let Some(old) = self.data(child).parent {
            self.data_mut(old).children.retain(|&c| c != child);
            self.data_mut(child).parent = None;
        }
        self.data_mut(child).detached = true;
        self.append_child(to, child);
    }

    // =========================================================================
    // NAVIGATION QUERIES
    // =========================================================================

    fn position_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.data(id).parent?;
        self.data(parent).children.iter().position(|&c| c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.data(id).parent?;
        let pos = self.position_in_parent(id)?;
        self.data(parent).children.get(pos + 1).copied()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.data(id).parent?;
        let pos = self.position_in_parent(id)?;
        pos.checked_sub(1)
            .map(|p| self.data(parent).children[p])
    }

    /// First following sibling of the given kind, the node itself excluded.
    pub fn match_sibling_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut cur = self.next_sibling(id);
        while let Some(sib) = cur {
            if self.kind(sib) == kind {
                return Some(sib);
            }
            cur = self.next_sibling(sib);
        }
        None
    }

    /// True when `a` and `b` share a parent and every sibling strictly
    /// between them has a kind in `allowed`. Order of `a` and `b` does not
    /// matter.
    pub fn is_direct_sibling_only_separated_by(
        &self,
        a: NodeId,
        b: NodeId,
        allowed: &[NodeKind],
    ) -> bool {
        let parent_a = match self.data(a).parent {
            Some(p) => p,
            None => return false,
        };
        if self.data(b).parent != Some(parent_a) {
            return false;
        }
        let siblings = &self.data(parent_a).children;
        let pos_a = siblings.iter().position(|&c| c == a);
        let pos_b = siblings.iter().position(|&c| c == b);
        let (lo, hi) = match (pos_a, pos_b) {
            (Some(x), Some(y)) if x < y => (x, y),
            (Some(x), Some(y)) if y < x => (y, x),
            _ => return false,
        };
        siblings[lo + 1..hi]
            .iter()
            .all(|&between| allowed.contains(&self.kind(between)))
    }

    /// True when `a` and `b` live in the same enclosing block.
    pub fn same_parent_block(&self, a: NodeId, b: NodeId) -> bool {
        match (self.data(a).parent, self.data(b).parent) {
            (Some(pa), Some(pb)) => pa == pb,
            _ => false,
        }
    }

    /// Backward sibling walk from `from` looking for the nearest pragma
    /// whose text contains `keyword`. Read-only; returns an id, never a
    /// reference.
    pub fn find_preceding_pragma(&self, from: NodeId, keyword: &str) -> Option<NodeId> {
        let mut cur = self.prev_sibling(from);
        while let Some(sib) = cur {
            if self.kind(sib) == NodeKind::PragmaStatement && self.text(sib).contains(keyword) {
                return Some(sib);
            }
            cur = self.prev_sibling(sib);
        }
        None
    }

    /// Nearest enclosing `FunctionDefinition`, the node itself excluded.
    pub fn enclosing_function(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.data(id).parent;
        while let Some(node) = cur {
            if self.kind(node) == NodeKind::FunctionDefinition {
                return Some(node);
            }
            cur = self.data(node).parent;
        }
        None
    }

    /// Structural equality of two subtrees: kinds, texts and child shapes
    /// must match; source lines are ignored. Used for iteration-range
    /// comparison between fusion candidates.
    pub fn structurally_equal(&self, a: NodeId, b: NodeId) -> bool {
        if self.kind(a) != self.kind(b) || self.text(a) != self.text(b) {
            return false;
        }
        let ca = self.children(a);
        let cb = self.children(b);
        ca.len() == cb.len()
            && ca
                .iter()
                .zip(cb.iter())
                .all(|(&x, &y)| self.structurally_equal(x, y))
    }

    /// All attached pragma-statement nodes in document order.
    pub fn pragmas_in_document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_pragmas(self.root, &mut out);
        out
    }

    fn collect_pragmas(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if self.kind(node) == NodeKind::PragmaStatement {
            out.push(node);
        }
        for &child in self.children(node) {
            self.collect_pragmas(child, out);
        }
    }
}

impl Default for Ast {
    fn default() -> Self {
        Ast::new()
    }
}
