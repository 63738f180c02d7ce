// chain.rs
// ──────────────────────────────────────────────────────────────────────────────
// Path chains share their prefixes through a parent-linked arena. A chain is
// just a handle (tip link + length), so forking copies two integers and
// extending pushes one link; no chain ever observes another's appends.
// ──────────────────────────────────────────────────────────────────────────────
use super::symbol::SymbolNode;

/// Index of a link inside a [`ChainArena`].
pub type LinkId = usize;

#[derive(Clone, Debug)]
struct Link {
    node: SymbolNode,
    parent: Option<LinkId>,
}

/// Append-only storage for every node of every chain in one exploration pass.
#[derive(Clone, Debug, Default)]
pub struct ChainArena {
    links: Vec<Link>,
}

impl ChainArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a single-node chain.
    pub fn root(&mut self, node: SymbolNode) -> PathChain {
        let tip = self.push(node, None);
        PathChain { tip, len: 1 }
    }

    fn push(&mut self, node: SymbolNode, parent: Option<LinkId>) -> LinkId {
        let id = self.links.len();
        self.links.push(Link { node, parent });
        id
    }

    /// Number of links stored so far.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// A root-to-leaf sequence of nodes. Never empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathChain {
    tip: LinkId,
    len: usize,
}

impl PathChain {
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// A new chain with the same sequence. Extending it leaves `self` intact.
    pub fn fork(&self) -> PathChain {
        *self
    }

    /// Appends `node`, returning the longer chain.
    pub fn extend(self, arena: &mut ChainArena, node: SymbolNode) -> PathChain {
        let tip = arena.push(node, Some(self.tip));
        PathChain {
            tip,
            len: self.len + 1,
        }
    }

    /// The last node of the chain.
    pub fn last<'a>(&self, arena: &'a ChainArena) -> &'a SymbolNode {
        &arena.links[self.tip].node
    }

    /// Nodes from root to leaf.
    pub fn nodes<'a>(&self, arena: &'a ChainArena) -> Vec<&'a SymbolNode> {
        let mut nodes = Vec::with_capacity(self.len);
        let mut cursor = Some(self.tip);
        while let Some(id) = cursor {
            let link = &arena.links[id];
            nodes.push(&link.node);
            cursor = link.parent;
        }
        nodes.reverse();
        nodes
    }

    /// Canonical signature: node forms joined with `.`.
    pub fn render(&self, arena: &ChainArena) -> String {
        self.nodes(arena)
            .iter()
            .map(|node| node.to_string())
            .collect::<Vec<String>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str) -> SymbolNode {
        SymbolNode::Module {
            name: name.to_string(),
            value: 0,
        }
    }

    fn attribute(name: &str) -> SymbolNode {
        SymbolNode::Attribute {
            name: name.to_string(),
            value: 0,
        }
    }

    #[test]
    fn extending_a_fork_leaves_the_original_untouched() {
        let mut arena = ChainArena::new();
        let base = arena.root(module("lib"));
        let left = base.fork().extend(&mut arena, attribute("a"));
        let right = base.fork().extend(&mut arena, attribute("b"));

        assert_eq!(base.len(), 1);
        assert_eq!(base.render(&arena), "lib");
        assert_eq!(left.render(&arena), "lib.a");
        assert_eq!(right.render(&arena), "lib.b");
    }

    #[test]
    fn forks_share_their_prefix() {
        let mut arena = ChainArena::new();
        let base = arena.root(module("lib")).extend(&mut arena, module("sub"));
        let before = arena.len();
        let leaf = base.fork().extend(&mut arena, attribute("x"));
        assert_eq!(arena.len(), before + 1);
        assert_eq!(leaf.len(), 3);
        assert_eq!(leaf.last(&arena).name(), "x");
        assert_eq!(leaf.render(&arena), "lib.sub.x");
    }
}
