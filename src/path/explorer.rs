use std::collections::VecDeque;

use tracing::{debug, info, trace};

use super::chain::{ChainArena, PathChain};
use super::config::ExplorerConfig;
use super::error::TraversalError;
use super::signature::SignatureSet;
use super::symbol::{Expansion, SymbolNode};
use crate::object_model::{ObjectModel, ValueId, ValueKind};

/// `Explorer` walks an artifact breadth first and collects every public API path.
///
/// There is no visited set: cyclic object graphs terminate only because no
/// chain grows past `max_depth`.
#[derive(Clone, Debug, Default)]
pub struct Explorer {
    config: ExplorerConfig,
}

impl Explorer {
    pub fn new(config: ExplorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Explores the artifact rooted at `root` into its signature set.
    ///
    /// The front chain of the worklist is expanded while still at the front,
    /// so every acceptance check sees the parent's length. A chain whose last
    /// node is terminal, or that reached `max_depth`, is completed. A module or
    /// type without accepted children completes nothing.
    ///
    /// # Errors
    /// Returns `TraversalError` if a listed member cannot be resolved or a
    /// package's nested modules fail to load. The pass is abandoned.
    pub fn explore<M: ObjectModel + ?Sized>(
        &self,
        model: &M,
        root: ValueId,
    ) -> Result<SignatureSet, TraversalError> {
        let root_name = model.name(root);
        let mut arena = ChainArena::new();
        let mut incomplete: VecDeque<PathChain> = VecDeque::new();
        let mut completed: Vec<PathChain> = Vec::new();

        incomplete.push_back(arena.root(SymbolNode::Module {
            name: root_name.clone(),
            value: root,
        }));

        while let Some(&current) = incomplete.front() {
            if current.len() < self.config.max_depth {
                let expansion = current.last(&arena).expand(model)?;
                match expansion {
                    Expansion::Terminal => completed.push(current),
                    Expansion::Children(children) => {
                        for (name, value) in children {
                            if !self.accepts(model, &current, &name, value) {
                                trace!(member = %name, "member rejected");
                                continue;
                            }
                            let node = SymbolNode::classify(model, &name, value);
                            let forked = current.fork().extend(&mut arena, node);
                            incomplete.push_back(forked);
                        }
                    }
                }
            } else {
                completed.push(current);
            }
            incomplete.pop_front();
        }

        let signatures: SignatureSet = completed
            .iter()
            .map(|chain| chain.render(&arena))
            .collect();
        debug!(
            root = %root_name,
            nodes = arena.len(),
            chains = completed.len(),
            "exploration finished"
        );
        info!(root = %root_name, signatures = signatures.len(), "explored API surface");
        Ok(signatures)
    }

    /// Depth, visibility and exclusion filter for one candidate child.
    fn accepts<M: ObjectModel + ?Sized>(
        &self,
        model: &M,
        chain: &PathChain,
        name: &str,
        value: ValueId,
    ) -> bool {
        chain.len() < self.config.max_depth
            && self.config.is_public(name)
            && !self.is_excluded(model, value)
    }

    fn is_excluded<M: ObjectModel + ?Sized>(&self, model: &M, value: ValueId) -> bool {
        match model.kind(value) {
            ValueKind::Module { identity } => self.config.is_excluded_module(&identity),
            _ => false,
        }
    }
}
