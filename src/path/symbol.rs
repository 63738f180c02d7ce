use std::fmt;

use super::error::TraversalError;
use crate::object_model::{ObjectModel, Parameters, ValueId, ValueKind};

/// What a node yields when the explorer asks it to continue.
#[derive(Debug)]
pub enum Expansion {
    /// The node ends its chain.
    Terminal,
    /// Named children to filter and append, in directory order.
    Children(Vec<(String, ValueId)>),
}

/// One classified element on an API path.
///
/// `name` is the member name the value was reached under, which is not
/// necessarily the name the value was defined with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolNode {
    Module { name: String, value: ValueId },
    Type { name: String, value: ValueId },
    Callable {
        name: String,
        value: ValueId,
        params: Parameters,
    },
    Attribute { name: String, value: ValueId },
}

impl SymbolNode {
    /// Classifies `value`, reached as `name`. Meta-types are plain
    /// attributes so the explorer never walks metaclass machinery.
    pub fn classify<M: ObjectModel + ?Sized>(model: &M, name: &str, value: ValueId) -> Self {
        let name = name.to_string();
        match model.kind(value) {
            ValueKind::Module { .. } => SymbolNode::Module { name, value },
            ValueKind::Type { meta: false } => SymbolNode::Type { name, value },
            ValueKind::Callable(params) => SymbolNode::Callable {
                name,
                value,
                params,
            },
            ValueKind::Type { meta: true } | ValueKind::Plain => {
                SymbolNode::Attribute { name, value }
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SymbolNode::Module { name, .. }
            | SymbolNode::Type { name, .. }
            | SymbolNode::Callable { name, .. }
            | SymbolNode::Attribute { name, .. } => name,
        }
    }

    pub fn value(&self) -> ValueId {
        match self {
            SymbolNode::Module { value, .. }
            | SymbolNode::Type { value, .. }
            | SymbolNode::Callable { value, .. }
            | SymbolNode::Attribute { value, .. } => *value,
        }
    }

    /// Lists the children of a module or type; callables and attributes are
    /// terminal. A module first loads its nested modules so they show up in
    /// its directory.
    pub fn expand<M: ObjectModel + ?Sized>(&self, model: &M) -> Result<Expansion, TraversalError> {
        match self {
            SymbolNode::Module { value, .. } => {
                model
                    .load_submodules(*value)
                    .map_err(|source| TraversalError::SubmoduleLoad {
                        module: model.name(*value),
                        source,
                    })?;
                directory(model, *value).map(Expansion::Children)
            }
            SymbolNode::Type { value, .. } => directory(model, *value).map(Expansion::Children),
            SymbolNode::Callable { .. } | SymbolNode::Attribute { .. } => Ok(Expansion::Terminal),
        }
    }
}

/// Resolves every listed member of `owner`. A listed name that fails to
/// resolve aborts the pass.
fn directory<M: ObjectModel + ?Sized>(
    model: &M,
    owner: ValueId,
) -> Result<Vec<(String, ValueId)>, TraversalError> {
    model
        .members(owner)
        .into_iter()
        .map(|(name, member)| match member {
            Some(value) => Ok((name, value)),
            None => Err(TraversalError::UnresolvedMember {
                owner: model.name(owner),
                name,
            }),
        })
        .collect()
}

impl fmt::Display for SymbolNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolNode::Module { name, .. }
            | SymbolNode::Type { name, .. }
            | SymbolNode::Attribute { name, .. } => f.write_str(name),
            SymbolNode::Callable { name, params, .. } => write!(f, "{}{}", name, params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_model::ObjectGraph;

    #[test]
    fn classifies_each_kind() {
        let mut graph = ObjectGraph::new();
        let module = graph.add_module("pkg.mod");
        let ty = graph.add_type("Widget", false);
        let meta = graph.add_type("Meta", true);
        let func = graph.add_callable("f", Parameters::regular(["x"]));
        let plain = graph.add_plain("LIMIT");

        assert!(matches!(
            SymbolNode::classify(&graph, "mod", module),
            SymbolNode::Module { .. }
        ));
        assert!(matches!(
            SymbolNode::classify(&graph, "Widget", ty),
            SymbolNode::Type { .. }
        ));
        assert!(matches!(
            SymbolNode::classify(&graph, "Meta", meta),
            SymbolNode::Attribute { .. }
        ));
        assert!(matches!(
            SymbolNode::classify(&graph, "f", func),
            SymbolNode::Callable { .. }
        ));
        assert!(matches!(
            SymbolNode::classify(&graph, "LIMIT", plain),
            SymbolNode::Attribute { .. }
        ));
    }

    #[test]
    fn renders_canonical_forms() {
        let mut graph = ObjectGraph::new();
        let func = graph.add_callable("f", Parameters::regular(["x", "y"]));
        let plain = graph.add_plain("LIMIT");
        assert_eq!(SymbolNode::classify(&graph, "f", func).to_string(), "f(x, y)");
        // The member name wins over the defined name.
        assert_eq!(SymbolNode::classify(&graph, "alias", func).to_string(), "alias(x, y)");
        assert_eq!(SymbolNode::classify(&graph, "LIMIT", plain).to_string(), "LIMIT");
    }

    #[test]
    fn terminal_nodes_do_not_expand() {
        let mut graph = ObjectGraph::new();
        let func = graph.add_callable("f", Parameters::default());
        let node = SymbolNode::classify(&graph, "f", func);
        assert!(matches!(node.expand(&graph).unwrap(), Expansion::Terminal));
    }

    #[test]
    fn types_expand_to_their_directory() {
        let mut graph = ObjectGraph::new();
        let ty = graph.add_type("Widget", false);
        let method = graph.add_callable("draw", Parameters::regular(["self"]));
        graph.set_member(ty, "draw", method);
        let node = SymbolNode::classify(&graph, "Widget", ty);
        match node.expand(&graph).unwrap() {
            Expansion::Children(children) => {
                assert_eq!(children, vec![("draw".to_string(), method)]);
            }
            Expansion::Terminal => panic!("types are not terminal"),
        }
    }
}
