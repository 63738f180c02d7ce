// object graph module
mod graph;

use std::fmt;

use crate::ast_loader::LoadError;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the graph module.
//─────────────────────────────────────────────────────────────────────────────
pub use graph::{Object, ObjectGraph};

/// Handle of one value inside an object model.
pub type ValueId = usize;

/// Classification of a value, as seen by the explorer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// A module-like artifact. `identity` is its dotted, fully qualified name.
    Module { identity: String },
    /// A class. `meta` marks a type whose instances are themselves types.
    Type { meta: bool },
    /// Something invocable, with its parameter names.
    Callable(Parameters),
    /// Any other value.
    Plain,
}

/// Parameter names of a callable, grouped the way Python groups them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parameters {
    pub positional_only: Vec<String>,
    pub regular: Vec<String>,
    pub var_positional: Option<String>,
    pub keyword_only: Vec<String>,
    pub var_keyword: Option<String>,
}

impl Parameters {
    /// Builds a parameter list made only of regular parameters.
    pub fn regular<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regular: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Drops the first positional parameter (`self`/`cls` of a bound method).
    pub fn without_receiver(mut self) -> Self {
        if !self.positional_only.is_empty() {
            self.positional_only.remove(0);
        } else if !self.regular.is_empty() {
            self.regular.remove(0);
        }
        self
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.positional_only.iter().cloned());
        if !self.positional_only.is_empty() {
            parts.push("/".to_string());
        }
        parts.extend(self.regular.iter().cloned());
        match &self.var_positional {
            Some(name) => parts.push(format!("*{}", name)),
            None if !self.keyword_only.is_empty() => parts.push("*".to_string()),
            None => {}
        }
        parts.extend(self.keyword_only.iter().cloned());
        if let Some(name) = &self.var_keyword {
            parts.push(format!("**{}", name));
        }
        write!(f, "({})", parts.join(", "))
    }
}

/// The capability the explorer needs from whatever produced the artifact.
///
/// Implementations may be backed by static analysis (see
/// [`crate::ast_loader::PythonModel`]) or by a hand-built [`ObjectGraph`].
pub trait ObjectModel {
    /// Name used in diagnostics for `value`.
    fn name(&self, value: ValueId) -> String;

    /// Classifies `value`.
    fn kind(&self, value: ValueId) -> ValueKind;

    /// Lists every member name reachable on `value`, inherited ones included.
    fn member_names(&self, value: ValueId) -> Vec<String>;

    /// Resolves one member previously listed by [`ObjectModel::member_names`].
    fn member(&self, value: ValueId, name: &str) -> Option<ValueId>;

    /// Lists and resolves the whole directory of `value` in one pass. A
    /// listed name that fails to resolve is paired with `None`.
    fn members(&self, value: ValueId) -> Vec<(String, Option<ValueId>)> {
        self.member_names(value)
            .into_iter()
            .map(|name| {
                let member = self.member(value, &name);
                (name, member)
            })
            .collect()
    }

    /// Makes the nested sub-artifacts of `module` visible as its members.
    fn load_submodules(&self, _module: ValueId) -> Result<(), LoadError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_plain_parameters() {
        assert_eq!(Parameters::regular(["x", "y"]).to_string(), "(x, y)");
        assert_eq!(Parameters::default().to_string(), "()");
    }

    #[test]
    fn renders_every_parameter_group() {
        let params = Parameters {
            positional_only: vec!["a".into()],
            regular: vec!["b".into()],
            var_positional: Some("args".into()),
            keyword_only: vec!["c".into()],
            var_keyword: Some("kw".into()),
        };
        assert_eq!(params.to_string(), "(a, /, b, *args, c, **kw)");
    }

    #[test]
    fn bare_star_separates_keyword_only() {
        let params = Parameters {
            regular: vec!["a".into()],
            keyword_only: vec!["b".into()],
            ..Parameters::default()
        };
        assert_eq!(params.to_string(), "(a, *, b)");
    }

    #[test]
    fn receiver_is_dropped_from_first_group() {
        assert_eq!(
            Parameters::regular(["cls", "value"]).without_receiver().to_string(),
            "(value)"
        );
        let positional = Parameters {
            positional_only: vec!["self".into()],
            regular: vec!["x".into()],
            ..Parameters::default()
        };
        assert_eq!(positional.without_receiver().to_string(), "(x)");
    }
}
