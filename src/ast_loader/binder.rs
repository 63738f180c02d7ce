// binder.rs
// ──────────────────────────────────────────────────────────────────────────────
// Turn the top-level statements of one Python module into members of an
// `ObjectGraph` value, approximating what executing the module would bind.
// Module and class bodies are walked; function bodies never are. Branches of
// `if`/`try`/`while`/`for`/`with`/`match` are all bound as if executed, so a
// later binding of the same name replaces an earlier one. The one exception is
// the body of `if __name__ == "__main__":`, which never runs on import.
// ──────────────────────────────────────────────────────────────────────────────
use rustpython_ast::{
    Alias, Arg, Arguments, CmpOp, Constant, Expr, ExprAttribute, ExprCall, ExprCompare,
    ExprConstant, ExprLambda, ExprList, ExprName, ExprStarred, ExprTuple, Stmt, StmtAnnAssign,
    StmtAssign, StmtAsyncFor, StmtAsyncFunctionDef, StmtAsyncWith, StmtClassDef, StmtDelete,
    StmtFor, StmtFunctionDef, StmtIf, StmtImport, StmtImportFrom, StmtWith, Visitor,
};
use tracing::trace;

use super::error::LoadError;
use super::model::ModuleLoader;
use crate::object_model::{ObjectModel, Parameters, ValueId, ValueKind};
use crate::path::ExclusionRegistry;

/// Builtin base classes whose subclasses are meta-types.
const META_TYPE_BASES: &[&str] = &["type", "ABCMeta", "EnumMeta", "EnumType"];

/// Decorator names turning a function into a data descriptor.
const PROPERTY_DECORATORS: &[&str] = &["property", "cached_property", "abstractproperty"];

/// Attributes every class defined in source carries on top of `object`'s.
const CLASS_ATTRIBUTES: &[&str] = &["__dict__", "__module__", "__weakref__"];

/// Accessor suffixes of `@name.setter` style decorators.
const PROPERTY_ACCESSORS: &[&str] = &["setter", "getter", "deleter"];

/// How a decorator list changes what a `def` binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Decoration {
    Plain,
    Property,
    ClassMethod,
}

/// Binds the statements of one module body into its module value.
pub(crate) struct ScopeBinder<'a> {
    loader: &'a mut ModuleLoader,
    /// Dotted name of the module being bound.
    qualified: String,
    /// Whether the module is a package (relative imports resolve inside it).
    is_package: bool,
    /// Namespace stack: the module first, then any enclosing class bodies.
    scopes: Vec<ValueId>,
    /// First load failure hit while resolving an import.
    error: Option<LoadError>,
}

impl<'a> ScopeBinder<'a> {
    pub(crate) fn new(
        loader: &'a mut ModuleLoader,
        module: ValueId,
        qualified: &str,
        is_package: bool,
    ) -> Self {
        Self {
            loader,
            qualified: qualified.to_string(),
            is_package,
            scopes: vec![module],
            error: None,
        }
    }

    /// Binds every statement, then reports the first import failure, if any.
    pub(crate) fn bind(mut self, suite: Vec<Stmt>) -> Result<(), LoadError> {
        for stmt in suite {
            if self.error.is_some() {
                break;
            }
            self.visit_stmt(stmt);
        }
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn module(&self) -> ValueId {
        self.scopes[0]
    }

    fn current_scope(&self) -> ValueId {
        self.scopes[self.scopes.len() - 1]
    }

    fn bind_name(&mut self, name: &str, value: ValueId) {
        let scope = self.current_scope();
        trace!(module = %self.qualified, name, "binding");
        self.loader.graph.set_member(scope, name, value);
    }

    fn record_error(&mut self, error: LoadError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Class bodies see their own namespace, then the module's globals.
    fn lookup(&self, name: &str) -> Option<ValueId> {
        let graph = &self.loader.graph;
        graph
            .own_member(self.current_scope(), name)
            .or_else(|| graph.own_member(self.module(), name))
    }

    /// Resolves a name or dotted attribute to an already bound value.
    fn resolve_expr(&self, expr: &Expr) -> Option<ValueId> {
        match expr {
            Expr::Name(ExprName { id, .. }) => self.lookup(id.as_str()),
            Expr::Attribute(ExprAttribute { value, attr, .. }) => {
                let owner = self.resolve_expr(value)?;
                self.loader.graph.member(owner, attr.as_str())
            }
            _ => None,
        }
    }

    /// The value an assignment binds to `target_name`.
    fn value_for(&mut self, target_name: &str, expr: &Expr) -> ValueId {
        if let Expr::Lambda(ExprLambda { args, .. }) = expr {
            return self
                .loader
                .graph
                .add_callable(target_name, parameters_of(args));
        }
        match self.resolve_expr(expr) {
            Some(existing) => existing,
            None => self.loader.graph.add_plain(target_name),
        }
    }

    /// Binds an assignment target. Unpacking targets bind opaque values.
    fn bind_target(&mut self, target: &Expr, value: Option<ValueId>) {
        match target {
            Expr::Name(ExprName { id, .. }) => {
                let value = value.unwrap_or_else(|| self.loader.graph.add_plain(id.as_str()));
                self.bind_name(id.as_str(), value);
            }
            Expr::Tuple(ExprTuple { elts, .. }) | Expr::List(ExprList { elts, .. }) => {
                for elt in elts {
                    self.bind_target(elt, None);
                }
            }
            Expr::Starred(ExprStarred { value, .. }) => self.bind_target(value, None),
            // Attribute and subscript targets mutate other objects.
            _ => {}
        }
    }

    fn bind_function(&mut self, name: &str, args: &Arguments, decorators: &[Expr]) {
        let value = match decoration_of(decorators) {
            Decoration::Property => self.loader.graph.add_plain(name),
            Decoration::ClassMethod => self
                .loader
                .graph
                .add_callable(name, parameters_of(args).without_receiver()),
            Decoration::Plain => self.loader.graph.add_callable(name, parameters_of(args)),
        };
        self.bind_name(name, value);
    }

    fn is_meta_base(&self, base: &Expr) -> bool {
        let builtin_name = match base {
            Expr::Name(ExprName { id, .. }) if self.lookup(id.as_str()).is_none() => id.as_str(),
            Expr::Attribute(ExprAttribute { attr, .. }) if self.resolve_expr(base).is_none() => {
                attr.as_str()
            }
            _ => return false,
        };
        META_TYPE_BASES.contains(&builtin_name)
    }

    /// Package that relative imports of the given level start from.
    fn relative_base(&self, level: u32) -> Option<String> {
        let mut package = if self.is_package {
            self.qualified.clone()
        } else {
            self.qualified
                .rsplit_once('.')
                .map(|(parent, _)| parent.to_string())?
        };
        for _ in 1..level {
            package = package
                .rsplit_once('.')
                .map(|(parent, _)| parent.to_string())?;
        }
        Some(package)
    }

    fn import_from_target(&self, module: Option<&str>, level: u32) -> Option<String> {
        if level == 0 {
            return module.map(str::to_string);
        }
        let base = self.relative_base(level)?;
        Some(match module {
            Some(module) => format!("{}.{}", base, module),
            None => base,
        })
    }

    fn bind_imported_name(&mut self, module: Option<ValueId>, source: &str, alias: &Alias) {
        let name = alias.name.as_str();
        let bound_as = alias.asname.as_ref().map_or(name, |asname| asname.as_str());

        let existing = module.and_then(|module| self.loader.graph.own_member(module, name));
        let submodule = format!("{}.{}", source, name);
        let loads_submodule = match module {
            Some(_) => self.loader.is_local(&submodule),
            // Known standard-library submodules stay modules so they can be excluded.
            None => !source.is_empty() && ExclusionRegistry::standard().contains(&submodule),
        };
        let value = match existing {
            Some(value) => value,
            None if loads_submodule => match self.loader.load_qualified(&submodule) {
                Ok(value) => value,
                Err(e) => {
                    self.record_error(e);
                    return;
                }
            },
            None => self.loader.graph.add_plain(name),
        };
        self.bind_name(bound_as, value);
    }

    fn bind_star_import(&mut self, module: ValueId) {
        let public: Vec<(String, ValueId)> = self
            .loader
            .graph
            .get(module)
            .map(|object| {
                object
                    .own_members()
                    .iter()
                    .filter(|(name, _)| !name.starts_with('_'))
                    .map(|(name, value)| (name.clone(), *value))
                    .collect()
            })
            .unwrap_or_default();
        for (name, value) in public {
            self.bind_name(&name, value);
        }
    }

    fn bind_with_items(&mut self, targets: Vec<Expr>) {
        for target in targets {
            self.bind_target(&target, None);
        }
    }
}

impl Visitor for ScopeBinder<'_> {
    fn visit_stmt_function_def(&mut self, node: StmtFunctionDef) {
        self.bind_function(node.name.as_str(), &node.args, &node.decorator_list);
    }

    fn visit_stmt_async_function_def(&mut self, node: StmtAsyncFunctionDef) {
        self.bind_function(node.name.as_str(), &node.args, &node.decorator_list);
    }

    fn visit_stmt_class_def(&mut self, node: StmtClassDef) {
        let mut meta = false;
        let mut bases = Vec::new();
        for base in &node.bases {
            if self.is_meta_base(base) {
                meta = true;
            } else if let Some(resolved) = self.resolve_expr(base) {
                if let ValueKind::Type { .. } = self.loader.graph.kind(resolved) {
                    bases.push(resolved);
                }
            }
        }

        let ty = self.loader.graph.add_type(node.name.as_str(), meta);
        for base in bases {
            self.loader.graph.add_base(ty, base);
        }
        for name in CLASS_ATTRIBUTES {
            let attribute = self.loader.graph.add_plain(*name);
            self.loader.graph.set_member(ty, *name, attribute);
        }

        // The class name is bound only once its body has run.
        self.scopes.push(ty);
        for stmt in node.body {
            self.visit_stmt(stmt);
        }
        self.scopes.pop();
        self.bind_name(node.name.as_str(), ty);
    }

    fn visit_stmt_assign(&mut self, node: StmtAssign) {
        let first_name = node.targets.iter().find_map(|target| match target {
            Expr::Name(ExprName { id, .. }) => Some(id.to_string()),
            _ => None,
        });
        let value = first_name.map(|name| self.value_for(&name, &node.value));
        for target in &node.targets {
            self.bind_target(target, value);
        }
    }

    fn visit_stmt_ann_assign(&mut self, node: StmtAnnAssign) {
        // An annotation without a value binds nothing.
        let Some(value_expr) = node.value else {
            return;
        };
        if let Expr::Name(ExprName { id, .. }) = node.target.as_ref() {
            let value = self.value_for(id.as_str(), &value_expr);
            self.bind_name(id.as_str(), value);
        }
    }

    fn visit_stmt_delete(&mut self, node: StmtDelete) {
        let scope = self.current_scope();
        for target in &node.targets {
            if let Expr::Name(ExprName { id, .. }) = target {
                self.loader.graph.remove_member(scope, id.as_str());
            }
        }
    }

    fn visit_stmt_if(&mut self, node: StmtIf) {
        if is_main_guard(&node.test) {
            trace!(module = %self.qualified, "skipping main guard body");
            for stmt in node.orelse {
                self.visit_stmt(stmt);
            }
            return;
        }
        for stmt in node.body.into_iter().chain(node.orelse) {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt_for(&mut self, node: StmtFor) {
        self.bind_target(&node.target, None);
        for stmt in node.body.into_iter().chain(node.orelse) {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt_async_for(&mut self, node: StmtAsyncFor) {
        self.bind_target(&node.target, None);
        for stmt in node.body.into_iter().chain(node.orelse) {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt_with(&mut self, node: StmtWith) {
        let targets = node
            .items
            .into_iter()
            .filter_map(|item| item.optional_vars.map(|vars| *vars))
            .collect();
        self.bind_with_items(targets);
        for stmt in node.body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt_async_with(&mut self, node: StmtAsyncWith) {
        let targets = node
            .items
            .into_iter()
            .filter_map(|item| item.optional_vars.map(|vars| *vars))
            .collect();
        self.bind_with_items(targets);
        for stmt in node.body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt_import(&mut self, node: StmtImport) {
        for alias in &node.names {
            let qualified = alias.name.as_str();
            let imported = match self.loader.load_qualified(qualified) {
                Ok(value) => value,
                Err(e) => {
                    self.record_error(e);
                    return;
                }
            };
            match &alias.asname {
                Some(asname) => self.bind_name(asname.as_str(), imported),
                None => {
                    // `import a.b.c` binds `a`; the rest hangs off it as members.
                    let top = qualified.split('.').next().unwrap_or(qualified);
                    match self.loader.load_qualified(top) {
                        Ok(value) => self.bind_name(top, value),
                        Err(e) => self.record_error(e),
                    }
                }
            }
        }
    }

    fn visit_stmt_import_from(&mut self, node: StmtImportFrom) {
        let level = node.level.map_or(0, |level| level.to_u32());
        let module_name = node.module.as_ref().map(|module| module.as_str());
        let source = self.import_from_target(module_name, level);

        let module = match &source {
            Some(source) if self.loader.is_local(source) => {
                match self.loader.load_qualified(source) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        self.record_error(e);
                        return;
                    }
                }
            }
            _ => None,
        };
        let source = source.unwrap_or_default();

        for alias in &node.names {
            if alias.name.as_str() == "*" {
                if let Some(module) = module {
                    self.bind_star_import(module);
                }
                continue;
            }
            self.bind_imported_name(module, &source, alias);
        }
    }
}

/// True for `__name__ == "__main__"`, in either operand order.
fn is_main_guard(test: &Expr) -> bool {
    let Expr::Compare(ExprCompare {
        left,
        ops,
        comparators,
        ..
    }) = test
    else {
        return false;
    };
    if !matches!(ops.as_slice(), [CmpOp::Eq]) {
        return false;
    }
    let [right] = comparators.as_slice() else {
        return false;
    };
    (is_name_dunder(left) && is_main_literal(right))
        || (is_main_literal(left) && is_name_dunder(right))
}

fn is_name_dunder(expr: &Expr) -> bool {
    matches!(expr, Expr::Name(ExprName { id, .. }) if id.as_str() == "__name__")
}

fn is_main_literal(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Constant(ExprConstant { value: Constant::Str(value), .. }) if value == "__main__"
    )
}

/// Collects parameter names the way `inspect.signature` orders them.
pub(crate) fn parameters_of(args: &Arguments) -> Parameters {
    let name_of = |arg: &Arg| arg.arg.to_string();
    Parameters {
        positional_only: args.posonlyargs.iter().map(|a| name_of(&a.def)).collect(),
        regular: args.args.iter().map(|a| name_of(&a.def)).collect(),
        var_positional: args.vararg.as_deref().map(name_of),
        keyword_only: args.kwonlyargs.iter().map(|a| name_of(&a.def)).collect(),
        var_keyword: args.kwarg.as_deref().map(name_of),
    }
}

fn decoration_of(decorators: &[Expr]) -> Decoration {
    for decorator in decorators {
        let target = match decorator {
            Expr::Call(ExprCall { func, .. }) => func.as_ref(),
            other => other,
        };
        let decoration = match target {
            Expr::Name(ExprName { id, .. }) => name_decoration(id.as_str()),
            Expr::Attribute(ExprAttribute { attr, .. }) => {
                if PROPERTY_ACCESSORS.contains(&attr.as_str()) {
                    Decoration::Property
                } else {
                    name_decoration(attr.as_str())
                }
            }
            _ => Decoration::Plain,
        };
        if decoration != Decoration::Plain {
            return decoration;
        }
    }
    Decoration::Plain
}

fn name_decoration(name: &str) -> Decoration {
    if PROPERTY_DECORATORS.contains(&name) {
        Decoration::Property
    } else if name == "classmethod" {
        Decoration::ClassMethod
    } else {
        Decoration::Plain
    }
}
