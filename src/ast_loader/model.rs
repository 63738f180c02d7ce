use std::cell::{Ref, RefCell};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::binder::ScopeBinder;
use super::error::LoadError;
use super::loader::load_module_source;
use crate::object_model::{ObjectGraph, ObjectModel, Parameters, ValueId, ValueKind};

//─────────────────────────────────────────────────────────────────────────────
// Static-analysis object model of a Python module or package.
//─────────────────────────────────────────────────────────────────────────────

/// Slot wrappers of the builtin `object`, by name and positional-only
/// parameters.
const OBJECT_SLOTS: &[(&str, &[&str])] = &[
    ("__delattr__", &["self", "name"]),
    ("__dir__", &["self"]),
    ("__eq__", &["self", "value"]),
    ("__format__", &["self", "format_spec"]),
    ("__ge__", &["self", "value"]),
    ("__getattribute__", &["self", "name"]),
    ("__gt__", &["self", "value"]),
    ("__hash__", &["self"]),
    ("__le__", &["self", "value"]),
    ("__lt__", &["self", "value"]),
    ("__ne__", &["self", "value"]),
    ("__reduce__", &["self"]),
    ("__reduce_ex__", &["self", "protocol"]),
    ("__repr__", &["self"]),
    ("__setattr__", &["self", "name", "value"]),
    ("__sizeof__", &["self"]),
    ("__str__", &["self"]),
];

/// Adds the builtin `object` every class derives from and makes it the
/// graph's root type.
fn install_builtin_object(graph: &mut ObjectGraph) -> ValueId {
    let object = graph.add_type("object", false);
    let builtin_type = graph.add_type("type", true);
    graph.set_member(object, "__class__", builtin_type);

    let varargs = |positional_only: &[&str]| Parameters {
        positional_only: positional_only.iter().map(|name| name.to_string()).collect(),
        var_positional: Some("args".to_string()),
        var_keyword: Some("kwargs".to_string()),
        ..Parameters::default()
    };
    let init = graph.add_callable("__init__", varargs(&["self"]));
    graph.set_member(object, "__init__", init);
    let new = graph.add_callable("__new__", varargs(&[]));
    graph.set_member(object, "__new__", new);

    for (name, positional_only) in OBJECT_SLOTS {
        let params = Parameters {
            positional_only: positional_only.iter().map(|p| p.to_string()).collect(),
            ..Parameters::default()
        };
        let slot = graph.add_callable(*name, params);
        graph.set_member(object, *name, slot);
    }
    let doc = graph.add_plain("__doc__");
    graph.set_member(object, "__doc__", doc);

    graph.set_root_type(object);
    object
}

/// Where the source of a module lives.
#[derive(Clone, Debug)]
struct ModuleSource {
    /// File holding the module body (`x.py` or `x/__init__.py`); none for
    /// namespace packages.
    file: Option<PathBuf>,
    /// Directory of a package, whose entries are its submodules.
    package_dir: Option<PathBuf>,
}

/// A package whose submodules have not been discovered yet.
#[derive(Clone, Debug)]
struct PendingPackage {
    qualified: String,
    dir: PathBuf,
}

/// Loads modules into a shared graph, caching each one by dotted name.
///
/// Every module is registered before its body is bound, so import cycles
/// see the partially bound module instead of recursing forever.
#[derive(Debug)]
pub(crate) struct ModuleLoader {
    pub(crate) graph: ObjectGraph,
    search_root: PathBuf,
    modules: HashMap<String, ValueId>,
    external: HashSet<ValueId>,
    pending_packages: HashMap<ValueId, PendingPackage>,
}

impl ModuleLoader {
    fn new(search_root: PathBuf) -> Self {
        let mut graph = ObjectGraph::new();
        install_builtin_object(&mut graph);
        Self {
            graph,
            search_root,
            modules: HashMap::new(),
            external: HashSet::new(),
            pending_packages: HashMap::new(),
        }
    }

    /// Finds the source of `qualified` under the search root.
    fn locate(&self, qualified: &str) -> Option<ModuleSource> {
        if qualified.is_empty() {
            return None;
        }
        let relative: PathBuf = qualified.split('.').collect();
        let dir = self.search_root.join(&relative);

        let init = dir.join("__init__.py");
        if init.is_file() {
            return Some(ModuleSource {
                file: Some(init),
                package_dir: Some(dir),
            });
        }

        let file = dir.with_extension("py");
        if file.is_file() {
            return Some(ModuleSource {
                file: Some(file),
                package_dir: None,
            });
        }

        if dir.is_dir() {
            return Some(ModuleSource {
                file: None,
                package_dir: Some(dir),
            });
        }
        None
    }

    /// True if `qualified` names a module backed by source under the search root.
    pub(crate) fn is_local(&self, qualified: &str) -> bool {
        match self.modules.get(qualified) {
            Some(id) => !self.external.contains(id),
            None => self.locate(qualified).is_some(),
        }
    }

    /// Imports `qualified`, loading its parent packages first and binding it
    /// as a member of its parent, the way `import a.b` does.
    pub(crate) fn load_qualified(&mut self, qualified: &str) -> Result<ValueId, LoadError> {
        if let Some(id) = self.modules.get(qualified) {
            return Ok(*id);
        }

        let parent = match qualified.rsplit_once('.') {
            Some((parent, _)) => Some(self.load_qualified(parent)?),
            None => None,
        };
        // The parent's own body may already have imported us.
        if let Some(id) = self.modules.get(qualified) {
            return Ok(*id);
        }

        let id = match self.locate(qualified) {
            Some(source) => self.load_located(qualified, source)?,
            None => {
                let id = self.graph.add_module(qualified);
                debug!(module = qualified, "treating unresolved import as external");
                self.modules.insert(qualified.to_string(), id);
                self.external.insert(id);
                id
            }
        };

        if let Some(parent) = parent {
            let short = qualified.rsplit('.').next().unwrap_or(qualified);
            self.graph.set_member(parent, short, id);
        }
        Ok(id)
    }

    fn load_located(
        &mut self,
        qualified: &str,
        source: ModuleSource,
    ) -> Result<ValueId, LoadError> {
        let id = self.graph.add_module(qualified);
        self.modules.insert(qualified.to_string(), id);
        debug!(module = qualified, file = ?source.file, "loading module");

        let is_package = source.package_dir.is_some();
        if let Some(dir) = source.package_dir {
            self.pending_packages.insert(
                id,
                PendingPackage {
                    qualified: qualified.to_string(),
                    dir,
                },
            );
        }

        if let Some(file) = source.file {
            let suite = load_module_source(&file)?;
            ScopeBinder::new(self, id, qualified, is_package).bind(suite)?;
        }
        Ok(id)
    }

    /// Loads every direct submodule of a package and binds it on the package.
    /// Only the first call for a given package does any work.
    fn expand_package(&mut self, package: ValueId) -> Result<(), LoadError> {
        let Some(pending) = self.pending_packages.remove(&package) else {
            return Ok(());
        };

        let entries = fs::read_dir(&pending.dir)
            .map_err(|e| LoadError::ReadDir(pending.dir.display().to_string(), e))?;
        let mut names = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| LoadError::ReadDir(pending.dir.display().to_string(), e))?
                .path();
            if let Some(name) = submodule_name(&path) {
                names.push(name);
            }
        }
        names.sort();

        debug!(
            package = %pending.qualified,
            count = names.len(),
            "discovered submodules"
        );
        for name in names {
            self.load_qualified(&format!("{}.{}", pending.qualified, name))?;
        }
        Ok(())
    }
}

/// Module name of a package entry, if the entry is an importable submodule.
fn submodule_name(path: &Path) -> Option<String> {
    let name = if path.is_dir() {
        if !path.join("__init__.py").is_file() {
            return None;
        }
        path.file_name()?.to_str()?
    } else {
        if path.extension()?.to_str()? != "py" {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        if stem == "__init__" {
            return None;
        }
        stem
    };
    is_identifier(name).then(|| name.to_string())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// A loaded Python artifact, explorable through [`ObjectModel`].
///
/// Submodules of packages are loaded lazily, the first time the explorer asks
/// for them, which is why the loader sits behind a `RefCell`.
#[derive(Debug)]
pub struct PythonModel {
    loader: RefCell<ModuleLoader>,
    root: ValueId,
}

impl PythonModel {
    /// Loads the module or package at `locator`.
    ///
    /// The locator may be a `.py` file, a package's `__init__.py`, or a
    /// package directory. Its containing directory is the import search root.
    pub fn load(locator: impl AsRef<Path>) -> Result<Self, LoadError> {
        let display = locator.as_ref().display().to_string();
        let locator =
            fs::canonicalize(locator.as_ref()).map_err(|_| LoadError::NotFound(display.clone()))?;
        let locator = locator.as_path();

        let (package_dir, file) = if locator.is_dir() {
            let init = locator.join("__init__.py");
            let file = init.is_file().then_some(init);
            (Some(locator.to_path_buf()), file)
        } else if locator.file_name().and_then(|n| n.to_str()) == Some("__init__.py") {
            let dir = locator
                .parent()
                .ok_or_else(|| LoadError::ModuleName(display.clone()))?;
            (Some(dir.to_path_buf()), Some(locator.to_path_buf()))
        } else {
            (None, Some(locator.to_path_buf()))
        };

        let named_path = package_dir.as_deref().unwrap_or(locator);
        let name = if package_dir.is_some() {
            named_path.file_name().and_then(|n| n.to_str())
        } else {
            named_path.file_stem().and_then(|n| n.to_str())
        }
        .filter(|name| !name.is_empty())
        .ok_or_else(|| LoadError::ModuleName(display.clone()))?
        .to_string();
        let search_root = named_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut loader = ModuleLoader::new(search_root);
        let root = loader.load_located(&name, ModuleSource { file, package_dir })?;
        debug!(module = %name, values = loader.graph.len(), "artifact loaded");

        Ok(Self {
            loader: RefCell::new(loader),
            root,
        })
    }

    /// The artifact's own module value.
    pub fn root(&self) -> ValueId {
        self.root
    }

    /// Read access to the underlying graph.
    pub fn graph(&self) -> Ref<'_, ObjectGraph> {
        Ref::map(self.loader.borrow(), |loader| &loader.graph)
    }
}

impl ObjectModel for PythonModel {
    fn name(&self, value: ValueId) -> String {
        self.graph().name(value)
    }

    fn kind(&self, value: ValueId) -> ValueKind {
        self.graph().kind(value)
    }

    fn member_names(&self, value: ValueId) -> Vec<String> {
        self.graph().member_names(value)
    }

    fn member(&self, value: ValueId, name: &str) -> Option<ValueId> {
        self.graph().member(value, name)
    }

    fn members(&self, value: ValueId) -> Vec<(String, Option<ValueId>)> {
        self.graph().members(value)
    }

    fn load_submodules(&self, module: ValueId) -> Result<(), LoadError> {
        self.loader.borrow_mut().expand_package(module)
    }
}
