// statement binder
mod binder;
// error module
pub mod error;
// file loading and parsing
mod loader;
// object model built from parsed modules
mod model;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the loader modules.
//─────────────────────────────────────────────────────────────────────────────
pub use error::LoadError;
pub use loader::load_module_source;
pub use model::PythonModel;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_model::{ObjectModel, ValueId, ValueKind};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn member(model: &PythonModel, owner: ValueId, name: &str) -> ValueId {
        model
            .member(owner, name)
            .unwrap_or_else(|| panic!("missing member {name}"))
    }

    /// Member names without the dunders every class inherits.
    fn declared_names(model: &PythonModel, value: ValueId) -> Vec<String> {
        model
            .member_names(value)
            .into_iter()
            .filter(|name| !name.starts_with("__"))
            .collect()
    }

    fn callable_form(model: &PythonModel, value: ValueId) -> String {
        match model.kind(value) {
            ValueKind::Callable(params) => params.to_string(),
            other => panic!("expected callable, got {other:?}"),
        }
    }

    #[test]
    fn binds_module_level_definitions() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "lib.py",
            r#"
import os

VERSION = "1.0"
LIMIT: int = 3
PENDING: int

def add(a, b=1, *rest, scale, **options):
    inner = 1
    def hidden():
        pass

class Shape:
    sides = 0

    def area(self):
        return 0

    @property
    def name(self):
        return "shape"

    @classmethod
    def build(cls, sides):
        return cls()

    @staticmethod
    def unit():
        return 1

square = lambda side: side * side
"#,
        );
        let model = PythonModel::load(dir.path().join("lib.py")).unwrap();
        let root = model.root();

        assert_eq!(
            model.member_names(root),
            vec!["LIMIT", "Shape", "VERSION", "add", "os", "square"]
        );
        assert_eq!(
            callable_form(&model, member(&model, root, "add")),
            "(a, b, *rest, scale, **options)"
        );
        assert_eq!(callable_form(&model, member(&model, root, "square")), "(side)");
        assert_eq!(
            model.kind(member(&model, root, "os")),
            ValueKind::Module {
                identity: "os".into()
            }
        );

        let shape = member(&model, root, "Shape");
        assert_eq!(model.kind(shape), ValueKind::Type { meta: false });
        assert_eq!(
            declared_names(&model, shape),
            vec!["area", "build", "name", "sides", "unit"]
        );
        assert_eq!(callable_form(&model, member(&model, shape, "area")), "(self)");
        assert_eq!(callable_form(&model, member(&model, shape, "build")), "(sides)");
        assert_eq!(callable_form(&model, member(&model, shape, "unit")), "()");
        assert_eq!(model.kind(member(&model, shape, "name")), ValueKind::Plain);
    }

    #[test]
    fn resolves_inheritance_and_meta_types() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "shapes.py",
            r#"
class Base:
    def draw(self):
        pass

class Circle(Base):
    def radius(self):
        pass

class Registry(type):
    pass

Alias = Circle
"#,
        );
        let model = PythonModel::load(dir.path().join("shapes.py")).unwrap();
        let root = model.root();
        let circle = member(&model, root, "Circle");
        assert_eq!(declared_names(&model, circle), vec!["draw", "radius"]);
        assert_eq!(
            model.kind(member(&model, root, "Registry")),
            ValueKind::Type { meta: true }
        );
        assert_eq!(member(&model, root, "Alias"), circle);
    }

    #[test]
    fn classes_inherit_the_builtin_object() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "errors.py",
            r#"
class ConfigError(Exception):
    pass

class Point:
    def __init__(self, x, y):
        self.x = x

    def __repr__(self):
        return "Point"
"#,
        );
        let model = PythonModel::load(dir.path().join("errors.py")).unwrap();
        let root = model.root();

        let error = member(&model, root, "ConfigError");
        assert_eq!(
            callable_form(&model, member(&model, error, "__init__")),
            "(self, /, *args, **kwargs)"
        );
        assert_eq!(
            callable_form(&model, member(&model, error, "__eq__")),
            "(self, value, /)"
        );
        assert_eq!(
            callable_form(&model, member(&model, error, "__new__")),
            "(*args, **kwargs)"
        );
        assert_eq!(
            model.kind(member(&model, error, "__class__")),
            ValueKind::Type { meta: true }
        );
        assert_eq!(model.kind(member(&model, error, "__dict__")), ValueKind::Plain);
        assert_eq!(model.kind(member(&model, error, "__weakref__")), ValueKind::Plain);

        // Definitions in the class body override the inherited slots.
        let point = member(&model, root, "Point");
        assert_eq!(
            callable_form(&model, member(&model, point, "__init__")),
            "(self, x, y)"
        );
        assert_eq!(callable_form(&model, member(&model, point, "__repr__")), "(self)");
        assert_eq!(
            callable_form(&model, member(&model, point, "__hash__")),
            "(self, /)"
        );

        // Modules are not types and inherit nothing.
        assert_eq!(model.member_names(root), vec!["ConfigError", "Point"]);
    }

    #[test]
    fn branches_bind_and_del_unbinds() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "flags.py",
            r#"
try:
    import json
except ImportError:
    json = None

if True:
    def fast():
        pass
else:
    def slow():
        pass

for index in range(3):
    pass

temp = 1
del temp
"#,
        );
        let model = PythonModel::load(dir.path().join("flags.py")).unwrap();
        assert_eq!(
            model.member_names(model.root()),
            vec!["fast", "index", "json", "slow"]
        );
    }

    #[test]
    fn main_guard_body_is_not_bound() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "tool.py",
            r#"
def run(x):
    pass

if __name__ == "__main__":
    result = run(1)
else:
    imported = True

if "__main__" == __name__:
    def cli():
        pass

if __name__ != "__main__":
    loaded = True
"#,
        );
        let model = PythonModel::load(dir.path().join("tool.py")).unwrap();
        assert_eq!(
            model.member_names(model.root()),
            vec!["imported", "loaded", "run"]
        );
    }

    #[test]
    fn resolves_sibling_and_relative_imports() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "pkg/__init__.py", "from .core import run\nfrom . import util\n");
        write(dir.path(), "pkg/core.py", "def run(task):\n    pass\n");
        write(dir.path(), "pkg/util.py", "from .core import *\n");
        write(dir.path(), "pkg/extra.py", "def later():\n    pass\n");

        let model = PythonModel::load(dir.path().join("pkg")).unwrap();
        let root = model.root();
        assert_eq!(model.member_names(root), vec!["core", "run", "util"]);

        let util = member(&model, root, "util");
        assert_eq!(model.member_names(util), vec!["run"]);

        model.load_submodules(root).unwrap();
        assert_eq!(model.member_names(root), vec!["core", "extra", "run", "util"]);
    }

    #[test]
    fn standard_submodules_imported_by_name_stay_modules() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "paths.py",
            "from os import path, sep\nfrom collections import abc as interfaces\n",
        );
        let model = PythonModel::load(dir.path().join("paths.py")).unwrap();
        let root = model.root();
        assert_eq!(
            model.kind(member(&model, root, "path")),
            ValueKind::Module {
                identity: "os.path".into()
            }
        );
        assert_eq!(
            model.kind(member(&model, root, "interfaces")),
            ValueKind::Module {
                identity: "collections.abc".into()
            }
        );
        assert_eq!(model.kind(member(&model, root, "sep")), ValueKind::Plain);
    }

    #[test]
    fn import_cycles_terminate() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "left.py", "import right\n\ndef go():\n    pass\n");
        write(dir.path(), "right.py", "import left\n");

        let model = PythonModel::load(dir.path().join("left.py")).unwrap();
        let root = model.root();
        let right = member(&model, root, "right");
        assert_eq!(member(&model, right, "left"), root);
    }

    #[test]
    fn missing_locator_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = PythonModel::load(dir.path().join("nope.py")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn broken_import_fails_the_load() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.py", "import helper\n");
        write(dir.path(), "helper.py", "def broken(:\n");
        let err = PythonModel::load(dir.path().join("main.py")).unwrap_err();
        assert!(matches!(err, LoadError::ParseAst(..)));
    }
}
