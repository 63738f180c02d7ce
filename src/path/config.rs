//! Static exploration settings: depth bound, visibility rule, protocol member
//! names and the registry of standard-library modules that never count as
//! part of a user API.
//!
//! The defaults are built once per process and shared; an [`ExplorerConfig`]
//! value carries them into each [`super::Explorer`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Longest path chain the explorer builds before it stops descending.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Names matching this pattern are public.
pub const PUBLIC_PATTERN: &str = "^[A-Za-z]";

/// Dunder members that are part of a type's public protocol even though they
/// start with an underscore.
pub const PROTOCOL_MEMBERS: &[&str] = &[
    "__abs__", "__add__", "__and__", "__call__", "__class__", "__cmp__", "__coerce__",
    "__complex__", "__contains__", "__del__", "__delattr__", "__delete__", "__delitem__",
    "__delslice__", "__dict__", "__div__", "__divmod__", "__eq__", "__float__", "__floordiv__",
    "__ge__", "__get__", "__getattr__", "__getattribute__", "__getitem__", "__getslice__",
    "__gt__", "__hash__", "__hex__", "__iadd__", "__iand__", "__idiv__", "__ifloordiv__",
    "__ilshift__", "__imod__", "__imul__", "__index__", "__init__", "__instancecheck__",
    "__int__", "__invert__", "__ior__", "__ipow__", "__irshift__", "__isub__", "__iter__",
    "__itruediv__", "__ixor__", "__le__", "__len__", "__long__", "__lshift__", "__lt__",
    "__metaclass__", "__mod__", "__mro__", "__mul__", "__ne__", "__neg__", "__new__",
    "__nonzero__", "__oct__", "__or__", "__pos__", "__pow__", "__radd__", "__rand__",
    "__rcmp__", "__rdiv__", "__rdivmod__", "__repr__", "__reversed__", "__rfloordiv__",
    "__rlshift__", "__rmod__", "__rmul__", "__ror__", "__rpow__", "__rrshift__", "__rshift__",
    "__rsub__", "__rtruediv__", "__rxor__", "__set__", "__setattr__", "__setitem__",
    "__setslice__", "__slots__", "__str__", "__sub__", "__subclasscheck__", "__truediv__",
    "__unicode__", "__weakref__", "__xor__",
];

/// Modules shipped with the language runtime.
pub const STANDARD_MODULES: &[&str] = &[
    "__future__", "_dummy_thread", "_thread", "abc", "aifc", "argparse", "array", "ast",
    "asynchat", "asyncio", "asyncore", "atexit", "audioop", "base64", "bdb", "binascii",
    "binhex", "bisect", "builtins", "bz2", "calendar", "cgi", "cgitb", "chunk", "cmath", "cmd",
    "code", "codecs", "codeop", "collections", "collections.abc", "colorsys", "compileall",
    "concurrent", "concurrent.futures", "configparser", "contextlib", "contextvars", "copy",
    "copyreg", "cProfile", "crypt", "csv", "ctypes", "curses", "curses.ascii", "curses.panel",
    "curses.textpad", "dataclasses", "datetime", "dbm", "dbm.dumb", "dbm.gnu", "dbm.ndbm",
    "decimal", "difflib", "dis", "distutils", "distutils.archive_util",
    "distutils.bcppcompiler", "distutils.ccompiler", "distutils.cmd", "distutils.command",
    "distutils.command.bdist", "distutils.command.bdist_dumb", "distutils.command.bdist_msi",
    "distutils.command.bdist_packager", "distutils.command.bdist_rpm",
    "distutils.command.bdist_wininst", "distutils.command.build",
    "distutils.command.build_clib", "distutils.command.build_ext", "distutils.command.build_py",
    "distutils.command.build_scripts", "distutils.command.check", "distutils.command.clean",
    "distutils.command.config", "distutils.command.install", "distutils.command.install_data",
    "distutils.command.install_headers", "distutils.command.install_lib",
    "distutils.command.install_scripts", "distutils.command.register",
    "distutils.command.sdist", "distutils.core", "distutils.cygwinccompiler", "distutils.debug",
    "distutils.dep_util", "distutils.dir_util", "distutils.dist", "distutils.errors",
    "distutils.extension", "distutils.fancy_getopt", "distutils.file_util",
    "distutils.filelist", "distutils.log", "distutils.msvccompiler", "distutils.spawn",
    "distutils.sysconfig", "distutils.text_file", "distutils.unixccompiler", "distutils.util",
    "distutils.version", "doctest", "dummy_threading", "email", "email.charset",
    "email.contentmanager", "email.encoders", "email.errors", "email.generator", "email.header",
    "email.headerregistry", "email.iterators", "email.message", "email.mime", "email.parser",
    "email.policy", "email.utils", "encodings", "encodings.idna", "encodings.mbcs",
    "encodings.utf_8_sig", "ensurepip", "enum", "errno", "faulthandler", "fcntl", "filecmp",
    "fileinput", "fnmatch", "formatter", "fractions", "ftplib", "functools", "gc", "getopt",
    "getpass", "gettext", "glob", "grp", "gzip", "hashlib", "heapq", "hmac", "html",
    "html.entities", "html.parser", "http", "http.client", "http.cookiejar", "http.cookies",
    "http.server", "imaplib", "imghdr", "imp", "importlib", "importlib.abc",
    "importlib.machinery", "importlib.resources", "importlib.util", "inspect", "io",
    "ipaddress", "itertools", "json", "json.tool", "keyword", "lib2to3", "linecache", "locale",
    "logging", "logging.config", "logging.handlers", "lzma", "macpath", "mailbox", "mailcap",
    "marshal", "math", "mimetypes", "mmap", "modulefinder", "msilib", "msvcrt",
    "multiprocessing", "multiprocessing.connection", "multiprocessing.dummy",
    "multiprocessing.managers", "multiprocessing.pool", "multiprocessing.sharedctypes", "netrc",
    "nis", "nntplib", "numbers", "operator", "optparse", "os", "os.path", "ossaudiodev",
    "parser", "pathlib", "pdb", "pickle", "pickletools", "pipes", "pkgutil", "platform",
    "plistlib", "poplib", "posix", "pprint", "profile", "pstats", "pty", "pwd", "py_compile",
    "pyclbr", "pydoc", "queue", "quopri", "random", "re", "readline", "reprlib", "resource",
    "rlcompleter", "runpy", "sched", "secrets", "select", "selectors", "shelve", "shlex",
    "shutil", "signal", "site", "smtpd", "smtplib", "sndhdr", "socket", "socketserver", "spwd",
    "sqlite3", "ssl", "stat", "statistics", "string", "stringprep", "struct", "subprocess",
    "sunau", "symbol", "symtable", "sys", "sysconfig", "syslog", "tabnanny", "tarfile",
    "telnetlib", "tempfile", "termios", "test", "test.support", "test.support.script_helper",
    "textwrap", "threading", "time", "timeit", "tkinter", "tkinter.scrolledtext", "tkinter.tix",
    "tkinter.ttk", "token", "tokenize", "trace", "traceback", "tracemalloc", "tty", "turtle",
    "turtledemo", "types", "typing", "unicodedata", "unittest", "unittest.mock", "urllib",
    "urllib.error", "urllib.parse", "urllib.request", "urllib.response", "urllib.robotparser",
    "uu", "uuid", "venv", "warnings", "wave", "weakref", "webbrowser", "winreg", "winsound",
    "wsgiref", "wsgiref.handlers", "wsgiref.headers", "wsgiref.simple_server", "wsgiref.util",
    "wsgiref.validate", "xdrlib", "xml", "xml.dom", "xml.dom.minidom", "xml.dom.pulldom",
    "xml.etree.ElementTree", "xml.parsers.expat", "xml.parsers.expat.errors",
    "xml.parsers.expat.model", "xml.sax", "xml.sax.handler", "xml.sax.saxutils",
    "xml.sax.xmlreader", "xmlrpc", "xmlrpc.client", "xmlrpc.server", "zipapp", "zipfile",
    "zipimport", "zlib",
];

static PUBLIC_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PUBLIC_PATTERN).expect("public name pattern is a valid regex"));

static STANDARD_REGISTRY: Lazy<Arc<ExclusionRegistry>> =
    Lazy::new(|| Arc::new(ExclusionRegistry::new(STANDARD_MODULES.iter().copied())));

static STANDARD_PROTOCOL: Lazy<Arc<HashSet<String>>> = Lazy::new(|| {
    Arc::new(
        PROTOCOL_MEMBERS
            .iter()
            .map(|name| name.to_string())
            .collect(),
    )
});

/// Module identities excluded from exploration. Read-only once built.
#[derive(Clone, Debug, Default)]
pub struct ExclusionRegistry {
    modules: HashSet<String>,
}

impl ExclusionRegistry {
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }

    /// The shared registry of standard-library modules.
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD_REGISTRY)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.modules.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Settings threaded into an explorer at construction.
#[derive(Clone, Debug)]
pub struct ExplorerConfig {
    pub max_depth: usize,
    pub public_pattern: Regex,
    pub protocol_members: Arc<HashSet<String>>,
    pub excluded_modules: Arc<ExclusionRegistry>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            public_pattern: PUBLIC_NAME_RE.clone(),
            protocol_members: Arc::clone(&STANDARD_PROTOCOL),
            excluded_modules: ExclusionRegistry::standard(),
        }
    }
}

impl ExplorerConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_excluded_modules(mut self, registry: ExclusionRegistry) -> Self {
        self.excluded_modules = Arc::new(registry);
        self
    }

    /// Public identifier or recognised protocol member.
    pub fn is_public(&self, name: &str) -> bool {
        self.public_pattern.is_match(name) || self.protocol_members.contains(name)
    }

    pub fn is_excluded_module(&self, identity: &str) -> bool {
        self.excluded_modules.contains(identity)
    }
}
