use std::collections::{BTreeMap, HashSet};

use super::{ObjectModel, Parameters, ValueId, ValueKind};

//─────────────────────────────────────────────────────────────────────────────
// ObjectGraph – an arena of values connected by named members.
// Values never move once added, so a `ValueId` stays valid for the lifetime
// of the graph. Members may form cycles (a module importing itself, a class
// attribute pointing back at its owner); nothing here tries to detect them.
// An optional root type is the implicit last base of every other type.
//─────────────────────────────────────────────────────────────────────────────

/// One value of the graph.
#[derive(Clone, Debug)]
pub struct Object {
    name: String,
    kind: ValueKind,
    members: BTreeMap<String, ValueId>,
    bases: Vec<ValueId>,
}

impl Object {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Members bound directly on this value, inherited ones excluded.
    pub fn own_members(&self) -> &BTreeMap<String, ValueId> {
        &self.members
    }
}

/// In-memory object model. The Python loader builds one; tests build them by hand.
#[derive(Clone, Debug, Default)]
pub struct ObjectGraph {
    objects: Vec<Object>,
    root_type: Option<ValueId>,
}

impl ObjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: String, kind: ValueKind) -> ValueId {
        let id = self.objects.len();
        self.objects.push(Object {
            name,
            kind,
            members: BTreeMap::new(),
            bases: Vec::new(),
        });
        id
    }

    /// Adds a module. Its short name is the last segment of `identity`.
    pub fn add_module(&mut self, identity: impl Into<String>) -> ValueId {
        let identity = identity.into();
        let name = identity
            .rsplit('.')
            .next()
            .unwrap_or(identity.as_str())
            .to_string();
        self.push(name, ValueKind::Module { identity })
    }

    pub fn add_type(&mut self, name: impl Into<String>, meta: bool) -> ValueId {
        self.push(name.into(), ValueKind::Type { meta })
    }

    pub fn add_callable(&mut self, name: impl Into<String>, params: Parameters) -> ValueId {
        self.push(name.into(), ValueKind::Callable(params))
    }

    pub fn add_plain(&mut self, name: impl Into<String>) -> ValueId {
        self.push(name.into(), ValueKind::Plain)
    }

    /// Binds `name` on `owner`, replacing any previous binding.
    pub fn set_member(&mut self, owner: ValueId, name: impl Into<String>, value: ValueId) {
        if let Some(object) = self.objects.get_mut(owner) {
            object.members.insert(name.into(), value);
        }
    }

    pub fn remove_member(&mut self, owner: ValueId, name: &str) -> Option<ValueId> {
        self.objects
            .get_mut(owner)
            .and_then(|object| object.members.remove(name))
    }

    /// Records `base` as a base class of `ty`, in declaration order.
    pub fn add_base(&mut self, ty: ValueId, base: ValueId) {
        if let Some(object) = self.objects.get_mut(ty) {
            object.bases.push(base);
        }
    }

    /// Makes `ty` the implicit base of every type, searched after all
    /// declared bases.
    pub fn set_root_type(&mut self, ty: ValueId) {
        self.root_type = Some(ty);
    }

    pub fn root_type(&self) -> Option<ValueId> {
        self.root_type
    }

    pub fn get(&self, id: ValueId) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Looks up a member bound directly on `owner`.
    pub fn own_member(&self, owner: ValueId, name: &str) -> Option<ValueId> {
        self.objects.get(owner)?.members.get(name).copied()
    }

    /// Full member directory of `id`: own members first, then those of each
    /// base, left to right and depth first, then those of the root type if
    /// `id` is a type. The first binding of a name wins.
    pub fn directory(&self, id: ValueId) -> BTreeMap<String, ValueId> {
        let mut directory = BTreeMap::new();
        let mut visited = HashSet::new();
        let root_type = self
            .root_type
            .filter(|root| *root != id && self.is_type(id));
        if let Some(root) = root_type {
            visited.insert(root);
        }
        self.collect_directory(id, &mut directory, &mut visited);
        if let Some(root) = root_type.and_then(|root| self.objects.get(root)) {
            for (name, value) in &root.members {
                directory.entry(name.clone()).or_insert(*value);
            }
        }
        directory
    }

    fn is_type(&self, id: ValueId) -> bool {
        matches!(
            self.objects.get(id).map(|object| &object.kind),
            Some(ValueKind::Type { .. })
        )
    }

    fn collect_directory(
        &self,
        id: ValueId,
        directory: &mut BTreeMap<String, ValueId>,
        visited: &mut HashSet<ValueId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        let Some(object) = self.objects.get(id) else {
            return;
        };
        for (name, value) in &object.members {
            directory.entry(name.clone()).or_insert(*value);
        }
        for base in &object.bases {
            self.collect_directory(*base, directory, visited);
        }
    }

    /// True for types flagged as meta-types or deriving from one.
    pub fn is_meta_type(&self, id: ValueId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(object) = self.objects.get(current) {
                if let ValueKind::Type { meta: true } = object.kind {
                    return true;
                }
                stack.extend(object.bases.iter().copied());
            }
        }
        false
    }
}

impl ObjectModel for ObjectGraph {
    fn name(&self, value: ValueId) -> String {
        self.objects
            .get(value)
            .map(|object| object.name.clone())
            .unwrap_or_else(|| format!("<value {}>", value))
    }

    fn kind(&self, value: ValueId) -> ValueKind {
        match self.objects.get(value).map(|object| &object.kind) {
            Some(ValueKind::Type { .. }) => ValueKind::Type {
                meta: self.is_meta_type(value),
            },
            Some(kind) => kind.clone(),
            None => ValueKind::Plain,
        }
    }

    fn member_names(&self, value: ValueId) -> Vec<String> {
        self.directory(value).into_keys().collect()
    }

    fn member(&self, value: ValueId, name: &str) -> Option<ValueId> {
        self.directory(value).get(name).copied()
    }

    fn members(&self, value: ValueId) -> Vec<(String, Option<ValueId>)> {
        self.directory(value)
            .into_iter()
            .map(|(name, member)| (name, Some(member)))
            .collect()
    }
}
