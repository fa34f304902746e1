//! Class registry and member lookup

use crate::entry::{MemberEntry, MemberId, MemberKey, MemberKind};
use la_arena::Arena;
use mx_class::ClassNode;
use mx_intern::{Interner, Symbol};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Unique identifier for a registered class
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct ClassId(pub u32);

/// How far a lookup may go
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SearchScope {
    /// Only the given class
    ThisClass,
    /// The given class, then its superclasses
    Hierarchy,
}

/// Registered class and its members
#[derive(Debug, Clone)]
pub struct ClassInfo {
    /// Internal class name
    pub name: Symbol,
    /// Superclass name, resolved lazily since it may register later
    pub superclass: Option<Symbol>,
    /// Method entries in declaration order
    pub methods: Vec<MemberId>,
    /// Field entries in declaration order
    pub fields: Vec<MemberId>,
}

impl ClassInfo {
    fn members(&self, kind: MemberKind) -> &[MemberId] {
        match kind {
            MemberKind::Method => &self.methods,
            MemberKind::Field => &self.fields,
        }
    }
}

/// Shared registry of classes and their member entries
#[derive(Debug)]
pub struct SymbolTable {
    /// All registered classes, indexed by `ClassId`
    classes: Vec<ClassInfo>,
    /// Class name -> id
    by_name: FxHashMap<Symbol, ClassId>,
    /// All member entries
    members: Arena<MemberEntry>,
    /// Interner used for log output
    interner: Interner,
}

impl SymbolTable {
    /// Create an empty table
    #[must_use]
    pub fn new(interner: Interner) -> Self {
        Self {
            classes: Vec::new(),
            by_name: FxHashMap::default(),
            members: Arena::default(),
            interner,
        }
    }

    /// Interner the table resolves names with
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Register a class and all its declared members
    ///
    /// Registration is keyed by class name: registering a class a second
    /// time returns the existing id and leaves its entries, including any
    /// renames already applied to them, untouched.
    pub fn register_class(&mut self, class: &ClassNode) -> ClassId {
        if let Some(&existing) = self.by_name.get(&class.name) {
            return existing;
        }

        let id = ClassId(self.classes.len() as u32);
        let methods = class
            .methods
            .iter()
            .map(|method| {
                self.members
                    .alloc(MemberEntry::new(id, MemberKind::Method, method))
            })
            .collect();
        let fields = class
            .fields
            .iter()
            .map(|field| {
                self.members
                    .alloc(MemberEntry::new(id, MemberKind::Field, field))
            })
            .collect();

        self.classes.push(ClassInfo {
            name: class.name,
            superclass: class.superclass,
            methods,
            fields,
        });
        self.by_name.insert(class.name, id);

        debug!(
            class = self.interner.resolve(class.name),
            methods = class.methods.len(),
            fields = class.fields.len(),
            "registered class"
        );
        id
    }

    /// Id of a registered class
    pub fn class_id(&self, name: Symbol) -> Option<ClassId> {
        self.by_name.get(&name).copied()
    }

    /// Registered class by id
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this table.
    pub fn class(&self, id: ClassId) -> &ClassInfo {
        &self.classes[id.0 as usize]
    }

    /// Member entry by id
    pub fn member(&self, id: MemberId) -> &MemberEntry {
        &self.members[id]
    }

    /// Find a method entry
    pub fn find_method(&self, class: ClassId, key: MemberKey, scope: SearchScope) -> Option<MemberId> {
        self.find(class, MemberKind::Method, key, scope)
    }

    /// Find a field entry
    pub fn find_field(&self, class: ClassId, key: MemberKey, scope: SearchScope) -> Option<MemberId> {
        self.find(class, MemberKind::Field, key, scope)
    }

    fn find(
        &self,
        class: ClassId,
        kind: MemberKind,
        key: MemberKey,
        scope: SearchScope,
    ) -> Option<MemberId> {
        let mut current = Some(class);
        let mut visited = 0;

        while let Some(class_id) = current {
            let info = self.class(class_id);
            let found = info
                .members(kind)
                .iter()
                .copied()
                .find(|&member| self.members[member].matches(key));
            if found.is_some() || scope == SearchScope::ThisClass {
                return found;
            }

            visited += 1;
            if visited > self.classes.len() {
                warn!(
                    class = self.interner.resolve(info.name),
                    "cyclic class hierarchy, abandoning lookup"
                );
                return None;
            }

            // Superclasses that were never registered end the walk
            current = info.superclass.and_then(|name| self.class_id(name));
        }

        None
    }

    /// Current name of a member
    pub fn name(&self, id: MemberId) -> Symbol {
        self.members[id].name
    }

    /// Whether a member was ever renamed
    pub fn is_renamed(&self, id: MemberId) -> bool {
        self.members[id].renamed
    }

    /// Rename a member in place
    ///
    /// The renamed flag is sticky: renaming a member back to its original
    /// name keeps it marked as renamed.
    pub fn rename_to(&mut self, id: MemberId, name: Symbol) {
        let entry = &mut self.members[id];
        if entry.name == name {
            return;
        }

        debug!(
            kind = %entry.kind,
            from = self.interner.resolve(entry.name),
            to = self.interner.resolve(name),
            "renamed member"
        );
        entry.name = name;
        entry.renamed = entry.renamed || name != entry.original;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_class::{Access, FieldNode, MethodNode};

    fn fixture() -> (Interner, SymbolTable, ClassId, ClassId) {
        let interner = Interner::new();
        let sym = |text: &str| interner.intern(text);
        let mut table = SymbolTable::new(interner.clone());

        let base = ClassNode::new(sym("demo/Base"), None)
            .with_method(MethodNode::new(sym("update"), sym("()V"), Access::public()))
            .with_field(FieldNode::new(sym("size"), sym("I"), Access::private()));
        let child = ClassNode::new(sym("demo/Child"), Some(sym("demo/Base")))
            .with_method(MethodNode::new(sym("tick"), sym("()V"), Access::public()));

        let base_id = table.register_class(&base);
        let child_id = table.register_class(&child);
        (interner, table, base_id, child_id)
    }

    #[test]
    fn hierarchy_lookup_walks_superclasses() {
        let (interner, table, base_id, child_id) = fixture();
        let key = MemberKey::new(interner.intern("update"), interner.intern("()V"));

        assert!(table.find_method(child_id, key, SearchScope::ThisClass).is_none());
        let found = table
            .find_method(child_id, key, SearchScope::Hierarchy)
            .expect("inherited method");
        assert_eq!(table.member(found).owner, base_id);
    }

    #[test]
    fn fields_and_methods_are_separate_namespaces() {
        let (interner, table, base_id, _) = fixture();
        let key = MemberKey::new(interner.intern("size"), interner.intern("I"));

        assert!(table.find_field(base_id, key, SearchScope::ThisClass).is_some());
        assert!(table.find_method(base_id, key, SearchScope::ThisClass).is_none());
    }

    #[test]
    fn renamed_entry_answers_to_both_names() {
        let (interner, mut table, base_id, _) = fixture();
        let void = interner.intern("()V");
        let original = MemberKey::new(interner.intern("update"), void);
        let id = table
            .find_method(base_id, original, SearchScope::ThisClass)
            .expect("declared method");

        table.rename_to(id, interner.intern("refresh"));

        assert!(table.is_renamed(id));
        assert_eq!(interner.resolve(table.name(id)), "refresh");
        assert_eq!(table.find_method(base_id, original, SearchScope::ThisClass), Some(id));
        let current = MemberKey::new(interner.intern("refresh"), void);
        assert_eq!(table.find_method(base_id, current, SearchScope::ThisClass), Some(id));
    }

    #[test]
    fn renamed_flag_is_sticky() {
        let (interner, mut table, base_id, _) = fixture();
        let update = interner.intern("update");
        let id = table
            .find_method(base_id, MemberKey::new(update, interner.intern("()V")), SearchScope::ThisClass)
            .expect("declared method");

        table.rename_to(id, update);
        assert!(!table.is_renamed(id));

        table.rename_to(id, interner.intern("refresh"));
        table.rename_to(id, update);
        assert!(table.is_renamed(id));
        assert_eq!(table.name(id), update);
    }

    #[test]
    fn registering_twice_keeps_existing_entries() {
        let (interner, mut table, base_id, _) = fixture();
        let key = MemberKey::new(interner.intern("update"), interner.intern("()V"));
        let id = table
            .find_method(base_id, key, SearchScope::ThisClass)
            .expect("declared method");
        table.rename_to(id, interner.intern("refresh"));

        let again = ClassNode::new(interner.intern("demo/Base"), None)
            .with_method(MethodNode::new(interner.intern("update"), interner.intern("()V"), Access::public()));
        assert_eq!(table.register_class(&again), base_id);
        assert!(table.is_renamed(id));
    }

    #[test]
    fn cyclic_hierarchy_terminates() {
        let interner = Interner::new();
        let sym = |text: &str| interner.intern(text);
        let mut table = SymbolTable::new(interner.clone());
        let left = table.register_class(&ClassNode::new(sym("demo/A"), Some(sym("demo/B"))));
        table.register_class(&ClassNode::new(sym("demo/B"), Some(sym("demo/A"))));

        let key = MemberKey::new(sym("missing"), sym("()V"));
        assert!(table.find_method(left, key, SearchScope::Hierarchy).is_none());
    }
}
