//! Integration test utilities for the mixin preprocessor

use mx_class::{
    Access, Annotation, ClassNode, FieldNode, FieldOp, Instruction, Interner, InvokeKind,
    MethodNode, Pretty, Symbol,
};
use mx_preprocess::{MixinInfo, PreprocessorConfig};
use mx_symbols::{MemberKey, SearchScope, SymbolTable};
use std::sync::Arc;

/// Test fixture helper
///
/// Owns the interner, the shared symbol table and the configuration, and
/// builds class nodes from plain strings.
pub struct TestFixture {
    /// Interner shared by every node the fixture builds
    pub interner: Interner,
    /// Shared symbol table
    pub symbols: SymbolTable,
    /// Active configuration
    pub config: Arc<PreprocessorConfig>,
}

impl TestFixture {
    /// Creates a fixture with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PreprocessorConfig::default())
    }

    /// Creates a fixture with a custom configuration
    #[must_use]
    pub fn with_config(config: PreprocessorConfig) -> Self {
        let interner = Interner::new();
        Self {
            symbols: SymbolTable::new(interner.clone()),
            interner,
            config: Arc::new(config),
        }
    }

    /// Interns `text`
    pub fn sym(&self, text: &str) -> Symbol {
        self.interner.intern(text)
    }

    /// Resolves `sym`
    pub fn text(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    /// Empty class, optionally with a superclass
    pub fn class(&self, name: &str, superclass: Option<&str>) -> ClassNode {
        ClassNode::new(self.sym(name), superclass.map(|name| self.sym(name)))
    }

    /// Method with an empty body
    pub fn method(&self, name: &str, desc: &str, access: Access) -> MethodNode {
        MethodNode::new(self.sym(name), self.sym(desc), access)
    }

    /// Field with no annotations
    pub fn field(&self, name: &str, desc: &str, access: Access) -> FieldNode {
        FieldNode::new(self.sym(name), self.sym(desc), access)
    }

    /// Plain shadow marker
    pub fn shadow(&self) -> Annotation {
        Annotation::marker(self.sym(&self.config.shadow_annotation))
    }

    /// Shadow marker with aliases
    pub fn shadow_aliases(&self, aliases: &[&str]) -> Annotation {
        self.shadow().with_list("aliases", aliases.iter().copied())
    }

    /// Virtual invocation instruction
    pub fn invoke(&self, owner: &str, name: &str, desc: &str) -> Instruction {
        Instruction::Invoke {
            kind: InvokeKind::Virtual,
            owner: self.sym(owner),
            name: self.sym(name),
            desc: self.sym(desc),
        }
    }

    /// Static invocation instruction
    pub fn invoke_static(&self, owner: &str, name: &str, desc: &str) -> Instruction {
        Instruction::Invoke {
            kind: InvokeKind::Static,
            owner: self.sym(owner),
            name: self.sym(name),
            desc: self.sym(desc),
        }
    }

    /// Instance field read instruction
    pub fn get_field(&self, owner: &str, name: &str, desc: &str) -> Instruction {
        Instruction::Field {
            op: FieldOp::Get,
            owner: self.sym(owner),
            name: self.sym(name),
            desc: self.sym(desc),
        }
    }

    /// Registers `donor` and describes it as a mixin
    pub fn mixin(&mut self, donor: &ClassNode) -> MixinInfo {
        MixinInfo::new(donor, &mut self.symbols, Arc::clone(&self.config))
    }

    /// Current symbol-table name of a donor method declared as `name`
    ///
    /// # Panics
    ///
    /// Panics if the class or method is not registered.
    pub fn current_method_name(&self, class: &str, name: &str, desc: &str) -> String {
        let class_id = self.symbols.class_id(self.sym(class)).expect("registered class");
        let key = MemberKey::new(self.sym(name), self.sym(desc));
        let entry = self
            .symbols
            .find_method(class_id, key, SearchScope::ThisClass)
            .expect("registered method");
        self.text(self.symbols.name(entry)).to_string()
    }

    /// Field names of `class`, in order
    pub fn field_names(&self, class: &ClassNode) -> Vec<String> {
        class
            .fields
            .iter()
            .map(|field| self.text(field.name).to_string())
            .collect()
    }

    /// Method names of `class`, in order
    pub fn method_names(&self, class: &ClassNode) -> Vec<String> {
        class
            .methods
            .iter()
            .map(|method| self.text(method.name).to_string())
            .collect()
    }

    /// Names referenced by the body of the method at `index`, in order
    pub fn referenced_names(&self, class: &ClassNode, index: usize) -> Vec<String> {
        class.methods[index]
            .instructions
            .iter()
            .filter_map(Instruction::member_ref)
            .map(|(_, name, _)| self.text(name).to_string())
            .collect()
    }

    /// Pretty-printed class
    pub fn pretty(&self, class: &ClassNode) -> String {
        Pretty::new(class, &self.interner).to_string()
    }

    /// Member references in `class` that still use a stale name
    ///
    /// A reference is stale when it resolves to a renamed symbol-table entry
    /// but does not use that entry's current name.
    pub fn stale_references(&self, class: &ClassNode) -> Vec<String> {
        let mut stale = Vec::new();
        for method in &class.methods {
            for insn in &method.instructions {
                let Some((owner, name, desc)) = insn.member_ref() else {
                    continue;
                };
                let Some(class_id) = self.symbols.class_id(owner) else {
                    continue;
                };
                let key = MemberKey::new(name, desc);
                let entry = match insn {
                    Instruction::Invoke { .. } => {
                        self.symbols.find_method(class_id, key, SearchScope::Hierarchy)
                    }
                    _ => self.symbols.find_field(class_id, key, SearchScope::ThisClass),
                };
                if let Some(entry) = entry {
                    if self.symbols.is_renamed(entry) && self.symbols.name(entry) != name {
                        stale.push(self.text(name).to_string());
                    }
                }
            }
        }
        stale
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
