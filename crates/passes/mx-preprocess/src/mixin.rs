//! Donor identity and the names it is checked against

use crate::config::PreprocessorConfig;
use crate::error::PreprocessError;
use crate::interface::InterfaceInfo;
use crate::preprocessor::MixinPreprocessor;
use mx_class::{Annotation, ClassNode, Interner, Symbol};
use mx_symbols::{ClassId, SymbolTable};
use std::sync::Arc;

/// Interned forms of the configured marker names
#[derive(Debug, Clone, Copy)]
pub(crate) struct Markers {
    pub shadow: Symbol,
    pub renamed: Symbol,
    pub imaginary_super: Symbol,
    pub constructor: Symbol,
}

impl Markers {
    fn intern(config: &PreprocessorConfig, interner: &Interner) -> Self {
        Self {
            shadow: interner.intern(&config.shadow_annotation),
            renamed: interner.intern(&config.renamed_annotation),
            imaginary_super: interner.intern(&config.imaginary_super),
            constructor: interner.intern(&config.constructor_name),
        }
    }
}

/// A donor class as known to the preprocessor
#[derive(Debug)]
pub struct MixinInfo {
    /// Internal class name of the donor
    name: Symbol,
    /// Donor's class in the symbol table
    class_id: ClassId,
    /// Soft-implemented interfaces, in declaration order
    soft_implements: Vec<InterfaceInfo>,
    config: Arc<PreprocessorConfig>,
    markers: Markers,
    interner: Interner,
}

impl MixinInfo {
    /// Describe the donor `class`, registering it in `symbols`
    ///
    /// If a class of the same name is already registered its existing
    /// entries are reused, so earlier renames stay in effect.
    pub fn new(class: &ClassNode, symbols: &mut SymbolTable, config: Arc<PreprocessorConfig>) -> Self {
        let interner = symbols.interner().clone();
        Self {
            name: class.name,
            class_id: symbols.register_class(class),
            soft_implements: Vec::new(),
            markers: Markers::intern(&config, &interner),
            config,
            interner,
        }
    }

    /// Add a soft-implemented interface
    #[must_use]
    pub fn with_soft_implements(mut self, iface: InterfaceInfo) -> Self {
        self.soft_implements.push(iface);
        self
    }

    /// Create a single-use preprocessor over a copy of the donor
    pub fn preprocessor(&self, class: ClassNode) -> MixinPreprocessor<'_> {
        MixinPreprocessor::new(self, class)
    }

    /// Internal class name of the donor
    pub fn name(&self) -> Symbol {
        self.name
    }

    /// Donor's class in the symbol table
    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    /// Soft-implemented interfaces
    pub fn soft_implements(&self) -> &[InterfaceInfo] {
        &self.soft_implements
    }

    /// Interner shared with the symbol table
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub(crate) fn markers(&self) -> Markers {
        self.markers
    }

    /// Resolve a symbol for messages
    pub(crate) fn text(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    /// Prefix declared on a shadow annotation, or the configured default
    pub(crate) fn shadow_prefix<'info>(&'info self, shadow: &'info Annotation) -> &'info str {
        shadow
            .get_str("prefix")
            .unwrap_or(self.config.default_shadow_prefix.as_str())
    }

    pub(crate) fn invalid(&self, member: Symbol, reason: impl Into<String>) -> PreprocessError {
        PreprocessError::InvalidDonor {
            mixin: self.text(self.name).to_string(),
            member: self.text(member).to_string(),
            reason: reason.into(),
        }
    }
}
