//! Target contexts
//!
//! A target context is the donor's view of the one class it is being
//! attached to.

use crate::mixin::MixinInfo;
use mx_class::{object_descriptor, ClassNode, FieldNode, Interner, Symbol};
use tracing::trace;

/// What attachment needs to know about the target
pub trait TargetContext {
    /// The class receiving the donor
    fn target_class(&self) -> &ClassNode;

    /// Rewrite a donor field's descriptor for the target
    fn transform_descriptor(&self, field: &mut FieldNode);
}

/// Context binding one donor to one target class
///
/// Descriptor transformation replaces references to the donor type with
/// the target type, since after the merge the donor's members live in the
/// target.
#[derive(Debug, Clone)]
pub struct MixinTargetContext {
    mixin: Symbol,
    target: ClassNode,
    interner: Interner,
}

impl MixinTargetContext {
    /// Context for attaching `mixin` to `target`
    pub fn new(mixin: &MixinInfo, target: ClassNode) -> Self {
        Self {
            mixin: mixin.name(),
            target,
            interner: mixin.interner().clone(),
        }
    }

    /// Donor class name
    pub fn mixin_name(&self) -> Symbol {
        self.mixin
    }

    /// Give up the target class
    pub fn into_target(self) -> ClassNode {
        self.target
    }

    /// Target-typed form of `desc`, if it names the donor
    ///
    /// Only an object type, or an array of one, whose class name is exactly
    /// the donor's is remapped. Primitive types and other classes are left
    /// as they are.
    fn remap_descriptor(&self, desc: &str) -> Option<String> {
        let element = desc.trim_start_matches('[');
        let class_name = element.strip_prefix('L')?.strip_suffix(';')?;
        if class_name != self.interner.resolve(self.mixin) {
            return None;
        }

        let dimensions = desc.len() - element.len();
        let target_type = object_descriptor(self.interner.resolve(self.target.name));
        Some(format!("{}{target_type}", "[".repeat(dimensions)))
    }
}

impl TargetContext for MixinTargetContext {
    fn target_class(&self) -> &ClassNode {
        &self.target
    }

    fn transform_descriptor(&self, field: &mut FieldNode) {
        let desc = self.interner.resolve(field.desc);
        let Some(remapped) = self.remap_descriptor(desc) else {
            return;
        };

        trace!(
            field = self.interner.resolve(field.name),
            from = desc,
            to = remapped.as_str(),
            "remapped field descriptor"
        );
        field.desc = self.interner.intern(&remapped);
    }
}

/// A donor attached to its target, ready to merge
#[derive(Debug, Clone)]
pub struct AttachedContext {
    context: MixinTargetContext,
    mixin: ClassNode,
}

impl AttachedContext {
    pub(crate) fn new(context: MixinTargetContext, mixin: ClassNode) -> Self {
        Self { context, mixin }
    }

    /// The prepared and attached donor
    pub fn mixin_class(&self) -> &ClassNode {
        &self.mixin
    }

    /// The target class
    pub fn target_class(&self) -> &ClassNode {
        self.context.target_class()
    }

    /// Split into donor and target
    pub fn into_parts(self) -> (ClassNode, ClassNode) {
        (self.mixin, self.context.into_target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreprocessorConfig;
    use mx_class::Access;
    use mx_symbols::SymbolTable;
    use std::sync::Arc;

    #[test]
    fn donor_type_is_remapped_to_target() {
        let interner = Interner::new();
        let sym = |text: &str| interner.intern(text);
        let mut symbols = SymbolTable::new(interner.clone());
        let donor = ClassNode::new(sym("demo/DonorMixin"), None);
        let mixin = MixinInfo::new(&donor, &mut symbols, Arc::new(PreprocessorConfig::default()));
        let context = MixinTargetContext::new(&mixin, ClassNode::new(sym("demo/Target"), None));

        let mut next = FieldNode::new(sym("next"), sym("[Ldemo/DonorMixin;"), Access::private());
        context.transform_descriptor(&mut next);
        assert_eq!(interner.resolve(next.desc), "[Ldemo/Target;");

        let mut count = FieldNode::new(sym("count"), sym("I"), Access::private());
        context.transform_descriptor(&mut count);
        assert_eq!(interner.resolve(count.desc), "I");
    }

    #[test]
    fn only_the_exact_donor_class_is_remapped() {
        let interner = Interner::new();
        let sym = |text: &str| interner.intern(text);
        let mut symbols = SymbolTable::new(interner.clone());
        let donor = ClassNode::new(sym("Mixin"), None);
        let mixin = MixinInfo::new(&donor, &mut symbols, Arc::new(PreprocessorConfig::default()));
        let context = MixinTargetContext::new(&mixin, ClassNode::new(sym("demo/Target"), None));
        assert_eq!(context.mixin_name(), mixin.name());

        for (before, after) in [
            ("Lcom/example/HTMLMixin;", "Lcom/example/HTMLMixin;"),
            ("LMixin$Inner;", "LMixin$Inner;"),
            ("LMixin;", "Ldemo/Target;"),
            ("[[LMixin;", "[[Ldemo/Target;"),
            ("[I", "[I"),
        ] {
            let mut field = FieldNode::new(sym("value"), sym(before), Access::private());
            context.transform_descriptor(&mut field);
            assert_eq!(interner.resolve(field.desc), after, "descriptor {before}");
        }
    }
}
