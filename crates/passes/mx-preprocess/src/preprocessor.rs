//! Two-pass donor preprocessing

use crate::attach::Attacher;
use crate::context::{AttachedContext, MixinTargetContext, TargetContext};
use crate::error::PreprocessError;
use crate::mixin::MixinInfo;
use crate::rewrite::ReferenceRewriter;
use mx_class::{Annotation, ClassNode, Member as _, MethodNode};
use mx_symbols::{MemberId, MemberKey, SearchScope, SymbolTable};
use tracing::debug;

/// Preprocessor for one donor instance
///
/// Preparation is idempotent: the first call does the work and every later
/// call returns its outcome again. Attachment may happen at most once, so a
/// donor applied to several targets needs one preprocessor (and one copy of
/// the donor node) per target. All of them share the donor's symbol-table
/// entries, so renames made for one target are seen by the others.
#[derive(Debug)]
pub struct MixinPreprocessor<'mixin> {
    mixin: &'mixin MixinInfo,
    class_node: ClassNode,
    /// Outcome of the first preparation, if it ran
    prepared: Option<Result<(), PreprocessError>>,
    attached: bool,
}

impl<'mixin> MixinPreprocessor<'mixin> {
    /// Preprocessor for `class_node`, a copy of the donor described by `mixin`
    pub fn new(mixin: &'mixin MixinInfo, class_node: ClassNode) -> Self {
        Self {
            mixin,
            class_node,
            prepared: None,
            attached: false,
        }
    }

    /// The donor in its current state
    pub fn class_node(&self) -> &ClassNode {
        &self.class_node
    }

    /// Run the context-free pass
    ///
    /// Strips shadow prefixes and applies soft-implements renames, recording
    /// every rename in `symbols`.
    ///
    /// # Errors
    ///
    /// Returns `PreprocessError::InvalidDonor` if a donor method is missing
    /// from the symbol table or breaks a soft-implements contract. A failed
    /// preparation reports the same error on every later call.
    pub fn prepare(&mut self, symbols: &mut SymbolTable) -> Result<&ClassNode, PreprocessError> {
        if self.prepared.is_none() {
            let outcome = self.prepare_methods(symbols);
            self.prepared = Some(outcome);
        }

        match &self.prepared {
            Some(Err(error)) => Err(error.clone()),
            _ => Ok(&self.class_node),
        }
    }

    fn prepare_methods(&mut self, symbols: &mut SymbolTable) -> Result<(), PreprocessError> {
        let mixin = self.mixin;
        for method in &mut self.class_node.methods {
            let entry = symbols
                .find_method(mixin.class_id(), MemberKey::of(&*method), SearchScope::ThisClass)
                .ok_or_else(|| mixin.invalid(method.name, "member is not registered in the symbol table"))?;

            prepare_shadow(mixin, symbols, method, entry)?;
            for iface in mixin.soft_implements() {
                if iface.rename_method(mixin, method)? {
                    symbols.rename_to(entry, method.name);
                }
            }
        }
        Ok(())
    }

    /// Run the target-specific pass against `context`
    ///
    /// Prepares the donor first if that has not happened yet, then binds
    /// shadow methods, binds and strips fields, and rewrites member
    /// references in every method body.
    ///
    /// # Errors
    ///
    /// Returns `PreprocessError::AlreadyAttached` on a second call, even if
    /// the first one failed. Otherwise returns the first binding error.
    pub fn attach<C: TargetContext>(
        &mut self,
        symbols: &mut SymbolTable,
        context: &C,
    ) -> Result<&ClassNode, PreprocessError> {
        if self.attached {
            return Err(PreprocessError::AlreadyAttached {
                mixin: self.mixin.text(self.mixin.name()).to_string(),
            });
        }
        self.attached = true;

        self.prepare(symbols)?;

        let mut attacher = Attacher::new(self.mixin, symbols, context);
        attacher.attach_methods(&mut self.class_node)?;
        attacher.attach_fields(&mut self.class_node)?;

        let stats = ReferenceRewriter::new(symbols).rewrite_class(&mut self.class_node);
        debug!(
            mixin = self.mixin.text(self.mixin.name()),
            target = self.mixin.text(context.target_class().name),
            invocations = stats.invocations,
            field_accesses = stats.field_accesses,
            "attached mixin"
        );

        Ok(&self.class_node)
    }

    /// Prepare and attach to `target` in one step
    ///
    /// # Errors
    ///
    /// Any error from [`Self::prepare`] or [`Self::attach`].
    pub fn create_context_for(
        mut self,
        symbols: &mut SymbolTable,
        target: ClassNode,
    ) -> Result<AttachedContext, PreprocessError> {
        self.prepare(symbols)?;
        let context = MixinTargetContext::new(self.mixin, target);
        self.attach(symbols, &context)?;
        Ok(AttachedContext::new(context, self.class_node))
    }
}

/// Strip the shadow prefix from `method`, if it has one
fn prepare_shadow(
    mixin: &MixinInfo,
    symbols: &mut SymbolTable,
    method: &mut MethodNode,
    entry: MemberId,
) -> Result<(), PreprocessError> {
    let markers = mixin.markers();
    let Some(shadow) = method.annotation(markers.shadow) else {
        return Ok(());
    };
    let prefix = mixin.shadow_prefix(shadow);
    if prefix.is_empty() {
        return Ok(());
    }
    let Some(stripped) = mixin.text(method.name).strip_prefix(prefix) else {
        return Ok(());
    };
    if stripped.is_empty() {
        return Err(mixin.invalid(method.name, "shadow prefix leaves an empty name"));
    }

    let stripped = mixin.interner().intern(stripped);
    let original = mixin.text(method.name);
    debug!(from = original, to = mixin.text(stripped), "stripped shadow prefix");

    method.set_annotation(Annotation::marker(markers.renamed).with("originalName", original));
    symbols.rename_to(entry, stripped);
    method.name = stripped;
    Ok(())
}
