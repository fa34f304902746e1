//! Binding a prepared donor to a target
//!
//! Shadow methods and fields are resolved against the target's members.
//! A donor member found in the target under a different name takes the
//! target's name, which is only allowed for private target members: anyone
//! else may refer to a non-private member by its real name, and the merged
//! class must keep answering to it. Resolved fields are removed from the
//! donor since the target already provides their storage.

use crate::alias::AliasList;
use crate::context::TargetContext;
use crate::error::PreprocessError;
use crate::mixin::MixinInfo;
use mx_class::{object_descriptor, Annotation, ClassNode, FieldNode, Member as _, MethodNode, Symbol};
use mx_symbols::{MemberId, MemberKey, MemberKind, SearchScope, SymbolTable};
use tracing::{debug, warn};

/// What to do with a donor field after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldDisposition {
    /// Resolve against the target
    Resolve,
    /// Remove from the donor without resolving
    Drop,
}

/// Performs method and field binding for one donor against one target
pub(crate) struct Attacher<'pass, C: TargetContext> {
    mixin: &'pass MixinInfo,
    symbols: &'pass mut SymbolTable,
    context: &'pass C,
}

impl<'pass, C: TargetContext> Attacher<'pass, C> {
    pub(crate) fn new(mixin: &'pass MixinInfo, symbols: &'pass mut SymbolTable, context: &'pass C) -> Self {
        Self {
            mixin,
            symbols,
            context,
        }
    }

    /// Bind every shadow method to its target counterpart
    pub(crate) fn attach_methods(&mut self, class: &mut ClassNode) -> Result<(), PreprocessError> {
        let shadow_marker = self.mixin.markers().shadow;

        for method in &mut class.methods {
            let aliases = match method.annotation(shadow_marker) {
                Some(shadow) => AliasList::for_member(method.name, Some(shadow), self.mixin.interner()),
                None => continue,
            };
            let entry = self.method_entry(method)?;

            let target_class = self.context.target_class();
            let Some(target) = aliases.resolve(&target_class.methods, method.desc) else {
                return Err(self.unresolved(MemberKind::Method, method.name));
            };

            if target.name == self.mixin.markers().constructor {
                return Err(self.illegal_alias(
                    MemberKind::Method,
                    method.name,
                    target.name,
                    "constructors cannot be aliased",
                ));
            }

            if target.name != method.name {
                if !target.access.is_private() {
                    return Err(self.illegal_alias(
                        MemberKind::Method,
                        method.name,
                        target.name,
                        "non-private members cannot be aliased",
                    ));
                }

                debug!(
                    mixin = self.mixin.text(self.mixin.name()),
                    from = self.mixin.text(method.name),
                    to = self.mixin.text(target.name),
                    "aliased shadow method"
                );
                method.name = target.name;
                self.symbols.rename_to(entry, target.name);
            }
        }

        Ok(())
    }

    /// Validate, resolve and strip donor fields
    ///
    /// Fields to remove are only marked during the walk and removed once it
    /// completes, so an error leaves the field list intact.
    pub(crate) fn attach_fields(&mut self, class: &mut ClassNode) -> Result<(), PreprocessError> {
        let shadow_marker = self.mixin.markers().shadow;
        let declared: Vec<Symbol> = class.fields.iter().map(|field| field.name).collect();
        let mut tombstones = vec![false; class.fields.len()];

        for (idx, field) in class.fields.iter_mut().enumerate() {
            let shadow = field.annotation(shadow_marker).cloned();
            if self.validate_field(field, shadow.as_ref())? == FieldDisposition::Drop {
                debug!(field = self.mixin.text(field.name), "dropped placeholder field");
                tombstones[idx] = true;
                continue;
            }

            // Look the entry up while the descriptor still matches the donor
            let entry = self.symbols.find_field(
                self.mixin.class_id(),
                MemberKey::of(&*field),
                SearchScope::ThisClass,
            );
            self.context.transform_descriptor(field);

            let aliases = AliasList::for_member(field.name, shadow.as_ref(), self.mixin.interner());
            let target_class = self.context.target_class();
            let target = aliases
                .clone()
                .resolve(&target_class.fields, field.desc)
                .or_else(|| aliases.resolve_name(&target_class.fields));

            let Some(target) = target else {
                if shadow.is_some() {
                    return Err(self.unresolved(MemberKind::Field, field.name));
                }
                continue;
            };

            if target.desc != field.desc {
                return Err(PreprocessError::SignatureConflict {
                    mixin: self.mixin.text(self.mixin.name()).to_string(),
                    field: self.mixin.text(field.name).to_string(),
                    expected: self.mixin.text(field.desc).to_string(),
                    found: self.mixin.text(target.desc).to_string(),
                });
            }

            if target.name != field.name {
                if !target.access.is_private() {
                    return Err(self.illegal_alias(
                        MemberKind::Field,
                        field.name,
                        target.name,
                        "non-private members cannot be aliased",
                    ));
                }

                let collides = declared
                    .iter()
                    .enumerate()
                    .any(|(other, &name)| other != idx && name == target.name);
                if collides {
                    warn!(
                        mixin = self.mixin.text(self.mixin.name()),
                        field = self.mixin.text(field.name),
                        alias = self.mixin.text(target.name),
                        "aliased field takes the name of another donor field"
                    );
                }

                let Some(entry) = entry else {
                    return Err(self.unregistered(field.name));
                };
                field.name = target.name;
                self.symbols.rename_to(entry, target.name);
            }

            debug!(field = self.mixin.text(field.name), "resolved field against target");
            tombstones[idx] = true;
        }

        let mut tombstones = tombstones.into_iter();
        class.fields.retain(|_| !tombstones.next().unwrap_or(false));
        Ok(())
    }

    fn validate_field(&self, field: &FieldNode, shadow: Option<&Annotation>) -> Result<FieldDisposition, PreprocessError> {
        let mixin = self.mixin;

        // Static state visible outside the donor would bind early in every
        // class compiled against it
        if field.access.is_static && !field.access.is_private() {
            return Err(mixin.invalid(
                field.name,
                "mixin classes cannot contain visible static methods or fields",
            ));
        }

        if let Some(shadow) = shadow {
            let prefix = mixin.shadow_prefix(shadow);
            if !prefix.is_empty() && mixin.text(field.name).starts_with(prefix) {
                return Err(mixin.invalid(
                    field.name,
                    "shadow fields cannot carry a shadow prefix",
                ));
            }
        }

        if field.name == mixin.markers().imaginary_super {
            if !field.access.is_exactly_private() {
                return Err(mixin.invalid(
                    field.name,
                    "imaginary super field must be private and non-final",
                ));
            }
            if mixin.text(field.desc) != object_descriptor(mixin.text(mixin.name())) {
                return Err(mixin.invalid(
                    field.name,
                    "imaginary super field must have the same type as the parent mixin",
                ));
            }
            return Ok(FieldDisposition::Drop);
        }

        Ok(FieldDisposition::Resolve)
    }

    fn method_entry(&self, method: &MethodNode) -> Result<MemberId, PreprocessError> {
        self.symbols
            .find_method(self.mixin.class_id(), MemberKey::of(method), SearchScope::ThisClass)
            .ok_or_else(|| self.unregistered(method.name))
    }

    fn unregistered(&self, member: Symbol) -> PreprocessError {
        self.mixin.invalid(member, "member is not registered in the symbol table")
    }

    fn unresolved(&self, kind: MemberKind, member: Symbol) -> PreprocessError {
        PreprocessError::UnresolvedShadow {
            mixin: self.mixin.text(self.mixin.name()).to_string(),
            kind,
            member: self.mixin.text(member).to_string(),
        }
    }

    fn illegal_alias(&self, kind: MemberKind, member: Symbol, target: Symbol, reason: &str) -> PreprocessError {
        PreprocessError::IllegalAlias {
            mixin: self.mixin.text(self.mixin.name()).to_string(),
            kind,
            member: self.mixin.text(member).to_string(),
            target: self.mixin.text(target).to_string(),
            reason: reason.to_string(),
        }
    }
}
