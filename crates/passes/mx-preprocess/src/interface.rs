//! Soft-implemented interfaces
//!
//! A donor may implement an interface "softly": methods named with the
//! interface's prefix are renamed to the interface method they stand for,
//! without the donor having to declare the interface itself.

use crate::error::PreprocessError;
use crate::mixin::MixinInfo;
use mx_class::{Annotation, AnnotationValue, MethodNode, Symbol};
use mx_symbols::MemberKey;
use rustc_hash::FxHashSet;
use tracing::debug;

/// A soft-implemented interface contract
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    /// Interface class name
    interface: Symbol,
    /// Prefix marking donor methods that implement this interface
    prefix: String,
    /// Methods the interface declares
    methods: FxHashSet<MemberKey>,
}

impl InterfaceInfo {
    /// Contract for `interface` declaring `methods`
    pub fn new(interface: Symbol, prefix: impl Into<String>, methods: impl IntoIterator<Item = MemberKey>) -> Self {
        Self {
            interface,
            prefix: prefix.into(),
            methods: methods.into_iter().collect(),
        }
    }

    /// Interface class name
    pub fn interface(&self) -> Symbol {
        self.interface
    }

    /// Method prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Rename `method` if its prefix marks it as implementing this interface
    ///
    /// Returns whether the method was renamed. A prefixed method must be
    /// public and must name a method the interface declares.
    pub(crate) fn rename_method(&self, mixin: &MixinInfo, method: &mut MethodNode) -> Result<bool, PreprocessError> {
        let interner = mixin.interner();
        if self.prefix.is_empty() {
            return Ok(false);
        }
        let Some(real_name) = interner.resolve(method.name).strip_prefix(self.prefix.as_str()) else {
            return Ok(false);
        };
        let real_name = interner.intern(real_name);
        let iface = mixin.text(self.interface);

        if !self.methods.contains(&MemberKey::new(real_name, method.desc)) {
            return Err(mixin.invalid(
                method.name,
                format!("does not exist in target interface {iface}"),
            ));
        }
        if !method.access.is_public() {
            return Err(mixin.invalid(
                method.name,
                format!(
                    "cannot implement {iface}::{} because it is not public",
                    mixin.text(real_name)
                ),
            ));
        }

        let original = mixin.text(method.name);
        debug!(
            interface = iface,
            from = original,
            to = mixin.text(real_name),
            "soft-implements rename"
        );
        method.set_annotation(
            Annotation::marker(mixin.markers().renamed)
                .with("originalName", original)
                .with("isInterfaceMember", AnnotationValue::Bool(true)),
        );
        method.name = real_name;
        Ok(true)
    }
}
