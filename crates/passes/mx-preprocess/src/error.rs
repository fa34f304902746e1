//! Error types for mixin preprocessing
//!
//! Every error aborts preprocessing of the donor against the current target.
//! Each carries the donor name and the offending member so the caller can
//! report it without access to the symbol tables.

use miette::Diagnostic;
use mx_symbols::MemberKind;
use thiserror::Error;

/// Errors raised while preparing or attaching a donor
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum PreprocessError {
    /// `attach` was called on a preprocessor that already attached
    #[error("preprocessor for {mixin} was already attached")]
    #[diagnostic(
        code(preprocess::already_attached),
        help("create a new preprocessor for every target")
    )]
    AlreadyAttached {
        /// Donor class
        mixin: String,
    },

    /// A shadow member has no counterpart in the target under any alias
    #[error("shadow {kind} {member} in {mixin} was not located in the target class")]
    #[diagnostic(code(preprocess::unresolved_shadow))]
    UnresolvedShadow {
        /// Donor class
        mixin: String,
        /// Method or field
        kind: MemberKind,
        /// Donor member name
        member: String,
    },

    /// An alias resolved to a member that may not be aliased
    #[error("{kind} {member} in {mixin} cannot be aliased to {target}: {reason}")]
    #[diagnostic(code(preprocess::illegal_alias))]
    IllegalAlias {
        /// Donor class
        mixin: String,
        /// Method or field
        kind: MemberKind,
        /// Donor member name
        member: String,
        /// Target member the alias resolved to
        target: String,
        /// Which rule was broken
        reason: String,
    },

    /// A resolved field disagrees with the donor about its type
    #[error("the field {field} in the target class of {mixin} has a conflicting signature: expected {expected}, found {found}")]
    #[diagnostic(code(preprocess::signature_conflict))]
    SignatureConflict {
        /// Donor class
        mixin: String,
        /// Field name
        field: String,
        /// Donor descriptor
        expected: String,
        /// Target descriptor
        found: String,
    },

    /// The donor breaks a structural rule
    #[error("invalid member {member} in {mixin}: {reason}")]
    #[diagnostic(code(preprocess::invalid_donor))]
    InvalidDonor {
        /// Donor class
        mixin: String,
        /// Offending member name
        member: String,
        /// Which rule was broken
        reason: String,
    },
}

impl PreprocessError {
    /// Donor class the error was raised for
    #[must_use]
    pub fn mixin(&self) -> &str {
        match self {
            Self::AlreadyAttached { mixin }
            | Self::UnresolvedShadow { mixin, .. }
            | Self::IllegalAlias { mixin, .. }
            | Self::SignatureConflict { mixin, .. }
            | Self::InvalidDonor { mixin, .. } => mixin,
        }
    }
}
