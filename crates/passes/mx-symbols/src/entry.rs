//! Member entries

use derive_more::Display;
use la_arena::Idx;
use mx_class::{Access, Member};
use mx_intern::Symbol;

use crate::table::ClassId;

/// Stable handle to a member entry
pub type MemberId = Idx<MemberEntry>;

/// Kind of member
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Display)]
pub enum MemberKind {
    /// Method
    #[display("method")]
    Method,
    /// Field
    #[display("field")]
    Field,
}

/// Lookup key: name plus descriptor
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct MemberKey {
    /// Member name
    pub name: Symbol,
    /// Member descriptor
    pub desc: Symbol,
}

impl MemberKey {
    /// Key from its parts
    pub const fn new(name: Symbol, desc: Symbol) -> Self {
        Self { name, desc }
    }

    /// Key of a method or field node as it currently stands
    pub fn of(member: &impl Member) -> Self {
        Self::new(member.name(), member.desc())
    }
}

/// A registered member
#[derive(Debug, Clone)]
pub struct MemberEntry {
    /// Declaring class
    pub owner: ClassId,
    /// Method or field
    pub kind: MemberKind,
    /// Name at registration time
    pub original: Symbol,
    /// Current name
    pub(crate) name: Symbol,
    /// Descriptor
    pub desc: Symbol,
    /// Access at registration time
    pub access: Access,
    /// Set on the first rename away from `original`, never cleared
    pub(crate) renamed: bool,
}

impl MemberEntry {
    pub(crate) fn new(owner: ClassId, kind: MemberKind, member: &impl Member) -> Self {
        Self {
            owner,
            kind,
            original: member.name(),
            name: member.name(),
            desc: member.desc(),
            access: member.access(),
            renamed: false,
        }
    }

    /// Current name
    pub fn name(&self) -> Symbol {
        self.name
    }

    /// Whether the member was ever renamed
    pub fn is_renamed(&self) -> bool {
        self.renamed
    }

    /// Whether `key` refers to this entry under its original or current name
    pub fn matches(&self, key: MemberKey) -> bool {
        self.desc == key.desc && (self.name == key.name || self.original == key.name)
    }
}
