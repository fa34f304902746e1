//! Shared symbol table for class members
//!
//! Every class that takes part in a merge registers its members here once.
//! Each declared member gets exactly one [`MemberEntry`], addressed by a
//! stable [`MemberId`], and every pass that needs to rename a member does so
//! through [`SymbolTable::rename_to`]. A rename is therefore immediately
//! visible to all later lookups, from any donor.
//!
//! # Lookup
//!
//! Lookups are keyed by `(name, descriptor)`. An entry answers to both its
//! original declared name and its current name, so instructions compiled
//! against the original name still find the renamed entry.
//!
//! ```rust,ignore
//! let donor = symbols.register_class(&class_node);
//! let key = MemberKey::new(name, desc);
//! if let Some(id) = symbols.find_method(donor, key, SearchScope::Hierarchy) {
//!     symbols.rename_to(id, new_name);
//! }
//! ```

pub mod entry;
pub mod table;

pub use entry::{MemberEntry, MemberId, MemberKey, MemberKind};
pub use table::{ClassId, ClassInfo, SearchScope, SymbolTable};
