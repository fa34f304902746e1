//! Mixin preprocessor
//!
//! Prepares a donor class (a "mixin") for merging into a target class by
//! settling on one final name for every member the two classes share, and
//! rewriting the donor's instruction streams to use those names.
//!
//! # Architecture
//!
//! Preprocessing runs in two passes over the donor:
//! - **Preparation** is target independent and runs once per donor. It strips
//!   shadow prefixes and applies soft-implemented interface renames, writing
//!   every rename through to the shared [`SymbolTable`].
//! - **Attachment** binds the prepared donor to one target. Shadow methods
//!   and fields are resolved against the target through their alias lists,
//!   private target members may force further renames, fields that must not
//!   survive the merge are dropped, and finally every member reference in the
//!   donor's bodies is rewritten to the current names.
//!
//! Because renames live in the symbol table rather than in the donor node,
//! a second preprocessor created for the same donor sees them too.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mx_preprocess::{MixinInfo, PreprocessorConfig};
//!
//! let mixin = MixinInfo::new(&donor, &mut symbols, Arc::new(PreprocessorConfig::default()));
//! let attached = mixin.preprocessor(donor).create_context_for(&mut symbols, target)?;
//! // attached.mixin_class() is ready to be merged into attached.target_class()
//! ```

pub mod alias;
pub mod attach;
pub mod config;
pub mod context;
pub mod error;
pub mod interface;
pub mod mixin;
pub mod preprocessor;
pub mod rewrite;

pub use alias::AliasList;
pub use config::PreprocessorConfig;
pub use context::{AttachedContext, MixinTargetContext, TargetContext};
pub use error::PreprocessError;
pub use interface::InterfaceInfo;
pub use mixin::MixinInfo;
pub use mx_symbols::SymbolTable;
pub use preprocessor::MixinPreprocessor;
pub use rewrite::{ReferenceRewriter, RewriteStats};
