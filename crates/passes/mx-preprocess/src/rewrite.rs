//! Reference rewriting
//!
//! After binding, the symbol table knows the final name of every donor
//! member. Method bodies still reference members by the names they were
//! compiled against; this pass brings every invocation and field access in
//! line. References to classes or members the table does not know about
//! are left alone.

use mx_class::{ClassNode, Instruction};
use mx_symbols::{MemberKey, SearchScope, SymbolTable};
use tracing::trace;

/// Number of instructions rewritten by one pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    /// Rewritten method invocations
    pub invocations: usize,
    /// Rewritten field accesses
    pub field_accesses: usize,
}

/// Rewrites member references to their current names
pub struct ReferenceRewriter<'table> {
    symbols: &'table SymbolTable,
}

impl<'table> ReferenceRewriter<'table> {
    /// Rewriter reading names from `symbols`
    pub fn new(symbols: &'table SymbolTable) -> Self {
        Self { symbols }
    }

    /// Rewrite every instruction of every method in `class`
    pub fn rewrite_class(&self, class: &mut ClassNode) -> RewriteStats {
        let mut stats = RewriteStats::default();
        for method in &mut class.methods {
            for insn in &mut method.instructions {
                if !self.rewrite_instruction(insn) {
                    continue;
                }
                match insn {
                    Instruction::Invoke { .. } => stats.invocations += 1,
                    Instruction::Field { .. } => stats.field_accesses += 1,
                    Instruction::Other { .. } => {}
                }
            }
        }
        stats
    }

    /// Rewrite a single instruction, returning whether it changed
    ///
    /// Invocations are looked up through the owner's superclasses, since a
    /// call may name a method the owner only inherits. Field accesses must
    /// name the declaring class.
    pub fn rewrite_instruction(&self, insn: &mut Instruction) -> bool {
        let (owner, name, desc, scope) = match insn {
            Instruction::Invoke {
                owner, name, desc, ..
            } => (*owner, name, *desc, SearchScope::Hierarchy),
            Instruction::Field {
                owner, name, desc, ..
            } => (*owner, name, *desc, SearchScope::ThisClass),
            Instruction::Other { .. } => return false,
        };

        let Some(class) = self.symbols.class_id(owner) else {
            return false;
        };
        let key = MemberKey::new(*name, desc);
        let found = match scope {
            SearchScope::Hierarchy => self.symbols.find_method(class, key, scope),
            SearchScope::ThisClass => self.symbols.find_field(class, key, scope),
        };
        let Some(entry) = found else {
            return false;
        };
        if !self.symbols.is_renamed(entry) {
            return false;
        }

        let current = self.symbols.name(entry);
        if current == *name {
            return false;
        }

        let interner = self.symbols.interner();
        trace!(
            owner = interner.resolve(owner),
            from = interner.resolve(*name),
            to = interner.resolve(current),
            "rewrote member reference"
        );
        *name = current;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_class::{Access, FieldNode, FieldOp, Interner, InvokeKind, MethodNode};

    #[test]
    fn unknown_owner_is_left_alone() {
        let interner = Interner::new();
        let sym = |text: &str| interner.intern(text);
        let symbols = SymbolTable::new(interner.clone());

        let mut insn = Instruction::Invoke {
            kind: InvokeKind::Static,
            owner: sym("java/lang/Math"),
            name: sym("abs"),
            desc: sym("(I)I"),
        };
        assert!(!ReferenceRewriter::new(&symbols).rewrite_instruction(&mut insn));
    }

    #[test]
    fn renamed_members_are_rewritten_and_counted() {
        let interner = Interner::new();
        let sym = |text: &str| interner.intern(text);
        let mut symbols = SymbolTable::new(interner.clone());

        let base = ClassNode::new(sym("demo/Base"), None)
            .with_method(MethodNode::new(sym("update"), sym("()V"), Access::public()));
        let donor = ClassNode::new(sym("demo/Donor"), Some(sym("demo/Base")))
            .with_field(FieldNode::new(sym("count"), sym("I"), Access::private()));
        let base_id = symbols.register_class(&base);
        let donor_id = symbols.register_class(&donor);

        let update = symbols
            .find_method(base_id, MemberKey::new(sym("update"), sym("()V")), SearchScope::ThisClass)
            .expect("declared method");
        symbols.rename_to(update, sym("refresh"));
        let count = symbols
            .find_field(donor_id, MemberKey::new(sym("count"), sym("I")), SearchScope::ThisClass)
            .expect("declared field");
        symbols.rename_to(count, sym("field_7"));

        let mut class = donor.with_method(MethodNode::new(sym("run"), sym("()V"), Access::public()).with_body(vec![
            Instruction::Invoke {
                kind: InvokeKind::Virtual,
                owner: sym("demo/Donor"),
                name: sym("update"),
                desc: sym("()V"),
            },
            Instruction::Field {
                op: FieldOp::Get,
                owner: sym("demo/Donor"),
                name: sym("count"),
                desc: sym("I"),
            },
            Instruction::Field {
                op: FieldOp::Get,
                owner: sym("demo/Donor"),
                name: sym("count"),
                desc: sym("J"),
            },
            Instruction::Other { opcode: 177 },
        ]));

        let stats = ReferenceRewriter::new(&symbols).rewrite_class(&mut class);
        assert_eq!(
            stats,
            RewriteStats {
                invocations: 1,
                field_accesses: 1
            }
        );

        let names: Vec<_> = class.methods[0]
            .instructions
            .iter()
            .filter_map(Instruction::member_ref)
            .map(|(_, name, _)| interner.resolve(name).to_string())
            .collect();
        assert_eq!(names, ["refresh", "field_7", "count"]);
    }

    #[test]
    fn inherited_fields_are_not_searched() {
        let interner = Interner::new();
        let sym = |text: &str| interner.intern(text);
        let mut symbols = SymbolTable::new(interner.clone());

        let base = ClassNode::new(sym("demo/Base"), None)
            .with_field(FieldNode::new(sym("size"), sym("I"), Access::private()))
            .with_method(MethodNode::new(sym("update"), sym("()V"), Access::public()));
        let child = ClassNode::new(sym("demo/Child"), Some(sym("demo/Base")));
        let base_id = symbols.register_class(&base);
        symbols.register_class(&child);

        let size = symbols
            .find_field(base_id, MemberKey::new(sym("size"), sym("I")), SearchScope::ThisClass)
            .expect("declared field");
        symbols.rename_to(size, sym("field_3"));
        let update = symbols
            .find_method(base_id, MemberKey::new(sym("update"), sym("()V")), SearchScope::ThisClass)
            .expect("declared method");
        symbols.rename_to(update, sym("refresh"));

        let mut class = child.with_method(MethodNode::new(sym("run"), sym("()V"), Access::public()).with_body(vec![
            Instruction::Field {
                op: FieldOp::Get,
                owner: sym("demo/Child"),
                name: sym("size"),
                desc: sym("I"),
            },
            Instruction::Invoke {
                kind: InvokeKind::Virtual,
                owner: sym("demo/Child"),
                name: sym("update"),
                desc: sym("()V"),
            },
        ]));

        let stats = ReferenceRewriter::new(&symbols).rewrite_class(&mut class);
        assert_eq!(
            stats,
            RewriteStats {
                invocations: 1,
                field_accesses: 0
            }
        );

        let names: Vec<_> = class.methods[0]
            .instructions
            .iter()
            .filter_map(Instruction::member_ref)
            .map(|(_, name, _)| interner.resolve(name).to_string())
            .collect();
        assert_eq!(names, ["size", "refresh"]);
    }
}
