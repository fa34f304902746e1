//! Human-readable rendering of class nodes
//!
//! Used by snapshot tests and by diagnostics that need to show a whole
//! donor. One line per member, annotations and instructions indented below.

use crate::annotation::{Annotation, AnnotationValue};
use crate::insn::Instruction;
use crate::node::ClassNode;
use mx_intern::{Interner, Symbol};
use std::fmt::{self, Display, Formatter};

/// Display adapter resolving symbols through an interner
pub struct Pretty<'fmt> {
    class: &'fmt ClassNode,
    interner: &'fmt Interner,
}

impl<'fmt> Pretty<'fmt> {
    /// Wrap `class` for display
    pub fn new(class: &'fmt ClassNode, interner: &'fmt Interner) -> Self {
        Self { class, interner }
    }

    fn write_annotations(&self, formatter: &mut Formatter<'_>, annotations: &[Annotation]) -> fmt::Result {
        for annotation in annotations {
            write!(formatter, "    @{}", self.interner.resolve(annotation.desc))?;
            if !annotation.values.is_empty() {
                write!(formatter, "(")?;
                for (idx, (key, value)) in annotation.values.iter().enumerate() {
                    if idx > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{key} = ")?;
                    write_value(formatter, value)?;
                }
                write!(formatter, ")")?;
            }
            writeln!(formatter)?;
        }
        Ok(())
    }

    fn write_instruction(&self, formatter: &mut Formatter<'_>, insn: &Instruction) -> fmt::Result {
        let interner = self.interner;
        let resolve = |sym: Symbol| interner.resolve(sym);
        match *insn {
            Instruction::Invoke {
                kind,
                owner,
                name,
                desc,
            } => writeln!(
                formatter,
                "    {kind} {}.{} {}",
                resolve(owner),
                resolve(name),
                resolve(desc)
            ),
            Instruction::Field {
                op,
                owner,
                name,
                desc,
            } => writeln!(
                formatter,
                "    {op} {}.{} {}",
                resolve(owner),
                resolve(name),
                resolve(desc)
            ),
            Instruction::Other { opcode } => writeln!(formatter, "    op {opcode}"),
        }
    }
}

fn write_value(formatter: &mut Formatter<'_>, value: &AnnotationValue) -> fmt::Result {
    match value {
        AnnotationValue::Str(text) => write!(formatter, "\"{text}\""),
        AnnotationValue::Bool(flag) => write!(formatter, "{flag}"),
        AnnotationValue::Int(number) => write!(formatter, "{number}"),
        AnnotationValue::List(items) => {
            write!(formatter, "[")?;
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    write!(formatter, ", ")?;
                }
                write_value(formatter, item)?;
            }
            write!(formatter, "]")
        }
    }
}

impl Display for Pretty<'_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let class = self.class;
        write!(formatter, "class {}", self.interner.resolve(class.name))?;
        if let Some(superclass) = class.superclass {
            write!(formatter, " extends {}", self.interner.resolve(superclass))?;
        }
        writeln!(formatter)?;

        for field in &class.fields {
            writeln!(
                formatter,
                "  field {} {} {}",
                field.access,
                self.interner.resolve(field.name),
                self.interner.resolve(field.desc)
            )?;
            self.write_annotations(formatter, &field.annotations)?;
        }

        for method in &class.methods {
            writeln!(
                formatter,
                "  method {} {} {}",
                method.access,
                self.interner.resolve(method.name),
                self.interner.resolve(method.desc)
            )?;
            self.write_annotations(formatter, &method.annotations)?;
            for insn in &method.instructions {
                self.write_instruction(formatter, insn)?;
            }
        }

        Ok(())
    }
}
