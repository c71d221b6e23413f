//! Pretty-printing for types.
//!
//! Free variables and constraints have no fixed spelling; they get a label
//! the first time a [`PrettyContext`] meets them. Rendering the same node
//! twice through one context yields the same label, so a context should be
//! shared across everything that belongs in one message.

use std::collections::HashMap;
use std::fmt::{self, Display, Write};

use super::ty::{TemplateId, Type, TypeArena, TypeId};

/// Context for pretty-printing, tracking placeholder labels.
#[derive(Debug, Default)]
pub struct PrettyContext {
    labels: HashMap<TypeId, String>,
}

impl PrettyContext {
    pub fn new() -> Self {
        PrettyContext {
            labels: HashMap::new(),
        }
    }

    /// Label previously given to `id`, if any.
    pub fn label(&self, id: TypeId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    /// Get or allocate the label for a free placeholder.
    ///
    /// Named variables keep their name; everything else is numbered by how
    /// many labels the context has handed out so far.
    fn label_for(&mut self, id: TypeId, name: Option<&str>) -> String {
        if let Some(label) = self.labels.get(&id) {
            return label.clone();
        }
        let label = match name {
            Some(name) => format!("'{}", name),
            None => format!("'{}", self.labels.len()),
        };
        self.labels.insert(id, label.clone());
        label
    }

    /// Format a type to a string.
    pub fn format_type(&mut self, arena: &TypeArena, id: TypeId) -> String {
        let mut s = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_type(&mut s, arena, id);
        s
    }

    fn write_type<W: Write>(&mut self, w: &mut W, arena: &TypeArena, id: TypeId) -> fmt::Result {
        let id = arena.actual(id);
        match arena.get(id) {
            Type::Terminal { name } => write!(w, "{}", name),

            Type::Var { name, .. } => {
                let label = self.label_for(id, name.as_deref());
                w.write_str(&label)
            }

            // Constraint names are documentation only; the label is positional.
            Type::Constraint { .. } => {
                let label = self.label_for(id, None);
                w.write_str(&label)
            }

            Type::Instance { template, args } if *template == TemplateId::FUNCTION => {
                match args.as_slice() {
                    [input, output] => self.write_function(w, arena, *input, *output),
                    _ => {
                        write!(w, "Function<")?;
                        self.write_list(w, arena, args, ", ")?;
                        write!(w, ">")
                    }
                }
            }

            Type::Instance { template, args } => {
                write!(w, "{}<", arena.template(*template).name)?;
                self.write_list(w, arena, args, ", ")?;
                write!(w, ">")
            }

            Type::Union { members } => {
                write!(w, "{{")?;
                self.write_list(w, arena, members, "|")?;
                write!(w, "}}")
            }
        }
    }

    /// Write a curried function chain as `(A, B) -> R`.
    fn write_function<W: Write>(
        &mut self,
        w: &mut W,
        arena: &TypeArena,
        input: TypeId,
        output: TypeId,
    ) -> fmt::Result {
        let mut params = vec![input];
        let mut result = output;
        while let Some((TemplateId::FUNCTION, &[next_input, next_output])) =
            arena.get(arena.actual(result)).as_instance()
        {
            params.push(next_input);
            result = next_output;
        }

        write!(w, "(")?;
        self.write_list(w, arena, &params, ", ")?;
        write!(w, ") -> ")?;
        self.write_type(w, arena, result)
    }

    fn write_list<W: Write>(
        &mut self,
        w: &mut W,
        arena: &TypeArena,
        items: &[TypeId],
        sep: &str,
    ) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                w.write_str(sep)?;
            }
            self.write_type(w, arena, *item)?;
        }
        Ok(())
    }
}

/// `Display` adapter rendering one node with a fresh context.
pub struct Rendered<'a> {
    arena: &'a TypeArena,
    id: TypeId,
}

impl<'a> Rendered<'a> {
    pub fn new(arena: &'a TypeArena, id: TypeId) -> Self {
        Rendered { arena, id }
    }
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ctx = PrettyContext::new();
        f.write_str(&ctx.format_type(self.arena, self.id))
    }
}

impl TypeArena {
    /// Render `id` with a fresh naming context.
    pub fn display(&self, id: TypeId) -> Rendered<'_> {
        Rendered::new(self, id)
    }
}
