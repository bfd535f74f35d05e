//! Structured GraphQL operation descriptors.
//!
//! An operation is described by its name, kind, variable signature and a
//! tree of selected fields. The executable document sent over the wire is
//! rendered from that structure, so the same descriptor can be checked
//! against a live schema (see [`crate::schema`]) before it is ever executed.
//!
//! ```ignore
//! const GET_PRODUCT: OperationDescriptor = OperationDescriptor::query(
//!     "GetProduct",
//!     &[VariableDefinition::new("id", TypeRef::ID)],
//!     Field::object("product", &[Field::leaf("id"), Field::leaf("name")])
//!         .with_arguments(&[Argument::variable("id")]),
//! );
//! ```

use crate::typed::OperationKind;
use std::fmt::{self, Write};

/// A reference to a GraphQL type, in SDL shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    Named(&'static str),
    NonNull(&'static TypeRef),
    List(&'static TypeRef),
}

impl TypeRef {
    /// `ID!`
    pub const ID: Self = Self::NonNull(&Self::Named("ID"));
    /// `String!`
    pub const STRING: Self = Self::NonNull(&Self::Named("String"));

    /// Returns the innermost named type.
    pub fn named_type(&self) -> &'static str {
        match self {
            Self::Named(name) => name,
            Self::NonNull(inner) | Self::List(inner) => inner.named_type(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::NonNull(inner) => write!(f, "{}!", inner),
            Self::List(inner) => write!(f, "[{}]", inner),
        }
    }
}

/// A declared operation variable (`$id: ID!`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: &'static str,
    pub ty: TypeRef,
}

impl VariableDefinition {
    pub const fn new(name: &'static str, ty: TypeRef) -> Self {
        Self { name, ty }
    }
}

/// A field argument bound to an operation variable (`id: $id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argument {
    pub name: &'static str,
    pub variable: &'static str,
}

impl Argument {
    /// Binds an argument to the variable of the same name.
    pub const fn variable(name: &'static str) -> Self {
        Self {
            name,
            variable: name,
        }
    }

    /// Binds an argument to a differently named variable.
    pub const fn bound(name: &'static str, variable: &'static str) -> Self {
        Self { name, variable }
    }
}

/// A selected field with its arguments and sub-selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub arguments: &'static [Argument],
    pub selection: &'static [Field],
}

impl Field {
    /// A scalar field.
    pub const fn leaf(name: &'static str) -> Self {
        Self {
            name,
            arguments: &[],
            selection: &[],
        }
    }

    /// A composite field with a selection set.
    pub const fn object(name: &'static str, selection: &'static [Field]) -> Self {
        Self {
            name,
            arguments: &[],
            selection,
        }
    }

    pub const fn with_arguments(mut self, arguments: &'static [Argument]) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.selection.is_empty()
    }

    /// Nesting depth of the selection, counting this field.
    pub fn depth(&self) -> usize {
        1 + self.selection.iter().map(Field::depth).max().unwrap_or(0)
    }

    /// Looks up a direct sub-field by name.
    pub fn child(&self, name: &str) -> Option<&Field> {
        self.selection.iter().find(|f| f.name == name)
    }
}

/// A complete named operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub kind: OperationKind,
    pub variables: &'static [VariableDefinition],
    pub root: Field,
}

impl OperationDescriptor {
    pub const fn query(
        name: &'static str,
        variables: &'static [VariableDefinition],
        root: Field,
    ) -> Self {
        Self {
            name,
            kind: OperationKind::Query,
            variables,
            root,
        }
    }

    pub const fn mutation(
        name: &'static str,
        variables: &'static [VariableDefinition],
        root: Field,
    ) -> Self {
        Self {
            name,
            kind: OperationKind::Mutation,
            variables,
            root,
        }
    }

    /// The key under which the payload appears in `data`.
    pub fn response_key(&self) -> &'static str {
        self.root.name
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variables.iter().map(|v| v.name)
    }

    pub fn variable(&self, name: &str) -> Option<&VariableDefinition> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Renders the executable GraphQL document.
    pub fn document(&self) -> String {
        let mut out = String::new();
        out.push_str(self.kind.keyword());
        out.push(' ');
        out.push_str(self.name);
        if !self.variables.is_empty() {
            out.push('(');
            for (i, var) in self.variables.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "${}: {}", var.name, var.ty);
            }
            out.push(')');
        }
        out.push_str(" {\n");
        write_field(&mut out, &self.root, 1);
        out.push_str("}\n");
        out
    }
}

impl fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.document())
    }
}

fn write_field(out: &mut String, field: &Field, level: usize) {
    let indent = "  ".repeat(level);
    out.push_str(&indent);
    out.push_str(field.name);
    if !field.arguments.is_empty() {
        out.push('(');
        for (i, arg) in field.arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}: ${}", arg.name, arg.variable);
        }
        out.push(')');
    }
    if field.selection.is_empty() {
        out.push('\n');
        return;
    }
    out.push_str(" {\n");
    for child in field.selection {
        write_field(out, child, level + 1);
    }
    out.push_str(&indent);
    out.push_str("}\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: TypeRef = TypeRef::ID;
    const STRINGS: TypeRef = TypeRef::List(&TypeRef::NonNull(&TypeRef::Named("String")));

    const GET_THING: OperationDescriptor = OperationDescriptor::query(
        "GetThing",
        &[VariableDefinition::new("id", ID)],
        Field::object(
            "thing",
            &[
                Field::leaf("id"),
                Field::object("owner", &[Field::leaf("id"), Field::leaf("name")]),
            ],
        )
        .with_arguments(&[Argument::variable("id")]),
    );

    #[test]
    fn test_type_ref_display() {
        assert_eq!(ID.to_string(), "ID!");
        assert_eq!(STRINGS.to_string(), "[String!]");
        assert_eq!(STRINGS.named_type(), "String");
        assert!(ID.is_non_null());
        assert!(!STRINGS.is_non_null());
    }

    #[test]
    fn test_render_document() {
        let expected = "query GetThing($id: ID!) {\n  thing(id: $id) {\n    id\n    owner {\n      id\n      name\n    }\n  }\n}\n";
        assert_eq!(GET_THING.document(), expected);
    }

    #[test]
    fn test_render_without_variables() {
        const DELETE_ALL: OperationDescriptor =
            OperationDescriptor::mutation("DeleteAll", &[], Field::leaf("deleteAll"));
        assert_eq!(DELETE_ALL.document(), "mutation DeleteAll {\n  deleteAll\n}\n");
    }

    #[test]
    fn test_descriptor_queries() {
        assert_eq!(GET_THING.response_key(), "thing");
        assert_eq!(GET_THING.variable_names().collect::<Vec<_>>(), vec!["id"]);
        assert_eq!(GET_THING.depth(), 3);
        assert!(GET_THING.root.child("owner").is_some());
        assert!(GET_THING.root.child("missing").is_none());
        assert!(GET_THING.variable("id").is_some());
    }
}
