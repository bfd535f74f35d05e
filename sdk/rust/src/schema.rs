//! Remote schema index and operation validation.
//!
//! A [`SchemaIndex`] is built from an introspection result (or by hand with
//! [`SchemaBuilder`]) and checks operation descriptors against it, so a field
//! renamed on the server is reported at start-up rather than on first use.

use crate::document::{Field, OperationDescriptor, TypeRef};
use crate::error::{ErrorCode, SdkError, SdkResult};
use crate::typed::OperationKind;
use catalog_core::diagnostics::codes;
use catalog_core::DiagnosticBag;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fmt;

/// Reduced introspection query: root types plus fields, arguments and input
/// fields of every type, with four levels of type wrapping.
pub const INTROSPECTION_QUERY: &str = r#"query CatalogIntrospection {
  __schema {
    queryType { name }
    mutationType { name }
    types {
      kind
      name
      fields(includeDeprecated: true) {
        name
        args { name defaultValue type { ...TypeRef } }
        type { ...TypeRef }
      }
      inputFields { name defaultValue type { ...TypeRef } }
    }
  }
}

fragment TypeRef on __Type {
  kind
  name
  ofType { kind name ofType { kind name ofType { kind name ofType { kind name } } } }
}
"#;

/// Name of the introspection operation.
pub const INTROSPECTION_OPERATION: &str = "CatalogIntrospection";

// ============================================================================
// Introspection wire types
// ============================================================================

/// Kind of a schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// Object-like kinds require a selection set.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object | Self::Interface | Self::Union)
    }
}

/// A type reference as reported by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaTypeRef {
    pub kind: TypeKind,
    pub name: Option<String>,
    pub of_type: Option<Box<SchemaTypeRef>>,
}

impl SchemaTypeRef {
    /// Returns the innermost named type.
    pub fn named_type(&self) -> Option<&str> {
        match &self.of_type {
            Some(inner) => inner.named_type(),
            None => self.name.as_deref(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        self.kind == TypeKind::NonNull
    }

    /// Parses SDL notation such as `[String!]!`.
    ///
    /// Named types are given kind `Object` until resolved against an index.
    pub fn parse(notation: &str) -> SdkResult<Self> {
        let notation = notation.trim();
        if let Some(inner) = notation.strip_suffix('!') {
            return Ok(Self::wrap(TypeKind::NonNull, Self::parse(inner)?));
        }
        if let Some(inner) = notation
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return Ok(Self::wrap(TypeKind::List, Self::parse(inner)?));
        }
        if notation.is_empty() || !notation.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(SdkError::new(
                ErrorCode::SchemaMismatch,
                format!("Invalid type notation: {:?}", notation),
            ));
        }
        Ok(Self {
            kind: TypeKind::Object,
            name: Some(notation.to_string()),
            of_type: None,
        })
    }

    fn wrap(kind: TypeKind, inner: SchemaTypeRef) -> Self {
        Self {
            kind,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    fn resolve_kinds(&mut self, types: &FxHashMap<String, SchemaType>) {
        match &mut self.of_type {
            Some(inner) => inner.resolve_kinds(types),
            None => {
                if let Some(ty) = self.name.as_deref().and_then(|n| types.get(n)) {
                    self.kind = ty.kind;
                }
            }
        }
    }
}

impl fmt::Display for SchemaTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.of_type) {
            (TypeKind::NonNull, Some(inner)) => write!(f, "{}!", inner),
            (TypeKind::List, Some(inner)) => write!(f, "[{}]", inner),
            _ => f.write_str(self.name.as_deref().unwrap_or("?")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IntrospectionData {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: Option<NamedRef>,
    mutation_type: Option<NamedRef>,
    types: Vec<IntrospectionType>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionType {
    kind: TypeKind,
    name: String,
    #[serde(default)]
    fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    input_fields: Option<Vec<IntrospectionInputValue>>,
}

#[derive(Debug, Deserialize)]
struct IntrospectionField {
    name: String,
    #[serde(default)]
    args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    ty: SchemaTypeRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionInputValue {
    name: String,
    #[serde(rename = "type")]
    ty: SchemaTypeRef,
    #[serde(default)]
    default_value: Option<String>,
}

// ============================================================================
// Index
// ============================================================================

/// A field on an object type or an argument/input field.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub ty: SchemaTypeRef,
    pub args: IndexMap<String, SchemaArgument>,
}

/// An argument or input field.
#[derive(Debug, Clone)]
pub struct SchemaArgument {
    pub ty: SchemaTypeRef,
    pub has_default: bool,
}

impl SchemaArgument {
    /// Non-null without a default value.
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && !self.has_default
    }
}

/// A named schema type.
#[derive(Debug, Clone)]
pub struct SchemaType {
    pub kind: TypeKind,
    pub fields: IndexMap<String, SchemaField>,
    pub input_fields: IndexMap<String, SchemaArgument>,
}

impl SchemaType {
    fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            fields: IndexMap::new(),
            input_fields: IndexMap::new(),
        }
    }
}

/// Lookup structure over a remote schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaIndex {
    query_type: Option<String>,
    mutation_type: Option<String>,
    types: FxHashMap<String, SchemaType>,
}

impl SchemaIndex {
    /// Starts a hand-written schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Builds an index from the `data` member of an introspection response.
    pub fn from_introspection(data: serde_json::Value) -> SdkResult<Self> {
        let data: IntrospectionData = serde_json::from_value(data).map_err(|e| {
            SdkError::deserialize(format!("Failed to read introspection result: {}", e))
        })?;
        let schema = data.schema;

        let mut types = FxHashMap::default();
        for ty in schema.types {
            let mut entry = SchemaType::new(ty.kind);
            for field in ty.fields.unwrap_or_default() {
                entry.fields.insert(
                    field.name,
                    SchemaField {
                        ty: field.ty,
                        args: field.args.into_iter().map(into_argument).collect(),
                    },
                );
            }
            entry.input_fields = ty
                .input_fields
                .unwrap_or_default()
                .into_iter()
                .map(into_argument)
                .collect();
            types.insert(ty.name, entry);
        }

        Ok(Self {
            query_type: schema.query_type.map(|t| t.name),
            mutation_type: schema.mutation_type.map(|t| t.name),
            types,
        })
    }

    /// The root type name for an operation kind.
    pub fn root_type(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => self.query_type.as_deref(),
            OperationKind::Mutation => self.mutation_type.as_deref(),
        }
    }

    pub fn get_type(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Checks an operation against the schema.
    pub fn validate(&self, op: &OperationDescriptor) -> DiagnosticBag {
        let mut bag = DiagnosticBag::new();

        let Some(root_name) = self.root_type(op.kind) else {
            bag.error(
                codes::UNKNOWN_TYPE,
                format!("schema has no {} root type", op.kind.keyword()),
                op.name,
                "operation cannot be executed",
            );
            return bag;
        };
        let Some(root) = self.types.get(root_name) else {
            bag.error(
                codes::UNKNOWN_TYPE,
                format!("root type `{}` is not defined", root_name),
                op.name,
                "operation cannot be executed",
            );
            return bag;
        };

        let mut used = Vec::new();
        self.check_field(op, root_name, root, &op.root, op.name, &mut used, &mut bag);

        for var in op.variables {
            if !used.contains(&var.name) {
                bag.error(
                    codes::UNUSED_VARIABLE,
                    format!("variable `${}` is never used", var.name),
                    op.name,
                    format!("declared as {}", var.ty),
                );
            }
        }

        bag
    }

    /// Checks every operation and merges the diagnostics.
    pub fn validate_all(&self, ops: &[&OperationDescriptor]) -> DiagnosticBag {
        let mut bag = DiagnosticBag::new();
        for op in ops {
            bag.extend(self.validate(op));
        }
        bag
    }

    #[allow(clippy::too_many_arguments)]
    fn check_field(
        &self,
        op: &OperationDescriptor,
        parent_name: &str,
        parent: &SchemaType,
        field: &Field,
        prefix: &str,
        used: &mut Vec<&'static str>,
        bag: &mut DiagnosticBag,
    ) {
        let path = format!("{}.{}", prefix, field.name);

        let Some(info) = parent.fields.get(field.name) else {
            bag.error(
                codes::UNKNOWN_FIELD,
                format!("`{}` has no field `{}`", parent_name, field.name),
                path,
                "field is not part of the schema",
            );
            return;
        };

        for arg in field.arguments {
            used.push(arg.variable);
            let Some(expected) = info.args.get(arg.name) else {
                bag.error(
                    codes::UNKNOWN_ARGUMENT,
                    format!("`{}.{}` has no argument `{}`", parent_name, field.name, arg.name),
                    path.clone(),
                    "argument is not part of the schema",
                );
                continue;
            };
            let Some(var) = op.variable(arg.variable) else {
                bag.error(
                    codes::UNDECLARED_VARIABLE,
                    format!("variable `${}` is not declared", arg.variable),
                    path.clone(),
                    format!("bound to argument `{}`", arg.name),
                );
                continue;
            };
            if !is_assignable(&var.ty, &expected.ty) {
                bag.error(
                    codes::TYPE_MISMATCH,
                    format!(
                        "variable `${}` of type {} cannot be passed to `{}: {}`",
                        var.name, var.ty, arg.name, expected.ty
                    ),
                    path.clone(),
                    "variable type does not match the argument",
                );
            }
        }

        for (name, arg) in &info.args {
            if arg.is_required() && !field.arguments.iter().any(|a| a.name == name.as_str()) {
                bag.error(
                    codes::MISSING_ARGUMENT,
                    format!("required argument `{}: {}` is missing", name, arg.ty),
                    path.clone(),
                    "the server will reject this field",
                );
            }
        }

        let Some(target_name) = info.ty.named_type() else {
            return;
        };
        let Some(target) = self.types.get(target_name) else {
            bag.error(
                codes::UNKNOWN_TYPE,
                format!("type `{}` is not defined", target_name),
                path,
                "field returns an unknown type",
            );
            return;
        };

        if target.kind.is_composite() {
            if field.is_leaf() {
                bag.error(
                    codes::MISSING_SELECTION,
                    format!("`{}` of type {} needs a selection set", field.name, info.ty),
                    path,
                    "select at least one field",
                );
                return;
            }
            for child in field.selection {
                self.check_field(op, target_name, target, child, &path, used, bag);
            }
        } else if !field.is_leaf() {
            bag.error(
                codes::LEAF_SELECTION,
                format!("`{}` of type {} cannot have a selection set", field.name, info.ty),
                path,
                "remove the sub-selection",
            );
        }
    }
}

fn into_argument(value: IntrospectionInputValue) -> (String, SchemaArgument) {
    (
        value.name,
        SchemaArgument {
            ty: value.ty,
            has_default: value.default_value.is_some(),
        },
    )
}

/// A variable may be passed where the argument type is identical, or where
/// the argument is the nullable form of the variable's type.
fn is_assignable(variable: &TypeRef, argument: &SchemaTypeRef) -> bool {
    let variable = variable.to_string();
    let argument = argument.to_string();
    variable == argument || variable == format!("{}!", argument)
}

// ============================================================================
// Builder
// ============================================================================

/// Hand-written schema construction using SDL type notation.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    index: SchemaIndex,
    errors: Vec<SdkError>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        let mut builder = Self::default();
        for scalar in ["ID", "String", "Boolean", "Int", "Float"] {
            builder = builder.scalar(scalar);
        }
        builder
    }

    pub fn query_type(mut self, name: impl Into<String>) -> Self {
        self.index.query_type = Some(name.into());
        self
    }

    pub fn mutation_type(mut self, name: impl Into<String>) -> Self {
        self.index.mutation_type = Some(name.into());
        self
    }

    pub fn scalar(mut self, name: impl Into<String>) -> Self {
        self.index
            .types
            .insert(name.into(), SchemaType::new(TypeKind::Scalar));
        self
    }

    /// Declares an object type; `fields` are `(name, type, [(arg, type)])`.
    pub fn object(mut self, name: &str, fields: &[(&str, &str, &[(&str, &str)])]) -> Self {
        let mut ty = SchemaType::new(TypeKind::Object);
        for (field, notation, args) in fields {
            let Some(field_ty) = self.parse(notation) else {
                continue;
            };
            let mut parsed_args = IndexMap::new();
            for (arg, arg_notation) in *args {
                if let Some(arg_ty) = self.parse(arg_notation) {
                    parsed_args.insert(
                        arg.to_string(),
                        SchemaArgument {
                            ty: arg_ty,
                            has_default: false,
                        },
                    );
                }
            }
            ty.fields.insert(
                field.to_string(),
                SchemaField {
                    ty: field_ty,
                    args: parsed_args,
                },
            );
        }
        self.index.types.insert(name.to_string(), ty);
        self
    }

    /// Declares an input object type; `fields` are `(name, type)`.
    pub fn input(mut self, name: &str, fields: &[(&str, &str)]) -> Self {
        let mut ty = SchemaType::new(TypeKind::InputObject);
        for (field, notation) in fields {
            if let Some(field_ty) = self.parse(notation) {
                ty.input_fields.insert(
                    field.to_string(),
                    SchemaArgument {
                        ty: field_ty,
                        has_default: false,
                    },
                );
            }
        }
        self.index.types.insert(name.to_string(), ty);
        self
    }

    /// Finishes the schema, resolving the kinds of referenced types.
    pub fn build(mut self) -> SdkResult<SchemaIndex> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        let snapshot = self.index.types.clone();
        for ty in self.index.types.values_mut() {
            for field in ty.fields.values_mut() {
                field.ty.resolve_kinds(&snapshot);
                for arg in field.args.values_mut() {
                    arg.ty.resolve_kinds(&snapshot);
                }
            }
            for field in ty.input_fields.values_mut() {
                field.ty.resolve_kinds(&snapshot);
            }
        }
        Ok(self.index)
    }

    fn parse(&mut self, notation: &str) -> Option<SchemaTypeRef> {
        match SchemaTypeRef::parse(notation) {
            Ok(ty) => Some(ty),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }
}

/// The catalog schema the operation catalog is written against.
///
/// Fails only if one of the type notations below is malformed.
pub fn reference() -> SdkResult<SchemaIndex> {
    const NO_ARGS: &[(&str, &str)] = &[];
    const ID_ARG: &[(&str, &str)] = &[("id", "ID!")];
    const NAME_ARG: &[(&str, &str)] = &[("name", "String!")];
    const CATEGORY_ID_ARG: &[(&str, &str)] = &[("categoryId", "ID!")];

    SchemaBuilder::new()
        .query_type("Query")
        .mutation_type("Mutation")
        .object(
            "Query",
            &[
                ("categories", "[Category]", NO_ARGS),
                ("category", "Category", ID_ARG),
                ("activeCategories", "[Category]", NO_ARGS),
                ("searchCategories", "[Category]", NAME_ARG),
                ("products", "[Product]", NO_ARGS),
                ("product", "Product", ID_ARG),
                ("productsByCategory", "[Product]", CATEGORY_ID_ARG),
                ("searchProductsByName", "[Product]", NAME_ARG),
                (
                    "searchProductsByCategoryAndName",
                    "[Product]",
                    &[("categoryId", "ID!"), ("name", "String!")],
                ),
            ],
        )
        .object(
            "Mutation",
            &[
                ("createCategory", "Category", &[("input", "CategoryInput!")]),
                (
                    "updateCategory",
                    "Category",
                    &[("id", "ID!"), ("input", "CategoryInput!")],
                ),
                ("deleteCategory", "Boolean", ID_ARG),
                ("createProduct", "Product", &[("input", "ProductInput!")]),
                (
                    "updateProduct",
                    "Product",
                    &[("id", "ID!"), ("input", "ProductInput!")],
                ),
                ("deleteProduct", "Boolean", ID_ARG),
            ],
        )
        .object(
            "Category",
            &[
                ("id", "ID!", NO_ARGS),
                ("name", "String!", NO_ARGS),
                ("validFrom", "String", NO_ARGS),
                ("validTo", "String", NO_ARGS),
                ("products", "[Product]", NO_ARGS),
            ],
        )
        .object(
            "Product",
            &[
                ("id", "ID!", NO_ARGS),
                ("name", "String!", NO_ARGS),
                ("description", "String", NO_ARGS),
                ("categoryId", "ID!", NO_ARGS),
                ("category", "Category", NO_ARGS),
                ("images", "[String]", NO_ARGS),
            ],
        )
        .input(
            "CategoryInput",
            &[
                ("name", "String!"),
                ("validFrom", "String"),
                ("validTo", "String"),
            ],
        )
        .input(
            "ProductInput",
            &[
                ("name", "String!"),
                ("description", "String"),
                ("categoryId", "ID!"),
                ("images", "[String]"),
            ],
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Argument, VariableDefinition};
    use crate::operations;
    use serde_json::json;

    fn named(kind: &str, name: &str) -> serde_json::Value {
        json!({ "kind": kind, "name": name, "ofType": null })
    }

    fn non_null(inner: serde_json::Value) -> serde_json::Value {
        json!({ "kind": "NON_NULL", "name": null, "ofType": inner })
    }

    #[test]
    fn test_parse_type_notation() {
        let ty = SchemaTypeRef::parse("[String!]!").unwrap();
        assert_eq!(ty.to_string(), "[String!]!");
        assert_eq!(ty.named_type(), Some("String"));
        assert!(ty.is_non_null());
        assert!(SchemaTypeRef::parse("[Str ing]").is_err());
        assert!(SchemaTypeRef::parse("").is_err());
    }

    #[test]
    fn test_reference_schema_accepts_catalog() {
        let schema = reference().unwrap();
        let bag = schema.validate_all(operations::ALL);
        let messages: Vec<String> = bag.iter().map(ToString::to_string).collect();
        assert!(bag.is_empty(), "unexpected diagnostics: {:?}", messages);
    }

    #[test]
    fn test_malformed_notation_fails_the_build() {
        let result = SchemaBuilder::new()
            .query_type("Query")
            .object("Query", &[("products", "[Product", &[])])
            .input("ProductInput", &[("name", "String!")])
            .build();
        assert!(result.is_err());

        let result = SchemaBuilder::new()
            .input("ProductInput", &[("images", "[String]]")])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_reference_schema_resolves_kinds() {
        let schema = reference().unwrap();
        let query = schema.get_type("Query").unwrap();
        let categories = &query.fields["categories"];
        assert_eq!(categories.ty.of_type.as_ref().unwrap().kind, TypeKind::Object);
        let name = &schema.get_type("Category").unwrap().fields["name"];
        assert_eq!(name.ty.of_type.as_ref().unwrap().kind, TypeKind::Scalar);
    }

    #[test]
    fn test_from_introspection() {
        let data = json!({
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "fields": [{
                            "name": "category",
                            "args": [{
                                "name": "id",
                                "defaultValue": null,
                                "type": non_null(named("SCALAR", "ID"))
                            }],
                            "type": named("OBJECT", "Category")
                        }],
                        "inputFields": null
                    },
                    {
                        "kind": "OBJECT",
                        "name": "Category",
                        "fields": [
                            { "name": "id", "args": [], "type": non_null(named("SCALAR", "ID")) },
                            { "name": "name", "args": [], "type": non_null(named("SCALAR", "String")) }
                        ],
                        "inputFields": null
                    },
                    { "kind": "SCALAR", "name": "ID", "fields": null, "inputFields": null },
                    { "kind": "SCALAR", "name": "String", "fields": null, "inputFields": null }
                ]
            }
        });

        let schema = SchemaIndex::from_introspection(data).unwrap();
        assert_eq!(schema.root_type(OperationKind::Query), Some("Query"));
        assert_eq!(schema.root_type(OperationKind::Mutation), None);
        assert_eq!(schema.type_count(), 4);

        const GET: OperationDescriptor = OperationDescriptor::query(
            "Get",
            &[VariableDefinition::new("id", TypeRef::ID)],
            Field::object("category", &[Field::leaf("id"), Field::leaf("name")])
                .with_arguments(&[Argument::variable("id")]),
        );
        assert!(schema.validate(&GET).is_empty());

        let bag = schema.validate(&operations::CREATE_CATEGORY);
        assert_eq!(bag.errors().next().unwrap().code, codes::UNKNOWN_TYPE);
    }

    #[test]
    fn test_detects_selection_drift() {
        const DRIFTED: OperationDescriptor = OperationDescriptor::query(
            "Drifted",
            &[VariableDefinition::new("id", TypeRef::STRING)],
            Field::object(
                "category",
                &[
                    Field::object("name", &[Field::leaf("length")]),
                    Field::leaf("products"),
                    Field::leaf("sku"),
                ],
            )
            .with_arguments(&[Argument::variable("id")]),
        );

        let bag = reference().unwrap().validate(&DRIFTED);
        let found: Vec<&str> = bag.iter().map(|d| d.code).collect();
        assert_eq!(
            found,
            vec![
                codes::TYPE_MISMATCH,
                codes::LEAF_SELECTION,
                codes::MISSING_SELECTION,
                codes::UNKNOWN_FIELD,
            ]
        );
        assert_eq!(
            bag.iter().last().unwrap().primary_path(),
            Some("Drifted.category.sku")
        );
    }

    #[test]
    fn test_detects_variable_problems() {
        const BROKEN: OperationDescriptor = OperationDescriptor::mutation(
            "Broken",
            &[
                VariableDefinition::new("unused", TypeRef::ID),
                VariableDefinition::new("id", TypeRef::ID),
            ],
            Field::leaf("updateCategory").with_arguments(&[
                Argument::variable("id"),
                Argument::variable("input"),
                Argument::bound("force", "id"),
            ]),
        );

        let bag = reference().unwrap().validate(&BROKEN);
        let found: Vec<&str> = bag.iter().map(|d| d.code).collect();
        assert_eq!(
            found,
            vec![
                codes::UNDECLARED_VARIABLE,
                codes::UNKNOWN_ARGUMENT,
                codes::MISSING_SELECTION,
                codes::UNUSED_VARIABLE,
            ]
        );
    }

    #[test]
    fn test_missing_required_argument() {
        const NO_ID: OperationDescriptor = OperationDescriptor::query(
            "NoId",
            &[],
            Field::object("product", &[Field::leaf("id")]),
        );
        let bag = reference().unwrap().validate(&NO_ID);
        assert_eq!(bag.error_count(), 1);
        assert_eq!(bag.errors().next().unwrap().code, codes::MISSING_ARGUMENT);
    }

    #[test]
    fn test_non_null_variable_fits_nullable_argument() {
        let nullable = SchemaTypeRef::parse("String").unwrap();
        assert!(is_assignable(&TypeRef::STRING, &nullable));
        assert!(!is_assignable(
            &TypeRef::Named("String"),
            &SchemaTypeRef::parse("String!").unwrap()
        ));
    }
}
