use query_structure::{CompositeTypeRef, FieldArity, ScalarFieldRef};

/// Names of the input types a client sees. Validation errors refer to them, so the names must
/// stay stable.
#[derive(PartialEq, Debug, Clone)]
pub enum IdentifierType {
    CompositeCreateEnvelopeInput(CompositeTypeRef, FieldArity),
    CompositeCreateInput(CompositeTypeRef),
    CompositeDeleteManyInput(CompositeTypeRef),
    CompositeUpdateEnvelopeInput(CompositeTypeRef, FieldArity),
    CompositeUpdateInput(CompositeTypeRef),
    CompositeUpdateManyInput(CompositeTypeRef),
    CompositeUpsertObjectInput(CompositeTypeRef),
    CreateOneInput(String),
    FieldUpdateOperationsInput(bool, String),
    ScalarListUpdateInput(String, ScalarFieldRef),
    ToManyCompositeFilterInput(CompositeTypeRef),
    ToOneCompositeFilterInput(CompositeTypeRef, FieldArity),
    UpdateManyInput(String),
    WhereInput(String),
    Raw(String),
}

fn arity_part(field_arity: &FieldArity) -> &'static str {
    if field_arity.is_optional() {
        "Nullable"
    } else if field_arity.is_list() {
        "List"
    } else {
        ""
    }
}

impl std::fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierType::CompositeCreateEnvelopeInput(ct, field_arity) => {
                write!(f, "{}{}CreateEnvelopeInput", ct.name, arity_part(field_arity))
            }
            IdentifierType::CompositeCreateInput(ct) => write!(f, "{}CreateInput", ct.name),
            IdentifierType::CompositeDeleteManyInput(ct) => write!(f, "{}DeleteManyInput", ct.name),
            IdentifierType::CompositeUpdateEnvelopeInput(ct, field_arity) => {
                write!(f, "{}{}UpdateEnvelopeInput", ct.name, arity_part(field_arity))
            }
            IdentifierType::CompositeUpdateInput(ct) => write!(f, "{}UpdateInput", ct.name),
            IdentifierType::CompositeUpdateManyInput(ct) => write!(f, "{}UpdateManyInput", ct.name),
            IdentifierType::CompositeUpsertObjectInput(ct) => write!(f, "{}UpsertInput", ct.name),
            IdentifierType::CreateOneInput(model) => write!(f, "{model}CreateInput"),
            IdentifierType::FieldUpdateOperationsInput(nullable, prefix) => {
                // "Nullable" affects the `set` operation (`set` is nullable)
                let nullable = if *nullable { "Nullable" } else { "" };

                write!(f, "{nullable}{prefix}FieldUpdateOperationsInput")
            }
            IdentifierType::ScalarListUpdateInput(container, sf) => {
                write!(f, "{}Update{}Input", container, sf.name)
            }
            IdentifierType::ToManyCompositeFilterInput(ct) => write!(f, "{}CompositeListFilter", ct.name),
            IdentifierType::ToOneCompositeFilterInput(ct, field_arity) => {
                let nullable = if field_arity.is_optional() { "Nullable" } else { "" };

                write!(f, "{}{}CompositeFilter", ct.name, nullable)
            }
            IdentifierType::UpdateManyInput(model) => write!(f, "{model}UpdateManyMutationInput"),
            IdentifierType::WhereInput(container) => write!(f, "{container}WhereInput"),
            IdentifierType::Raw(s) => f.write_str(s),
        }
    }
}
