use std::sync::Arc;

pub type InternalEnumRef = Arc<InternalEnum>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalEnum {
    pub name: String,
    pub values: Vec<String>,
}

impl InternalEnum {
    pub fn new<N, V>(name: N, values: V) -> Self
    where
        N: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        InternalEnum {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}
