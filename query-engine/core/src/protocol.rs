//! The JSON request protocol:
//!
//! ```json
//! {
//!   "modelName": "CommentRequiredList",
//!   "action": "updateMany",
//!   "query": { "arguments": { "where": {}, "data": { "contents": { "push": [] } } } }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSingleQuery {
    pub model_name: String,
    pub action: Action,
    pub query: FieldQuery,
}

impl JsonSingleQuery {
    pub fn new(model_name: impl Into<String>, action: Action, arguments: IndexMap<String, serde_json::Value>) -> Self {
        Self {
            model_name: model_name.into(),
            action,
            query: FieldQuery {
                arguments: Some(arguments),
            },
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn model(&self) -> &str {
        &self.model_name
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FieldQuery {
    pub arguments: Option<IndexMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    CreateOne,
    UpdateMany,
    FindMany,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CreateOne => f.write_str("createOne"),
            Action::UpdateMany => f.write_str("updateMany"),
            Action::FindMany => f.write_str("findMany"),
        }
    }
}

impl FromStr for Action {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createOne" => Ok(Action::CreateOne),
            "updateMany" => Ok(Action::UpdateMany),
            "findMany" => Ok(Action::FindMany),
            other => Err(crate::CoreError::RequestError(format!("Unknown action `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requests_deserialize_from_json() {
        let query: JsonSingleQuery = serde_json::from_value(json!({
            "modelName": "CommentRequiredList",
            "action": "updateMany",
            "query": { "arguments": { "where": {}, "data": { "contents": { "push": [] } } } }
        }))
        .unwrap();

        assert_eq!(query.model(), "CommentRequiredList");
        assert_eq!(query.action(), Action::UpdateMany);

        let arguments = query.query.arguments.unwrap();
        assert_eq!(arguments.keys().collect::<Vec<_>>(), vec!["where", "data"]);
    }

    #[test]
    fn unknown_actions_are_rejected() {
        let err = "deleteMany".parse::<Action>().unwrap_err();

        assert_eq!(err.to_string(), "Invalid request: Unknown action `deleteMany`");
        assert!(serde_json::from_value::<Action>(json!("upsertOne")).is_err());
    }
}
