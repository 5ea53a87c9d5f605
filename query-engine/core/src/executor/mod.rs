//! Request execution. Every argument of a request is parsed and validated before the connector is
//! called: a request either fails validation as a whole or reaches the connector as a whole.

use crate::{
    constants::args,
    query_document::{conversions, JsonMap, QueryParserResult, QueryPath},
    query_graph_builder::{extract_filter, WriteArgsParser},
    Action, CoreError, CoreResult, JsonSingleQuery,
};
use indexmap::IndexMap;
use query_connector::{Connector, Record};
use query_structure::{Filter, InternalDataModelRef, ModelRef, ParentContainer};
use serde_json::{json, Value};
use std::borrow::Cow;
use tracing_futures::Instrument;
use user_facing_errors::query_engine::validation::{ArgumentDescription, InputTypeDescription, ValidationError};

pub struct QueryEngine<C> {
    datamodel: InternalDataModelRef,
    connector: C,
}

impl<C> QueryEngine<C>
where
    C: Connector + Send + Sync,
{
    pub fn new(datamodel: InternalDataModelRef, connector: C) -> Self {
        Self { datamodel, connector }
    }

    pub fn datamodel(&self) -> &InternalDataModelRef {
        &self.datamodel
    }

    /// Executes a single JSON protocol request and renders its result.
    pub async fn execute(&self, query: JsonSingleQuery) -> CoreResult<Value> {
        let model = self.datamodel.find_model(query.model())?;
        let action = query.action();
        let arguments = query.query.arguments.unwrap_or_default();

        let span = tracing::info_span!("execute", model = %model.name, action = %action, connector = self.connector.name());

        self.execute_action(action, &model, arguments).instrument(span).await
    }

    async fn execute_action(&self, action: Action, model: &ModelRef, arguments: IndexMap<String, Value>) -> CoreResult<Value> {
        match action {
            Action::CreateOne => Ok(serde_json::to_value(self.create_one(model, arguments).await?)?),
            Action::UpdateMany => {
                let count = self.update_many(model, arguments).await?;
                Ok(json!({ "count": count }))
            }
            Action::FindMany => Ok(serde_json::to_value(self.find_many(model, arguments).await?)?),
        }
    }

    pub async fn create_one(&self, model: &ModelRef, arguments: IndexMap<String, Value>) -> CoreResult<Record> {
        let enclosing_type = format!("{}{}", Action::CreateOne, model.name);
        check_arguments(&arguments, &[args::DATA], &enclosing_type)?;

        let data = required_object_argument(&arguments, args::DATA, &enclosing_type)?;
        let write_args = WriteArgsParser::from_create(model, data, &QueryPath::new(args::DATA))?.args;

        let mut conn = self.connector.get_connection().await?;
        let record = conn.create_record(model, write_args).await?;

        Ok(record)
    }

    /// Validates and executes an `updateMany`. Returns the number of matched records.
    pub async fn update_many(&self, model: &ModelRef, arguments: IndexMap<String, Value>) -> CoreResult<usize> {
        let enclosing_type = format!("{}{}", Action::UpdateMany, model.name);
        check_arguments(&arguments, &[args::WHERE, args::DATA], &enclosing_type)?;

        let filter = where_argument(model, &arguments)?;
        let data = required_object_argument(&arguments, args::DATA, &enclosing_type)?;
        let write_args = WriteArgsParser::from(model, data, &QueryPath::new(args::DATA))?.args;

        let mut conn = self.connector.get_connection().await?;
        let count = conn.update_records(model, filter, write_args).await?;

        tracing::debug!(count, "updated records");

        Ok(count)
    }

    pub async fn find_many(&self, model: &ModelRef, arguments: IndexMap<String, Value>) -> CoreResult<Vec<Record>> {
        let enclosing_type = format!("{}{}", Action::FindMany, model.name);
        check_arguments(&arguments, &[args::WHERE], &enclosing_type)?;

        let filter = where_argument(model, &arguments)?;

        let mut conn = self.connector.get_connection().await?;
        let records = conn.get_many_records(model, &filter).await?;

        Ok(records)
    }
}

fn check_arguments(arguments: &IndexMap<String, Value>, known: &[&str], enclosing_type: &str) -> QueryParserResult<()> {
    match arguments.keys().find(|key| !known.contains(&key.as_str())) {
        Some(unknown) => {
            let descriptions = known
                .iter()
                .map(|arg| ArgumentDescription::new(*arg, vec![Cow::Borrowed("Object")]))
                .collect();

            Err(ValidationError::unknown_argument(vec![unknown.as_str()], enclosing_type, descriptions).into())
        }
        None => Ok(()),
    }
}

fn required_object_argument<'a>(
    arguments: &'a IndexMap<String, Value>,
    name: &str,
    enclosing_type: &str,
) -> QueryParserResult<&'a JsonMap> {
    match arguments.get(name) {
        Some(value) => expect_object(value, name),
        None => Err(ValidationError::required_argument_missing(
            vec![name],
            &InputTypeDescription::new_object(enclosing_type.to_owned(), Vec::new()),
        )
        .into()),
    }
}

/// A missing or `null` `where` matches every record.
fn where_argument(model: &ModelRef, arguments: &IndexMap<String, Value>) -> Result<Filter, CoreError> {
    match arguments.get(args::WHERE) {
        None | Some(Value::Null) => Ok(Filter::empty()),
        Some(value) => {
            let map = expect_object(value, args::WHERE)?;
            let filter = extract_filter(map, &ParentContainer::Model(model.clone()), &QueryPath::new(args::WHERE))?;

            Ok(filter)
        }
    }
}

fn expect_object<'a>(value: &'a Value, name: &str) -> QueryParserResult<&'a JsonMap> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::invalid_argument_type(
            vec![name],
            ArgumentDescription::new(name.to_owned(), vec![Cow::Borrowed("Object")]),
            conversions::inferred_type_name(other),
        )
        .into()),
    }
}
