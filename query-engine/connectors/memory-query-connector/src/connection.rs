use crate::{
    document::{self, Document},
    filter::{matches, values_equal},
    update::apply_write,
    MemoryError,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use prisma_value::PrismaValue;
use query_connector::{Connection, ReadOperations, Record, WriteOperations};
use query_structure::{Field, Filter, Model, WriteArgs, WriteOperation};
use std::{collections::HashMap, sync::Arc};

/// Records per model name, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Store {
    collections: HashMap<String, Vec<Document>>,
}

pub struct MemoryConnection {
    store: Arc<RwLock<Store>>,
}

impl MemoryConnection {
    pub(crate) fn new(store: Arc<RwLock<Store>>) -> Self {
        Self { store }
    }
}

impl Connection for MemoryConnection {}

#[async_trait]
impl ReadOperations for MemoryConnection {
    #[tracing::instrument(skip(self, model, filter), fields(model = %model.name))]
    async fn get_many_records(&mut self, model: &Model, filter: &Filter) -> query_connector::Result<Vec<Record>> {
        let store = self.store.read();

        let records: Vec<Record> = store
            .collections
            .get(&model.name)
            .into_iter()
            .flatten()
            .filter(|doc| matches(filter, doc))
            .map(|doc| PrismaValue::Object(doc.clone()))
            .collect();

        tracing::debug!(count = records.len(), "read records");

        Ok(records)
    }
}

#[async_trait]
impl WriteOperations for MemoryConnection {
    #[tracing::instrument(skip(self, model, args), fields(model = %model.name))]
    async fn create_record(&mut self, model: &Model, args: WriteArgs) -> query_connector::Result<Record> {
        let writes = resolve_fields(model, args)?;
        let mut doc = Document::new();

        for (field, op) in writes {
            apply_write(&mut doc, &field, op)?;
        }

        let mut store = self.store.write();
        let collection = store.collections.entry(model.name.clone()).or_default();

        if let Some(id) = model.fields().id() {
            if let Some(id_value) = document::get(&doc, &id.name) {
                let duplicate = collection
                    .iter()
                    .any(|existing| document::get(existing, &id.name).is_some_and(|v| values_equal(v, id_value)));

                if duplicate {
                    return Err(MemoryError::UniqueConstraintViolation(format!("fields: (`{}`)", id.name)).into());
                }
            }
        }

        tracing::debug!("created record");
        collection.push(doc.clone());

        Ok(PrismaValue::Object(doc))
    }

    #[tracing::instrument(skip(self, model, filter, args), fields(model = %model.name))]
    async fn update_records(&mut self, model: &Model, filter: Filter, args: WriteArgs) -> query_connector::Result<usize> {
        let writes = resolve_fields(model, args)?;
        let mut store = self.store.write();
        let Some(collection) = store.collections.get_mut(&model.name) else {
            return Ok(0);
        };

        // Updates are computed on copies first so that a failing operation leaves the store untouched.
        let mut updated = Vec::new();

        for (idx, doc) in collection.iter().enumerate() {
            if !matches(&filter, doc) {
                continue;
            }

            let mut doc = doc.clone();

            for (field, op) in writes.iter() {
                apply_write(&mut doc, field, op.clone())?;
            }

            updated.push((idx, doc));
        }

        let count = updated.len();

        for (idx, doc) in updated {
            collection[idx] = doc;
        }

        tracing::debug!(count, "updated records");

        Ok(count)
    }
}

/// Orders the writes by the model's field declaration order, so created records are laid out like
/// the model regardless of the input order.
fn resolve_fields(model: &Model, mut args: WriteArgs) -> crate::Result<Vec<(Field, WriteOperation)>> {
    for name in args.keys() {
        model.fields().find_from_all(name)?;
    }

    Ok(model
        .fields()
        .all
        .iter()
        .filter_map(|field| args.take_field_value(field.name()).map(|op| (field.clone(), op)))
        .collect())
}

#[cfg(test)]
mod tests {
    use crate::MemoryConnector;
    use pretty_assertions::assert_eq;
    use prisma_value::PrismaValue;
    use query_connector::{Connector, ReadOperations, WriteOperations};
    use query_structure::*;

    fn datamodel() -> InternalDataModelRef {
        InternalDataModelBuilder::new()
            .composite_type(
                CompositeTypeBuilder::new("CommentContent")
                    .scalar("text", TypeIdentifier::String, FieldArity::Required)
                    .composite("upvotes", FieldArity::List, "CommentContentUpvotes"),
            )
            .composite_type(
                CompositeTypeBuilder::new("CommentContentUpvotes")
                    .scalar("vote", TypeIdentifier::Boolean, FieldArity::Required)
                    .scalar("userId", TypeIdentifier::String, FieldArity::Required),
            )
            .model(
                ModelBuilder::new("CommentRequiredList")
                    .field(ScalarFieldBuilder::new("id", TypeIdentifier::String, FieldArity::Required).id())
                    .scalar("country", TypeIdentifier::String, FieldArity::Optional)
                    .composite("contents", FieldArity::List, "CommentContent"),
            )
            .build()
            .unwrap()
    }

    fn content(text: &str, upvotes: Vec<PrismaValue>) -> PrismaValue {
        PrismaValue::Object(vec![
            ("text".to_owned(), text.into()),
            ("upvotes".to_owned(), PrismaValue::List(upvotes)),
        ])
    }

    fn upvote(vote: bool, user_id: &str) -> PrismaValue {
        PrismaValue::Object(vec![
            ("vote".to_owned(), vote.into()),
            ("userId".to_owned(), user_id.into()),
        ])
    }

    fn create_args(id: &str, contents: Vec<PrismaValue>) -> WriteArgs {
        let mut args = WriteArgs::new();
        args.insert("contents", WriteOperation::composite_set(PrismaValue::List(contents)));
        args.insert("id", WriteOperation::scalar_set(id.into()));
        args
    }

    #[tokio::test]
    async fn created_records_follow_model_field_order() {
        let dm = datamodel();
        let model = dm.find_model("CommentRequiredList").unwrap();
        let mut conn = MemoryConnector::new().get_connection().await.unwrap();

        let record = conn.create_record(&model, create_args("1", vec![])).await.unwrap();
        let keys: Vec<_> = record.as_object().unwrap().iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(keys, vec!["id", "contents"]);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let dm = datamodel();
        let model = dm.find_model("CommentRequiredList").unwrap();
        let mut conn = MemoryConnector::new().get_connection().await.unwrap();

        conn.create_record(&model, create_args("1", vec![])).await.unwrap();
        let err = conn.create_record(&model, create_args("1", vec![])).await.unwrap_err();

        assert_eq!(err.user_facing_error.unwrap().error_code, "P2002");
    }

    #[tokio::test]
    async fn delete_many_removes_matching_elements_only() {
        let dm = datamodel();
        let model = dm.find_model("CommentRequiredList").unwrap();
        let contents = model.fields().find_from_composite("contents").unwrap();
        let upvotes = contents.typ().find_field("upvotes").unwrap().clone().into_composite().unwrap();
        let mut conn = MemoryConnector::new().get_connection().await.unwrap();

        conn.create_record(
            &model,
            create_args(
                "1",
                vec![content("a", vec![upvote(true, "10")]), content("b", vec![])],
            ),
        )
        .await
        .unwrap();

        let mut args = WriteArgs::new();
        args.insert("contents", WriteOperation::composite_delete_many(upvotes.is_empty(false)));

        let count = conn.update_records(&model, Filter::empty(), args).await.unwrap();
        let records = conn.get_many_records(&model, &Filter::empty()).await.unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            records[0].get_field("contents"),
            Some(&PrismaValue::List(vec![content("b", vec![])]))
        );
    }

    #[tokio::test]
    async fn update_many_changes_matching_elements() {
        let dm = datamodel();
        let model = dm.find_model("CommentRequiredList").unwrap();
        let contents = model.fields().find_from_composite("contents").unwrap();
        let text = contents.typ().find_field("text").unwrap().clone().into_scalar().unwrap();
        let mut conn = MemoryConnector::new().get_connection().await.unwrap();

        conn.create_record(&model, create_args("1", vec![content("a", vec![]), content("b", vec![])]))
            .await
            .unwrap();

        let update = CompositeWriteOperation::Update(NestedWrite::new(vec![(
            "text".to_owned(),
            WriteOperation::scalar_set("z".into()),
        )]));

        let mut args = WriteArgs::new();
        args.insert("contents", WriteOperation::composite_update_many(text.equals("b"), update));

        conn.update_records(&model, Filter::empty(), args).await.unwrap();
        let records = conn.get_many_records(&model, &Filter::empty()).await.unwrap();

        assert_eq!(
            records[0].get_field("contents"),
            Some(&PrismaValue::List(vec![content("a", vec![]), content("z", vec![])]))
        );
    }

    #[tokio::test]
    async fn update_count_reports_matched_records() {
        let dm = datamodel();
        let model = dm.find_model("CommentRequiredList").unwrap();
        let id = model.primary_identifier().unwrap();
        let mut conn = MemoryConnector::new().get_connection().await.unwrap();

        conn.create_record(&model, create_args("1", vec![])).await.unwrap();

        let mut args = WriteArgs::new();
        args.insert("contents", WriteOperation::composite_push(PrismaValue::List(vec![])));

        let matched = conn.update_records(&model, id.equals("1"), args.clone()).await.unwrap();
        let missed = conn.update_records(&model, id.equals("2"), args).await.unwrap();

        assert_eq!((matched, missed), (1, 0));
    }
}
