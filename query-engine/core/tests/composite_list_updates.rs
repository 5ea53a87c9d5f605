use expect_test::expect;
use indexmap::IndexMap;
use memory_query_connector::MemoryConnector;
use pretty_assertions::assert_eq;
use query_core::{Action, CoreError, JsonSingleQuery, QueryEngine, QueryPath, WriteArgsParser};
use query_structure::{
    CompositeTypeBuilder, FieldArity, InternalDataModelBuilder, InternalDataModelRef, ModelBuilder, ScalarFieldBuilder,
    TypeIdentifier,
};
use serde_json::{json, Value};

fn datamodel() -> InternalDataModelRef {
    InternalDataModelBuilder::new()
        .model(
            ModelBuilder::new("CommentRequiredList")
                .field(ScalarFieldBuilder::new("id", TypeIdentifier::String, FieldArity::Required).id())
                .scalar("country", TypeIdentifier::String, FieldArity::Optional)
                .composite("contents", FieldArity::List, "CommentContent"),
        )
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
        .build()
        .unwrap()
}

fn engine() -> QueryEngine<MemoryConnector> {
    QueryEngine::new(datamodel(), MemoryConnector::new())
}

fn arguments(value: Value) -> IndexMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

async fn run(engine: &QueryEngine<MemoryConnector>, action: Action, args: Value) -> Result<Value, CoreError> {
    engine
        .execute(JsonSingleQuery::new("CommentRequiredList", action, arguments(args)))
        .await
}

async fn create_comment(engine: &QueryEngine<MemoryConnector>, data: Value) {
    run(engine, Action::CreateOne, json!({ "data": data })).await.unwrap();
}

async fn update_many(engine: &QueryEngine<MemoryConnector>, args: Value) -> Result<Value, CoreError> {
    run(engine, Action::UpdateMany, args).await
}

async fn find_many(engine: &QueryEngine<MemoryConnector>, filter: Value) -> Value {
    run(engine, Action::FindMany, json!({ "where": filter })).await.unwrap()
}

async fn update_error(engine: &QueryEngine<MemoryConnector>, data: Value) -> String {
    let err = update_many(engine, json!({ "where": {}, "data": data })).await.unwrap_err();
    user_facing_errors::Error::from(err).message().to_owned()
}

async fn seeded_engine() -> QueryEngine<MemoryConnector> {
    let engine = engine();

    create_comment(
        &engine,
        json!({
            "id": "1",
            "contents": [
                { "text": "hello", "upvotes": [{ "vote": true, "userId": "10" }] },
                { "text": "world" }
            ]
        }),
    )
    .await;

    engine
}

#[tokio::test]
async fn set_null_on_a_list_is_rejected() {
    let engine = seeded_engine().await;

    expect!["Argument set for data.contents.set must not be null"]
        .assert_eq(&update_error(&engine, json!({ "contents": { "set": null } })).await);
}

#[tokio::test]
async fn shorthand_null_on_a_list_is_rejected() {
    let engine = seeded_engine().await;

    expect!["Argument contents for data.contents must not be null"]
        .assert_eq(&update_error(&engine, json!({ "contents": null })).await);
}

#[tokio::test]
async fn unset_on_a_list_is_rejected() {
    let engine = seeded_engine().await;

    expect!["Unknown arg `unset` in data.contents.unset for type CommentContentListUpdateEnvelopeInput"]
        .assert_eq(&update_error(&engine, json!({ "contents": { "unset": true } })).await);
}

#[tokio::test]
async fn upsert_on_a_list_is_rejected() {
    let engine = seeded_engine().await;

    let message = update_error(
        &engine,
        json!({ "contents": { "upsert": { "set": { "text": "a" }, "update": { "text": "b" } } } }),
    )
    .await;

    expect!["Unknown arg `upsert` in data.contents.upsert for type CommentContentListUpdateEnvelopeInput"]
        .assert_eq(&message);
}

#[tokio::test]
async fn failed_validation_leaves_records_untouched() {
    let engine = seeded_engine().await;
    let before = find_many(&engine, json!({})).await;

    let message = update_error(
        &engine,
        json!({ "country": "France", "contents": { "push": [{ "text": "ok" }, { "txt": "typo" }] } }),
    )
    .await;

    expect!["`data.contents.push.txt`: Field does not exist in enclosing type."].assert_eq(&message);
    assert_eq!(find_many(&engine, json!({})).await, before);
}

#[tokio::test]
async fn an_empty_push_still_counts_matched_records() {
    let engine = seeded_engine().await;

    let matched = update_many(&engine, json!({ "where": { "id": "1" }, "data": { "contents": { "push": [] } } }))
        .await
        .unwrap();

    let unmatched = update_many(&engine, json!({ "where": { "id": "2" }, "data": { "contents": { "push": [] } } }))
        .await
        .unwrap();

    assert_eq!(matched, json!({ "count": 1 }));
    assert_eq!(unmatched, json!({ "count": 0 }));
}

#[tokio::test]
async fn push_appends_single_elements_and_lists() {
    let engine = seeded_engine().await;

    update_many(&engine, json!({ "data": { "contents": { "push": { "text": "third" } } } }))
        .await
        .unwrap();

    update_many(
        &engine,
        json!({ "data": { "contents": { "push": [{ "text": "fourth" }, { "text": "fifth" }] } } }),
    )
    .await
    .unwrap();

    let texts: Vec<String> = find_many(&engine, json!({})).await[0]["contents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|content| content["text"].as_str().unwrap().to_owned())
        .collect();

    assert_eq!(texts, vec!["hello", "world", "third", "fourth", "fifth"]);
}

#[test]
fn shorthand_forms_translate_like_explicit_set() {
    let dm = datamodel();
    let model = dm.find_model("CommentRequiredList").unwrap();
    let path = QueryPath::new("data");

    let translate = |data: Value| {
        let map = data.as_object().unwrap().clone();
        WriteArgsParser::from(&model, &map, &path).unwrap().args
    };

    let content = json!({ "text": "hi", "upvotes": [{ "vote": true, "userId": "1" }] });

    assert_eq!(
        translate(json!({ "contents": [content.clone()] })),
        translate(json!({ "contents": { "set": [content.clone()] } }))
    );

    assert_eq!(
        translate(json!({ "contents": content.clone() })),
        translate(json!({ "contents": { "set": [content] } }))
    );

    assert_eq!(
        translate(json!({ "contents": { "text": "X", "upvotes": { "vote": true, "userId": "1" } } })),
        translate(json!({ "contents": { "set": [{ "text": "X", "upvotes": [{ "vote": true, "userId": "1" }] }] } }))
    );
}

#[tokio::test]
async fn set_with_a_single_object_replaces_the_list() {
    let engine = seeded_engine().await;

    let result = update_many(
        &engine,
        json!({
            "where": { "id": "1" },
            "data": {
                "contents": {
                    "set": {
                        "text": "Goodbye",
                        "upvotes": [{ "vote": true, "userId": "1" }, { "vote": false, "userId": "2" }]
                    }
                }
            }
        }),
    )
    .await
    .unwrap();

    assert_eq!(result, json!({ "count": 1 }));
    assert_eq!(
        find_many(&engine, json!({})).await[0]["contents"],
        json!([{
            "text": "Goodbye",
            "upvotes": [{ "vote": true, "userId": "1" }, { "vote": false, "userId": "2" }]
        }])
    );
}

#[tokio::test]
async fn shorthand_set_replaces_the_list() {
    let engine = seeded_engine().await;

    let result = update_many(&engine, json!({ "data": { "contents": { "text": "only" } } }))
        .await
        .unwrap();

    assert_eq!(result, json!({ "count": 1 }));
    assert_eq!(
        find_many(&engine, json!({})).await,
        json!([{ "id": "1", "contents": [{ "text": "only", "upvotes": [] }] }])
    );
}

#[tokio::test]
async fn delete_many_removes_matching_elements() {
    let engine = seeded_engine().await;

    let result = update_many(
        &engine,
        json!({ "data": { "contents": { "deleteMany": { "where": { "upvotes": { "isEmpty": false } } } } } }),
    )
    .await
    .unwrap();

    assert_eq!(result, json!({ "count": 1 }));
    assert_eq!(
        find_many(&engine, json!({})).await,
        json!([{ "id": "1", "contents": [{ "text": "world", "upvotes": [] }] }])
    );
}

#[tokio::test]
async fn update_many_updates_matching_elements() {
    let engine = seeded_engine().await;

    update_many(
        &engine,
        json!({
            "data": {
                "contents": {
                    "updateMany": {
                        "where": { "text": { "startsWith": "wor" } },
                        "data": { "text": "everyone", "upvotes": { "push": { "vote": false, "userId": "20" } } }
                    }
                }
            }
        }),
    )
    .await
    .unwrap();

    assert_eq!(
        find_many(&engine, json!({})).await[0]["contents"],
        json!([
            { "text": "hello", "upvotes": [{ "vote": true, "userId": "10" }] },
            { "text": "everyone", "upvotes": [{ "vote": false, "userId": "20" }] }
        ])
    );
}

#[tokio::test]
async fn multiple_envelope_operations_are_rejected() {
    let engine = seeded_engine().await;

    let message = update_error(&engine, json!({ "contents": { "set": [], "push": [] } })).await;

    assert!(message.contains("Expected exactly one field to be present, got 2."), "{message}");
}

#[tokio::test]
async fn set_null_is_rejected_before_the_envelope_arity() {
    let engine = seeded_engine().await;

    expect!["Argument set for data.contents.set must not be null"]
        .assert_eq(&update_error(&engine, json!({ "contents": { "set": null, "push": [] } })).await);
}

#[tokio::test]
async fn is_empty_filters_select_records_by_list_emptiness() {
    let engine = seeded_engine().await;
    create_comment(&engine, json!({ "id": "2" })).await;

    let ids = |records: Value| -> Vec<String> {
        records
            .as_array()
            .unwrap()
            .iter()
            .map(|record| record["id"].as_str().unwrap().to_owned())
            .collect()
    };

    assert_eq!(ids(find_many(&engine, json!({ "contents": { "isEmpty": true } })).await), vec!["2"]);
    assert_eq!(ids(find_many(&engine, json!({ "contents": { "isEmpty": false } })).await), vec!["1"]);
    assert_eq!(
        ids(find_many(&engine, json!({ "contents": { "some": { "upvotes": { "isEmpty": false } } } })).await),
        vec!["1"]
    );
}
