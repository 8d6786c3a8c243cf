//! Turns requests into engine calls and shapes the results.
//!
//! Selections are checked against the entity schema before the engine is
//! touched, so a bad selection never leaves a mutation half-reported.
//! Relationship fields are resolved on demand through
//! [`RelationResolver`], against the store as it stands after the
//! operation. A deleted post therefore reports no comments, and a deleted
//! user reports no posts.

use scribe_engine::{RelationResolver, SharedStore};
use scribe_store::EntityStore;
use scribe_types::{Comment, EntityKind, Post, User};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::{DispatchError, DispatchResult};
use crate::request::{Field, Request};

// -----------------------------------------------------------------------
// Schema
// -----------------------------------------------------------------------

/// What a field name refers to on a given entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Scalar,
    Relation(EntityKind),
}

const USER_SCALARS: &[&str] = &["id", "name", "email", "age"];
const POST_SCALARS: &[&str] = &["id", "title", "body", "published"];
const COMMENT_SCALARS: &[&str] = &["id", "text"];

const fn scalar_fields(entity: EntityKind) -> &'static [&'static str] {
    match entity {
        EntityKind::User => USER_SCALARS,
        EntityKind::Post => POST_SCALARS,
        EntityKind::Comment => COMMENT_SCALARS,
    }
}

fn field_kind(entity: EntityKind, name: &str) -> Option<FieldKind> {
    if scalar_fields(entity).contains(&name) {
        return Some(FieldKind::Scalar);
    }
    let target = match (entity, name) {
        (EntityKind::User, "posts") => EntityKind::Post,
        (EntityKind::User | EntityKind::Post, "comments") => EntityKind::Comment,
        (EntityKind::Post | EntityKind::Comment, "author") => EntityKind::User,
        (EntityKind::Comment, "post") => EntityKind::Post,
        _ => return None,
    };
    Some(FieldKind::Relation(target))
}

/// Flatten a selection into `(name, sub-selection)` pairs. An empty
/// selection expands to every scalar field of `entity`.
fn slots(entity: EntityKind, fields: &[Field]) -> Vec<(&str, Option<&[Field]>)> {
    if fields.is_empty() {
        return scalar_fields(entity)
            .iter()
            .map(|name| (*name, None))
            .collect();
    }
    fields
        .iter()
        .flat_map(|field| match field {
            Field::Scalar(name) => vec![(name.as_str(), None)],
            Field::Nested(relations) => relations
                .iter()
                .map(|(name, sub)| (name.as_str(), Some(sub.as_slice())))
                .collect(),
        })
        .collect()
}

/// Check `fields` against the schema of `entity`, recursively.
///
/// # Errors
///
/// Returns [`DispatchError::UnknownField`] for a name the entity does not
/// have, or [`DispatchError::NotARelation`] for a sub-selection on a scalar.
pub fn validate(entity: EntityKind, fields: &[Field]) -> DispatchResult<()> {
    for (name, sub) in slots(entity, fields) {
        match (field_kind(entity, name), sub) {
            (None, _) => {
                return Err(DispatchError::UnknownField {
                    entity,
                    field: name.to_owned(),
                });
            }
            (Some(FieldKind::Scalar), Some(_)) => {
                return Err(DispatchError::NotARelation {
                    entity,
                    field: name.to_owned(),
                });
            }
            (Some(FieldKind::Relation(target)), Some(sub)) => validate(target, sub)?,
            (Some(_), None) => {}
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------
// Materialization
// -----------------------------------------------------------------------

/// A borrowed entity of any kind.
#[derive(Debug, Clone, Copy)]
enum Node<'s> {
    User(&'s User),
    Post(&'s Post),
    Comment(&'s Comment),
}

impl Node<'_> {
    const fn kind(self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Post(_) => EntityKind::Post,
            Self::Comment(_) => EntityKind::Comment,
        }
    }
}

/// Build the JSON object for `node`, following relations as selected.
fn materialize(store: &EntityStore, node: Node<'_>, fields: &[Field]) -> DispatchResult<Value> {
    let mut out = Map::new();
    for (name, sub) in slots(node.kind(), fields) {
        let sub = sub.unwrap_or_default();
        let value = match (node, name) {
            (Node::User(user), "id") => json!(user.id),
            (Node::User(user), "name") => json!(user.name),
            (Node::User(user), "email") => json!(user.email),
            (Node::User(user), "age") => json!(user.age),
            (Node::User(user), "posts") => {
                many(store, store.posts_of(user).into_iter().map(Node::Post), sub)?
            }
            (Node::User(user), "comments") => many(
                store,
                store.comments_of_user(user).into_iter().map(Node::Comment),
                sub,
            )?,
            (Node::Post(post), "id") => json!(post.id),
            (Node::Post(post), "title") => json!(post.title),
            (Node::Post(post), "body") => json!(post.body),
            (Node::Post(post), "published") => json!(post.published),
            (Node::Post(post), "author") => {
                materialize(store, Node::User(store.author_of(post)?), sub)?
            }
            (Node::Post(post), "comments") => many(
                store,
                store.comments_of_post(post).into_iter().map(Node::Comment),
                sub,
            )?,
            (Node::Comment(comment), "id") => json!(comment.id),
            (Node::Comment(comment), "text") => json!(comment.text),
            (Node::Comment(comment), "author") => {
                materialize(store, Node::User(store.author_of(comment)?), sub)?
            }
            (Node::Comment(comment), "post") => {
                materialize(store, Node::Post(store.post_of(comment)?), sub)?
            }
            (node, field) => {
                return Err(DispatchError::UnknownField {
                    entity: node.kind(),
                    field: field.to_owned(),
                });
            }
        };
        out.insert(name.to_owned(), value);
    }
    Ok(Value::Object(out))
}

fn many<'s>(
    store: &EntityStore,
    nodes: impl Iterator<Item = Node<'s>>,
    fields: &[Field],
) -> DispatchResult<Value> {
    nodes
        .map(|node| materialize(store, node, fields))
        .collect::<DispatchResult<Vec<_>>>()
        .map(Value::Array)
}

// -----------------------------------------------------------------------
// Dispatch
// -----------------------------------------------------------------------

/// The entity kind a request's selection applies to.
fn selection_target(request: &Request) -> (EntityKind, &[Field]) {
    let (entity, select) = match request {
        Request::Users { select, .. }
        | Request::CreateUser { select, .. }
        | Request::DeleteUser { select, .. } => (EntityKind::User, select),
        Request::Posts { select, .. }
        | Request::CreatePost { select, .. }
        | Request::DeletePost { select, .. } => (EntityKind::Post, select),
        Request::Comments { select }
        | Request::CreateComment { select, .. }
        | Request::DeleteComment { select, .. } => (EntityKind::Comment, select),
    };
    (entity, select.as_slice())
}

/// Run one request against the shared store.
///
/// Queries hold the read lock while shaping their results. Mutations hold
/// the write lock from validation through shaping, so the returned data
/// reflects exactly the state the mutation produced.
///
/// # Errors
///
/// Returns a selection error before touching the store, or the engine's
/// error if the operation itself fails.
pub async fn dispatch(shared: &SharedStore, request: Request) -> DispatchResult<Value> {
    let (entity, select) = selection_target(&request);
    validate(entity, select)?;
    debug!(op = request.op(), "dispatching request");

    match request {
        Request::Users { query, select } => {
            shared
                .read(|queries, store| {
                    let users = queries.list_users(query.as_deref());
                    many(store, users.into_iter().map(Node::User), &select)
                })
                .await
        }
        Request::Posts { query, select } => {
            shared
                .read(|queries, store| {
                    let posts = queries.list_posts(query.as_deref());
                    many(store, posts.into_iter().map(Node::Post), &select)
                })
                .await
        }
        Request::Comments { select } => {
            shared
                .read(|queries, store| {
                    let comments = queries.list_comments();
                    many(store, comments.into_iter().map(Node::Comment), &select)
                })
                .await
        }
        Request::CreateUser { data, select } => {
            shared
                .mutate(|engine| {
                    let user = engine.create_user(data)?;
                    materialize(engine.view(), Node::User(&user), &select)
                })
                .await
        }
        Request::DeleteUser { id, select } => {
            shared
                .mutate(|engine| {
                    let user = engine.delete_user(id)?;
                    materialize(engine.view(), Node::User(&user), &select)
                })
                .await
        }
        Request::CreatePost { data, select } => {
            shared
                .mutate(|engine| {
                    let post = engine.create_post(data)?;
                    materialize(engine.view(), Node::Post(&post), &select)
                })
                .await
        }
        Request::DeletePost { id, select } => {
            shared
                .mutate(|engine| {
                    let post = engine.delete_post(id)?;
                    materialize(engine.view(), Node::Post(&post), &select)
                })
                .await
        }
        Request::CreateComment { data, select } => {
            shared
                .mutate(|engine| {
                    let comment = engine.create_comment(data)?;
                    materialize(engine.view(), Node::Comment(&comment), &select)
                })
                .await
        }
        Request::DeleteComment { id, select } => {
            shared
                .mutate(|engine| {
                    let comment = engine.delete_comment(id)?;
                    materialize(engine.view(), Node::Comment(&comment), &select)
                })
                .await
        }
    }
}

/// Parse one request line, run it, and build the response object.
///
/// Always produces a response: `{"data": ...}` on success or
/// `{"error": {"kind": ..., "message": ...}}` on failure.
pub async fn handle_line(shared: &SharedStore, line: &str) -> Value {
    let result = match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(shared, request).await,
        Err(err) => Err(DispatchError::from(err)),
    };
    match result {
        Ok(data) => json!({ "data": data }),
        Err(err) => {
            debug!(kind = err.kind(), error = %err, "request failed");
            json!({ "error": { "kind": err.kind(), "message": err.to_string() } })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use scribe_types::{CreateCommentInput, CreatePostInput, CreateUserInput, PostId, UserId};

    use super::*;

    /// One user with a published and an unpublished post, and one comment.
    async fn fixture() -> (SharedStore, UserId, PostId) {
        let shared = SharedStore::default();
        let ids = shared
            .mutate(|engine| {
                let ada = engine
                    .create_user(CreateUserInput {
                        name: String::from("Ada"),
                        email: String::from("ada@x.com"),
                        age: Some(36),
                    })
                    .unwrap();
                let live = engine
                    .create_post(CreatePostInput {
                        title: String::from("Engines"),
                        body: String::from("analytical"),
                        published: true,
                        author: ada.id,
                    })
                    .unwrap();
                engine
                    .create_post(CreatePostInput {
                        title: String::from("Draft"),
                        body: String::from("notes"),
                        published: false,
                        author: ada.id,
                    })
                    .unwrap();
                engine
                    .create_comment(CreateCommentInput {
                        text: String::from("first"),
                        author: ada.id,
                        post: live.id,
                    })
                    .unwrap();
                (ada.id, live.id)
            })
            .await;
        (shared, ids.0, ids.1)
    }

    async fn run(shared: &SharedStore, line: &str) -> Value {
        handle_line(shared, line).await
    }

    #[tokio::test]
    async fn empty_selection_returns_scalars_only() {
        let (shared, ada, _) = fixture().await;
        let response = run(&shared, r#"{"op":"users"}"#).await;
        assert_eq!(
            response,
            json!({ "data": [{ "id": ada, "name": "Ada", "email": "ada@x.com", "age": 36 }] })
        );
    }

    #[tokio::test]
    async fn nested_relations_are_materialized() {
        let (shared, _, _) = fixture().await;
        let response = run(
            &shared,
            r#"{"op":"users","select":["name",{"posts":["title",{"comments":["text",{"author":["name"]}]}]}]}"#,
        )
        .await;
        assert_eq!(
            response,
            json!({ "data": [{
                "name": "Ada",
                "posts": [
                    { "title": "Engines", "comments": [{ "text": "first", "author": { "name": "Ada" } }] },
                    { "title": "Draft", "comments": [] },
                ],
            }] })
        );
    }

    #[tokio::test]
    async fn bare_relation_name_selects_related_scalars() {
        let (shared, _, live) = fixture().await;
        let response = run(&shared, r#"{"op":"comments","select":["text","post"]}"#).await;
        assert_eq!(
            response["data"][0]["post"],
            json!({ "id": live, "title": "Engines", "body": "analytical", "published": true })
        );
    }

    #[tokio::test]
    async fn post_query_filters_title_or_body() {
        let (shared, _, _) = fixture().await;
        let response = run(&shared, r#"{"op":"posts","query":"NOTES","select":["title"]}"#).await;
        assert_eq!(response, json!({ "data": [{ "title": "Draft" }] }));
    }

    #[tokio::test]
    async fn unknown_field_is_rejected_before_mutating() {
        let (shared, _, _) = fixture().await;
        let response = run(
            &shared,
            r#"{"op":"createUser","data":{"name":"Bo","email":"bo@x.com"},"select":["likes"]}"#,
        )
        .await;
        assert_eq!(response["error"]["kind"], "UnknownField");
        assert_eq!(shared.counts().await.users, 1);
    }

    #[tokio::test]
    async fn sub_selection_on_scalar_is_rejected() {
        let (shared, _, _) = fixture().await;
        let response = run(&shared, r#"{"op":"posts","select":[{"title":["x"]}]}"#).await;
        assert_eq!(response["error"]["kind"], "NotARelation");
    }

    #[tokio::test]
    async fn engine_errors_carry_their_kind() {
        let (shared, ada, _) = fixture().await;
        let duplicate = run(
            &shared,
            r#"{"op":"createUser","data":{"name":"Other","email":"ada@x.com"}}"#,
        )
        .await;
        assert_eq!(duplicate["error"]["kind"], "DuplicateEmail");

        let draft = run(&shared, r#"{"op":"posts","query":"draft","select":["id"]}"#).await;
        let draft_id = draft["data"][0]["id"].as_str().unwrap().to_owned();
        let line = format!(
            r#"{{"op":"createComment","data":{{"text":"hi","author":"{ada}","post":"{draft_id}"}}}}"#
        );
        let rejected = run(&shared, &line).await;
        assert_eq!(rejected["error"]["kind"], "InvalidReference");
    }

    #[tokio::test]
    async fn create_comment_resolves_relations_in_the_same_lock() {
        let (shared, ada, live) = fixture().await;
        let line = format!(
            r#"{{"op":"createComment","data":{{"text":"hi","author":"{ada}","post":"{live}"}},"select":["text",{{"post":[{{"comments":["text"]}}]}}]}}"#
        );
        let response = run(&shared, &line).await;
        assert_eq!(
            response,
            json!({ "data": {
                "text": "hi",
                "post": { "comments": [{ "text": "first" }, { "text": "hi" }] },
            } })
        );
    }

    #[tokio::test]
    async fn delete_user_reports_post_cascade_state() {
        let (shared, ada, _) = fixture().await;
        let line = format!(r#"{{"op":"deleteUser","id":"{ada}","select":["name","posts"]}}"#);
        let response = run(&shared, &line).await;
        assert_eq!(response, json!({ "data": { "name": "Ada", "posts": [] } }));

        let counts = shared.counts().await;
        assert_eq!((counts.users, counts.posts, counts.comments), (0, 0, 0));

        let again = run(&shared, &line).await;
        assert_eq!(again["error"]["kind"], "NotFound");
    }

    #[tokio::test]
    async fn malformed_line_is_an_invalid_request() {
        let shared = SharedStore::default();
        let response = run(&shared, "{not json").await;
        assert_eq!(response["error"]["kind"], "InvalidRequest");
    }

    #[test]
    fn validate_walks_nested_selections() {
        let nested = vec![Field::nested(
            "author",
            vec![Field::nested("posts", vec![Field::scalar("nope")])],
        )];
        let err = validate(EntityKind::Comment, &nested).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::UnknownField { entity: EntityKind::Post, ref field } if field == "nope"
        ));
        assert!(validate(EntityKind::User, &[]).is_ok());
    }
}
