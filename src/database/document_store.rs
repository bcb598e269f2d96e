use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use surrealdb::engine::any::Any;
use surrealdb::method::Query;
use surrealdb::Response;
use tracing::{debug, warn};

use crate::database::client::Db;
use crate::database::filter::{validate_field_name, Filter, WhereClause};
use crate::middleware::error::{AppError, AppResult};

/// Selects every field and exposes the record id key as a plain string `id`.
const DOC_FIELDS: &str = "*, meta::id(id) AS id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Matched,
    Inserted,
}

/// Collection addressed access to schemaless documents. Knows nothing about the
/// records stored in it; callers choose the decoded type at each call.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    client: Arc<Db>,
    timeout: Duration,
}

impl DocumentStore {
    pub fn new(client: Arc<Db>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// First document matching `filter`, `NotFound` when there is none.
    pub async fn query_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> AppResult<T> {
        let clause = filter.to_where()?;
        with_timeout(self.timeout, collection, async {
            let qry = self.client.query(format!(
                "SELECT {DOC_FIELDS} FROM type::table($_table) WHERE {} LIMIT 1;",
                clause.condition
            ));
            let mut res = bind_where(qry, clause)
                .bind(("_table", collection.to_string()))
                .await?
                .check()?;
            let doc = res
                .take::<Option<T>>(0)
                .map_err(|err| decode_error(collection, err))?;
            doc.ok_or_else(|| AppError::NotFound {
                collection: collection.to_string(),
                filter: filter.to_string(),
            })
        })
        .await
    }

    /// All documents whose `field` equals `value`. A single undecodable document fails
    /// the whole call.
    pub async fn query_all_by_field<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> AppResult<Vec<T>> {
        self.query_all(collection, &Filter::field(field, value)).await
    }

    pub async fn find_all<T: DeserializeOwned>(&self, collection: &str) -> AppResult<Vec<T>> {
        self.query_all(collection, &Filter::new()).await
    }

    async fn query_all<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> AppResult<Vec<T>> {
        let clause = filter.to_where()?;
        with_timeout(self.timeout, collection, async {
            let qry = self.client.query(format!(
                "SELECT {DOC_FIELDS} FROM type::table($_table) WHERE {};",
                clause.condition
            ));
            let mut res = bind_where(qry, clause)
                .bind(("_table", collection.to_string()))
                .await?
                .check()?;
            res.take::<Vec<T>>(0)
                .map_err(|err| decode_error(collection, err))
        })
        .await
    }

    /// Always creates a new document. A string `id` in `value` becomes the record key.
    pub async fn insert<T: Serialize>(&self, collection: &str, value: &T) -> AppResult<()> {
        let mut doc = to_document(value)?;
        let id = take_string_id(&mut doc);
        with_timeout(self.timeout, collection, async {
            let qry = self
                .client
                .query(format!("{} CONTENT $_doc RETURN NONE;", create_target(&id)));
            let qry = match id {
                Some(id) => qry.bind(("_id", id)),
                None => qry,
            };
            qry.bind(("_table", collection.to_string()))
                .bind(("_doc", Value::Object(doc)))
                .await?
                .check()?;
            Ok::<_, AppError>(())
        })
        .await
    }

    /// Merges `value` into the first document matching `filter`, or creates one from
    /// the filter fields overlaid with `value`. A matched document keeps its id.
    ///
    /// Match and write run in one transaction. Two racing upserts can still both miss;
    /// only a unique index on the filter fields turns the second write into an error.
    pub async fn upsert<T: Serialize>(
        &self,
        collection: &str,
        filter: &Filter,
        value: &T,
    ) -> AppResult<UpsertOutcome> {
        let clause = filter.to_where()?;
        let mut patch = to_document(value)?;
        let id = take_string_id(&mut patch);

        let mut doc = Map::with_capacity(filter.len() + patch.len());
        for (field, val) in filter.iter() {
            doc.insert(field.to_string(), Value::String(val.to_string()));
        }
        doc.extend(patch.clone());

        let outcome = with_timeout(self.timeout, collection, async {
            let qry = self.client.query(format!(
                "BEGIN TRANSACTION;
                 LET $_found = (SELECT VALUE id FROM type::table($_table) WHERE {} LIMIT 1)[0];
                 IF $_found {{
                     UPDATE $_found MERGE $_patch RETURN NONE;
                 }} ELSE {{
                     {} CONTENT $_doc RETURN NONE;
                 }};
                 COMMIT TRANSACTION;
                 RETURN $_found != NONE;",
                clause.condition,
                create_target(&id)
            ));
            let qry = match id {
                Some(id) => qry.bind(("_id", id)),
                None => qry,
            };
            let res = bind_where(qry, clause)
                .bind(("_table", collection.to_string()))
                .bind(("_patch", Value::Object(patch)))
                .bind(("_doc", Value::Object(doc)))
                .await?
                .check()?;
            let outcome = match last_flag(res)? {
                true => UpsertOutcome::Matched,
                false => UpsertOutcome::Inserted,
            };
            Ok::<_, AppError>(outcome)
        })
        .await?;

        debug!("->> upsert into {collection} where {filter}: {outcome:?}");
        Ok(outcome)
    }

    /// Removes at most one document matching `filter`. Matching nothing is not an
    /// error, the result tells whether a document was removed.
    pub async fn delete(&self, collection: &str, filter: &Filter) -> AppResult<bool> {
        let clause = filter.to_where()?;
        with_timeout(self.timeout, collection, async {
            let qry = self.client.query(format!(
                "BEGIN TRANSACTION;
                 LET $_found = (SELECT VALUE id FROM type::table($_table) WHERE {} LIMIT 1)[0];
                 IF $_found {{
                     DELETE $_found;
                 }};
                 COMMIT TRANSACTION;
                 RETURN $_found != NONE;",
                clause.condition
            ));
            let res = bind_where(qry, clause)
                .bind(("_table", collection.to_string()))
                .await?
                .check()?;
            last_flag(res)
        })
        .await
    }
}

/// Bounds a single store call. Expiry is reported as `StoreTimeout`, never retried.
pub(crate) async fn with_timeout<T, F>(limit: Duration, collection: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| AppError::StoreTimeout {
            collection: collection.to_string(),
            millis: limit.as_millis() as u64,
        })?
}

fn bind_where<'a>(qry: Query<'a, Any>, clause: WhereClause) -> Query<'a, Any> {
    clause
        .bindings
        .into_iter()
        .fold(qry, |qry, binding| qry.bind(binding))
}

fn create_target(id: &Option<String>) -> &'static str {
    match id {
        Some(_) => "CREATE type::thing($_table, $_id)",
        None => "CREATE type::table($_table)",
    }
}

fn last_flag(mut res: Response) -> AppResult<bool> {
    let last = res.num_statements().saturating_sub(1);
    let flag = res.take::<Option<bool>>(last)?;
    Ok(flag.unwrap_or(false))
}

// statement errors are raised by `check`, so whatever `take` rejects is a shape problem
fn decode_error(collection: &str, err: surrealdb::Error) -> AppError {
    warn!("->> decode fail in {collection}: {err}");
    AppError::Decode {
        collection: collection.to_string(),
        reason: err.to_string(),
    }
}

fn to_document<T: Serialize>(value: &T) -> AppResult<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(doc) => {
            for field in doc.keys() {
                validate_field_name(field)?;
            }
            Ok(doc)
        }
        other => Err(AppError::Serde {
            reason: format!("document must serialize to an object, got {other}"),
        }),
    }
}

fn take_string_id(doc: &mut Map<String, Value>) -> Option<String> {
    match doc.remove("id") {
        Some(Value::String(id)) => Some(id),
        Some(other) => {
            doc.insert("id".to_string(), other);
            None
        }
        None => None,
    }
}
