//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections, so every client error carries the JSON error body.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use booklib_core::error::CoreError;
use booklib_core::types::DbId;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// A JSON body that has been deserialized and passed [`Validate`].
///
/// Malformed JSON is a [`AppError::BadRequest`]; a body that parses but
/// breaks a field rule is a [`CoreError::Validation`].
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| CoreError::Validation(describe(&errors)))?;

        Ok(Self(value))
    }
}

/// A non-negative numeric `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        parse_id(&raw)
            .map(IdPath)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid id: '{raw}'")))
    }
}

/// Query-string pairs where a repeated key keeps its first value.
///
/// Unlike a typed `Query<T>`, a duplicate key is not a rejection.
#[derive(Debug, Clone, Default)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    /// The first value given for `key`, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<S> FromRequestParts<S> for QueryPairs
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(pairs))
    }
}

fn parse_id(raw: &str) -> Option<DbId> {
    raw.parse::<DbId>().ok().filter(|id| *id >= 0)
}

/// Flatten field errors into one message, ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use axum::http::Request as HttpRequest;

    use super::*;

    async fn pairs_for(uri: &str) -> QueryPairs {
        let (mut parts, ()) = HttpRequest::get(uri).body(()).unwrap().into_parts();
        QueryPairs::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn repeated_keys_keep_the_first_value() {
        let pairs = pairs_for("/api/books?page=1&page=2&q=a&q=b").await;
        assert_eq!(pairs.first("page"), Some("1"));
        assert_eq!(pairs.first("q"), Some("a"));
        assert_eq!(pairs.first("page_size"), None);
    }

    #[tokio::test]
    async fn missing_query_string_is_empty() {
        let pairs = pairs_for("/api/books").await;
        assert_eq!(pairs.first("page"), None);
    }

    #[test]
    fn ids_must_be_non_negative_integers() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("0"), Some(0));
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);
    }
}
