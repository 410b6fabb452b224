//! Extractors whose rejections go through the error translator

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use super::validation::{self, Validate};
use crate::errors::AppError;

/// JSON body, validated field by field
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        let errors = validation::collect(&value);
        if !errors.is_empty() {
            return Err(AppError::BodyValidation(errors));
        }
        Ok(Self(value))
    }
}

/// Query string bound onto a struct, validated field by field
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value: T = bind_query(parts.uri.query().unwrap_or_default())?;
        let errors = validation::collect(&value);
        if !errors.is_empty() {
            return Err(AppError::BindValidation(errors));
        }
        Ok(Self(value))
    }
}

/// Typed path segments
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// Raw query parameters with per-parameter typed access
#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn required<T: FromStr>(&self, name: &str) -> Result<T, AppError> {
        self.optional(name)?.ok_or_else(|| AppError::MissingParameter {
            name: name.to_string(),
        })
    }

    pub fn optional<T: FromStr>(&self, name: &str) -> Result<Option<T>, AppError> {
        self.0
            .get(name)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| AppError::TypeMismatch {
                    name: name.to_string(),
                    expected: short_type_name(std::any::type_name::<T>()),
                })
            })
            .transpose()
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(params: HashMap<String, String>) -> Self {
        Self(params)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) =
            Query::<HashMap<String, String>>::from_request_parts(parts, state).await?;
        Ok(Self(params))
    }
}

fn short_type_name(full: &str) -> String {
    full.rsplit("::").next().unwrap_or(full).to_string()
}

/// Field named by serde's "missing field `x`" message
fn missing_field(detail: &str) -> Option<String> {
    const MARKER: &str = "missing field `";
    let start = detail.find(MARKER)? + MARKER.len();
    let rest = &detail[start..];
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

/// Value type implied by a scalar parse failure
fn expected_kind(detail: &str) -> Option<&'static str> {
    if detail.contains("invalid digit")
        || detail.contains("too large to fit")
        || detail.contains("too small to fit")
        || detail.contains("integer from empty string")
    {
        Some("integer")
    } else if detail.contains("float literal") {
        Some("number")
    } else if detail.contains("`true` or `false`") {
        Some("boolean")
    } else {
        None
    }
}

/// Deserialize a raw query string, keeping track of the field being decoded
fn bind_query<T: DeserializeOwned>(query: &str) -> Result<T, AppError> {
    let deserializer =
        serde_urlencoded::Deserializer::new(form_urlencoded::parse(query.as_bytes()));
    serde_path_to_error::deserialize(deserializer).map_err(bind_error)
}

/// Query binding failure, attributed to the offending parameter
fn bind_error(err: serde_path_to_error::Error<serde_urlencoded::de::Error>) -> AppError {
    let name = err.path().to_string();
    let detail = err.inner().to_string();

    if let Some(name) = missing_field(&detail) {
        return AppError::MissingParameter { name };
    }
    match expected_kind(&detail) {
        Some(expected) if name != "." => AppError::TypeMismatch {
            name,
            expected: expected.to_string(),
        },
        _ if name != "." => AppError::UnreadableRequest(format!(
            "invalid value for parameter '{name}': {detail}"
        )),
        _ => AppError::UnreadableRequest(detail),
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::UnreadableRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        let detail = rejection.body_text();
        match missing_field(&detail) {
            Some(name) => AppError::MissingParameter { name },
            None => AppError::UnreadableRequest(detail),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(inner) => match inner.into_kind() {
                ErrorKind::ParseErrorAtKey {
                    key, expected_type, ..
                } => AppError::TypeMismatch {
                    name: key,
                    expected: short_type_name(expected_type),
                },
                ErrorKind::ParseErrorAtIndex {
                    index,
                    expected_type,
                    ..
                } => AppError::TypeMismatch {
                    name: format!("#{index}"),
                    expected: short_type_name(expected_type),
                },
                ErrorKind::ParseError { expected_type, .. } => AppError::TypeMismatch {
                    name: "path".to_string(),
                    expected: short_type_name(expected_type),
                },
                kind => AppError::UnreadableRequest(kind.to_string()),
            },
            // route/extractor mismatch is a programming error
            other => AppError::Internal(anyhow!(other.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Filter {
        page: u64,
        active: Option<bool>,
        ratio: Option<f64>,
    }

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
            .into()
    }

    #[test]
    fn test_required_present() {
        let p = params(&[("id", "42")]);
        assert_eq!(p.required::<u64>("id").unwrap(), 42);
    }

    #[test]
    fn test_required_missing() {
        let p = params(&[]);
        match p.required::<u64>("id") {
            Err(AppError::MissingParameter { name }) => assert_eq!(name, "id"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_names_expected_type() {
        let p = params(&[("id", "abc")]);
        match p.required::<u64>("id") {
            Err(AppError::TypeMismatch { name, expected }) => {
                assert_eq!(name, "id");
                assert_eq!(expected, "u64");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_optional_absent() {
        let p = params(&[("q", "x")]);
        assert_eq!(p.optional::<i32>("limit").unwrap(), None);
        assert_eq!(p.optional::<String>("q").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(short_type_name("u8"), "u8");
    }

    #[test]
    fn test_missing_field_parsing() {
        assert_eq!(
            missing_field("Failed to deserialize query string: missing field `page`").as_deref(),
            Some("page")
        );
        assert_eq!(missing_field("invalid digit found in string"), None);
    }

    #[test]
    fn test_bind_query_success() {
        let filter: Filter = bind_query("page=3&active=true&ratio=0.5").unwrap();
        assert_eq!(filter.page, 3);
        assert_eq!(filter.active, Some(true));
        assert_eq!(filter.ratio, Some(0.5));
    }

    #[test]
    fn test_bind_query_type_mismatch_names_parameter() {
        let cases = [
            ("page=abc", "page", "integer"),
            ("page=-1", "page", "integer"),
            ("page=1&active=maybe", "active", "boolean"),
            ("page=1&ratio=half", "ratio", "number"),
        ];
        for (query, field, kind) in cases {
            match bind_query::<Filter>(query) {
                Err(AppError::TypeMismatch { name, expected }) => {
                    assert_eq!(name, field, "{query}");
                    assert_eq!(expected, kind, "{query}");
                }
                other => panic!("unexpected for {query}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_bind_query_missing_parameter() {
        match bind_query::<Filter>("active=false") {
            Err(AppError::MissingParameter { name }) => assert_eq!(name, "page"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
