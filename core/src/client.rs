//! Stateless request builder and response parser for the remote collection.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. `build_list_todos` produces an `HttpRequest`; `parse_list_todos`
//! consumes the matching `HttpResponse` and projects each remote record onto
//! the local `Todo` shape. The caller executes the round-trip in between.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{RemoteTodo, Todo};

/// Synchronous, stateless client for the remote todo collection.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            path: format!("{}/todos", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Parse a list response, dropping the wire-only fields of each record.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        let remote: Vec<RemoteTodo> = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(remote.into_iter().map(Todo::from).collect())
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_list_todos();
        assert_eq!(req.path, "http://localhost:3000/todos");
    }

    #[test]
    fn parse_list_todos_projects_records() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":5,"userId":9,"title":"x","completed":true},
                {"id":6,"userId":9,"title":"y","completed":false}]"#,
        );
        let todos = client().parse_list_todos(response).unwrap();
        assert_eq!(todos, vec![Todo::new(5, "x", true), Todo::new(6, "y", false)]);
    }

    #[test]
    fn parse_list_todos_empty() {
        let todos = client().parse_list_todos(HttpResponse::new(200, "[]")).unwrap();
        assert!(todos.is_empty());
    }

    #[test]
    fn parse_list_todos_not_found() {
        let err = client().parse_list_todos(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_list_todos_wrong_status() {
        let err = client()
            .parse_list_todos(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client()
            .parse_list_todos(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_todos_missing_field() {
        let err = client()
            .parse_list_todos(HttpResponse::new(200, r#"[{"id":1,"userId":1,"title":"t"}]"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
