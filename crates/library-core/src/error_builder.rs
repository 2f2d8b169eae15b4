use crate::problemdetails;
use axum::http::StatusCode;
use serde::Serialize;
use std::collections::HashMap;

pub struct ErrorBuilder {
    status: StatusCode,
    type_: String,
    title: String,
    detail: String,
    instance: String,
    values: HashMap<String, serde_json::Value>,
}

impl ErrorBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            type_: String::new(),
            title: String::new(),
            detail: String::new(),
            instance: String::new(),
            values: HashMap::new(),
        }
    }

    pub fn type_(mut self, type_: impl Into<String>) -> Self {
        self.type_ = type_.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    pub fn value<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.values.insert(key.to_string(), value);
        }
        self
    }

    pub fn build(self) -> problemdetails::Problem {
        let mut problem = problemdetails::new(self.status)
            .with_type(self.type_)
            .with_title(self.title)
            .with_detail(self.detail)
            .with_instance(self.instance)
            .with_value("timestamp", chrono::Utc::now().to_rfc3339());

        for (key, value) in self.values {
            problem = problem.with_value(&key, value);
        }

        problem
    }
}

// Common error builders, one per taxonomy entry in the control plane's error design.
pub fn internal_server_error() -> ErrorBuilder {
    ErrorBuilder::new(StatusCode::INTERNAL_SERVER_ERROR)
        .type_("https://library.internal/probs/internal-server-error")
        .title("Internal Server Error")
        .detail("An unexpected error occurred while processing your request")
        .instance("/error/internal-server-error")
        .value("error_code", "INTERNAL_SERVER_ERROR")
}

pub fn not_found(resource: impl Into<String>) -> ErrorBuilder {
    ErrorBuilder::new(StatusCode::NOT_FOUND)
        .type_("https://library.internal/probs/not-found")
        .title("Resource Not Found")
        .detail(resource)
        .instance("/error/not-found")
        .value("error_code", "NOT_FOUND")
}

pub fn already_exists(resource: impl Into<String>) -> ErrorBuilder {
    ErrorBuilder::new(StatusCode::BAD_REQUEST)
        .type_("https://library.internal/probs/already-exists")
        .title("Resource Already Exists")
        .detail(resource)
        .instance("/error/already-exists")
        .value("error_code", "ALREADY_EXISTS")
}

pub fn validation_failed() -> ErrorBuilder {
    ErrorBuilder::new(StatusCode::BAD_REQUEST)
        .type_("https://library.internal/probs/validation-failed")
        .title("Validation Failed")
        .instance("/error/validation-failed")
        .value("error_code", "VALIDATION_FAILED")
}

pub fn invalid_transition(detail: impl Into<String>) -> ErrorBuilder {
    ErrorBuilder::new(StatusCode::BAD_REQUEST)
        .type_("https://library.internal/probs/invalid-transition")
        .title("Invalid State Transition")
        .detail(detail)
        .instance("/error/invalid-transition")
        .value("error_code", "INVALID_TRANSITION")
}

pub fn no_rollback_target(detail: impl Into<String>) -> ErrorBuilder {
    ErrorBuilder::new(StatusCode::BAD_REQUEST)
        .type_("https://library.internal/probs/no-rollback-target")
        .title("No Rollback Target")
        .detail(detail)
        .instance("/error/no-rollback-target")
        .value("error_code", "NO_ROLLBACK_TARGET")
}

pub fn dependency_missing(detail: impl Into<String>) -> ErrorBuilder {
    ErrorBuilder::new(StatusCode::BAD_REQUEST)
        .type_("https://library.internal/probs/dependency-missing")
        .title("Dependency Missing")
        .detail(detail)
        .instance("/error/dependency-missing")
        .value("error_code", "DEPENDENCY_MISSING")
}

pub fn bad_request() -> ErrorBuilder {
    ErrorBuilder::new(StatusCode::BAD_REQUEST)
        .type_("https://library.internal/probs/bad-request")
        .title("Bad Request")
        .detail("The request was malformed or invalid")
        .instance("/error/bad-request")
}

pub fn conflict(detail: impl Into<String>) -> ErrorBuilder {
    ErrorBuilder::new(StatusCode::CONFLICT)
        .type_("https://library.internal/probs/conflict")
        .title("Conflict")
        .instance("/error/conflict")
        .detail(detail)
        .value("error_code", "CONFLICT")
}
