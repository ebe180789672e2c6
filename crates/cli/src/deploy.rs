// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deploy request construction and response classification.
//!
//! A deployment is one `prepareandactivate` POST carrying the zipped
//! application package. The response status decides the outcome:
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 4xx | [`DeployOutcome::InvalidPackage`] |
//! | 5xx | [`DeployOutcome::ServiceError`] |
//! | anything else | [`DeployOutcome::Success`] |

use crate::color;
use crate::error::{ExitCode, Result};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::target::Target;

/// Endpoint that validates and activates a package in one step.
pub const PREPARE_AND_ACTIVATE_PATH: &str = "/application/v2/tenant/default/prepareandactivate";

/// Media type of the request body.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Result of a deployment the service answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Success,
    /// The service rejected the application package.
    InvalidPackage { status: u16, body: String },
    /// The deploy service itself failed.
    ServiceError {
        status: u16,
        /// `host:port` of the service that answered.
        service: String,
        body: String,
    },
}

impl DeployOutcome {
    /// Classify a response from the deploy service at `target`.
    pub fn from_response(target: &Target, response: HttpResponse) -> Self {
        match response.status {
            400..=499 => Self::InvalidPackage {
                status: response.status,
                body: response.body,
            },
            500..=599 => Self::ServiceError {
                status: response.status,
                service: target.authority().to_string(),
                body: response.body,
            },
            _ => Self::Success,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::Success
        } else {
            ExitCode::DeployFailed
        }
    }

    /// Terminal text for this outcome, newline-terminated.
    pub fn render(&self, use_color: bool) -> String {
        let styled = match self {
            Self::Success => color::success("Success", use_color),
            Self::InvalidPackage { status, body } => color::failure(
                &format!("Invalid application package (Status {status}):\n{body}"),
                use_color,
            ),
            Self::ServiceError {
                status,
                service,
                body,
            } => color::failure(
                &format!("Error from deploy service at {service} (Status {status}):\n{body}"),
                use_color,
            ),
        };
        format!("{styled}\n")
    }
}

/// Build the deploy request for a zipped package.
pub fn prepare_and_activate_request(target: &Target, package: Vec<u8>) -> HttpRequest {
    HttpRequest::post(target.endpoint(PREPARE_AND_ACTIVATE_PATH))
        .header("Content-Type", ZIP_CONTENT_TYPE)
        .body(package)
}

/// Send `package` to `target` and classify the answer.
///
/// Exactly one request is made. Errors are returned only when no response
/// was received.
pub fn deploy(client: &dyn HttpClient, target: &Target, package: Vec<u8>) -> Result<DeployOutcome> {
    let request = prepare_and_activate_request(target, package);
    tracing::info!(
        url = %request.url,
        bytes = request.body.len(),
        "deploying application package"
    );

    let response = client.send(&request)?;
    tracing::info!(status = response.status, "deploy service responded");

    Ok(DeployOutcome::from_response(target, response))
}

#[cfg(test)]
#[path = "deploy_tests.rs"]
mod tests;
