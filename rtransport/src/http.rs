//! reqwest-based implementation of the responses backend.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use rcommon::BoxFuture;

use crate::{
    Options, ResolvedCredentials, ResponsesBackend, ResponsesRequest, ResponsesResponse,
    TransportError,
};

#[derive(Debug, Clone)]
pub struct ResponsesHttpBackend {
    client: Client,
    base_url: String,
    credentials: ResolvedCredentials,
}

impl ResponsesHttpBackend {
    pub fn new(client: Client, credentials: ResolvedCredentials) -> Self {
        Self {
            client,
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            credentials,
        }
    }

    /// Builds a client honoring the timeout and base URL in `options`.
    pub fn from_options(
        options: &Options,
        credentials: ResolvedCredentials,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(options.timeout())
            .build()
            .map_err(|err| TransportError::configuration(err.to_string()))?;

        Ok(Self::new(client, credentials).with_base_url(options.resolved_base_url()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn apply_headers(&self, mut builder: RequestBuilder, request: &ResponsesRequest) -> RequestBuilder {
        builder = builder.bearer_auth(self.credentials.api_key.expose());

        if let Some(organization) = &self.credentials.organization {
            builder = builder.header("OpenAI-Organization", organization);
        }

        if let Some(project) = &self.credentials.project {
            builder = builder.header("OpenAI-Project", project);
        }

        if let Some(headers) = &request.extra_headers {
            for (name, value) in headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }

        builder
    }

    async fn parse_error(response: Response) -> TransportError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("responses request failed with status {status}"));

        classify_status(status, message)
    }
}

impl ResponsesBackend for ResponsesHttpBackend {
    fn create_response<'a>(
        &'a self,
        request: ResponsesRequest,
    ) -> BoxFuture<'a, Result<ResponsesResponse, TransportError>> {
        Box::pin(async move {
            let url = self.endpoint("responses");
            let builder = self.apply_headers(self.client.post(url), &request);
            let response = builder.json(&request).send().await.map_err(|err| {
                if err.is_timeout() {
                    TransportError::timeout(err.to_string())
                } else {
                    TransportError::transport(err.to_string())
                }
            })?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            response
                .json::<ResponsesResponse>()
                .await
                .map_err(|err| TransportError::transport(err.to_string()))
        })
    }
}

pub(crate) fn classify_status(status: StatusCode, message: String) -> TransportError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TransportError::authentication(message),
        StatusCode::TOO_MANY_REQUESTS => TransportError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => TransportError::timeout(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            TransportError::invalid_input(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            TransportError::unavailable(message)
        }
        _ => TransportError::transport(message),
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
