use async_trait::async_trait;
use reqwest::{header::HeaderMap, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, Span};
use url::Url;

use super::{ApiError, TaskApi};
use crate::model::{CorrelationId, Task, TaskDraft, TaskId, UserId};

const TASK_RESOURCE: &str = "task";

/// Task store reached over JSON/HTTP.
pub struct HttpTaskApi {
    client: reqwest::Client,
    base: Url,
}

#[derive(Serialize)]
struct CreateTaskBody<'a> {
    #[serde(flatten)]
    draft: &'a TaskDraft,
    #[serde(rename = "userId")]
    user_id: &'a UserId,
}

#[derive(Deserialize)]
struct CreatedTask {
    task: Task,
}

impl HttpTaskApi {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, id: Option<&TaskId>) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Request(format!("{} cannot be a base url", self.base)))?;
            segments.pop_if_empty().push(TASK_RESOURCE);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    // Tags the request and the current span with a fresh correlation-id,
    // then turns any non 2xx answer into an error.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let cid = CorrelationId::new();
        Span::current().record("correlation_id", &tracing::field::display(cid));

        let mut headers = HeaderMap::new();
        cid.insert_into_header_map(&mut headers);

        let response = request.headers(headers).send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "task store answered");
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    #[instrument(skip(self), fields(correlation_id))]
    async fn list(&self, user: &UserId) -> Result<Vec<Task>, ApiError> {
        let url = self.endpoint(None)?;
        let request = self.client.get(url).query(&[("user", user.as_str())]);
        let tasks: Vec<Task> = self.execute(request).await?.json().await?;
        debug!(count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    #[instrument(skip(self, draft), fields(correlation_id))]
    async fn create(&self, draft: &TaskDraft, user: &UserId) -> Result<Task, ApiError> {
        let url = self.endpoint(None)?;
        let body = CreateTaskBody {
            draft,
            user_id: user,
        };
        let created: CreatedTask = self
            .execute(self.client.post(url).json(&body))
            .await?
            .json()
            .await?;
        Ok(created.task)
    }

    #[instrument(skip(self, draft), fields(correlation_id))]
    async fn update(&self, id: &TaskId, draft: &TaskDraft) -> Result<Task, ApiError> {
        let url = self.endpoint(Some(id))?;
        let task = self
            .execute(self.client.put(url).json(draft))
            .await?
            .json()
            .await?;
        Ok(task)
    }

    #[instrument(skip(self), fields(correlation_id))]
    async fn delete(&self, id: &TaskId) -> Result<(), ApiError> {
        let url = self.endpoint(None)?;
        self.execute(self.client.delete(url).query(&[("id", id.as_str())]))
            .await?;
        Ok(())
    }
}
