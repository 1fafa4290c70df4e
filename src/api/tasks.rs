use reqwest::{Method, StatusCode};

use crate::api::client::{decode, error_from, expect};
use crate::api::{ApiError, YgmClient};
use crate::models::task::{
    CreateTaskRequest, DiscardResponse, Task, TaskEnvelope, TasksResponse, UpdateTaskRequest,
};

/// Optional filters for listing tasks.
#[derive(Debug, Default)]
pub struct TaskFilter<'a> {
    pub status: Option<&'a str>,
    pub platform: Option<&'a str>,
}

impl YgmClient {
    /// List tasks in the current marketing plan.
    pub async fn list_tasks(&self, filter: &TaskFilter<'_>) -> Result<Vec<Task>, ApiError> {
        let mut query = Vec::new();
        if let Some(status) = filter.status.filter(|s| !s.is_empty()) {
            query.push(("status", status));
        }
        if let Some(platform) = filter.platform.filter(|p| !p.is_empty()) {
            query.push(("platform", platform));
        }

        let resp = self
            .send(self.request(Method::GET, "/api/v1/tasks").query(&query))
            .await?;

        let list: TasksResponse = expect(resp, StatusCode::OK).await?;
        Ok(list.tasks)
    }

    /// Fetch one task with its prompts and selected copy.
    pub async fn get_task(&self, id: i64) -> Result<Task, ApiError> {
        let resp = self
            .send(self.request(Method::GET, &format!("/api/v1/tasks/{id}")))
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound("task"));
        }
        expect(resp, StatusCode::OK).await
    }

    pub async fn create_task(&self, req: &CreateTaskRequest) -> Result<Task, ApiError> {
        let resp = self
            .send(
                self.request(Method::POST, "/api/v1/tasks")
                    .json(&TaskEnvelope { task: req }),
            )
            .await?;

        expect(resp, StatusCode::CREATED).await
    }

    /// Partially update a task; only fields set in `req` are sent.
    pub async fn update_task(&self, id: i64, req: &UpdateTaskRequest) -> Result<Task, ApiError> {
        let resp = self
            .send(
                self.request(Method::PATCH, &format!("/api/v1/tasks/{id}"))
                    .json(&TaskEnvelope { task: req }),
            )
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound("task"));
        }
        expect(resp, StatusCode::OK).await
    }

    /// Soft-delete a task. The server keeps it restorable.
    pub async fn discard_task(&self, id: i64) -> Result<DiscardResponse, ApiError> {
        let resp = self
            .send(self.request(Method::DELETE, &format!("/api/v1/tasks/{id}")))
            .await?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound("task")),
            StatusCode::OK => decode(resp).await,
            _ => Err(error_from(resp).await),
        }
    }
}
