//! Task flow service
//!
//! Lists the account's tasks and drives the completion flow. Interaction is
//! gated behind a minimum wallet balance; the rating and feedback collected
//! from the user are validated locally before the completion call, since the
//! backend credits the reward on the bare completion endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::models::TasksConfig;
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::types::{TaskId, TaskStatus, WalletBalance};
use crate::services::api::types::{CompleteTaskResponse, TaskDto, TaskListResponse};
use crate::services::api::ApiClient;

/// A task visible to the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Backend task identifier
    pub id: TaskId,
    /// Task title
    pub title: String,
    /// Task category label
    pub task_type: String,
    /// Reward credited on completion
    pub reward: Decimal,
    /// Lifecycle state
    pub status: TaskStatus,
}

/// Rating and feedback collected before completing a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFeedback {
    /// Star rating, 1 to 5
    pub rating: u8,
    /// Free-form feedback text
    pub feedback: String,
}

impl TaskFeedback {
    /// Validate the collected rating and feedback
    pub fn validate(&self) -> AppResult<()> {
        crate::core::validation::validate_rating(self.rating)
            .map_err(|e| AppError::validation_field(e.to_string(), "rating".to_string()))?;
        crate::core::validation::validate_feedback(&self.feedback)
            .map_err(|e| AppError::validation_field(e.to_string(), "feedback".to_string()))?;
        Ok(())
    }
}

/// Task operations service
#[derive(Debug, Clone)]
pub struct TaskService {
    api: Arc<ApiClient>,
    min_wallet_to_interact: Decimal,
}

impl TaskService {
    /// Create the service
    pub fn new(api: Arc<ApiClient>, config: &TasksConfig) -> Self {
        Self {
            api,
            min_wallet_to_interact: config.min_wallet_to_interact,
        }
    }

    /// Minimum wallet balance required before task interaction is allowed
    pub fn min_wallet_to_interact(&self) -> Decimal {
        self.min_wallet_to_interact
    }

    /// Fetch all tasks visible to the account
    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<Task>> {
        let response: TaskListResponse = self.api.get_authorized("/view-task").await?;
        response.tasks.into_iter().map(Self::map_task).collect()
    }

    /// Complete a task, crediting its reward
    ///
    /// The wallet gate and the feedback validation both run before any
    /// request is issued; a rejected completion never reaches the backend.
    /// Returns the updated wallet balance.
    #[instrument(skip(self, feedback))]
    pub async fn complete(
        &self,
        task_id: &TaskId,
        feedback: &TaskFeedback,
        current_wallet: WalletBalance,
    ) -> AppResult<WalletBalance> {
        if !current_wallet.covers(self.min_wallet_to_interact) {
            return Err(AppError::validation_field(
                format!(
                    "A minimum balance of {} is required to interact with tasks, current balance is {}",
                    self.min_wallet_to_interact,
                    current_wallet.value()
                ),
                "wallet".to_string(),
            ));
        }

        feedback.validate()?;

        let response: CompleteTaskResponse = self
            .api
            .get_authorized(&format!("/completeTask/{}", task_id.as_str()))
            .await?;

        let wallet = WalletBalance::new(response.wallet)?;
        info!(
            "🎉 Task {} completed, rated {}/5, wallet now {}",
            task_id, feedback.rating, wallet
        );
        Ok(wallet)
    }

    fn map_task(dto: TaskDto) -> AppResult<Task> {
        let status = TaskStatus::from_str(&dto.status).map_err(|e| {
            AppError::api(format!("Unrecognized task status: {e}"), "/view-task".to_string())
        })?;

        Ok(Task {
            id: TaskId::new(dto.id),
            title: dto.title,
            task_type: dto.task_type,
            reward: dto.reward,
            status,
        })
    }
}
