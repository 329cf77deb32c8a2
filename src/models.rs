//! Wire Models
//!
//! Data structures matching the task API.

use serde::{Deserialize, Serialize};

/// Task as the server represents it.
///
/// `id` is server-assigned on creation. Rows that are still waiting on
/// their create response carry a temporary client-side id (see
/// [`crate::store::RowStatus::Creating`]); those ids never reach the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub done: bool,
}

/// Error body returned by the API on a non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_decodes_server_payload() {
        let task: Task = serde_json::from_str(r#"{"id":"x9","name":"Call mom","done":false}"#)
            .expect("valid task payload");
        assert_eq!(task.id, "x9");
        assert_eq!(task.name, "Call mom");
        assert!(!task.done);
    }

    #[test]
    fn test_error_body_decodes_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"Unauthorized"}"#).expect("valid error payload");
        assert_eq!(body.message, "Unauthorized");
    }
}
