//! API Configuration
//!
//! Endpoint and static credentials for the task API, kept in one place
//! instead of ambient constants.

/// Endpoint and credential pair used for every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.learnjavascript.today".to_string(),
            username: "santtier".to_string(),
            password: "TodolistAPI".to_string(),
        }
    }
}

impl ApiConfig {
    /// URL for the task collection, or for one task when `id` is given.
    pub fn tasks_url(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/tasks/{}", self.base_url, id),
            None => format!("{}/tasks", self.base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url() {
        let config = ApiConfig::default();
        assert_eq!(
            config.tasks_url(None),
            "https://api.learnjavascript.today/tasks"
        );
    }

    #[test]
    fn test_single_task_url() {
        let config = ApiConfig::default();
        assert_eq!(
            config.tasks_url(Some("x9")),
            "https://api.learnjavascript.today/tasks/x9"
        );
    }
}
