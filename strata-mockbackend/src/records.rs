//! Record types served by the mock backend.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: u64,
    pub user_name: String,
}

impl User {
    pub fn new(user_id: u64, user_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Complete,
    InProgress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub user_id: u64,
    pub task_id: u64,
    pub description: String,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(
        user_id: u64,
        task_id: u64,
        description: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            user_id,
            task_id,
            description: description.into(),
            status,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub user_id: u64,
    pub task_id: u64,
    pub note_id: u64,
    pub text: String,
}

impl Note {
    pub fn new(user_id: u64, task_id: u64, note_id: u64, text: impl Into<String>) -> Self {
        Self {
            user_id,
            task_id,
            note_id,
            text: text.into(),
        }
    }
}

/// Two record types fetched in one backend call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsersAndTasks {
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
}
