//! Mock backend for exercising stores without a real data service.
//!
//! Provides `MockBackend` - an in-memory record database whose every
//! operation resolves after an artificial delay, standing in for a remote
//! API. Reducers await these calls; the delay is the suspension point that
//! makes overlapping commits observable.
//!
//! The database itself is copy-on-write: each mutation builds a new value
//! and swaps it in, so a reader never observes a half-applied change.

pub mod records;

pub use records::{Note, Task, TaskStatus, User, UsersAndTasks};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Clone, Debug, Default)]
struct Database {
    users: Vec<User>,
    tasks: Vec<Task>,
    notes: Vec<Note>,
}

/// Simulated remote data service.
///
/// Mutating operations return a plain `true`/`false` acknowledgement after
/// the delay, like a status-only HTTP response; fetches return plain
/// values. Stored records for `add_*` get a fresh id from an internal
/// counter - the caller's copy is not echoed back.
pub struct MockBackend {
    db: Mutex<Arc<Database>>,
    next_id: AtomicU64,
    delay: Duration,
}

impl MockBackend {
    /// Seeded backend with the default half-second delay.
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(500))
    }

    /// Seeded backend with a custom delay. Tests use short delays to keep
    /// suspension points real but cheap.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            db: Mutex::new(Arc::new(Self::seeded())),
            // Seeded ids stop at 7; generated ids start at 101.
            next_id: AtomicU64::new(100),
            delay,
        }
    }

    fn seeded() -> Database {
        Database {
            users: vec![User::new(4, "Jack"), User::new(7, "Jill")],
            tasks: vec![
                Task::new(4, 2, "Go over the hill", TaskStatus::Complete),
                Task::new(4, 3, "Jump over the candlestick", TaskStatus::InProgress),
                Task::new(7, 6, "Also jump over the candlestick", TaskStatus::Complete),
            ],
            notes: vec![Note::new(4, 3, 1, "Jack fell")],
        }
    }

    fn lock(&self) -> MutexGuard<'_, Arc<Database>> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }

    /// Copy-on-write mutation: clone the current database, apply the edit,
    /// swap the new value in only if the edit reports success.
    fn mutate(&self, apply: impl FnOnce(&mut Database) -> bool) -> bool {
        let mut guard = self.lock();
        let mut next = (**guard).clone();
        let applied = apply(&mut next);
        if applied {
            *guard = Arc::new(next);
        }
        applied
    }

    // ==================== Fetches ====================

    /// Users and tasks in one call (a fetch returning two record types).
    pub async fn get_users_and_tasks(&self) -> UsersAndTasks {
        self.pause().await;
        let db = self.lock().clone();
        UsersAndTasks {
            users: db.users.clone(),
            tasks: db.tasks.clone(),
        }
    }

    pub async fn get_notes(&self) -> Vec<Note> {
        self.pause().await;
        self.lock().notes.clone()
    }

    // ==================== Users ====================

    pub async fn add_user(&self, user: User) -> bool {
        self.pause().await;
        let user_id = self.next_id();
        self.mutate(|db| {
            db.users.push(User { user_id, ..user });
            true
        })
    }

    pub async fn update_user(&self, user_id: u64, user: User) -> bool {
        self.pause().await;
        self.mutate(|db| {
            match db.users.iter_mut().find(|u| u.user_id == user_id) {
                Some(found) => {
                    *found = user;
                    true
                }
                None => false,
            }
        })
    }

    pub async fn remove_user(&self, user_id: u64) -> bool {
        self.pause().await;
        self.mutate(|db| {
            let before = db.users.len();
            db.users.retain(|u| u.user_id != user_id);
            db.users.len() < before
        })
    }

    // ==================== Tasks ====================

    pub async fn add_task(&self, task: Task) -> bool {
        self.pause().await;
        let task_id = self.next_id();
        self.mutate(|db| {
            db.tasks.push(Task { task_id, ..task });
            true
        })
    }

    pub async fn update_task(&self, task_id: u64, task: Task) -> bool {
        self.pause().await;
        self.mutate(|db| {
            match db.tasks.iter_mut().find(|t| t.task_id == task_id) {
                Some(found) => {
                    *found = task;
                    true
                }
                None => false,
            }
        })
    }

    pub async fn remove_task(&self, task_id: u64) -> bool {
        self.pause().await;
        self.mutate(|db| {
            let before = db.tasks.len();
            db.tasks.retain(|t| t.task_id != task_id);
            db.tasks.len() < before
        })
    }

    // ==================== Notes ====================

    pub async fn add_note(&self, note: Note) -> bool {
        self.pause().await;
        let note_id = self.next_id();
        self.mutate(|db| {
            db.notes.push(Note { note_id, ..note });
            true
        })
    }

    pub async fn update_note(&self, note_id: u64, note: Note) -> bool {
        self.pause().await;
        self.mutate(|db| {
            match db.notes.iter_mut().find(|n| n.note_id == note_id) {
                Some(found) => {
                    *found = note;
                    true
                }
                None => false,
            }
        })
    }

    pub async fn remove_note(&self, note_id: u64) -> bool {
        self.pause().await;
        self.mutate(|db| {
            let before = db.notes.len();
            db.notes.retain(|n| n.note_id != note_id);
            db.notes.len() < before
        })
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn backend() -> MockBackend {
        MockBackend::with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn seeded_fixture_is_present() {
        let backend = backend();
        let bundle = backend.get_users_and_tasks().await;
        assert_eq!(bundle.users.len(), 2);
        assert_eq!(bundle.users[0].user_name, "Jack");
        assert_eq!(bundle.tasks.len(), 3);
        assert_eq!(backend.get_notes().await.len(), 1);
    }

    #[tokio::test]
    async fn add_user_stores_a_copy_with_a_fresh_id() {
        let backend = backend();
        assert!(backend.add_user(User::new(44, "Bill")).await);

        let users = backend.get_users_and_tasks().await.users;
        let bill = users.iter().find(|u| u.user_name == "Bill").unwrap();
        // The stored copy got a generated id, not the caller's 44.
        assert_eq!(bill.user_id, 101);
    }

    #[tokio::test]
    async fn update_and_remove_acknowledge_only_existing_records() {
        let backend = backend();
        assert!(backend.update_user(4, User::new(4, "Jack Sr.")).await);
        assert!(!backend.update_user(999, User::new(999, "Nobody")).await);

        assert!(backend.remove_user(7).await);
        assert!(!backend.remove_user(7).await);

        let users = backend.get_users_and_tasks().await.users;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_name, "Jack Sr.");
    }

    #[tokio::test]
    async fn failed_mutations_leave_the_database_untouched() {
        let backend = backend();
        let before = backend.get_users_and_tasks().await.users;
        assert!(!backend.remove_user(999).await);
        assert_eq!(backend.get_users_and_tasks().await.users, before);
    }

    #[tokio::test]
    async fn operations_resolve_after_the_configured_delay() {
        let backend = MockBackend::with_delay(Duration::from_millis(50));
        let start = Instant::now();
        backend.get_notes().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
