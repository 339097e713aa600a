use parking_lot::RwLock;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// In-memory user list for the demo endpoints. Nothing is persisted across
/// restarts; the lock keeps appends safe under parallel request handling.
pub struct UserRepo {
    users: RwLock<Vec<User>>,
}

impl UserRepo {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// Repo seeded with the demo users the frontend expects on first load.
    pub fn with_demo_users() -> Self {
        let seed = vec![
            User {
                id: 1,
                name: "John Doe".into(),
                email: "john@example.com".into(),
            },
            User {
                id: 2,
                name: "Jane Smith".into(),
                email: "jane@example.com".into(),
            },
            User {
                id: 3,
                name: "Bob Johnson".into(),
                email: "bob@example.com".into(),
            },
        ];
        Self {
            users: RwLock::new(seed),
        }
    }

    pub fn all(&self) -> Vec<User> {
        self.users.read().clone()
    }

    /// Append a user with a timestamp-derived id (current Unix milliseconds),
    /// bumped past any collision so ids stay unique within the process.
    pub fn create(&self, name: &str, email: &str) -> User {
        let mut users = self.users.write();
        let mut id = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        while users.iter().any(|u| u.id == id) {
            id += 1;
        }
        let user = User {
            id,
            name: name.to_string(),
            email: email.to_string(),
        };
        users.push(user.clone());
        user
    }
}

impl Default for UserRepo {
    fn default() -> Self {
        Self::new()
    }
}
