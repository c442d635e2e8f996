//! Account registration and session handling over the key-value store.
//! Passwords are stored and compared as plain text; hardening local
//! credentials on a single-user device is explicitly out of scope.

use anyhow::{bail, Result};
use tracing::info;

use crate::{
    storage::{entities::UserEntity, kv_store::KvStore},
    utils::clock::Clock,
};

const USERS_KEY: &str = "users";
const SESSION_KEY: &str = "session";

pub struct AccountService {
    store: KvStore,
    clock: Box<dyn Clock>,
}

impl AccountService {
    pub fn new(store: KvStore, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<UserEntity> {
        let name = name.trim();
        if name.len() < 2 {
            bail!("Name must be at least 2 characters long");
        }
        let email = email.trim().to_lowercase();
        if !looks_like_email(&email) {
            bail!("Please enter a valid email address");
        }
        if password.len() < 6 {
            bail!("Password must be at least 6 characters long");
        }

        let user = UserEntity {
            id: self.clock.now().timestamp_millis().to_string().into(),
            name: name.into(),
            email: email.as_str().into(),
            password: password.into(),
            created_at: self.clock.now(),
        };

        self.store
            .update(USERS_KEY, |mut users: Vec<UserEntity>| {
                if users.iter().any(|u| *u.email == *email) {
                    bail!("User with this email already exists");
                }
                users.push(user.clone());
                Ok(users)
            })
            .await?;

        self.store.set(SESSION_KEY, &user).await?;
        info!("Registered user {}", user.email);
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserEntity> {
        let email = email.trim().to_lowercase();
        let users = self
            .store
            .get::<Vec<UserEntity>>(USERS_KEY)
            .await?
            .unwrap_or_default();

        let Some(user) = users
            .into_iter()
            .find(|u| *u.email == *email && *u.password == *password)
        else {
            bail!("Invalid email or password");
        };

        self.store.set(SESSION_KEY, &user).await?;
        info!("Logged in as {}", user.email);
        Ok(user)
    }

    pub async fn logout(&self) -> Result<()> {
        self.store.remove(SESSION_KEY).await
    }

    /// The persisted session, if a user is logged in.
    pub async fn current_user(&self) -> Result<Option<UserEntity>> {
        self.store.get(SESSION_KEY).await
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
