pub mod migrations;
pub mod queries;

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;
use hotline_types::models::{AdminStatus, Message, User};
use tracing::info;

/// Default display name of the seeded admin account.
pub const DEFAULT_ADMIN_NAME: &str = "Orhan";
/// Default password of the seeded admin account. Anyone who knows it can log
/// in as the admin; override it through configuration in real deployments.
pub const DEFAULT_ADMIN_PASSWORD: &str = "4499";

/// Credentials of the admin account created when the store is opened.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub password: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            name: DEFAULT_ADMIN_NAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

/// In-memory data store. Holds every user, every message and the admin
/// status record for the lifetime of the process; nothing survives a restart.
pub struct Store {
    tables: RwLock<Tables>,
}

/// Users and messages keep insertion order. `user_index` maps a user id to
/// its position in `users`.
#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) users: Vec<User>,
    pub(crate) user_index: HashMap<String, usize>,
    pub(crate) messages: Vec<Message>,
    pub(crate) admin_status: AdminStatus,
}

impl Store {
    /// Creates an empty store holding exactly one user: the admin from `seed`.
    pub fn open(seed: &AdminSeed) -> Self {
        let mut tables = Tables::default();
        let admin = queries::new_user(&seed.name, &seed.password, true);
        tables.user_index.insert(admin.id.clone(), 0);
        tables.users.push(admin);

        info!("Store initialised, seeded admin user '{}'", seed.name);
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub(crate) fn with_tables<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Tables) -> Result<T>,
    {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow::anyhow!("Store lock poisoned: {}", e))?;
        f(&tables)
    }

    pub(crate) fn with_tables_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Tables) -> Result<T>,
    {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow::anyhow!("Store lock poisoned: {}", e))?;
        f(&mut tables)
    }
}
