//! In-memory [`HandleRepository`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{HandleRepository, HandleRepositoryError};
use crate::domain::{AccountId, Handle};

#[derive(Debug, Default)]
struct Bindings {
    by_account: HashMap<AccountId, Handle>,
    by_handle: HashMap<Handle, AccountId>,
}

/// Binding store backed by two maps kept in lockstep.
#[derive(Debug, Default)]
pub struct InMemoryHandleRepository {
    bindings: Mutex<Bindings>,
}

impl InMemoryHandleRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with `handles` already bound to synthetic accounts.
    ///
    /// Lets tests simulate a crowded handle space.
    pub fn with_reserved_handles(handles: impl IntoIterator<Item = Handle>) -> Self {
        let mut bindings = Bindings::default();
        for (index, handle) in handles.into_iter().enumerate() {
            let Ok(owner) = AccountId::parse(&format!("9{index:020}")) else {
                continue;
            };
            bindings.by_account.insert(owner.clone(), handle.clone());
            bindings.by_handle.insert(handle, owner);
        }
        Self {
            bindings: Mutex::new(bindings),
        }
    }

    /// Number of bindings held.
    pub fn len(&self) -> usize {
        self.lock().map(|bindings| bindings.by_account.len()).unwrap_or(0)
    }

    /// Whether the store holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Bindings>, HandleRepositoryError> {
        self.bindings
            .lock()
            .map_err(|_| HandleRepositoryError::query("in-memory binding store is poisoned"))
    }
}

#[async_trait]
impl HandleRepository for InMemoryHandleRepository {
    async fn find_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Handle>, HandleRepositoryError> {
        Ok(self.lock()?.by_account.get(account_id).cloned())
    }

    async fn insert(
        &self,
        account_id: &AccountId,
        handle: &Handle,
    ) -> Result<(), HandleRepositoryError> {
        let mut bindings = self.lock()?;
        if bindings.by_account.contains_key(account_id) {
            return Err(HandleRepositoryError::duplicate_account(account_id.as_str()));
        }
        if bindings.by_handle.contains_key(handle) {
            return Err(HandleRepositoryError::duplicate_handle(handle.as_str()));
        }
        bindings
            .by_account
            .insert(account_id.clone(), handle.clone());
        bindings.by_handle.insert(handle.clone(), account_id.clone());
        Ok(())
    }
}
