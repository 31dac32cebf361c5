use std::sync::{Arc, RwLock};

/// Shared slot for the bearer token.
///
/// Clones share the slot, so clearing it after a 401 is seen by every
/// clone of the client that carries it.
#[derive(Clone, Default, Debug)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(token.filter(|t| !t.is_empty()))),
        }
    }

    pub fn get(&self) -> Option<String> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        match self.inner.write() {
            Ok(mut guard) => *guard = Some(token),
            Err(poisoned) => *poisoned.into_inner() = Some(token),
        }
    }

    pub fn clear(&self) {
        match self.inner.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }
}
