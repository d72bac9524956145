// ABOUTME: Bounded registry of server-held sessions keyed by UUID
// ABOUTME: Least recently used sessions are evicted once capacity is reached
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::Session;
use crate::engine::{Engine, Phase};
use crate::models::Cart;

/// Shared handle to one session; the mutex serializes its actions
pub type SessionHandle = Arc<Mutex<Session>>;

/// A registered session with its published phase
#[derive(Clone)]
pub struct SessionEntry {
    /// Lock-guarded session
    pub handle: SessionHandle,
    /// Phase readable while an action holds the lock
    pub phase: watch::Receiver<Phase>,
}

impl SessionEntry {
    /// Last published phase
    #[must_use]
    pub fn published_phase(&self) -> Phase {
        *self.phase.borrow()
    }
}

/// Sessions held by the server
pub struct SessionRegistry {
    engine: Arc<Engine>,
    sessions: RwLock<LruCache<Uuid, SessionEntry>>,
}

impl SessionRegistry {
    /// Fallback capacity when zero is requested
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Registry holding at most `capacity` sessions over `engine`
    #[must_use]
    pub fn new(engine: Arc<Engine>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            engine,
            sessions: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Open a session; returns its id and handle
    pub async fn create(&self) -> (Uuid, SessionEntry) {
        let id = Uuid::new_v4();
        let session = Session::new(Arc::clone(&self.engine), Cart::default());
        let entry = SessionEntry {
            phase: session.watch_phase(),
            handle: Arc::new(Mutex::new(session)),
        };

        // LruCache evicts the least recently used entry on push when full
        if let Some((evicted, _)) = self
            .sessions
            .write()
            .await
            .push(id, entry.clone())
        {
            if evicted != id {
                info!(session.id = %evicted, "Evicted least recently used session");
            }
        }

        debug!(session.id = %id, "Session created");
        (id, entry)
    }

    /// Entry for `id`, marking it recently used
    pub async fn get(&self, id: &Uuid) -> Option<SessionEntry> {
        // LruCache::get is mutable (updates access order)
        self.sessions.write().await.get(id).cloned()
    }

    /// Drop session `id`; returns whether it existed
    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.pop(id).is_some();
        if removed {
            debug!(session.id = %id, "Session closed");
        }
        removed
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no session is live
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
