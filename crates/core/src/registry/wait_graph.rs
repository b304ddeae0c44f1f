//! Cross-thread cycle detection for singleton construction.
//!
//! A thread constructing singleton `A` that needs singleton `B`, while another
//! thread constructs `B` and needs `A`, would block forever on the two
//! `OnceCell`s. Every thread records which singleton it builds and which one
//! it is about to wait for; a wait that closes a loop is refused.

use ahon_api::{RegistryError, RegistryResult};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

#[derive(Default)]
struct Edges {
    /// Singleton -> thread running its factory.
    builders: HashMap<TypeId, ThreadId>,
    /// Thread -> singleton it waits on (or is about to build).
    waits: HashMap<ThreadId, TypeId>,
}

#[derive(Default)]
pub(crate) struct WaitGraph {
    edges: Mutex<Edges>,
}

impl WaitGraph {
    fn edges(&self) -> MutexGuard<'_, Edges> {
        self.edges.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Announce that the current thread is about to wait on `key`.
    pub(crate) fn wait_for(
        &self,
        key: TypeId,
        type_name: &'static str,
    ) -> RegistryResult<Waiting<'_>> {
        let me = thread::current().id();
        let mut edges = self.edges();

        let mut next = edges.builders.get(&key).copied();
        while let Some(thread) = next {
            if thread == me {
                return Err(RegistryError::CircularDependency { type_name });
            }
            next = edges
                .waits
                .get(&thread)
                .and_then(|wanted| edges.builders.get(wanted))
                .copied();
        }

        edges.waits.insert(me, key);
        Ok(Waiting { graph: self, thread: me })
    }

    /// Mark the current thread as the builder of `key`.
    pub(crate) fn build(&self, key: TypeId) -> Building<'_> {
        let me = thread::current().id();
        let mut edges = self.edges();
        edges.waits.remove(&me);
        edges.builders.insert(key, me);
        Building { graph: self, key }
    }
}

pub(crate) struct Waiting<'a> {
    graph: &'a WaitGraph,
    thread: ThreadId,
}

impl Drop for Waiting<'_> {
    fn drop(&mut self) {
        self.graph.edges().waits.remove(&self.thread);
    }
}

pub(crate) struct Building<'a> {
    graph: &'a WaitGraph,
    key: TypeId,
}

impl Drop for Building<'_> {
    fn drop(&mut self) {
        self.graph.edges().builders.remove(&self.key);
    }
}
