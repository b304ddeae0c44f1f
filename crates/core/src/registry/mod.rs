//! Typed service registry.
//!
//! Services are registered on a [`ServiceCollection`] and frozen into an
//! immutable [`ServiceRegistry`]. Every registration carries a [`Lifetime`]:
//!
//! - `Singleton`: constructed on first resolution, then shared for the
//!   lifetime of the registry
//! - `Transient`: constructed anew on every resolution
//!
//! Factories receive the registry and may resolve their own dependencies.
//! Page types additionally carry a [`Route`] so the navigator can announce
//! them.

mod collection;
mod wait_graph;

pub use collection::ServiceCollection;

use ahon_api::{BoxError, RegistryError, RegistryResult, Route};
use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use wait_graph::WaitGraph;

/// Erased instance. Always holds an `Arc<T>` for the registered `T`, which
/// lets unsized services (`dyn Trait`) share the same storage.
pub(crate) type Instance = Box<dyn Any + Send + Sync>;

pub(crate) type Factory =
    Arc<dyn Fn(&ServiceRegistry) -> Result<Instance, BoxError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lifetime {
    Singleton,
    Transient,
}

pub(crate) struct Registration {
    pub(crate) type_name: &'static str,
    pub(crate) lifetime: Lifetime,
    pub(crate) factory: Factory,
    pub(crate) instance: OnceCell<Instance>,
}

impl Registration {
    pub(crate) fn new(type_name: &'static str, lifetime: Lifetime, factory: Factory) -> Self {
        Self {
            type_name,
            lifetime,
            factory,
            instance: OnceCell::new(),
        }
    }
}

/// Route metadata of a registered page type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRoute {
    pub route: Route,
    pub type_name: &'static str,
}

thread_local! {
    /// Types currently being constructed on this thread, innermost last.
    static RESOLVING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

/// Marks a type as under construction for the duration of a resolve call.
struct ResolutionGuard(TypeId);

impl ResolutionGuard {
    fn enter(key: TypeId, type_name: &'static str) -> RegistryResult<Self> {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&key) {
                return Err(RegistryError::CircularDependency { type_name });
            }
            stack.push(key);
            Ok(Self(key))
        })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|key| *key == self.0) {
                stack.remove(pos);
            }
        });
    }
}

pub struct ServiceRegistry {
    registrations: HashMap<TypeId, Registration>,
    routes: HashMap<TypeId, PageRoute>,
    waits: WaitGraph,
}

impl ServiceRegistry {
    pub(crate) fn from_parts(
        registrations: HashMap<TypeId, Registration>,
        routes: HashMap<TypeId, PageRoute>,
    ) -> Self {
        Self {
            registrations,
            routes,
            waits: WaitGraph::default(),
        }
    }

    /// Resolve an instance of `T` honoring its registered lifetime.
    ///
    /// Fails with `UnregisteredType` without constructing anything when `T`
    /// has no registration. A failed singleton construction is not cached;
    /// the next call tries again.
    ///
    /// Dependency cycles fail with `CircularDependency`, including cycles
    /// between singletons whose construction started on different threads.
    pub fn resolve<T>(&self) -> RegistryResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();
        let registration = self
            .registrations
            .get(&key)
            .ok_or(RegistryError::UnregisteredType { type_name })?;

        let _guard = ResolutionGuard::enter(key, type_name)?;

        match registration.lifetime {
            Lifetime::Singleton => {
                let _waiting = match registration.instance.get() {
                    Some(_) => None,
                    None => Some(self.waits.wait_for(key, type_name)?),
                };
                let instance = registration.instance.get_or_try_init(|| {
                    let _building = self.waits.build(key);
                    self.construct(registration)
                })?;
                instance
                    .downcast_ref::<Arc<T>>()
                    .cloned()
                    .ok_or(RegistryError::TypeMismatch { type_name })
            }
            Lifetime::Transient => {
                let instance = self.construct(registration)?;
                instance
                    .downcast::<Arc<T>>()
                    .map(|shared| *shared)
                    .map_err(|_| RegistryError::TypeMismatch { type_name })
            }
        }
    }

    fn construct(&self, registration: &Registration) -> RegistryResult<Instance> {
        tracing::trace!("Constructing {}", registration.type_name);
        (registration.factory)(self).map_err(|source| {
            // A cycle is reported as-is instead of nested construction errors
            match source.downcast::<RegistryError>() {
                Ok(inner) if matches!(*inner, RegistryError::CircularDependency { .. }) => *inner,
                Ok(inner) => RegistryError::Construction {
                    type_name: registration.type_name,
                    source: inner,
                },
                Err(source) => RegistryError::Construction {
                    type_name: registration.type_name,
                    source,
                },
            }
        })
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.registrations.contains_key(&TypeId::of::<T>())
    }

    pub fn lifetime_of<T: ?Sized + 'static>(&self) -> Option<Lifetime> {
        self.registrations
            .get(&TypeId::of::<T>())
            .map(|registration| registration.lifetime)
    }

    /// Route metadata for a page type, if it was registered as a page.
    pub fn route_of<T: ?Sized + 'static>(&self) -> Option<Route> {
        self.routes.get(&TypeId::of::<T>()).map(|page| page.route)
    }

    /// All registered page routes, ordered by route.
    pub fn routes(&self) -> Vec<PageRoute> {
        let mut routes: Vec<PageRoute> = self.routes.values().copied().collect();
        routes.sort_by_key(|page| page.route);
        routes
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self
            .registrations
            .values()
            .map(|registration| (registration.type_name, registration.lifetime))
            .collect();
        names.sort();
        f.debug_struct("ServiceRegistry")
            .field("registrations", &names)
            .field("routes", &self.routes())
            .finish()
    }
}
