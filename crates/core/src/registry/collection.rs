use super::{Factory, Instance, Lifetime, PageRoute, Registration, ServiceRegistry};
use ahon_api::{BoxError, Page, Route};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Mutable registration phase of the service registry.
///
/// Registering a type twice replaces the earlier registration.
#[derive(Default)]
pub struct ServiceCollection {
    registrations: HashMap<TypeId, Registration>,
    routes: HashMap<TypeId, PageRoute>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already constructed instance as a singleton.
    pub fn add_singleton<T>(&mut self, value: T) -> &mut Self
    where
        T: Send + Sync + 'static,
    {
        self.add_trait_singleton::<T>(Arc::new(value))
    }

    /// Register a singleton built lazily on first resolution.
    pub fn add_singleton_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceRegistry) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.add_trait_factory::<T, _>(Lifetime::Singleton, move |registry| {
            factory(registry).map(Arc::new)
        })
    }

    /// Register a transient built through `Default`.
    pub fn add_transient<T>(&mut self) -> &mut Self
    where
        T: Default + Send + Sync + 'static,
    {
        self.add_transient_factory::<T, _>(|_| Ok(T::default()))
    }

    pub fn add_transient_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceRegistry) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.add_trait_factory::<T, _>(Lifetime::Transient, move |registry| {
            factory(registry).map(Arc::new)
        })
    }

    /// Register a shared instance, typically behind a trait object
    /// (`Arc<dyn Notifier>`).
    pub fn add_trait_singleton<T>(&mut self, value: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.add_trait_factory::<T, _>(Lifetime::Singleton, move |_| Ok(value.clone()))
    }

    /// Register a factory producing `Arc<T>`; `T` may be unsized.
    pub fn add_trait_factory<T, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceRegistry) -> Result<Arc<T>, BoxError> + Send + Sync + 'static,
    {
        let erased: Factory = Arc::new(move |registry: &ServiceRegistry| {
            factory(registry).map(|instance| Box::new(instance) as Instance)
        });
        self.insert::<T>(Registration::new(
            std::any::type_name::<T>(),
            lifetime,
            erased,
        ))
    }

    /// Register a page type together with its route.
    ///
    /// Pages are normally transient: a singleton page is disposed every time
    /// it stops being current and initialized again when it comes back.
    pub fn add_page<P, F>(&mut self, route: Route, lifetime: Lifetime, factory: F) -> &mut Self
    where
        P: Page,
        F: Fn(&ServiceRegistry) -> Result<P, BoxError> + Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<P>();
        if let Some(existing) = self.routes.values().find(|page| page.route == route) {
            if existing.type_name != type_name {
                tracing::warn!(
                    "Route {} is shared by {} and {}",
                    route,
                    existing.type_name,
                    type_name
                );
            }
        }
        self.routes
            .insert(TypeId::of::<P>(), PageRoute { route, type_name });
        self.add_trait_factory::<P, _>(lifetime, move |registry| factory(registry).map(Arc::new))
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.registrations.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn build(self) -> ServiceRegistry {
        tracing::debug!(
            "Building service registry with {} registrations ({} pages)",
            self.registrations.len(),
            self.routes.len()
        );
        ServiceRegistry::from_parts(self.registrations, self.routes)
    }

    fn insert<T: ?Sized + 'static>(&mut self, registration: Registration) -> &mut Self {
        if let Some(previous) = self
            .registrations
            .insert(TypeId::of::<T>(), registration)
        {
            tracing::debug!("Replaced registration for {}", previous.type_name);
        }
        self
    }
}
