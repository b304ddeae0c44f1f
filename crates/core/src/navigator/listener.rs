use ahon_api::{NavigationError, NavigationEvent, NavigationListener, NavigationResult};
use std::sync::{Arc, Mutex, PoisonError, Weak};

enum SlotState {
    Vacant,
    Attached(Arc<dyn NavigationListener>),
    Detached,
}

/// Single-assignment listener slot.
///
/// Once a listener has been registered the slot never accepts another one,
/// even after the first was detached.
pub(crate) struct ListenerSlot {
    state: Arc<Mutex<SlotState>>,
}

impl ListenerSlot {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SlotState::Vacant)),
        }
    }

    pub(crate) fn register(
        &self,
        listener: Arc<dyn NavigationListener>,
    ) -> NavigationResult<ListenerHandle> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !matches!(*state, SlotState::Vacant) {
            return Err(NavigationError::ListenerAlreadyRegistered);
        }
        *state = SlotState::Attached(listener);
        Ok(ListenerHandle {
            slot: Arc::downgrade(&self.state),
        })
    }

    /// Deliver the event. The lock is released before the listener runs.
    pub(crate) fn notify(&self, event: &NavigationEvent) {
        let listener = {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            match &*state {
                SlotState::Attached(listener) => Some(listener.clone()),
                SlotState::Vacant | SlotState::Detached => None,
            }
        };
        if let Some(listener) = listener {
            listener.on_navigated(event);
        }
    }
}

/// Returned by `Navigator::subscribe`. Dropping the handle keeps the listener
/// attached; call [`ListenerHandle::detach`] to stop notifications.
#[derive(Debug)]
pub struct ListenerHandle {
    slot: Weak<Mutex<SlotState>>,
}

impl ListenerHandle {
    pub fn detach(self) {
        if let Some(state) = self.slot.upgrade() {
            *state.lock().unwrap_or_else(PoisonError::into_inner) = SlotState::Detached;
        }
    }

    pub fn is_attached(&self) -> bool {
        self.slot.upgrade().is_some_and(|state| {
            matches!(
                *state.lock().unwrap_or_else(PoisonError::into_inner),
                SlotState::Attached(_)
            )
        })
    }
}
