//! Flat, insertion-ordered collection of validated events.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;
use walletfy_domain::{Event, Identifiable};

use crate::CoreError;

/// Holds every recorded event. Ids are unique within a store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an already-validated batch.
    pub fn from_events(events: Vec<Event>) -> Result<Self, CoreError> {
        let mut store = Self::new();
        store.replace_all(events)?;
        Ok(store)
    }

    /// Appends a new event. Fails with [`CoreError::DuplicateId`] if the id is taken.
    pub fn add(&mut self, event: Event) -> Result<(), CoreError> {
        if self.contains(event.id) {
            return Err(CoreError::DuplicateId(event.id));
        }
        debug!(id = %event.id, "event added");
        self.events.push(event);
        Ok(())
    }

    /// Replaces the event sharing `event.id`, keeping its position.
    ///
    /// Unknown ids are reported as [`CoreError::NotFound`] and leave the store untouched.
    pub fn update(&mut self, event: Event) -> Result<(), CoreError> {
        let index = self
            .position(event.id)
            .ok_or(CoreError::NotFound(event.id))?;
        debug!(id = %event.id, "event updated");
        self.events[index] = event;
        Ok(())
    }

    /// Removes the event identified by `id`, returning it.
    pub fn remove(&mut self, id: Uuid) -> Result<Event, CoreError> {
        let index = self.position(id).ok_or(CoreError::NotFound(id))?;
        debug!(%id, "event removed");
        Ok(self.events.remove(index))
    }

    /// Swaps in a whole new collection, as done when reloading from storage.
    ///
    /// Schema validation is the caller's job; a batch with repeated ids is refused
    /// and the current contents are kept.
    pub fn replace_all(&mut self, events: Vec<Event>) -> Result<(), CoreError> {
        let mut seen = HashSet::with_capacity(events.len());
        if let Some(duplicate) = events.iter().find(|event| !seen.insert(event.id)) {
            return Err(CoreError::DuplicateId(duplicate.id));
        }
        debug!(count = events.len(), "event store replaced");
        self.events = events;
        Ok(())
    }

    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: Uuid) -> Option<&Event> {
        self.position(id).map(|index| &self.events[index])
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.events.iter().position(|event| event.id() == id)
    }
}
