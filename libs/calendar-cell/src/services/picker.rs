use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{CalendarConfig, NavigationDirection, PointerEvent, Region};
use crate::services::window::CalendarWindow;

/// Live "pointer outside region" listeners. Each registration is owned by an
/// [`OutsideClickGuard`] and removed when that guard is dropped.
#[derive(Clone, Default)]
pub struct OutsideClickRegistry {
    next_id: Arc<AtomicU64>,
    listeners: Arc<Mutex<HashMap<u64, Region>>>,
}

impl OutsideClickRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, region: Region) -> OutsideClickGuard {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, region);

        OutsideClickGuard {
            id,
            region,
            registry: self.clone(),
        }
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn deregister(&self, id: u64) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

pub struct OutsideClickGuard {
    id: u64,
    region: Region,
    registry: OutsideClickRegistry,
}

impl OutsideClickGuard {
    pub fn is_outside(&self, event: PointerEvent) -> bool {
        !self.region.contains(event)
    }
}

impl Drop for OutsideClickGuard {
    fn drop(&mut self) {
        self.registry.deregister(self.id);
    }
}

type ChangeCallback = Box<dyn FnMut(&str) + Send>;

/// Drop-down date picker: a [`CalendarWindow`] plus open/closed state. A
/// successful selection reports the canonical date to `on_change` and closes
/// the picker.
pub struct DatePicker {
    window: CalendarWindow,
    region: Region,
    registry: OutsideClickRegistry,
    outside_listener: Option<OutsideClickGuard>,
    on_change: ChangeCallback,
}

impl DatePicker {
    pub fn new(
        config: CalendarConfig,
        region: Region,
        registry: OutsideClickRegistry,
        on_change: impl FnMut(&str) + Send + 'static,
    ) -> Self {
        Self {
            window: CalendarWindow::from_config(&config),
            region,
            registry,
            outside_listener: None,
            on_change: Box::new(on_change),
        }
    }

    pub fn window(&self) -> &CalendarWindow {
        &self.window
    }

    pub fn is_open(&self) -> bool {
        self.outside_listener.is_some()
    }

    pub fn open(&mut self) {
        if self.outside_listener.is_none() {
            self.outside_listener = Some(self.registry.register(self.region));
        }
    }

    pub fn close(&mut self) {
        self.outside_listener = None;
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn navigate(&mut self, direction: NavigationDirection) -> bool {
        self.window.navigate(direction)
    }

    /// Returns whether the selection was accepted.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        match self.window.select_date(date) {
            Some(canonical) => {
                (self.on_change)(&canonical);
                self.close();
                true
            }
            None => false,
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let outside = self
            .outside_listener
            .as_ref()
            .is_some_and(|listener| listener.is_outside(event));

        if outside {
            debug!("Pointer at ({}, {}) outside picker, closing", event.x, event.y);
            self.close();
        }
    }
}
