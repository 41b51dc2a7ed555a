// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Service registration notifications

use std::collections::HashSet;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, info};

/// Receives a callback whenever a watched service implementation registers
pub trait ServiceNotification: Send + Sync {
    /// `preexisting` is set when the service was already registered before
    /// the listener was attached.
    fn on_registration(&self, service_name: &str, instance_name: &str, preexisting: bool);
}

/// Source of registration notifications
pub trait ServiceManager {
    /// Watch `service_name`/`instance_name` on behalf of `listener`.
    /// An empty instance name watches every instance. Managers hold the
    /// listener weakly; dropping the last strong reference unsubscribes it.
    fn register_for_notifications(
        &self,
        service_name: &str,
        instance_name: &str,
        listener: Arc<dyn ServiceNotification>,
    ) -> bool;
}

struct Subscription {
    service_name: String,
    instance_name: String,
    listener: Weak<dyn ServiceNotification>,
}

impl Subscription {
    fn is_alive(&self) -> bool {
        self.listener.strong_count() > 0
    }

    fn matches(&self, service_name: &str, instance_name: &str) -> bool {
        self.service_name == service_name
            && (self.instance_name.is_empty() || self.instance_name == instance_name)
    }
}

#[derive(Default)]
struct RegistryState {
    services: HashSet<(String, String)>,
    subscriptions: Vec<Subscription>,
}

impl RegistryState {
    fn prune(&mut self) {
        let before = self.subscriptions.len();
        self.subscriptions.retain(Subscription::is_alive);
        let dropped = before - self.subscriptions.len();
        if dropped > 0 {
            debug!("Pruned {} dropped listener(s)", dropped);
        }
    }
}

/// In-process service manager
///
/// Tracks which service instances are registered and fans registration
/// events out to subscribed listeners. Listeners are held weakly and
/// pruned once dropped. They are invoked without the registry lock held,
/// so a callback may call back into the registry.
#[derive(Default)]
pub struct ServiceRegistry {
    state: Mutex<RegistryState>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) a service instance and notify listeners.
    ///
    /// Returns the number of listeners notified.
    pub fn register_service(&self, service_name: &str, instance_name: &str) -> usize {
        let (preexisting, listeners) = {
            let mut state = self.state.lock();
            state.prune();
            let fresh = state
                .services
                .insert((service_name.to_string(), instance_name.to_string()));
            let listeners: Vec<_> = state
                .subscriptions
                .iter()
                .filter(|s| s.matches(service_name, instance_name))
                .filter_map(|s| s.listener.upgrade())
                .collect();
            (!fresh, listeners)
        };

        info!(
            "Service registered: {}/{} (preexisting: {}, listeners: {})",
            service_name,
            instance_name,
            preexisting,
            listeners.len()
        );

        for listener in &listeners {
            listener.on_registration(service_name, instance_name, preexisting);
        }
        listeners.len()
    }

    /// Forget a service instance, e.g. after its process died
    pub fn unregister_service(&self, service_name: &str, instance_name: &str) -> bool {
        let removed = self
            .state
            .lock()
            .services
            .remove(&(service_name.to_string(), instance_name.to_string()));
        if removed {
            info!("Service unregistered: {}/{}", service_name, instance_name);
        }
        removed
    }

    pub fn is_registered(&self, service_name: &str, instance_name: &str) -> bool {
        self.state
            .lock()
            .services
            .contains(&(service_name.to_string(), instance_name.to_string()))
    }

    /// Drop every subscription held for `listener`. Returns how many were removed.
    pub fn unregister_for_notifications(&self, listener: &Arc<dyn ServiceNotification>) -> usize {
        let target = Arc::downgrade(listener);
        let mut state = self.state.lock();
        let before = state.subscriptions.len();
        state
            .subscriptions
            .retain(|s| s.is_alive() && !Weak::ptr_eq(&s.listener, &target));
        before - state.subscriptions.len()
    }

    /// Number of live subscriptions
    pub fn subscription_count(&self) -> usize {
        let mut state = self.state.lock();
        state.prune();
        state.subscriptions.len()
    }
}

impl ServiceManager for ServiceRegistry {
    /// Instances already registered are reported to the new listener right
    /// away with `preexisting` set. Subscribing the same listener to the same
    /// service and instance again is a no-op.
    fn register_for_notifications(
        &self,
        service_name: &str,
        instance_name: &str,
        listener: Arc<dyn ServiceNotification>,
    ) -> bool {
        let existing: Vec<String> = {
            let mut state = self.state.lock();
            state.prune();
            let subscription = Subscription {
                service_name: service_name.to_string(),
                instance_name: instance_name.to_string(),
                listener: Arc::downgrade(&listener),
            };
            let duplicate = state.subscriptions.iter().any(|s| {
                s.service_name == subscription.service_name
                    && s.instance_name == subscription.instance_name
                    && Weak::ptr_eq(&s.listener, &subscription.listener)
            });
            if duplicate {
                return true;
            }
            let existing = state
                .services
                .iter()
                .filter(|(s, i)| subscription.matches(s, i))
                .map(|(_, i)| i.clone())
                .collect();
            state.subscriptions.push(subscription);
            existing
        };

        debug!(
            "Listener subscribed to {}/{} ({} preexisting)",
            service_name,
            instance_name,
            existing.len()
        );

        for instance in &existing {
            listener.on_registration(service_name, instance, true);
        }
        true
    }
}
