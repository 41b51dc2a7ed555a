// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Sensor HAL restart detection
//!
//! A [`RestartWaiter`] is attached to a [`ServiceManager`] as a
//! [`ServiceNotification`] listener. Every registration of a watched sensor
//! service sets the "restart observed" flag and wakes the thread blocked in
//! [`RestartWaiter::wait`]. The supervisor calls [`RestartWaiter::reset`]
//! before each restart it expects, then waits.
//!
//! The flag is checked and set under the same mutex, so a registration that
//! lands before `wait()` is entered is never lost.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, trace, warn};

use super::service_registry::{ServiceManager, ServiceNotification};
use crate::config::RestartConfig;

/// Lifecycle of a waiter as seen by observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaiterState {
    /// Constructed, not attached to a notification source
    Idle,
    /// Attached, no restart seen since the last reset
    Watching,
    /// A watched service registered since the last reset
    RestartDetected,
}

#[derive(Debug, Default)]
struct Flags {
    registered: bool,
    restart_observed: bool,
}

/// One-shot, resettable wait for a sensor service (re)registration
#[derive(Debug)]
pub struct RestartWaiter {
    service_names: Vec<String>,
    instance_name: String,
    flags: Mutex<Flags>,
    condition: Condvar,
}

impl RestartWaiter {
    /// Waiter for the given service names, watching every instance
    pub fn new<I, S>(service_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            service_names: service_names.into_iter().map(Into::into).collect(),
            instance_name: String::new(),
            flags: Mutex::new(Flags::default()),
            condition: Condvar::new(),
        }
    }

    pub fn from_config(config: &RestartConfig) -> Self {
        let mut waiter = Self::new(config.service_names.iter().cloned());
        waiter.instance_name = config.instance_name.clone();
        waiter
    }

    pub fn service_names(&self) -> &[String] {
        &self.service_names
    }

    pub fn watches(&self, service_name: &str) -> bool {
        self.service_names.iter().any(|n| n == service_name)
    }

    /// An empty instance name watches every instance
    pub fn watches_instance(&self, instance_name: &str) -> bool {
        self.instance_name.is_empty() || self.instance_name == instance_name
    }

    /// Subscribe to every watched service name on `manager`.
    ///
    /// Runs [`on_first_attach`](Self::on_first_attach) when at least one
    /// subscription succeeded. Returns whether the waiter is attached; an
    /// already attached waiter does not subscribe again.
    pub fn attach<M>(self: &Arc<Self>, manager: &M) -> bool
    where
        M: ServiceManager + ?Sized,
    {
        if self.is_registered() {
            return true;
        }

        let listener: Arc<dyn ServiceNotification> = self.clone();
        let mut attached = false;

        for name in &self.service_names {
            if manager.register_for_notifications(name, &self.instance_name, listener.clone()) {
                attached = true;
            } else {
                warn!("Cannot register for {} notifications", name);
            }
        }

        if attached {
            self.on_first_attach();
        }
        attached
    }

    /// Mark the waiter as attached to its notification source.
    ///
    /// Bookkeeping only; does not influence `wait()` or `reset()`.
    pub fn on_first_attach(&self) {
        let mut flags = self.flags.lock();
        if !flags.registered {
            flags.registered = true;
            debug!("Restart waiter attached for {:?}", self.service_names);
        }
    }

    /// Forget any restart observed so far
    pub fn reset(&self) {
        let mut flags = self.flags.lock();
        if flags.restart_observed {
            debug!("Restart waiter reset");
        }
        flags.restart_observed = false;
    }

    /// Block until a restart is observed. Always returns `true`.
    ///
    /// Returns immediately if a restart was observed since the last reset.
    /// There is no timeout: if the service never registers again the caller
    /// blocks forever. Use [`wait_timeout`](Self::wait_timeout) or an
    /// external supervisor when that is not acceptable. Intended for a
    /// single waiting thread.
    pub fn wait(&self) -> bool {
        let mut flags = self.flags.lock();
        while !flags.restart_observed {
            self.condition.wait(&mut flags);
        }
        true
    }

    /// Like [`wait`](Self::wait) but gives up after `timeout`.
    ///
    /// Returns whether a restart was observed. Timeouts too large to form a
    /// deadline wait without bound.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut flags = self.flags.lock();
        self.condition.wait_while_for(&mut flags, |f| !f.restart_observed, timeout);
        flags.restart_observed
    }

    pub fn is_registered(&self) -> bool {
        self.flags.lock().registered
    }

    pub fn restart_observed(&self) -> bool {
        self.flags.lock().restart_observed
    }

    pub fn state(&self) -> WaiterState {
        let flags = self.flags.lock();
        match (flags.registered, flags.restart_observed) {
            (_, true) => WaiterState::RestartDetected,
            (true, false) => WaiterState::Watching,
            (false, false) => WaiterState::Idle,
        }
    }
}

impl ServiceNotification for RestartWaiter {
    /// Registrations count as a restart whether or not they are preexisting.
    fn on_registration(&self, service_name: &str, instance_name: &str, preexisting: bool) {
        if !self.watches(service_name) || !self.watches_instance(instance_name) {
            trace!("Ignoring registration of {}/{}", service_name, instance_name);
            return;
        }

        let mut flags = self.flags.lock();
        flags.restart_observed = true;
        self.condition.notify_all();
        info!(
            "Sensor service registered: {}/{} (preexisting: {})",
            service_name, instance_name, preexisting
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ServiceRegistry;
    use crossbeam::channel;
    use std::thread;

    const SENSORS: &str = "android.hardware.sensors@2.1::ISensors";

    fn waiter() -> Arc<RestartWaiter> {
        Arc::new(RestartWaiter::new([SENSORS]))
    }

    #[test]
    fn test_lifecycle_states() {
        let registry = ServiceRegistry::new();
        let waiter = waiter();
        assert_eq!(waiter.state(), WaiterState::Idle);
        assert!(!waiter.is_registered());

        assert!(waiter.attach(&registry));
        assert!(waiter.is_registered());
        assert_eq!(waiter.state(), WaiterState::Watching);

        registry.register_service(SENSORS, "default");
        assert_eq!(waiter.state(), WaiterState::RestartDetected);

        waiter.reset();
        assert_eq!(waiter.state(), WaiterState::Watching);
        waiter.reset();
        assert_eq!(waiter.state(), WaiterState::Watching);
    }

    #[test]
    fn test_wait_returns_immediately_when_observed() {
        let waiter = waiter();
        waiter.on_registration(SENSORS, "default", false);
        assert!(waiter.wait());
        assert!(waiter.wait_timeout(Duration::ZERO));
    }

    #[test]
    fn test_wait_unblocks_on_registration() {
        let registry = Arc::new(ServiceRegistry::new());
        let waiter = waiter();
        waiter.attach(registry.as_ref());

        let (done_tx, done_rx) = channel::bounded(1);
        let handle = {
            let waiter = waiter.clone();
            thread::spawn(move || {
                let result = waiter.wait();
                done_tx.send(result).unwrap();
            })
        };

        assert!(done_rx.recv_timeout(Duration::from_millis(50)).is_err());
        registry.register_service(SENSORS, "default");

        assert_eq!(done_rx.recv_timeout(Duration::from_secs(5)), Ok(true));
        handle.join().unwrap();
    }

    #[test]
    fn test_no_lost_wakeup_under_interleavings() {
        for i in 0..200 {
            let waiter = waiter();
            let notifier = {
                let waiter = waiter.clone();
                thread::spawn(move || {
                    if i % 2 == 0 {
                        thread::yield_now();
                    }
                    waiter.on_registration(SENSORS, "default", i % 3 == 0);
                })
            };

            assert!(waiter.wait_timeout(Duration::from_secs(5)));
            notifier.join().unwrap();
        }
    }

    #[test]
    fn test_reset_rearms_wait() {
        let waiter = waiter();
        waiter.on_registration(SENSORS, "default", false);
        assert!(waiter.wait());

        waiter.reset();
        assert!(!waiter.restart_observed());
        assert!(!waiter.wait_timeout(Duration::from_millis(20)));

        waiter.on_registration(SENSORS, "default", false);
        assert!(waiter.wait_timeout(Duration::from_millis(20)));
    }

    #[test]
    fn test_non_matching_name_is_ignored() {
        let waiter = waiter();
        let camera = "android.hardware.camera.provider@2.4::ICameraProvider";
        waiter.on_registration(camera, "default", false);
        assert!(!waiter.restart_observed());
        assert!(!waiter.wait_timeout(Duration::from_millis(20)));
    }

    #[test]
    fn test_preexisting_service_counts_as_restart() {
        let registry = ServiceRegistry::new();
        registry.register_service(SENSORS, "default");

        let waiter = waiter();
        waiter.attach(&registry);
        assert!(waiter.restart_observed());

        waiter.reset();
        registry.unregister_service(SENSORS, "default");
        registry.register_service(SENSORS, "default");
        assert!(waiter.wait_timeout(Duration::from_secs(1)));
    }

    #[test]
    fn test_from_config_watches_configured_instance() {
        let registry = ServiceRegistry::new();
        let config = RestartConfig {
            service_names: vec![SENSORS.to_string()],
            instance_name: "default".to_string(),
            wait_timeout_ms: 1000,
        };
        let waiter = Arc::new(RestartWaiter::from_config(&config));
        assert!(waiter.watches(SENSORS));
        waiter.attach(&registry);

        registry.register_service(SENSORS, "secondary");
        assert!(!waiter.restart_observed());
        registry.register_service(SENSORS, "default");
        assert!(waiter.restart_observed());
    }

    #[test]
    fn test_unbounded_timeout_does_not_overflow() {
        let waiter = waiter();
        waiter.on_registration(SENSORS, "default", false);
        assert!(waiter.wait_timeout(Duration::MAX));

        let waiter = self::waiter();
        let notifier = {
            let waiter = waiter.clone();
            thread::spawn(move || waiter.on_registration(SENSORS, "default", false))
        };
        assert!(waiter.wait_timeout(Duration::MAX));
        notifier.join().unwrap();
    }

    #[test]
    fn test_callback_filters_instance() {
        let config = RestartConfig {
            instance_name: "default".to_string(),
            ..RestartConfig::default()
        };
        let waiter = RestartWaiter::from_config(&config);
        assert!(waiter.watches_instance("default"));

        waiter.on_registration(SENSORS, "secondary", false);
        assert!(!waiter.restart_observed());
        waiter.on_registration(SENSORS, "default", false);
        assert!(waiter.restart_observed());

        let any_instance = RestartWaiter::new([SENSORS]);
        any_instance.on_registration(SENSORS, "secondary", true);
        assert!(any_instance.restart_observed());
    }

    #[test]
    fn test_attach_is_idempotent_and_does_not_keep_waiter_alive() {
        let registry = ServiceRegistry::new();
        let waiter = waiter();
        assert!(waiter.attach(&registry));
        assert!(waiter.attach(&registry));
        assert_eq!(registry.subscription_count(), 1);
        assert_eq!(registry.register_service(SENSORS, "default"), 1);

        let weak = Arc::downgrade(&waiter);
        drop(waiter);
        assert!(weak.upgrade().is_none());
        assert_eq!(registry.subscription_count(), 0);
        assert_eq!(registry.register_service(SENSORS, "default"), 0);
    }
}
