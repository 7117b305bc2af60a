// SPDX-License-Identifier: AGPL-3.0-or-later

use std::future::Future;

use anyhow::Result;
use log::{error, info};
use tokio::task::{self, JoinHandle};
use triggered::{Listener, Trigger};

/// Resolves as soon as the manager asks its services to stop.
pub type Shutdown = Listener;

/// Fires the exit signal when dropped, also when the service task panicked.
struct ExitGuard(Trigger);

impl Drop for ExitGuard {
    fn drop(&mut self) {
        self.0.trigger();
    }
}

/// Runs long-lived services sharing one context and stops them together.
///
/// A stopped service (because of a panic, error or successful return) fires the exit signal
/// which can be awaited with `on_exit`. This usually indicates a failure, for example the HTTP
/// server not being able to bind its port.
pub struct ServiceManager<D>
where
    D: Clone + Send + Sync + 'static,
{
    context: D,
    exit_signal: Trigger,
    exit_handle: Listener,
    shutdown_signal: Trigger,
    shutdown_handle: Listener,
    services: Vec<JoinHandle<()>>,
}

impl<D> ServiceManager<D>
where
    D: Clone + Send + Sync + 'static,
{
    /// Returns a new instance of a service manager.
    pub fn new(context: D) -> Self {
        let (exit_signal, exit_handle) = triggered::trigger();
        let (shutdown_signal, shutdown_handle) = triggered::trigger();

        Self {
            context,
            exit_signal,
            exit_handle,
            shutdown_signal,
            shutdown_handle,
            services: Vec::new(),
        }
    }

    /// Spawns a service receiving the shared context and the shutdown signal.
    pub fn add<F, Fut>(&mut self, name: &'static str, service: F)
    where
        F: FnOnce(D, Shutdown) -> Fut,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let exit_guard = ExitGuard(self.exit_signal.clone());
        let future = service(self.context.clone(), self.shutdown_handle.clone());

        let handle = task::spawn(async move {
            let _exit_guard = exit_guard;
            info!("Start {} service", name);

            match future.await {
                Ok(()) => info!("Stopped {} service", name),
                Err(err) => error!("Error in {} service: {}", name, err),
            }
        });

        self.services.push(handle);
    }

    /// Future which resolves as soon as a service returned an error, panicked or stopped.
    pub async fn on_exit(&self) {
        self.exit_handle.clone().await;
    }

    /// Asks all services to stop and waits until they did.
    pub async fn shutdown(self) {
        info!("Received shutdown signal");
        self.shutdown_signal.trigger();

        for handle in self.services {
            if let Err(err) = handle.await {
                error!("Service did not stop cleanly: {}", err);
            }
        }
    }
}
