use crate::clients::{
    ContactClient, MenuClient, OrderClient, ReservationClient, SessionClient, UserClient,
};
use crate::config::{Config, ConfigError};
use crate::events::{BroadcastRegistry, Notifier, RegistryHandle};
use crate::http::AppState;
use crate::model::Role;
use crate::user_actor::UserError;
use thiserror::Error;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not seed admin account: {0}")]
    Seed(#[from] UserError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("task failed during shutdown: {0}")]
    Shutdown(String),
}

/// Every running actor plus the broadcast registry.
///
/// The registry is owned here and reaches handlers only through [`AppState`],
/// so its lifetime is the system's lifetime.
pub struct RestaurantSystem {
    pub menu: MenuClient,
    pub orders: OrderClient,
    pub reservations: ReservationClient,
    pub users: UserClient,
    pub contacts: ContactClient,
    pub sessions: SessionClient,
    pub registry: RegistryHandle,

    handles: Vec<JoinHandle<()>>,
    /// Stops background jobs that hold clients, such as the session sweeper.
    jobs: CancellationToken,
}

impl RestaurantSystem {
    /// Spawns the actors. `actor_buffer` is the request queue depth of each.
    pub fn start(actor_buffer: usize) -> Self {
        let (user_actor, users) = crate::user_actor::new(actor_buffer);
        let (order_actor, orders) = crate::order_actor::new(actor_buffer);
        let (menu_actor, menu) = crate::menu_actor::new(actor_buffer);
        let (reservation_actor, reservations) = crate::reservation_actor::new(actor_buffer);
        let (contact_actor, contacts) = crate::contact_actor::new(actor_buffer);
        let (session_actor, sessions) = crate::session_actor::new(actor_buffer);
        let (registry, registry_handle) = BroadcastRegistry::new();

        // Orders check their owner against the user store (Context = UserClient).
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(order_actor.run(users.clone())),
            tokio::spawn(menu_actor.run(())),
            tokio::spawn(reservation_actor.run(())),
            tokio::spawn(contact_actor.run(())),
            tokio::spawn(session_actor.run(())),
            tokio::spawn(registry.run()),
        ];
        info!(actors = handles.len(), "System started");

        Self {
            menu,
            orders,
            reservations,
            users,
            contacts,
            sessions,
            registry: registry_handle,
            handles,
            jobs: CancellationToken::new(),
        }
    }

    /// Starts deleting expired sessions every `interval`. Stopped by
    /// [`shutdown`](Self::shutdown).
    pub fn sweep_sessions_every(&mut self, interval: Duration) {
        self.handles.push(tokio::spawn(crate::session_actor::run_sweeper(
            self.sessions.clone(),
            interval,
            self.jobs.child_token(),
        )));
    }

    /// Handler state sharing this system's clients and registry.
    pub fn app_state(&self, config: &Config) -> AppState {
        AppState {
            menu: self.menu.clone(),
            orders: self.orders.clone(),
            reservations: self.reservations.clone(),
            users: self.users.clone(),
            contacts: self.contacts.clone(),
            sessions: self.sessions.clone(),
            registry: self.registry.clone(),
            notifier: Notifier::new(self.registry.clone()),
            stream_settings: config.stream_settings(),
            session_ttl: config.session_ttl(),
        }
    }

    /// Creates the configured admin account. An existing account with that
    /// email is left as it is.
    pub async fn seed_admin(&self, config: &Config) -> Result<(), UserError> {
        let Some((email, password)) = config.admin_credentials() else {
            return Ok(());
        };
        match self
            .users
            .register("Admin".into(), email.into(), password.into(), Role::Admin)
            .await
        {
            Ok(id) => {
                info!(user_id = %id, "Admin account created");
                Ok(())
            }
            Err(UserError::AlreadyExists(_)) => {
                info!("Admin account already present");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Closes every open event stream, then stops the actors.
    ///
    /// Resource actors exit once every client clone is gone, so any
    /// [`AppState`] handed out must be dropped first (axum does this when
    /// `serve` returns).
    pub async fn shutdown(self) -> Result<(), StartupError> {
        info!("Shutting down system...");
        self.registry.shutdown();
        self.jobs.cancel();

        drop(self.menu);
        drop(self.orders);
        drop(self.reservations);
        drop(self.users);
        drop(self.contacts);
        drop(self.sessions);
        drop(self.registry);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(StartupError::Shutdown(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_store::ActorClient;

    #[tokio::test]
    async fn seeds_admin_once() {
        let system = RestaurantSystem::start(8);
        let config = Config {
            admin_email: Some("Chef@OldRao.in".into()),
            admin_password: Some("tandoor".into()),
            ..Config::default()
        };

        system.seed_admin(&config).await.unwrap();
        system.seed_admin(&config).await.unwrap();

        let users = system.users.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(users[0].email, "chef@oldrao.in");
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn no_credentials_no_admin() {
        let system = RestaurantSystem::start(8);
        system.seed_admin(&Config::default()).await.unwrap();
        assert!(system.users.list().await.unwrap().is_empty());
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_stops_the_session_sweeper() {
        let mut system = RestaurantSystem::start(8);
        system.sweep_sessions_every(Duration::from_secs(600));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_waits_for_every_task() {
        let system = RestaurantSystem::start(8);
        let state = system.app_state(&Config::default());
        drop(state);
        system.shutdown().await.unwrap();
    }
}
