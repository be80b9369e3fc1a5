use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{
    sync::{Mutex, oneshot},
    task::JoinHandle,
};

use crate::{Res, api, config, errors::Error, types::CallbackOutcome, warning};

/// Short-lived local HTTP listener that waits for the OAuth redirect.
///
/// The server runs on its own task. [`CallbackServer::wait_for_code`]
/// resolves with the first authorization code delivered to the callback
/// route, [`CallbackServer::shutdown`] stops the listener once the caller is
/// done with it.
pub struct CallbackServer {
    addr: SocketAddr,
    outcome: oneshot::Receiver<CallbackOutcome>,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl CallbackServer {
    /// Binds `addr` and starts serving `callback_path` and `/health`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Config`] when `callback_path` is not a literal
    /// route, and with [`Error::Io`] when the address cannot be bound.
    pub async fn bind(addr: SocketAddr, callback_path: &str) -> Res<Self> {
        if !config::is_literal_route(callback_path) {
            let msg = format!("Invalid callback path `{callback_path}`");
            return Err(Error::Config(msg));
        }

        let (outcome_tx, outcome_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let sender: api::CallbackSender = Arc::new(Mutex::new(Some(outcome_tx)));

        let mut app =
            Router::new().route(callback_path, get(api::callback).layer(Extension(sender)));
        if callback_path != "/health" {
            app = app.route("/health", get(api::health));
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(Self {
            addr,
            outcome: outcome_rx,
            shutdown: shutdown_tx,
            handle,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Waits until the browser delivers an authorization code.
    ///
    /// There is no timeout. Requests without a code do not resolve the wait.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthorizationDenied`] when the redirect carried an
    /// `error` parameter, and [`Error::Callback`] if the listener went away.
    pub async fn wait_for_code(&mut self) -> Res<String> {
        match (&mut self.outcome).await {
            Ok(CallbackOutcome::Code(code)) => Ok(code),
            Ok(CallbackOutcome::Denied(reason)) => Err(Error::AuthorizationDenied(reason)),
            Err(_) => Err(Error::Callback(
                "listener stopped before a code was received".to_string(),
            )),
        }
    }

    /// Stops accepting connections and waits for the listener task to end.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        match self.handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warning!("Callback listener failed: {}", e),
            Err(e) => warning!("Callback listener task failed: {}", e),
        }
    }
}
