#![allow(dead_code)]

use axum::extract::ConnectInfo;
use pxy_redirect::domain::{PathResolver, VersionRules};
use pxy_redirect::infrastructure::heartbeat::HeartbeatEvent;
use pxy_redirect::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;
use url::Url;

pub const PEER_ADDR: &str = "127.0.0.1:12345";

/// Inserts a fixed `ConnectInfo` so handlers run without a real socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub fn create_test_state(
    heartbeat_enabled: bool,
) -> (AppState, mpsc::Receiver<HeartbeatEvent>) {
    create_test_state_with(VersionRules::builtin(), "https://pxy.fi", heartbeat_enabled)
}

pub fn create_test_state_with(
    rules: VersionRules,
    public_base: &str,
    heartbeat_enabled: bool,
) -> (AppState, mpsc::Receiver<HeartbeatEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let resolver = Arc::new(PathResolver::new(rules, Url::parse(public_base).unwrap()));
    let state = AppState::new(resolver, tx, heartbeat_enabled, false);

    (state, rx)
}
