//! Shared helpers for unit tests.

use std::net::TcpListener;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use url::Url;

/// Clock whose time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => panic!("duration out of range: {error}; delta={delta:?}"),
        };
        *self.lock() += delta;
    }

    fn lock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex poisoned"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

/// Start an in-process HTTP stub on an ephemeral port and return its origin.
///
/// Must be called from inside an actix runtime (`#[actix_web::test]`).
pub fn spawn_stub<F>(configure: F) -> Url
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let listener = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(error) => panic!("bind stub listener: {error}"),
    };
    let addr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(error) => panic!("stub listener address: {error}"),
    };
    let server = match HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .disable_signals()
        .listen(listener)
    {
        Ok(server) => server.run(),
        Err(error) => panic!("start stub server: {error}"),
    };
    actix_web::rt::spawn(server);

    match Url::parse(&format!("http://{addr}")) {
        Ok(url) => url,
        Err(error) => panic!("stub origin: {error}"),
    }
}

/// Origin on which nothing is listening.
pub fn unreachable_origin() -> Url {
    let listener = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(error) => panic!("bind probe listener: {error}"),
    };
    let addr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(error) => panic!("probe listener address: {error}"),
    };
    drop(listener);
    match Url::parse(&format!("http://{addr}")) {
        Ok(url) => url,
        Err(error) => panic!("probe origin: {error}"),
    }
}
