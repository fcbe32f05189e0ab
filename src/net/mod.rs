//! Control loop — single-task event loop driving the whole device.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  one loop iteration                       │
//! │                                                           │
//! │  1. interrupt slot   ── urgent request? handle, restart   │
//! │  2. deadline check   ── pending op expired? finalize      │
//! │  3. wait             ── race: interrupt │ poll timer │    │
//! │                         listener ready │ client ready     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The wait phase blocks for at most the state machine's poll interval
//! (none while idle — an idle device sleeps until a socket or interrupt
//! wakes it). The interrupt future is polled first, so an urgent request
//! wins a tie against socket readiness.

use core::future::Future;
use core::pin::Pin;
use core::task::Poll;
use core::time::Duration;
use std::io::{Read as _, Write as _};
use std::net::{SocketAddr, TcpStream};

use async_io_mini::Timer;
use futures_lite::future;
use log::{debug, info, warn};

use crate::app::commands::InterruptRequest;
use crate::app::ports::{Clock, ConfigPort, DrivePort, EventSink};
use crate::app::service::{ActuatorService, NO_ACTION, Response};
use crate::error::TransportError;
use crate::rpc::interrupt;
use crate::rpc::wire::{self, READ_CHUNK};

pub mod conn;

use conn::ConnectionManager;

/// What woke the wait phase.
enum Wakeup {
    Interrupt(InterruptRequest),
    PollExpired,
    ListenerReady,
    ClientReady(SocketAddr),
}

/// Run the device forever. Never returns; every fault is handled by
/// answering, evicting, or logging.
pub async fn run(
    mut conns: ConnectionManager,
    mut service: ActuatorService,
    hw: &mut impl DrivePort,
    store: &impl ConfigPort,
    sink: &mut impl EventSink,
    clock: &impl Clock,
) {
    info!("control loop running");

    loop {
        // ── Phase 1: interrupts ───────────────────────────────
        if let Some(req) = interrupt::try_take() {
            info!("interrupt request: {:?}", req);
            service.handle_interrupt(req, clock.now_ms(), hw, store, sink);
            continue;
        }

        // ── Phase 2: deadlines ────────────────────────────────
        if let Some(deadline) = service.deadline_ms() {
            let now = clock.now_ms();
            if now >= deadline {
                service.finalize_deadline(hw, store, sink);
                continue;
            }
            debug!("pending operation, {} ms remaining", deadline - now);
        }

        // ── Phase 3: wait ─────────────────────────────────────
        let wakeup = wait_ready(&conns, service.poll_interval()).await;
        match wakeup {
            Wakeup::Interrupt(req) => {
                info!("interrupt request: {:?}", req);
                service.handle_interrupt(req, clock.now_ms(), hw, store, sink);
            }
            Wakeup::PollExpired => {} // next iteration re-checks the deadline
            Wakeup::ListenerReady => {
                conns.accept_if_admissible(service.paired_address());
            }
            Wakeup::ClientReady(peer) => {
                service_client(
                    peer,
                    &mut conns,
                    &mut service,
                    clock.now_ms(),
                    hw,
                    store,
                    sink,
                );
            }
        }
    }
}

/// Race all wakeup sources; first ready wins, polled in priority order.
async fn wait_ready(conns: &ConnectionManager, poll: Option<Duration>) -> Wakeup {
    let mut waits: Vec<Pin<Box<dyn Future<Output = Wakeup> + '_>>> = Vec::new();

    // Interrupt first — its position fixes the tie-break priority.
    waits.push(Box::pin(async { Wakeup::Interrupt(interrupt::next().await) }));
    if let Some(timeout) = poll {
        waits.push(Box::pin(async move {
            Timer::after(timeout).await;
            Wakeup::PollExpired
        }));
    }
    waits.push(Box::pin(async {
        let _ = conns.listener().readable().await;
        Wakeup::ListenerReady
    }));
    for c in conns.connections() {
        let peer = c.peer;
        waits.push(Box::pin(async move {
            let _ = c.stream.readable().await;
            Wakeup::ClientReady(peer)
        }));
    }

    future::poll_fn(move |cx| {
        for wait in &mut waits {
            if let Poll::Ready(wakeup) = wait.as_mut().poll(cx) {
                return Poll::Ready(wakeup);
            }
        }
        Poll::Pending
    })
    .await
}

/// Read one request chunk from `peer`, dispatch it, and answer.
///
/// EOF and hard read/write failures evict the connection; a spurious
/// wakeup (`WouldBlock`) is skipped. Unknown tokens and undecodable
/// payloads are answered with the generic failure line.
fn service_client(
    peer: SocketAddr,
    conns: &mut ConnectionManager,
    service: &mut ActuatorService,
    now_ms: u64,
    hw: &mut impl DrivePort,
    store: &impl ConfigPort,
    sink: &mut impl EventSink,
) {
    let mut buf = [0u8; READ_CHUNK];
    let n = {
        let Some(c) = conns.get(peer) else { return };
        let mut reader: &TcpStream = c.stream.get_ref();
        match reader.read(&mut buf) {
            Ok(0) => {
                info!("client {}: {}", peer, TransportError::ClosedByPeer);
                conns.evict(peer);
                return;
            }
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => return,
            Err(e) => {
                warn!("client {}: {} ({})", peer, TransportError::ReadFailed, e);
                conns.evict(peer);
                return;
            }
        }
    };
    debug!("processing {} bytes from {}", n, peer);

    let separator = service.separator().to_owned();
    let reply: Response = match wire::decode(&buf[..n], separator.as_bytes()) {
        Ok(req) => {
            match service.dispatch(req.token, &req.args, now_ms, hw, store, sink) {
                Ok(resp) => resp,
                Err(e) => {
                    warn!("request from {}: {}", peer, e);
                    no_action()
                }
            }
        }
        Err(e) => {
            warn!("undecodable request from {}: {}", peer, e);
            no_action()
        }
    };

    let Some(c) = conns.get(peer) else { return };
    let mut writer: &TcpStream = c.stream.get_ref();
    if let Err(e) = writer.write_all(reply.as_bytes()) {
        warn!("client {}: {} ({})", peer, TransportError::WriteFailed, e);
        conns.evict(peer);
    }
}

fn no_action() -> Response {
    let mut r = Response::new();
    let _ = r.push_str(NO_ACTION);
    r
}
