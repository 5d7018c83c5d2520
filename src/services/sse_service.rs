use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::broadcast::{self, error::RecvError};
use uuid::Uuid;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::{
    dto::sse::{ScopedEvent, SystemDegradedEvent},
    state::SharedState,
};

const EVENT_SYSTEM_DEGRADED: &str = "system.degraded";

/// Which slice of the shared event hub a subscriber wants to observe.
#[derive(Clone)]
pub enum StreamScope {
    /// Staff dashboard: every buzzer of one business.
    Dashboard {
        /// Business whose buzzers are observed.
        business_id: Uuid,
    },
    /// Customer tracking page: a single buzzer, addressed by its token.
    Buzzer {
        /// Public token of the observed buzzer.
        public_token: String,
    },
}

impl StreamScope {
    fn matches(&self, event: &ScopedEvent) -> bool {
        match self {
            StreamScope::Dashboard { business_id } => event.business_id == *business_id,
            StreamScope::Buzzer { public_token } => event.public_token == *public_token,
        }
    }
}

/// Open an SSE response on the shared hub, forwarding only the events that
/// fall within `scope` and cleaning up once the client disconnects.
///
/// Every stream also carries `system.degraded` notifications so connected
/// pages can react to storage outages without polling the health route.
pub fn open_stream(
    state: &SharedState,
    scope: StreamScope,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + use<>> {
    let mut receiver: broadcast::Receiver<ScopedEvent> = state.sse().subscribe();
    let mut degraded = state.degraded_watcher();

    // small bounded channel between forwarder and response
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(8);

    // forwarder task: reads from broadcast, filters, and pushes into mpsc
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = tx.closed() => break,
                recv_result = receiver.recv() => {
                    match recv_result {
                        Ok(scoped) => {
                            if !scope.matches(&scoped) {
                                continue;
                            }

                            let mut event = Event::default().data(scoped.event.data);
                            if let Some(name) = scoped.event.event {
                                event = event.event(name);
                            }

                            if tx.send(Ok(event)).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(_)) => {
                            // Skip lagged messages but keep the stream alive.
                            continue;
                        }
                    }
                }
                changed = degraded.changed() => {
                    if changed.is_err() {
                        break;
                    }

                    let payload = SystemDegradedEvent {
                        degraded: *degraded.borrow_and_update(),
                    };
                    let Ok(data) = serde_json::to_string(&payload) else {
                        continue;
                    };

                    let event = Event::default().event(EVENT_SYSTEM_DEGRADED).data(data);
                    if tx.send(Ok(event)).await.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!("SSE stream disconnected");
    });

    // response stream reads from mpsc; when client disconnects axum drops this stream
    let stream = ReceiverStream::new(rx);
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::sse::ServerEvent;

    fn scoped(business_id: Uuid, token: &str) -> ScopedEvent {
        ScopedEvent {
            business_id,
            public_token: token.to_owned(),
            event: ServerEvent::new(None, "{}".into()),
        }
    }

    #[test]
    fn dashboard_scope_matches_on_business() {
        let business = Uuid::new_v4();
        let scope = StreamScope::Dashboard {
            business_id: business,
        };
        assert!(scope.matches(&scoped(business, "tok-a")));
        assert!(!scope.matches(&scoped(Uuid::new_v4(), "tok-a")));
    }

    #[test]
    fn buzzer_scope_matches_on_token() {
        let scope = StreamScope::Buzzer {
            public_token: "tok-a".into(),
        };
        assert!(scope.matches(&scoped(Uuid::new_v4(), "tok-a")));
        assert!(!scope.matches(&scoped(Uuid::new_v4(), "tok-b")));
    }
}
