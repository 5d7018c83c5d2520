use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dao::models::{BuzzerEntity, BuzzerStatus},
    dto::sse::{
        BuzzerCreatedEvent, BuzzerStatusChangedEvent, BuzzerTimeAdjustedEvent, ScopedEvent,
        ServerEvent,
    },
    state::SharedState,
};

const EVENT_BUZZER_CREATED: &str = "buzzer.created";
const EVENT_BUZZER_TIME_ADJUSTED: &str = "buzzer.time_adjusted";
const EVENT_BUZZER_STATUS_CHANGED: &str = "buzzer.status_changed";

/// Broadcast that staff created a new buzzer.
pub fn broadcast_buzzer_created(state: &SharedState, buzzer: &BuzzerEntity) {
    let payload = BuzzerCreatedEvent {
        buzzer_id: buzzer.id,
    };
    send_scoped_event(
        state,
        buzzer.business_id,
        &buzzer.public_token,
        EVENT_BUZZER_CREATED,
        &payload,
    );
}

/// Broadcast a new ETA after staff adjusted a buzzer's time.
pub fn broadcast_time_adjusted(state: &SharedState, buzzer: &BuzzerEntity) {
    let payload = BuzzerTimeAdjustedEvent {
        buzzer_id: buzzer.id,
        eta: buzzer.eta,
    };
    send_scoped_event(
        state,
        buzzer.business_id,
        &buzzer.public_token,
        EVENT_BUZZER_TIME_ADJUSTED,
        &payload,
    );
}

/// Broadcast a lifecycle status change.
pub fn broadcast_status_changed(state: &SharedState, buzzer: &BuzzerEntity, status: BuzzerStatus) {
    let payload = BuzzerStatusChangedEvent {
        buzzer_id: buzzer.id,
        status,
    };
    send_scoped_event(
        state,
        buzzer.business_id,
        &buzzer.public_token,
        EVENT_BUZZER_STATUS_CHANGED,
        &payload,
    );
}

fn send_scoped_event(
    state: &SharedState,
    business_id: Uuid,
    public_token: &str,
    event: &str,
    payload: &impl Serialize,
) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(server_event) => state.sse().broadcast(ScopedEvent {
            business_id,
            public_token: public_token.to_owned(),
            event: server_event,
        }),
        Err(err) => warn!(event, error = %err, "failed to serialize SSE payload"),
    }
}
