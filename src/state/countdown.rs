//! Countdown projection and expiry edge-trigger.
//!
//! The countdown is a pure, re-computable projection of
//! `(now, started_at, eta, status)`: it holds no authoritative state and can
//! be recomputed from storage truth at any time. The one-shot expiry trigger
//! is kept as explicit state *outside* the projection so the sweeper can fire
//! a side effect exactly once per distinct ETA value.

use std::collections::HashSet;
use std::time::{Duration, SystemTime};

use dashmap::DashMap;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::models::BuzzerStatus;

/// Remaining time below which the indicator switches to the warning color.
const WARNING_THRESHOLD_MINUTES: f64 = 2.0;

/// Semantic color for the visual indicator; presentation only.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    /// Order ready.
    Success,
    /// Order canceled.
    Error,
    /// Order expired.
    Neutral,
    /// Little time remaining, or overdue.
    Warning,
    /// Countdown running normally.
    Info,
}

/// Derived view of one buzzer's countdown at a given instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownView {
    /// Remaining minutes as a float; 0 whenever the status is not `active`.
    pub remaining_minutes: f64,
    /// Progress of the visual indicator, always within `[0, 100]`.
    pub progress_percent: f64,
    /// True exactly when an active countdown has reached zero.
    pub overdue: bool,
    /// Text shown in the center of the indicator.
    pub display: String,
    /// Indicator color.
    pub color: ColorToken,
}

/// Compute the countdown view for a buzzer.
///
/// `reveal_timer` distinguishes the staff view (always numeric) from the
/// customer view, which is gated by the business's show-timers setting.
pub fn project(
    now: SystemTime,
    started_at: SystemTime,
    eta_minutes: u32,
    status: BuzzerStatus,
    reveal_timer: bool,
) -> CountdownView {
    let remaining = remaining_minutes(now, started_at, eta_minutes, status);
    let overdue = status == BuzzerStatus::Active && remaining <= 0.0;

    let eta = f64::from(eta_minutes);
    let progress_percent = match status {
        BuzzerStatus::Active => ((eta - remaining) / eta * 100.0).clamp(0.0, 100.0),
        BuzzerStatus::Ready => 100.0,
        _ => 0.0,
    };

    let display = if status == BuzzerStatus::Active && reveal_timer && !overdue {
        format_minutes(remaining)
    } else {
        status_text(status, overdue, reveal_timer, remaining)
    };

    let color = match status {
        BuzzerStatus::Ready => ColorToken::Success,
        BuzzerStatus::Canceled => ColorToken::Error,
        BuzzerStatus::Expired => ColorToken::Neutral,
        _ if overdue || remaining <= WARNING_THRESHOLD_MINUTES => ColorToken::Warning,
        _ => ColorToken::Info,
    };

    CountdownView {
        remaining_minutes: remaining,
        progress_percent,
        overdue,
        display,
        color,
    }
}

/// Remaining minutes before the countdown reaches zero.
///
/// Pinned to 0 whenever the status is not `active`; otherwise
/// `max(0, eta - elapsed)`, never negative.
pub fn remaining_minutes(
    now: SystemTime,
    started_at: SystemTime,
    eta_minutes: u32,
    status: BuzzerStatus,
) -> f64 {
    if status != BuzzerStatus::Active {
        return 0.0;
    }

    let elapsed = now
        .duration_since(started_at)
        .unwrap_or(Duration::ZERO)
        .as_secs_f64()
        / 60.0;
    (f64::from(eta_minutes) - elapsed).max(0.0)
}

/// Format fractional minutes as `m:ss` with zero-padded seconds.
pub fn format_minutes(minutes: f64) -> String {
    if minutes <= 0.0 {
        return "0:00".into();
    }
    let whole = minutes.floor();
    let seconds = ((minutes - whole) * 60.0).floor();
    format!("{}:{:02}", whole as u64, seconds as u64)
}

fn status_text(status: BuzzerStatus, overdue: bool, reveal_timer: bool, remaining: f64) -> String {
    match status {
        BuzzerStatus::Ready => "Ready!".into(),
        BuzzerStatus::Canceled => "Canceled".into(),
        BuzzerStatus::Expired => "Expired".into(),
        BuzzerStatus::PickedUp => "Picked up".into(),
        BuzzerStatus::Active if overdue => "Overdue".into(),
        BuzzerStatus::Active if reveal_timer => format_minutes(remaining),
        BuzzerStatus::Active => "Preparing...".into(),
    }
}

/// One-shot expiry detection state, keyed by buzzer.
///
/// A trigger fires the first time a buzzer's remaining time is observed at
/// zero, at most once per distinct ETA value: adjusting the ETA re-arms it.
#[derive(Debug, Default)]
pub struct ExpiryTriggers {
    fired: DashMap<Uuid, u32>,
}

impl ExpiryTriggers {
    /// Create an empty trigger registry.
    pub fn new() -> Self {
        Self {
            fired: DashMap::new(),
        }
    }

    /// Record the observation of `remaining` for `(buzzer, eta)` and report
    /// whether the expiry side effect should fire now.
    pub fn should_fire(&self, buzzer_id: Uuid, eta_minutes: u32, remaining: f64) -> bool {
        if remaining > 0.0 {
            return false;
        }

        let mut armed = true;
        self.fired
            .entry(buzzer_id)
            .and_modify(|signaled_eta| {
                if *signaled_eta == eta_minutes {
                    armed = false;
                } else {
                    // ETA changed since the last shot: re-arm and fire again.
                    *signaled_eta = eta_minutes;
                }
            })
            .or_insert(eta_minutes);
        armed
    }

    /// Forget a buzzer's shot so a failed side effect can be retried.
    pub fn reset(&self, buzzer_id: Uuid) {
        self.fired.remove(&buzzer_id);
    }

    /// Drop state for buzzers that are no longer being tracked.
    pub fn retain_tracked(&self, tracked: &HashSet<Uuid>) {
        self.fired.retain(|id, _| tracked.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn at(started_at: SystemTime, elapsed_secs: u64) -> SystemTime {
        started_at + Duration::from_secs(elapsed_secs)
    }

    #[test]
    fn remaining_is_non_increasing_and_never_negative() {
        let start = SystemTime::UNIX_EPOCH;
        let mut previous = f64::INFINITY;
        for elapsed in (0..=600).step_by(30) {
            let remaining = remaining_minutes(at(start, elapsed), start, 5, BuzzerStatus::Active);
            assert!(remaining <= previous);
            assert!(remaining >= 0.0);
            previous = remaining;
        }
        // Pinned at exactly zero once expired.
        assert_eq!(
            remaining_minutes(at(start, 3600), start, 5, BuzzerStatus::Active),
            0.0
        );
    }

    #[test]
    fn remaining_is_zero_for_non_active_statuses() {
        let start = SystemTime::UNIX_EPOCH;
        for status in [
            BuzzerStatus::Ready,
            BuzzerStatus::PickedUp,
            BuzzerStatus::Canceled,
            BuzzerStatus::Expired,
        ] {
            assert_eq!(remaining_minutes(at(start, 10), start, 5, status), 0.0);
        }
    }

    #[test]
    fn clock_skew_before_start_counts_as_no_elapsed_time() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(120);
        let remaining = remaining_minutes(SystemTime::UNIX_EPOCH, start, 5, BuzzerStatus::Active);
        assert_eq!(remaining, 5.0);
    }

    #[test]
    fn progress_stays_within_bounds() {
        let start = SystemTime::UNIX_EPOCH;
        for elapsed in (0..=900).step_by(15) {
            let view = project(at(start, elapsed), start, 5, BuzzerStatus::Active, true);
            assert!((0.0..=100.0).contains(&view.progress_percent));
        }
    }

    #[test]
    fn progress_pinned_for_settled_statuses() {
        let start = SystemTime::UNIX_EPOCH;
        let ready = project(at(start, 10), start, 5, BuzzerStatus::Ready, true);
        assert_eq!(ready.progress_percent, 100.0);

        for status in [
            BuzzerStatus::PickedUp,
            BuzzerStatus::Canceled,
            BuzzerStatus::Expired,
        ] {
            let view = project(at(start, 10), start, 5, status, true);
            assert_eq!(view.progress_percent, 0.0);
        }
    }

    #[test]
    fn display_formats_remaining_time_for_staff() {
        let start = SystemTime::UNIX_EPOCH;
        // 5 minute ETA, 90 seconds elapsed: 3:30 left.
        let view = project(at(start, 90), start, 5, BuzzerStatus::Active, true);
        assert_eq!(view.display, "3:30");
    }

    #[test]
    fn display_hides_numbers_from_customers_without_show_timers() {
        let start = SystemTime::UNIX_EPOCH;
        let view = project(at(start, 90), start, 5, BuzzerStatus::Active, false);
        assert_eq!(view.display, "Preparing...");
    }

    #[test]
    fn overdue_overrides_other_active_text() {
        let start = SystemTime::UNIX_EPOCH;
        let staff = project(at(start, 600), start, 5, BuzzerStatus::Active, true);
        assert!(staff.overdue);
        assert_eq!(staff.display, "Overdue");

        let customer = project(at(start, 600), start, 5, BuzzerStatus::Active, false);
        assert_eq!(customer.display, "Overdue");
    }

    #[test]
    fn status_words_for_settled_statuses() {
        let start = SystemTime::UNIX_EPOCH;
        let cases = [
            (BuzzerStatus::Ready, "Ready!"),
            (BuzzerStatus::PickedUp, "Picked up"),
            (BuzzerStatus::Canceled, "Canceled"),
            (BuzzerStatus::Expired, "Expired"),
        ];
        for (status, expected) in cases {
            let view = project(at(start, 10), start, 5, status, true);
            assert_eq!(view.display, expected);
        }
    }

    #[test]
    fn color_mapping() {
        let start = SystemTime::UNIX_EPOCH;
        assert_eq!(
            project(at(start, 0), start, 5, BuzzerStatus::Ready, true).color,
            ColorToken::Success
        );
        assert_eq!(
            project(at(start, 0), start, 5, BuzzerStatus::Canceled, true).color,
            ColorToken::Error
        );
        assert_eq!(
            project(at(start, 0), start, 5, BuzzerStatus::Expired, true).color,
            ColorToken::Neutral
        );
        // Plenty of time left: info.
        assert_eq!(
            project(at(start, 0), start, 10, BuzzerStatus::Active, true).color,
            ColorToken::Info
        );
        // Under two minutes: warning.
        assert_eq!(
            project(at(start, 9 * 60), start, 10, BuzzerStatus::Active, true).color,
            ColorToken::Warning
        );
        // Overdue: warning.
        assert_eq!(
            project(at(start, 11 * 60), start, 10, BuzzerStatus::Active, true).color,
            ColorToken::Warning
        );
    }

    #[test]
    fn format_minutes_pads_seconds() {
        assert_eq!(format_minutes(0.0), "0:00");
        assert_eq!(format_minutes(-1.0), "0:00");
        assert_eq!(format_minutes(5.0), "5:00");
        assert_eq!(format_minutes(1.5), "1:30");
        assert_eq!(format_minutes(0.05), "0:03");
        assert_eq!(format_minutes(12.99), "12:59");
    }

    #[test]
    fn trigger_fires_exactly_once_while_remaining_is_zero() {
        let triggers = ExpiryTriggers::new();
        let id = Uuid::new_v4();

        assert!(!triggers.should_fire(id, 5, 2.0));
        assert!(triggers.should_fire(id, 5, 0.0));
        assert!(!triggers.should_fire(id, 5, 0.0));
        assert!(!triggers.should_fire(id, 5, 0.0));
    }

    #[test]
    fn eta_change_rearms_the_trigger() {
        let triggers = ExpiryTriggers::new();
        let id = Uuid::new_v4();

        assert!(triggers.should_fire(id, 5, 0.0));
        // Staff added time; countdown runs again, then reaches zero again.
        assert!(!triggers.should_fire(id, 10, 5.0));
        assert!(triggers.should_fire(id, 10, 0.0));
        assert!(!triggers.should_fire(id, 10, 0.0));
    }

    #[test]
    fn reset_allows_a_failed_side_effect_to_retry() {
        let triggers = ExpiryTriggers::new();
        let id = Uuid::new_v4();

        assert!(triggers.should_fire(id, 5, 0.0));
        triggers.reset(id);
        assert!(triggers.should_fire(id, 5, 0.0));
    }

    #[test]
    fn retain_tracked_prunes_unknown_buzzers() {
        let triggers = ExpiryTriggers::new();
        let kept = Uuid::new_v4();
        let dropped = Uuid::new_v4();

        assert!(triggers.should_fire(kept, 5, 0.0));
        assert!(triggers.should_fire(dropped, 5, 0.0));

        let tracked = HashSet::from([kept]);
        triggers.retain_tracked(&tracked);

        // The kept entry still remembers its shot; the dropped one re-arms.
        assert!(!triggers.should_fire(kept, 5, 0.0));
        assert!(triggers.should_fire(dropped, 5, 0.0));
    }

    #[test]
    fn separate_buzzers_track_independent_shots() {
        let triggers = ExpiryTriggers::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(triggers.should_fire(a, 5, 0.0));
        assert!(triggers.should_fire(b, 5, 0.0));
        assert!(!triggers.should_fire(a, 5, 0.0));
    }
}
