//! Boundary scheduler: one refresh at the next local midnight.
//!
//! The delay is computed from real instants, so DST transition days yield
//! 23h or 25h waits. Delays that are not positive or exceed
//! [`MAX_REFRESH_DELAY`] are dropped silently instead of arming a timer.

use std::time::Duration;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tokio::task::JoinHandle;

use crate::clock::Clock;
use crate::config::ConfiguredWindow;

/// Added past midnight so the refresh never races the transition itself.
pub const REFRESH_GRACE: Duration = Duration::from_secs(2);

/// Anything longer points at a clock or timezone computation error.
pub const MAX_REFRESH_DELAY: Duration = Duration::from_secs(48 * 60 * 60);

/// Granularity used to walk out of a DST gap that swallows midnight.
const GAP_STEP_MINUTES: i64 = 15;
const GAP_MAX_STEPS: i64 = 4 * 24;

/// First local midnight strictly after `now` in `tz`, as an absolute instant.
///
/// Where a DST gap removes midnight, the earliest valid local time after the
/// gap is used instead.
pub fn next_local_midnight(now: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
    let tomorrow = now.with_timezone(&tz).date_naive().succ_opt()?;
    let midnight = tomorrow.and_hms_opt(0, 0, 0)?;
    resolve_local(midnight, tz)
}

fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => (1..=GAP_MAX_STEPS).find_map(|step| {
            let shifted = naive + chrono::Duration::minutes(step * GAP_STEP_MINUTES);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }),
    }
}

/// Apply the grace offset and the safety bound to a raw time-to-midnight.
pub fn bounded_delay(until_midnight: chrono::Duration) -> Option<Duration> {
    let delay = until_midnight.to_std().ok()? + REFRESH_GRACE;
    if until_midnight <= chrono::Duration::zero() || delay >= MAX_REFRESH_DELAY {
        return None;
    }
    Some(delay)
}

/// Delay from `now` until the refresh should fire, or `None` if it must not be armed.
pub fn delay_until_refresh(now: DateTime<Utc>, tz: Tz) -> Option<Duration> {
    let target = next_local_midnight(now, tz)?;
    bounded_delay(target - now)
}

#[derive(Debug, Default)]
enum ArmState {
    #[default]
    Idle,
    Armed(JoinHandle<()>),
    Declined,
}

/// Owns the session's single pending refresh.
///
/// Dropping the scheduler aborts a refresh that has not fired yet.
#[derive(Debug, Default)]
pub struct BoundaryScheduler {
    state: ArmState,
}

impl BoundaryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot `on_refresh` at the next local midnight plus grace.
    ///
    /// Returns the armed delay. Returns `None` when the delay was rejected,
    /// or when this scheduler has already been used: a session gets one refresh.
    /// Must be called from within a tokio runtime.
    pub fn schedule_refresh<F>(
        &mut self,
        window: &ConfiguredWindow,
        clock: &dyn Clock,
        on_refresh: F,
    ) -> Option<Duration>
    where
        F: FnOnce() + Send + 'static,
    {
        if !matches!(self.state, ArmState::Idle) {
            tracing::debug!("Refresh already scheduled for this session, ignoring");
            return None;
        }

        let now = clock.now();
        let Some(delay) = delay_until_refresh(now, window.timezone()) else {
            tracing::debug!(
                "Declining to arm refresh: implausible delay from {} in {}",
                now,
                window.timezone()
            );
            self.state = ArmState::Declined;
            return None;
        };

        tracing::debug!("Refresh armed in {:?} ({})", delay, window.timezone());
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_refresh();
        });
        self.state = ArmState::Armed(handle);
        Some(delay)
    }

    /// True while a refresh is pending.
    pub fn is_armed(&self) -> bool {
        matches!(&self.state, ArmState::Armed(handle) if !handle.is_finished())
    }
}

impl Drop for BoundaryScheduler {
    fn drop(&mut self) {
        if let ArmState::Armed(handle) = &self.state {
            handle.abort();
        }
    }
}
