//! Calendar session: `Uninitialized -> Rendered -> Refreshing -> Rendered`.
//!
//! Initialization renders the status line and grid, then arms the single
//! boundary refresh. The refresh re-runs the full clock -> policy -> grid ->
//! mount path once. The scheduler is never re-armed, so a session that stays
//! open across a second midnight goes stale again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::clock::{now_in, Clock};
use crate::config::ConfiguredWindow;
use crate::error::PresentError;
use crate::grid::render;
use crate::present::TileMount;
use crate::scheduler::BoundaryScheduler;
use crate::status::status_line;
use crate::unlock::unlocked_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Rendered,
    Refreshing,
}

pub struct Session<M: TileMount> {
    window: ConfiguredWindow,
    clock: Arc<dyn Clock>,
    mount: M,
    scheduler: BoundaryScheduler,
    pending: Option<oneshot::Receiver<()>>,
    state: SessionState,
    refreshes: u32,
}

impl<M: TileMount> Session<M> {
    pub fn new(window: ConfiguredWindow, clock: Arc<dyn Clock>, mount: M) -> Self {
        Self {
            window,
            clock,
            mount,
            scheduler: BoundaryScheduler::new(),
            pending: None,
            state: SessionState::Uninitialized,
            refreshes: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of boundary refreshes performed so far (at most one).
    pub fn refreshes(&self) -> u32 {
        self.refreshes
    }

    pub fn mount(&self) -> &M {
        &self.mount
    }

    pub fn is_refresh_pending(&self) -> bool {
        self.pending.is_some() && self.scheduler.is_armed()
    }

    /// Render once and arm the boundary refresh.
    ///
    /// Returns the armed delay, if any. Must be called within a tokio runtime.
    pub fn initialize(&mut self) -> Result<Option<Duration>, PresentError> {
        if self.state != SessionState::Uninitialized {
            tracing::debug!("Session already initialized");
            return Ok(None);
        }

        self.render_now()?;
        self.state = SessionState::Rendered;

        let (tx, rx) = oneshot::channel();
        let delay = self
            .scheduler
            .schedule_refresh(&self.window, self.clock.as_ref(), move || {
                let _ = tx.send(());
            });
        if delay.is_some() {
            self.pending = Some(rx);
        }
        Ok(delay)
    }

    /// Re-evaluate unlock state from the current time and re-mount.
    pub fn refresh(&mut self) -> Result<(), PresentError> {
        self.state = SessionState::Refreshing;
        let result = self.render_now();
        self.state = SessionState::Rendered;
        self.refreshes += 1;
        result
    }

    /// Wait for the armed refresh and perform it.
    ///
    /// Returns `false` immediately when no refresh is pending.
    pub async fn wait_for_refresh(&mut self) -> Result<bool, PresentError> {
        let Some(rx) = self.pending.take() else {
            return Ok(false);
        };
        if rx.await.is_err() {
            return Ok(false);
        }
        tracing::info!("Local midnight passed in {}, refreshing", self.window.timezone());
        self.refresh()?;
        Ok(true)
    }

    /// Initialize, then block until the single boundary refresh has run.
    pub async fn run_until_refreshed(&mut self) -> Result<bool, PresentError> {
        self.initialize()?;
        self.wait_for_refresh().await
    }

    fn render_now(&mut self) -> Result<(), PresentError> {
        let tz = self.window.timezone();
        let fields = now_in(self.clock.as_ref(), tz);
        let status = status_line(&fields, tz);
        let tiles = render(&self.window, &fields);
        self.mount.mount(&tiles, status.as_deref())?;
        tracing::info!(
            "Rendered {}/{} unlocked for {:04}-{:02}-{:02}",
            unlocked_count(&fields, &self.window),
            self.window.item_count(),
            fields.year,
            fields.month,
            fields.day
        );
        Ok(())
    }
}
