//! The progression engine — the heart of Idle Resource Empire.
//!
//! SESSION SHAPE (fixed, documented):
//!   1. `start`   — load or seed a snapshot, apply offline catch-up,
//!                  phase → Running
//!   2. gameplay  — `on_tick` / `on_manual_collect` / `on_purchase`
//!   3. `suspend` — final save, phase → Suspended
//!
//! RULES:
//!   - Gameplay operations are valid only in the Running phase.
//!   - Every credit and debit flows through the accumulator.
//!   - Every price and unlock decision flows through the ledger.
//!   - Persistence failures never end a session: they are logged and
//!     gameplay continues on the in-memory state.

use crate::{
    accumulator,
    config::EngineConfig,
    error::{GameError, GameResult},
    ledger,
    offline::{self, OfflineEarnings},
    state::GameState,
    store::SaveStore,
    types::{Millis, UpgradeId},
};
use uuid::Uuid;

/// Where a session is in its lifecycle. `Loading` only exists inside
/// `start`; callers observe the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Loading,
    Running,
    Suspended,
}

/// What `start` did: fresh seed or resume, and what the time away paid.
#[derive(Debug, Clone, PartialEq)]
pub struct StartSummary {
    pub session_id: Uuid,
    /// True when a persisted snapshot was loaded, false on a fresh seed
    /// (including fallback after a corrupt snapshot).
    pub resumed:    bool,
    /// Offline catch-up report; `None` on a fresh seed.
    pub offline:    Option<OfflineEarnings>,
}

/// One tick's outcome, for status displays.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// Wall time this tick covered (post-clamp, so never negative).
    pub elapsed_ms: Millis,
    /// Passive income credited this tick.
    pub earned:     f64,
    /// Pool balance after the credit.
    pub amount:     f64,
    pub per_second: f64,
    pub autosaved:  bool,
}

/// Receipt for a successful purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseReceipt {
    pub id:         UpgradeId,
    pub name:       String,
    /// Level now owned.
    pub level:      u32,
    pub cost_paid:  f64,
    /// Repriced cost of the next level.
    pub next_cost:  f64,
    /// Production rate after the recompute.
    pub per_second: f64,
    /// Upgrade this purchase newly unlocked, if any.
    pub unlocked:   Option<UpgradeId>,
}

pub struct GameEngine {
    config:           EngineConfig,
    phase:            SessionPhase,
    session_id:       Option<Uuid>,
    state:            Option<GameState>,
    store:            Box<dyn SaveStore>,
    next_autosave_at: Millis,
}

impl GameEngine {
    /// Build an engine over `store`. The config is validated here, so a
    /// constructed engine can assume a well-formed catalog for the rest
    /// of its life.
    pub fn new(config: EngineConfig, store: Box<dyn SaveStore>) -> GameResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            phase: SessionPhase::Uninitialized,
            session_id: None,
            state: None,
            store,
            next_autosave_at: 0,
        })
    }

    /// Begin a session at wall time `now`.
    ///
    /// Loads the configured slot; a missing slot seeds a fresh state,
    /// and a corrupt snapshot or unreadable store logs a warning and
    /// seeds fresh rather than failing the session. On resume, offline
    /// earnings for the gap since the snapshot's `last_updated` are
    /// credited (capped), and the away gap is added to time played when
    /// the snapshot recorded when it was last played.
    ///
    /// Errors only if the session is already `Running`.
    pub fn start(&mut self, now: Millis) -> GameResult<StartSummary> {
        if self.phase == SessionPhase::Running {
            return Err(GameError::PhaseViolation { op: "start", phase: self.phase });
        }
        self.phase = SessionPhase::Loading;

        let loaded = self.load_slot();
        let resumed = loaded.is_some();
        let mut state =
            loaded.unwrap_or_else(|| GameState::seed(self.config.catalog.clone(), now));

        let offline = if resumed {
            let gap_ms = now - state.resources.last_updated;
            let report = offline::compute(
                state.resources.per_second,
                gap_ms,
                self.config.offline_cap_secs,
            );
            if report.earned > 0.0 {
                accumulator::add(&mut state.resources, report.earned);
                state.stats.total_resources_earned += report.earned;
            }
            // Old snapshots have no last-played timestamp: treat that
            // as no prior session and skip the time-played accrual.
            if let Some(last_played) = state.stats.last_played_timestamp {
                state.stats.total_time_played += (now - last_played).max(0);
            }
            state.resources.last_updated = now;
            Some(report)
        } else {
            None
        };
        state.stats.last_played_timestamp = Some(now);

        let session_id = Uuid::new_v4();
        if resumed {
            log::info!(
                "Session {session_id} resumed slot '{}' ({} upgrades, {:.1}/sec)",
                self.config.slot,
                state.upgrades.len(),
                state.resources.per_second
            );
        } else {
            log::info!("Session {session_id} started fresh in slot '{}'", self.config.slot);
        }

        self.session_id = Some(session_id);
        self.state = Some(state);
        self.phase = SessionPhase::Running;
        self.next_autosave_at = now + self.config.autosave_interval_ms;

        Ok(StartSummary { session_id, resumed, offline })
    }

    /// Advance the session to wall time `now`: credit passive income,
    /// fold the delta into the lifetime stats, and autosave when the
    /// interval has elapsed. A failed autosave logs a warning and the
    /// tick still succeeds.
    pub fn on_tick(&mut self, now: Millis) -> GameResult<TickSummary> {
        let state = self.running_state_mut("tick")?;

        let elapsed_ms = (now - state.resources.last_updated).max(0);
        let earned = accumulator::tick(&mut state.resources, now);
        state.stats.total_resources_earned += earned;

        // Time played accrues tick to tick, not from session load.
        let played_ms = state
            .stats
            .last_played_timestamp
            .map_or(0, |last| (now - last).max(0));
        state.stats.total_time_played += played_ms;
        state.stats.last_played_timestamp = Some(now);

        let amount = state.resources.amount;
        let per_second = state.resources.per_second;

        let mut autosaved = false;
        if now >= self.next_autosave_at {
            match self.persist(now) {
                Ok(()) => autosaved = true,
                Err(e) => log::warn!("Autosave failed, retrying next interval: {e}"),
            }
            self.next_autosave_at = now + self.config.autosave_interval_ms;
        }

        Ok(TickSummary { elapsed_ms, earned, amount, per_second, autosaved })
    }

    /// Credit one manual collection (the configured per-tap amount).
    /// Returns the pool balance after the credit.
    pub fn on_manual_collect(&mut self) -> GameResult<f64> {
        let amount = self.config.manual_collect_amount;
        let state = self.running_state_mut("collect")?;

        accumulator::add(&mut state.resources, amount);
        state.stats.total_resources_earned += amount;
        Ok(state.resources.amount)
    }

    /// Buy one level of upgrade `id`.
    ///
    /// On success the price is debited, the production rate recomputed,
    /// and the purchase counter bumped. A rejection (unknown id or
    /// insufficient funds) leaves the state exactly as it was.
    pub fn on_purchase(&mut self, id: UpgradeId) -> GameResult<PurchaseReceipt> {
        let state = self.running_state_mut("purchase")?;

        let available = state.resources.amount;
        let purchase = ledger::purchase(&mut state.upgrades, id, available)
            .map_err(|reason| GameError::PurchaseRejected { reason })?;

        accumulator::debit(&mut state.resources, purchase.debited)?;
        state.resources.per_second = ledger::total_rate(&state.upgrades);
        state.stats.total_upgrades_purchased += 1;

        let name = state
            .upgrades
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.clone())
            .unwrap_or_default();
        let per_second = state.resources.per_second;

        log::debug!(
            "Purchased {name} level {} for {} (rate now {per_second:.2}/sec)",
            purchase.new_level,
            purchase.debited
        );

        Ok(PurchaseReceipt {
            id,
            name,
            level: purchase.new_level,
            cost_paid: purchase.debited,
            next_cost: purchase.new_cost,
            per_second,
            unlocked: purchase.unlocked,
        })
    }

    /// Serialize the current state and write it to the store.
    pub fn save(&mut self, now: Millis) -> GameResult<()> {
        self.persist(now)
    }

    /// End the session: best-effort final save, then phase → Suspended.
    /// A failed save is logged and discarded; the clocks are left as the
    /// last tick stamped them, so the un-ticked tail is credited as
    /// offline time on the next resume.
    pub fn suspend(&mut self, now: Millis) {
        if self.state.is_some() {
            if let Err(e) = self.persist(now) {
                log::warn!("Final save on suspend failed: {e}");
            }
        }
        self.phase = SessionPhase::Suspended;
        log::info!("Session suspended");
    }

    /// The full game state, for display or persistence. `None` before
    /// the first `start`.
    pub fn snapshot(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// When the configured slot was last written, if ever. Used by the
    /// runner's end-of-run summary.
    pub fn last_saved_at(&self) -> GameResult<Option<Millis>> {
        self.store.last_saved_at(&self.config.slot)
    }

    fn running_state_mut(&mut self, op: &'static str) -> GameResult<&mut GameState> {
        match (self.phase, self.state.as_mut()) {
            (SessionPhase::Running, Some(state)) => Ok(state),
            (phase, _) => Err(GameError::PhaseViolation { op, phase }),
        }
    }

    fn persist(&mut self, now: Millis) -> GameResult<()> {
        let state = match &self.state {
            Some(state) => state,
            None => return Err(GameError::PhaseViolation { op: "save", phase: self.phase }),
        };
        let json = serde_json::to_string(state)?;
        self.store.save(&self.config.slot, &json, now)?;
        log::debug!("Saved slot '{}' at {now}", self.config.slot);
        Ok(())
    }

    fn load_slot(&self) -> Option<GameState> {
        match self.store.load(&self.config.slot) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(state) => Some(state),
                Err(e) => {
                    log::warn!(
                        "Corrupt snapshot in slot '{}', starting fresh: {e}",
                        self.config.slot
                    );
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!(
                    "Could not read slot '{}', starting fresh: {e}",
                    self.config.slot
                );
                None
            }
        }
    }
}
