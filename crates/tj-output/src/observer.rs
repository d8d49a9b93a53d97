//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tj_sim::{SimObserver, TickOutcome, World, snapshot_for_rendering};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records tick summaries and agent snapshots to any
/// [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, outcome: &TickOutcome) {
        let tick = outcome.tick.0 + 1;
        let row = TickSummaryRow {
            tick,
            elapsed_secs:    tick as f64 * f64::from(outcome.tick_duration),
            possessor:       outcome.possessor.map(|p| p.0),
            possessing_team: outcome.possessing_team,
            ball_x:          outcome.ball_position.x,
            ball_y:          outcome.ball_position.y,
            ball_speed:      outcome.ball_speed,
            events:          outcome.events.len() as u32,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, world: &World) {
        let view = snapshot_for_rendering(world);
        let rows: Vec<AgentSnapshotRow> = view
            .agents
            .iter()
            .map(|a| AgentSnapshotRow {
                agent_id: a.id.0,
                tick:     view.tick.0,
                team:     a.team,
                role:     a.role,
                x:        a.position.x,
                y:        a.position.y,
                state:    a.state,
                stamina:  a.stamina,
                has_ball: a.has_ball,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _world: &World) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
