//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//!
//! A loose ball leaves the `possessor` and `possessing_team` cells empty.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

pub(crate) const SNAPSHOT_HEADERS: [&str; 9] =
    ["agent_id", "tick", "team", "role", "x", "y", "state", "stamina", "has_ball"];

pub(crate) const SUMMARY_HEADERS: [&str; 8] = [
    "tick", "elapsed_secs", "possessor", "possessing_team",
    "ball_x", "ball_y", "ball_speed", "events",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots:  Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.team.as_str().to_owned(),
                row.role.as_str().to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.state.as_str().to_owned(),
                row.stamina.to_string(),
                (row.has_ball as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_secs.to_string(),
            row.possessor.map(|p| p.to_string()).unwrap_or_default(),
            row.possessing_team.map(|t| t.as_str().to_owned()).unwrap_or_default(),
            row.ball_x.to_string(),
            row.ball_y.to_string(),
            row.ball_speed.to_string(),
            row.events.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
