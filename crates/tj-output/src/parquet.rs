//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.parquet`
//! - `tick_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    BooleanBuilder, Float32Builder, Float64Builder, StringBuilder, UInt32Builder, UInt64Builder,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("agent_id", DataType::UInt32,  false),
        Field::new("tick",     DataType::UInt64,  false),
        Field::new("team",     DataType::Utf8,    false),
        Field::new("role",     DataType::Utf8,    false),
        Field::new("x",        DataType::Float32, false),
        Field::new("y",        DataType::Float32, false),
        Field::new("state",    DataType::Utf8,    false),
        Field::new("stamina",  DataType::Float32, false),
        Field::new("has_ball", DataType::Boolean, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",            DataType::UInt64,  false),
        Field::new("elapsed_secs",    DataType::Float64, false),
        Field::new("possessor",       DataType::UInt32,  true),
        Field::new("possessing_team", DataType::Utf8,    true),
        Field::new("ball_x",          DataType::Float32, false),
        Field::new("ball_y",          DataType::Float32, false),
        Field::new("ball_speed",      DataType::Float32, false),
        Field::new("events",          DataType::UInt32,  false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        let snap_file = File::create(dir.join("agent_snapshots.parquet"))?;
        let snapshots = ArrowWriter::try_new(
            snap_file,
            Arc::clone(&snap_schema),
            Some(snappy_props()),
        )?;

        let summ_file = File::create(dir.join("tick_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(
            summ_file,
            Arc::clone(&summ_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            snapshots: Some(snapshots),
            summaries: Some(summaries),
            snap_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut agent_ids = UInt32Builder::new();
        let mut ticks     = UInt64Builder::new();
        let mut teams     = StringBuilder::new();
        let mut roles     = StringBuilder::new();
        let mut xs        = Float32Builder::new();
        let mut ys        = Float32Builder::new();
        let mut states    = StringBuilder::new();
        let mut staminas  = Float32Builder::new();
        let mut has_balls = BooleanBuilder::new();

        for row in rows {
            agent_ids.append_value(row.agent_id);
            ticks.append_value(row.tick);
            teams.append_value(row.team.as_str());
            roles.append_value(row.role.as_str());
            xs.append_value(row.x);
            ys.append_value(row.y);
            states.append_value(row.state.as_str());
            staminas.append_value(row.stamina);
            has_balls.append_value(row.has_ball);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(agent_ids.finish()),
                Arc::new(ticks.finish()),
                Arc::new(teams.finish()),
                Arc::new(roles.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(states.finish()),
                Arc::new(staminas.finish()),
                Arc::new(has_balls.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut ticks      = UInt64Builder::new();
        let mut elapsed    = Float64Builder::new();
        let mut possessors = UInt32Builder::new();
        let mut teams      = StringBuilder::new();
        let mut ball_xs    = Float32Builder::new();
        let mut ball_ys    = Float32Builder::new();
        let mut speeds     = Float32Builder::new();
        let mut events     = UInt32Builder::new();

        ticks.append_value(row.tick);
        elapsed.append_value(row.elapsed_secs);
        possessors.append_option(row.possessor);
        teams.append_option(row.possessing_team.map(|t| t.as_str()));
        ball_xs.append_value(row.ball_x);
        ball_ys.append_value(row.ball_y);
        speeds.append_value(row.ball_speed);
        events.append_value(row.events);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(elapsed.finish()),
                Arc::new(possessors.finish()),
                Arc::new(teams.finish()),
                Arc::new(ball_xs.finish()),
                Arc::new(ball_ys.finish()),
                Arc::new(speeds.finish()),
                Arc::new(events.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
