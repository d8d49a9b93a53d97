//! Integration tests for tj-output.

use tj_core::{PlayerState, Role, Team};

use crate::row::{AgentSnapshotRow, TickSummaryRow};

fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
    AgentSnapshotRow {
        agent_id,
        tick,
        team:     if agent_id % 2 == 0 { Team::Home } else { Team::Away },
        role:     Role::Runner,
        x:        10.0 + agent_id as f32,
        y:        35.0,
        state:    PlayerState::Supporting,
        stamina:  80.5,
        has_ball: agent_id == 1,
    }
}

fn summary_row(tick: u64, possessor: Option<u32>) -> TickSummaryRow {
    TickSummaryRow {
        tick,
        elapsed_secs:    tick as f64 * 0.5,
        possessor,
        possessing_team: possessor.map(|_| Team::Away),
        ball_x:          50.0,
        ball_y:          35.0,
        ball_speed:      0.0,
        events:          2,
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn records(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["agent_id", "tick", "team", "role", "x", "y", "state", "stamina", "has_ball"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, [
            "tick", "elapsed_secs", "possessor", "possessing_team",
            "ball_x", "ball_y", "ball_speed", "events",
        ]);
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)]).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("agent_snapshots.csv"));
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0");          // agent_id
        assert_eq!(&rows[0][1], "5");          // tick
        assert_eq!(&rows[0][2], "home");
        assert_eq!(&rows[1][2], "away");
        assert_eq!(&rows[1][3], "runner");
        assert_eq!(&rows[1][4], "11");         // x
        assert_eq!(&rows[1][6], "supporting");
        assert_eq!(&rows[1][7], "80.5");
        assert_eq!(&rows[0][8], "0");
        assert_eq!(&rows[1][8], "1");
    }

    #[test]
    fn csv_tick_summary_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3, Some(9))).unwrap();
        w.write_tick_summary(&summary_row(4, None)).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("tick_summaries.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "1.5");        // 3 * 0.5
        assert_eq!(&rows[0][2], "9");
        assert_eq!(&rows[0][3], "away");
        assert_eq!(&rows[0][7], "2");
        // Loose ball: empty cells.
        assert_eq!(&rows[1][2], "");
        assert_eq!(&rows[1][3], "");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does/not/exist")).is_err());
    }

    #[test]
    fn integration_csv() {
        use tj_behavior::FsmBehavior;
        use tj_core::MatchConfig;
        use tj_sim::SimBuilder;

        use crate::observer::SimOutputObserver;

        let mut config = MatchConfig::default();
        config.teams.agents_per_team = 2;
        config.total_ticks = 6;
        config.output_interval_ticks = 2;

        let mut sim = SimBuilder::new(config, FsmBehavior).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 2 → snapshots at ticks 2, 4, 6 (3 ticks × 4 agents)
        let snaps = records(dir.path().join("agent_snapshots.csv"));
        assert_eq!(snaps.len(), 12);
        assert_eq!(&snaps[0][1], "2");
        assert_eq!(&snaps[11][1], "6");

        let summaries = records(dir.path().join("tick_summaries.csv"));
        assert_eq!(summaries.len(), 6);
        let ticks: Vec<&str> = summaries.iter().map(|r| r.get(0).unwrap()).collect();
        assert_eq!(ticks, ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn integration_explicit_roster() {
        use tj_agent::{AgentSpec, AgentStoreBuilder};
        use tj_behavior::NoopBehavior;
        use tj_core::{MatchConfig, Vec2};
        use tj_sim::SimBuilder;

        use crate::observer::SimOutputObserver;

        let mut config = MatchConfig::default();
        config.total_ticks = 3;
        config.output_interval_ticks = 1;

        // A lone runner on the centre spot picks the ball up on the first tick.
        let (store, rngs) = AgentStoreBuilder::new(1)
            .agent(AgentSpec::new(Team::Home, Role::Runner, Vec2::new(50.0, 35.0)))
            .build();
        let mut sim = SimBuilder::new(config, NoopBehavior).agents(store, rngs).build().unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let summaries = records(dir.path().join("tick_summaries.csv"));
        assert_eq!(summaries.len(), 3);
        assert_eq!(&summaries[0][2], "0");
        assert_eq!(&summaries[0][3], "home");

        let snaps = records(dir.path().join("agent_snapshots.csv"));
        assert_eq!(snaps.len(), 3);
        assert!(snaps.iter().all(|r| &r[8] == "1"));
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 1), snap_row(1, 1), snap_row(2, 1)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM agent_snapshots", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_enums_as_text() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(1, 0)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (team, state, has_ball): (String, String, i64) = conn.query_row(
            "SELECT team, state, has_ball FROM agent_snapshots WHERE agent_id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!(team, "away");
        assert_eq!(state, "supporting");
        assert_eq!(has_ball, 1);
    }

    #[test]
    fn sqlite_loose_ball_is_null() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(7, None)).unwrap();
        w.write_tick_summary(&summary_row(8, Some(3))).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let loose: Option<i64> = conn.query_row(
            "SELECT possessor FROM tick_summaries WHERE tick = 7", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(loose, None);

        let (possessor, team, events): (i64, String, i64) = conn.query_row(
            "SELECT possessor, possessing_team, events FROM tick_summaries WHERE tick = 8",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!(possessor, 3);
        assert_eq!(team, "away");
        assert_eq!(events, 2);
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;
    use crate::parquet::ParquetWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("agent_snapshots.parquet").exists());
        assert!(dir.path().join("tick_summaries.parquet").exists());
    }

    #[test]
    fn parquet_snapshot_round_trip() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 2), snap_row(1, 2)]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("agent_snapshots.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();

        let total_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 2);

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(field_names, ["agent_id", "tick", "team", "role", "x", "y", "state", "stamina", "has_ball"]);
    }

    #[test]
    fn parquet_possessor_is_nullable() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(0, None)).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("tick_summaries.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();

        let possessor = schema.field_with_name("possessor").unwrap();
        assert!(possessor.is_nullable());
        assert_eq!(*possessor.data_type(), DataType::UInt32);

        let batches: Vec<_> = builder.build().unwrap().map(|b| b.unwrap()).collect();
        assert_eq!(batches[0].column(2).null_count(), 1);
    }

    #[test]
    fn parquet_finish_required() {
        // Dropping the writer without finish() leaves no footer.
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_snapshots(&[snap_row(0, 0)]).unwrap();
        }

        let file = std::fs::File::open(dir.path().join("agent_snapshots.parquet")).unwrap();
        let result = ParquetRecordBatchReaderBuilder::try_new(file);
        assert!(result.is_err(), "file without Parquet footer should fail to open");
    }
}
