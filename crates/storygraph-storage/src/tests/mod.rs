use super::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::tempdir;

fn sample_positions() -> NodePositions {
    let mut positions = NodePositions::new();
    positions.insert(NodeId::new("19245"), Position::new(10.0, 20.0));
    positions.insert(NodeId::new("8"), Position::new(-5.5, 300.0));
    positions
}

/// Counts saves and forwards them to an in-memory store.
#[derive(Default)]
struct CountingRepo {
    saves: AtomicUsize,
    inner: MemoryPositions,
}

impl PositionRepository for CountingRepo {
    fn load(&self) -> Result<NodePositions, StorageError> {
        self.inner.load()
    }

    fn save(&self, positions: &NodePositions) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(positions)
    }
}

struct BrokenRepo;

impl PositionRepository for BrokenRepo {
    fn load(&self) -> Result<NodePositions, StorageError> {
        Err(StorageError::NoDataDir)
    }

    fn save(&self, _positions: &NodePositions) -> Result<(), StorageError> {
        Err(StorageError::NoDataDir)
    }
}

#[test]
fn test_json_file_round_trip() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let repo = JsonFilePositions::new(dir.path().join("nested").join("positions.json"));

    repo.save(&sample_positions())?;
    assert_eq!(repo.load()?, sample_positions());
    Ok(())
}

#[test]
fn test_json_file_missing_or_empty_loads_empty() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let repo = JsonFilePositions::new(dir.path().join("positions.json"));
    assert!(repo.load()?.is_empty());

    fs::write(repo.path(), "  \n")?;
    assert!(repo.load()?.is_empty());
    Ok(())
}

#[test]
fn test_json_file_uses_node_ids_as_keys() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let repo = JsonFilePositions::new(dir.path().join("positions.json"));
    repo.save(&sample_positions())?;

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(repo.path())?)?;
    assert_eq!(value["19245"]["x"], 10.0);
    assert_eq!(value["8"]["y"], 300.0);
    Ok(())
}

#[test]
fn test_json_file_corrupt_content_is_an_error() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let repo = JsonFilePositions::new(dir.path().join("positions.json"));
    fs::write(repo.path(), "{ nope")?;

    assert!(matches!(repo.load(), Err(StorageError::Json(_))));
    assert!(load_or_default(&repo).is_empty());
    Ok(())
}

#[test]
fn test_default_location_is_app_scoped() {
    if let Ok(path) = JsonFilePositions::default_location() {
        assert!(path.ends_with(format!("{}/{}", APP_DIR_NAME, POSITIONS_FILE_NAME)));
    }
}

#[test]
fn test_memory_clones_share_state() -> anyhow::Result<()> {
    let repo = MemoryPositions::new();
    let other = repo.clone();
    repo.save(&sample_positions())?;
    assert_eq!(other.load()?, sample_positions());
    Ok(())
}

#[test]
fn test_debounced_writer_coalesces_bursts() -> anyhow::Result<()> {
    let repo = Arc::new(CountingRepo::default());
    let writer = DebouncedWriter::spawn(repo.clone(), Duration::from_secs(5));

    for i in 0..5 {
        let mut positions = sample_positions();
        positions.insert(NodeId::new("moving"), Position::new(i as f32, 0.0));
        writer.submit(positions)?;
    }
    writer.flush()?;

    assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    let saved = repo.inner.snapshot();
    assert_eq!(saved[&NodeId::new("moving")], Position::new(4.0, 0.0));
    Ok(())
}

#[test]
fn test_debounced_writer_saves_after_quiet_period() -> anyhow::Result<()> {
    let repo = Arc::new(CountingRepo::default());
    let writer = DebouncedWriter::spawn(repo.clone(), Duration::from_millis(20));

    writer.submit(sample_positions())?;
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while repo.saves.load(Ordering::SeqCst) == 0 && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    assert_eq!(repo.inner.snapshot(), sample_positions());
    Ok(())
}

#[test]
fn test_debounced_writer_flushes_on_drop() {
    let repo = MemoryPositions::new();
    {
        let writer = DebouncedWriter::spawn(repo.clone(), Duration::from_secs(60));
        writer.submit(sample_positions()).unwrap();
    }
    assert_eq!(repo.snapshot(), sample_positions());
}

#[test]
fn test_flush_reports_save_errors() {
    let writer = DebouncedWriter::spawn(BrokenRepo, Duration::from_secs(60));
    writer.submit(sample_positions()).unwrap();
    assert!(matches!(writer.flush(), Err(StorageError::NoDataDir)));
    // Nothing pending afterwards.
    assert!(writer.flush().is_ok());
}
