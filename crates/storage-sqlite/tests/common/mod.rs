use std::sync::Arc;

use finbooks_storage_sqlite::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};
use tempfile::TempDir;

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    // Dropped last; deleting the directory closes out the database file.
    _dir: TempDir,
}

pub fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("finbooks.db").display().to_string();

    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer(pool.clone());

    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
