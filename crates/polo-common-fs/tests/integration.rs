use parking_lot::Mutex;
use polo_common_fs::{path, WatchTarget, Watcher};
use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Target whose file list and counters stay visible to the test.
#[derive(Clone, Default)]
struct Operator {
    files: Arc<Mutex<Vec<PathBuf>>>,
    list_calls: Arc<AtomicUsize>,
    execute_calls: Arc<AtomicUsize>,
}

impl Operator {
    fn with_files(files: Vec<PathBuf>) -> Self {
        let operator = Self::default();
        *operator.files.lock() = files;
        operator
    }

    fn calls(&self) -> (usize, usize) {
        (
            self.list_calls.load(Ordering::SeqCst),
            self.execute_calls.load(Ordering::SeqCst),
        )
    }
}

impl WatchTarget for Operator {
    type Error = std::convert::Infallible;

    fn list_files(&mut self) -> Vec<PathBuf> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.files.lock().clone()
    }

    fn execute(&mut self) -> Result<(), Self::Error> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn create_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("file.ext");
    File::create(&path).unwrap();
    path
}

fn touch(path: &PathBuf, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

#[test]
fn test_add_file_to_list() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_file(&dir);
    let operator = Operator::default();
    let watcher = Watcher::new(operator.clone());

    watcher.check().unwrap();
    assert_eq!(operator.calls(), (1, 1));

    *operator.files.lock() = vec![file.clone()];
    assert_eq!(watcher.check(), Ok(true));
    assert_eq!(operator.calls(), (2, 2));
    assert_eq!(watcher.tracked_files(), vec![file]);
}

#[test]
fn test_touch_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_file(&dir);
    let start = SystemTime::now();
    touch(&file, start);

    let operator = Operator::with_files(vec![file.clone()]);
    let watcher = Watcher::new(operator.clone());
    watcher.check().unwrap();
    assert_eq!(operator.calls(), (1, 1));
    watcher.check().unwrap();
    assert_eq!(operator.calls(), (2, 1));

    touch(&file, start + Duration::from_secs(1));
    assert_eq!(watcher.check(), Ok(true));
    assert_eq!(operator.calls(), (3, 2));
    assert_eq!(watcher.check(), Ok(false));
    assert_eq!(operator.calls(), (4, 2));
}

#[test]
fn test_remove_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_file(&dir);
    let operator = Operator::with_files(vec![file.clone()]);
    let watcher = Watcher::new(operator.clone());
    watcher.check().unwrap();
    assert_eq!(operator.calls(), (1, 1));

    std::fs::remove_file(&file).unwrap();
    assert_eq!(watcher.check(), Ok(true));
    assert_eq!(operator.calls(), (2, 2));
    assert!(watcher.tracked_files().is_empty());
}

#[test]
fn test_remove_file_from_list() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_file(&dir);
    let operator = Operator::with_files(vec![file]);
    let watcher = Watcher::new(operator.clone());
    watcher.check().unwrap();
    assert_eq!(operator.calls(), (1, 1));

    operator.files.lock().clear();
    assert_eq!(watcher.check(), Ok(true));
    assert_eq!(operator.calls(), (2, 2));
}

#[test]
fn test_missing_listed_file_is_not_a_change() {
    let dir = tempfile::tempdir().unwrap();
    let operator = Operator::with_files(vec![dir.path().join("never-created.po")]);
    let watcher = Watcher::new(operator.clone());
    watcher.check().unwrap();
    assert_eq!(watcher.check(), Ok(false));
    assert_eq!(operator.calls(), (2, 1));
}

#[test]
fn test_concurrent_checks_rebuild_once() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_file(&dir);
    let operator = Operator::with_files(vec![file]);
    let watcher = Arc::new(Watcher::new(operator.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let watcher = Arc::clone(&watcher);
            std::thread::spawn(move || watcher.check().unwrap())
        })
        .collect();
    let rebuilds = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&rebuilt| rebuilt)
        .count();

    assert_eq!(rebuilds, 1);
    assert_eq!(operator.calls(), (8, 1));
}

#[test]
fn test_relative_display_of_walked_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("app/templates")).unwrap();
    std::fs::write(dir.path().join("app/templates/page.html"), "").unwrap();
    std::fs::write(dir.path().join("app/views.py"), "").unwrap();

    let names: Vec<String> = polo_common_fs::walk_files(dir.path())
        .iter()
        .map(|file| path::relative_display(file, dir.path()))
        .collect();
    assert_eq!(names, vec!["app/templates/page.html", "app/views.py"]);
}
