use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

/// Caller-owned memoized load, keyed by the source file's modification time.
///
/// The transforms themselves are pure and recomputed on every parameter
/// change; hosts that re-run a pipeline per selection hold one of these per
/// source file so the file is only re-read when it changes on disk.
#[derive(Debug)]
pub struct SourceCache<T> {
    path: PathBuf,
    loaded: Option<(SystemTime, T)>,
}

impl<T> SourceCache<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), loaded: None }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached value, running `load` only when the file's
    /// modification time differs from the one last seen.
    pub fn get_or_load<F>(&mut self, load: F) -> Result<&T>
    where
        F: FnOnce(&Path) -> Result<T>,
    {
        let mtime = fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to stat source file: {}", self.path.display()))?;

        let stale = match &self.loaded {
            Some((seen, _)) => *seen != mtime,
            None => true,
        };
        if stale {
            let value = load(&self.path)?;
            self.loaded = Some((mtime, value));
        }

        match &self.loaded {
            Some((_, value)) => Ok(value),
            None => unreachable!("value was just stored"),
        }
    }

    /// Drops the cached value, forcing a reload on next access.
    pub fn invalidate(&mut self) {
        self.loaded = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, FileTimes};
    use std::io::Write;
    use std::time::Duration;

    fn set_mtime(path: &Path, t: SystemTime) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_times(FileTimes::new().set_modified(t)).unwrap();
    }

    #[test]
    fn reloads_only_on_mtime_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kerg.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "a;b").unwrap();
        drop(file);

        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        set_mtime(&path, t0);

        let mut loads = 0usize;
        let mut cache: SourceCache<String> = SourceCache::new(&path);

        let mut load = |loads: &mut usize| -> Result<String> {
            *loads += 1;
            Ok("loaded".to_string())
        };
        cache.get_or_load(|_| load(&mut loads)).unwrap();
        cache.get_or_load(|_| load(&mut loads)).unwrap();
        assert_eq!(loads, 1);

        set_mtime(&path, t0 + Duration::from_secs(60));
        cache.get_or_load(|_| load(&mut loads)).unwrap();
        assert_eq!(loads, 2);

        cache.invalidate();
        cache.get_or_load(|_| load(&mut loads)).unwrap();
        assert_eq!(loads, 3);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut cache: SourceCache<()> = SourceCache::new("/nonexistent/kerg.csv");
        assert!(cache.get_or_load(|_| Ok(())).is_err());
    }
}
