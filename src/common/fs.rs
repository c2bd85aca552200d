use anyhow::{bail, ensure, Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub(crate) fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    Ok(())
}

pub(crate) fn require_file_exists(path: &Path) -> Result<()> {
    ensure!(path.is_file(), "Missing input file: {}", path.display());
    Ok(())
}

/// Write-then-rename wrapper for atomic file outputs
pub(crate) struct PendingWrite {
    target: PathBuf,
    tmp: Option<(NamedTempFile, bool)>, // (file, need_fsync_dir)
}

pub(crate) fn open_for_big_write(target: &Path, force: bool) -> Result<PendingWrite> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }
    let need_fsync_dir = target.parent().is_some();
    let tmp = NamedTempFile::new_in(target.parent().unwrap_or(Path::new(".")))
        .context("create temp file")?;

    Ok(PendingWrite { target: target.to_path_buf(), tmp: Some((tmp, need_fsync_dir)) })
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.tmp.as_mut().expect("not finalized").0.write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.tmp.as_mut().expect("not finalized").0.flush()
    }
}

pub(crate) fn finalize_big_write(mut pending: PendingWrite) -> Result<()> {
    let (tmp, need_fsync_dir) = pending.tmp.take().expect("not finalized");
    tmp.as_file().sync_all().ok(); // best-effort fsync file
    tmp.persist(&pending.target)
        .with_context(|| format!("rename to {}", pending.target.display()))?;
    if need_fsync_dir {
        if let Some(dir) = pending.target.parent() {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_stdout_path() {
        assert!(assert_not_stdout(Path::new("-")).is_err());
        assert!(assert_not_stdout(Path::new("out.geojson")).is_ok());
    }

    #[test]
    fn big_write_is_atomic_and_guarded() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.json");

        let mut sink = open_for_big_write(&target, false).unwrap();
        sink.write_all(b"{}").unwrap();
        finalize_big_write(sink).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"{}");

        // existing file without --force is refused
        assert!(open_for_big_write(&target, false).is_err());
        // with force, content is replaced
        let mut sink = open_for_big_write(&target, true).unwrap();
        sink.write_all(b"[]").unwrap();
        finalize_big_write(sink).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"[]");
    }
}
