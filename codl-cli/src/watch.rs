//! Polling rebuild loop
//!
//! Every period the directory is searched again and files whose modification time
//! changed since the previous pass are translated. A file seen for the first time counts
//! as changed, so the first pass translates everything. A broken file is reported and
//! skipped; it is retried once it changes again.

use crate::discovery::discover;
use crate::translate::Translator;
use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub translated: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl PassReport {
    pub fn is_empty(&self) -> bool {
        self.translated.is_empty() && self.failed.is_empty()
    }
}

/// Modification times recorded at the previous pass
#[derive(Debug, Default)]
pub struct WatchState {
    seen: HashMap<PathBuf, SystemTime>,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the files that are new or were modified since they were last recorded
    pub fn filter_changed(&mut self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        files
            .into_iter()
            .filter(|path| {
                let modified = match fs::metadata(path).and_then(|meta| meta.modified()) {
                    Ok(modified) => modified,
                    Err(err) => {
                        warn!("cannot stat {}: {}", path.display(), err);
                        return false;
                    }
                };
                self.seen.insert(path.clone(), modified) != Some(modified)
            })
            .collect()
    }

    /// One watch pass: discover, filter, translate
    pub fn poll(&mut self, dir: &Path, extension: &str, translator: &Translator) -> Result<PassReport> {
        let changed = self.filter_changed(discover(dir, extension)?);
        let mut report = PassReport::default();

        for path in changed {
            match translator.translate_file(&path) {
                Ok(_) => report.translated.push(path),
                Err(err) => {
                    error!("{:#}", err);
                    report.failed.push(path);
                }
            }
        }
        Ok(report)
    }
}

/// Poll `dir` forever
pub fn run(dir: &Path, extension: &str, period: Duration, translator: &Translator) -> Result<()> {
    info!(
        "watching {} for *.{} every {}ms",
        dir.display(),
        extension,
        period.as_millis()
    );
    let mut state = WatchState::new();

    loop {
        match state.poll(dir, extension, translator) {
            Ok(report) if report.is_empty() => {}
            Ok(report) => debug!(
                translated = report.translated.len(),
                failed = report.failed.len(),
                "pass complete"
            ),
            Err(err) => warn!("watch pass failed: {:#}", err),
        }
        thread::sleep(period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codl_parser::ParseOptions;
    use codl_render::FormatRegistry;
    use std::fs::File;

    fn translator() -> Translator {
        Translator::new(FormatRegistry::with_defaults(), "rust", ParseOptions::default()).unwrap()
    }

    fn touch(path: &Path, offset_secs: u64) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + offset_secs))
            .unwrap();
    }

    #[test]
    fn first_pass_sees_everything_then_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.codl");
        let b = dir.path().join("b.codl");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();

        let mut state = WatchState::new();
        assert_eq!(state.filter_changed(vec![a.clone(), b.clone()]), vec![a.clone(), b.clone()]);
        assert!(state.filter_changed(vec![a.clone(), b.clone()]).is_empty());

        touch(&b, 60);
        assert_eq!(state.filter_changed(vec![a, b.clone()]), vec![b]);
    }

    #[test]
    fn missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = WatchState::new();
        assert!(state.filter_changed(vec![dir.path().join("gone.codl")]).is_empty());
    }

    #[test]
    fn broken_file_does_not_stop_the_pass() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.codl");
        let bad = dir.path().join("bad.codl");
        fs::write(&good, "ROUTE ok DOES «h»").unwrap();
        fs::write(&bad, "ROUTE broken DOES").unwrap();

        let mut state = WatchState::new();
        let translator = translator();
        let report = state.poll(dir.path(), "codl", &translator).unwrap();
        assert_eq!(report.translated, vec![good.clone()]);
        assert_eq!(report.failed, vec![bad.clone()]);
        assert!(dir.path().join("good.rs").exists());

        // Nothing changed
        assert!(state.poll(dir.path(), "codl", &translator).unwrap().is_empty());

        fs::write(&bad, "ROUTE fixed DOES «h»").unwrap();
        touch(&bad, 120);
        let report = state.poll(dir.path(), "codl", &translator).unwrap();
        assert_eq!(report.translated, vec![bad]);
        assert!(report.failed.is_empty());
    }
}
