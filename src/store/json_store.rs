use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::{EXPORT_VERSION, ExportData, NotesData, ProgressData};

const PROGRESS_FILE: &str = "progress.json";
const NOTES_FILE: &str = "notes.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Missing and malformed files both load as the default value.
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("discarding malformed {}: {e}", path.display());
                T::default()
            }),
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_progress(&self) -> ProgressData {
        self.load(PROGRESS_FILE)
    }

    pub fn save_progress(&self, data: &ProgressData) -> Result<()> {
        self.save(PROGRESS_FILE, data)
    }

    pub fn load_notes(&self) -> NotesData {
        self.load(NOTES_FILE)
    }

    pub fn save_notes(&self, data: &NotesData) -> Result<()> {
        self.save(NOTES_FILE, data)
    }

    pub fn export_all(&self) -> ExportData {
        ExportData {
            wordmem_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            progress: self.load_progress(),
            notes: self.load_notes(),
        }
    }

    /// Replace both blobs from an export, all or nothing.
    ///
    /// Both files are staged as `.json.tmp` first. Originals are then moved to
    /// `.json.bak` and the staged files renamed into place; any failure puts
    /// the originals back. Backups are removed once both files are committed.
    pub fn import_all(&self, data: &ExportData) -> Result<()> {
        if data.wordmem_export_version != EXPORT_VERSION {
            bail!(
                "Unsupported export version: {} (expected {})",
                data.wordmem_export_version,
                EXPORT_VERSION
            );
        }

        let files: Vec<(&str, String)> = vec![
            (PROGRESS_FILE, serde_json::to_string_pretty(&data.progress)?),
            (NOTES_FILE, serde_json::to_string_pretty(&data.notes)?),
        ];

        let mut staged: Vec<PathBuf> = Vec::new();
        for (name, json) in &files {
            let tmp_path = self.file_path(name).with_extension("json.tmp");
            let written = (|| -> Result<()> {
                let mut file = fs::File::create(&tmp_path)?;
                file.write_all(json.as_bytes())?;
                file.sync_all()?;
                Ok(())
            })();
            if let Err(e) = written {
                remove_all(&staged);
                bail!("Import failed during staging: {e}");
            }
            staged.push(tmp_path);
        }

        // (final path, backup path, had original)
        let mut committed: Vec<(PathBuf, PathBuf, bool)> = Vec::new();
        for (i, (name, _)) in files.iter().enumerate() {
            let final_path = self.file_path(name);
            let bak_path = final_path.with_extension("json.bak");
            let had_original = final_path.exists();

            if had_original && let Err(e) = fs::rename(&final_path, &bak_path) {
                roll_back(&committed);
                remove_all(&staged);
                bail!("Import failed during commit (backup): {e}");
            }

            if let Err(e) = fs::rename(&staged[i], &final_path) {
                if had_original {
                    let _ = fs::rename(&bak_path, &final_path);
                }
                roll_back(&committed);
                remove_all(&staged[i..]);
                bail!("Import failed during commit (rename): {e}");
            }

            committed.push((final_path, bak_path, had_original));
        }

        for (_, bak_path, had_original) in &committed {
            if *had_original {
                let _ = fs::remove_file(bak_path);
            }
        }
        log::info!("imported progress and notes into {}", self.base_dir.display());
        Ok(())
    }

    /// Recover from an interrupted import. A backup whose file was already
    /// moved aside is put back; otherwise the committed file wins and the
    /// backup is removed. Returns true if any backup was found.
    pub fn check_interrupted_import(&self) -> bool {
        let mut found = false;
        for name in [PROGRESS_FILE, NOTES_FILE] {
            let final_path = self.file_path(name);
            let bak_path = final_path.with_extension("json.bak");
            if !bak_path.exists() {
                continue;
            }
            found = true;
            if final_path.exists() {
                let _ = fs::remove_file(&bak_path);
            } else if let Err(e) = fs::rename(&bak_path, &final_path) {
                log::warn!("could not restore {}: {e}", bak_path.display());
            } else {
                log::warn!("restored {} from an interrupted import", final_path.display());
            }
        }
        found
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordmem")
}

fn remove_all(paths: &[PathBuf]) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}

fn roll_back(committed: &[(PathBuf, PathBuf, bool)]) {
    for (final_path, bak_path, had_original) in committed {
        if *had_original {
            let _ = fs::rename(bak_path, final_path);
        } else {
            let _ = fs::remove_file(final_path);
        }
    }
}
