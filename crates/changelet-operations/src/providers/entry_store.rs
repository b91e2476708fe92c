use std::fs;
use std::path::{Path, PathBuf};

use changelet_core::{Entry, sort_entries};
use changelet_parse::{EntryDocument, parse_entry, serialize_entry};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{EntryReader, EntryWriter, PrProvider};

const MAX_FILENAME_ATTEMPTS: usize = 100;

/// Entries stored as individual markdown files in a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemEntryStore;

impl FileSystemEntryStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn read_document(path: &Path) -> Result<EntryDocument> {
    let content = fs::read_to_string(path).map_err(|source| OperationError::EntryRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_entry(&content).map_err(|source| OperationError::EntryParse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| OperationError::EntryWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(OperationError::EntryList {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| OperationError::EntryList {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.extension().is_none_or(|ext| ext != "md") || !path.is_file() {
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

fn generate_unique_filename(dir: &Path) -> String {
    for _ in 0..MAX_FILENAME_ATTEMPTS {
        if let Some(name) = petname::petname(3, "-") {
            let filename = format!("{name}.md");

            if !dir.join(&filename).exists() {
                return filename;
            }
        }
    }

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("entry-{timestamp}.md")
}

impl EntryReader for FileSystemEntryStore {
    fn load(&self, path: &Path, provider: &dyn PrProvider) -> Result<Entry> {
        let document = read_document(path)?;

        let pr = match document.pr {
            Some(id) => provider.pr_by_id(id)?,
            None => provider.pr_by_filename(path)?,
        };

        let entry = Entry::new(document.entry_type, document.description, path);
        Ok(match pr {
            Some(pr) => entry.with_pr(pr),
            None => entry,
        })
    }

    fn load_all(&self, dir: &Path, provider: &dyn PrProvider) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for path in list_markdown_files(dir)? {
            let entry = self.load(&path, provider)?;
            if entry.pr.is_none() {
                tracing::debug!(path = %path.display(), "skipping entry without a merged PR");
                continue;
            }
            entries.push(entry);
        }

        sort_entries(&mut entries);
        tracing::debug!(dir = %dir.display(), count = entries.len(), "loaded entries");
        Ok(entries)
    }
}

impl EntryWriter for FileSystemEntryStore {
    fn save(&self, entry: &mut Entry, filename: Option<&Path>) -> Result<()> {
        if let Some(filename) = filename {
            entry.filename = filename.to_path_buf();
        }

        let content = serialize_entry(
            entry.entry_type,
            entry.pr.as_ref().map(|pr| pr.id),
            &entry.description,
        )?;
        write_file(&entry.filename, &content)
    }

    fn create(&self, dir: &Path, document: &EntryDocument) -> Result<PathBuf> {
        let path = dir.join(generate_unique_filename(dir));
        let content = serialize_entry(document.entry_type, document.pr, &document.description)?;
        write_file(&path, &content)?;

        tracing::debug!(path = %path.display(), "created entry");
        Ok(path)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|source| OperationError::EntryRemove {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use changelet_core::EntryType;
    use tempfile::TempDir;

    use super::*;
    use crate::mocks::{MockPrProvider, pr};

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("write entry");
        path
    }

    #[test]
    fn load_resolves_pr_by_filename() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = write(dir.path(), "a.md", "---\ntype: minor\n---\nAdd widgets\n");
        let provider = MockPrProvider::new().with_file(&path, pr(7, 1));

        let entry = FileSystemEntryStore.load(&path, &provider)?;

        assert_eq!(entry.entry_type, EntryType::Minor);
        assert_eq!(entry.description, "Add widgets");
        assert_eq!(entry.pr.as_ref().map(|p| p.id), Some(7));
        assert_eq!(entry.filename(), path);
        Ok(())
    }

    #[test]
    fn explicit_pr_is_resolved_by_id() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = write(dir.path(), "a.md", "---\ntype: patch\npr: 99\n---\nFix\n");
        let provider = MockPrProvider::new()
            .with_id(pr(99, 2))
            .with_file(&path, pr(1, 1));

        let entry = FileSystemEntryStore.load(&path, &provider)?;

        assert_eq!(entry.pr.as_ref().map(|p| p.id), Some(99));
        assert_eq!(provider.filename_lookups(), 0);
        Ok(())
    }

    #[test]
    fn malformed_entry_names_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = write(dir.path(), "broken.md", "no front matter here");

        let err = FileSystemEntryStore
            .load(&path, &MockPrProvider::new())
            .expect_err("should fail");

        assert!(err.to_string().contains("broken.md"));
        Ok(())
    }

    #[test]
    fn load_all_skips_unresolved_and_sorts() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let patch = write(dir.path(), "a.md", "---\ntype: patch\n---\npatch\n");
        let minor = write(dir.path(), "b.md", "---\ntype: minor\n---\nminor\n");
        write(dir.path(), "c.md", "---\ntype: major\n---\nunmerged\n");
        write(dir.path(), "notes.txt", "ignored");

        let provider = MockPrProvider::new()
            .with_file(&patch, pr(1, 1))
            .with_file(&minor, pr(2, 2));

        let entries = FileSystemEntryStore.load_all(dir.path(), &provider)?;

        let order: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(order, ["minor", "patch"]);
        Ok(())
    }

    #[test]
    fn missing_directory_is_empty() -> anyhow::Result<()> {
        let dir = TempDir::new()?;

        let entries =
            FileSystemEntryStore.load_all(&dir.path().join(".changelog"), &MockPrProvider::new())?;

        assert!(entries.is_empty());
        Ok(())
    }

    #[test]
    fn save_then_load_keeps_content() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("saved.md");
        let provider = MockPrProvider::new().with_id(pr(42, 1));

        let mut entry = Entry::new(EntryType::Patch, "Fix widgets", &path).with_pr(pr(42, 1));
        FileSystemEntryStore.save(&mut entry, None)?;

        assert_eq!(
            fs::read_to_string(&path)?,
            "---\ntype: patch\npr: 42\n---\nFix widgets"
        );

        let loaded = FileSystemEntryStore.load(&path, &provider)?;
        assert_eq!(loaded, entry);
        Ok(())
    }

    #[test]
    fn save_tolerates_appended_newline() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("saved.md");

        let mut entry = Entry::new(EntryType::Minor, "Add widgets", &path);
        FileSystemEntryStore.save(&mut entry, None)?;

        let mut content = fs::read_to_string(&path)?;
        content.push('\n');
        fs::write(&path, content)?;

        let loaded = FileSystemEntryStore.load(&path, &MockPrProvider::new())?;
        assert_eq!(loaded, entry);
        Ok(())
    }

    #[test]
    fn save_to_new_filename_updates_entry() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let original = dir.path().join("one.md");
        let moved = dir.path().join("two.md");

        let mut entry = Entry::new(EntryType::None, "internal", &original);
        FileSystemEntryStore.save(&mut entry, Some(&moved))?;

        assert_eq!(entry.filename(), moved);
        assert!(moved.exists());
        Ok(())
    }

    #[test]
    fn create_picks_unique_names() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let document = EntryDocument {
            entry_type: EntryType::Patch,
            pr: Some(5),
            description: "Fix".to_string(),
        };

        let first = FileSystemEntryStore.create(dir.path(), &document)?;
        let second = FileSystemEntryStore.create(dir.path(), &document)?;

        assert_ne!(first, second);
        assert_eq!(first.extension().and_then(|e| e.to_str()), Some("md"));
        assert_eq!(
            fs::read_to_string(&first)?,
            "---\ntype: patch\npr: 5\n---\nFix"
        );
        Ok(())
    }

    #[test]
    fn remove_deletes_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = write(dir.path(), "a.md", "---\ntype: patch\n---\nx");

        FileSystemEntryStore.remove(&path)?;

        assert!(!path.exists());
        assert!(FileSystemEntryStore.remove(&path).is_err());
        Ok(())
    }
}
