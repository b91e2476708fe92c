use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use semver::Version;

use crate::Result;
use crate::error::VersionError;

const VERSION_DECLARATION: &str = r#"__version__\s*(?::\s*str\s*)?=\s*["']([^"']+)["']"#;

fn version_declaration() -> Result<Regex> {
    Ok(Regex::new(VERSION_DECLARATION)?)
}

/// Module name for a project: its root directory name with `-` mapped to `_`.
#[must_use]
pub fn module_name(project_root: &Path) -> Option<String> {
    project_root
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.replace('-', "_"))
}

fn candidates(module: &str) -> [PathBuf; 3] {
    [
        Path::new(module).join("__init__.py"),
        PathBuf::from(format!("{module}.py")),
        Path::new("src").join(module).join("__init__.py"),
    ]
}

/// A source file declaring the project's `__version__`.
#[derive(Debug, Clone)]
pub struct VersionFile {
    path: PathBuf,
    content: String,
    raw_version: String,
    version: Version,
}

impl VersionFile {
    /// Finds the version file for the project rooted at `project_root`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::FileNotFound`] if none of the candidate
    /// locations exist.
    pub fn locate(project_root: &Path) -> Result<PathBuf> {
        let module = module_name(project_root)
            .ok_or_else(|| VersionError::NoModuleName(project_root.to_path_buf()))?;

        let candidates = candidates(&module);
        candidates
            .iter()
            .map(|relative| project_root.join(relative))
            .find(|path| path.is_file())
            .ok_or_else(|| VersionError::FileNotFound {
                module,
                candidates: candidates
                    .iter()
                    .map(|c| c.display().to_string())
                    .collect(),
            })
    }

    /// # Errors
    ///
    /// Returns an error if the file is not found, cannot be read, or does not
    /// declare a valid semantic version.
    pub fn discover(project_root: &Path) -> Result<Self> {
        let path = Self::locate(project_root)?;
        Self::read(&path)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not declare a valid
    /// semantic version.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| VersionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_content(path, content)
    }

    /// # Errors
    ///
    /// Returns an error if the content does not declare a valid semantic
    /// version.
    pub fn from_content(path: &Path, content: String) -> Result<Self> {
        let raw_version = version_declaration()?
            .captures(&content)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| VersionError::MissingDeclaration {
                path: path.to_path_buf(),
            })?;

        let version = Version::parse(&raw_version).map_err(|source| VersionError::Parse {
            path: path.to_path_buf(),
            version: raw_version.clone(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            content,
            raw_version,
            version,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// File content with every occurrence of the current version string
    /// replaced by `new_version`.
    #[must_use]
    pub fn replaced_content(&self, new_version: &Version) -> String {
        self.content
            .replace(&self.raw_version, &new_version.to_string())
    }

    /// # Errors
    ///
    /// Returns [`VersionError::Write`] if the file cannot be written.
    pub fn write_version(&self, new_version: &Version) -> Result<()> {
        fs::write(&self.path, self.replaced_content(new_version)).map_err(|source| {
            VersionError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn declaration_pattern_builds_and_captures() -> Result<()> {
        let pattern = version_declaration()?;
        let captures = pattern.captures("__version__: str = '1.2.3'");
        assert_eq!(captures.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("1.2.3"));
        Ok(())
    }

    fn project(name: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path().join(name);
        fs::create_dir_all(&root).expect("create project root");
        (dir, root)
    }

    #[test]
    fn module_name_replaces_dashes() {
        assert_eq!(
            module_name(Path::new("/src/octodns-route53")).as_deref(),
            Some("octodns_route53")
        );
    }

    #[test]
    fn locates_package_init() {
        let (_dir, root) = project("foo-bar");
        fs::create_dir_all(root.join("foo_bar")).expect("create package");
        fs::write(root.join("foo_bar/__init__.py"), "__version__ = '0.1.3'\n")
            .expect("write init");

        let file = VersionFile::discover(&root).expect("should discover");
        assert_eq!(file.path(), root.join("foo_bar/__init__.py"));
        assert_eq!(file.version(), &Version::new(0, 1, 3));
    }

    #[test]
    fn locates_single_module() {
        let (_dir, root) = project("foo_bar");
        fs::write(root.join("foo_bar.py"), "__version__ = \"3.2.1\"").expect("write module");

        let file = VersionFile::discover(&root).expect("should discover");
        assert_eq!(file.version(), &Version::new(3, 2, 1));
    }

    #[test]
    fn locates_src_layout() {
        let (_dir, root) = project("widgets");
        fs::create_dir_all(root.join("src/widgets")).expect("create package");
        fs::write(
            root.join("src/widgets/__init__.py"),
            "__version__: str = '2.0.0'\n",
        )
        .expect("write init");

        let file = VersionFile::discover(&root).expect("should discover");
        assert_eq!(file.version(), &Version::new(2, 0, 0));
    }

    #[test]
    fn missing_file_lists_candidates() {
        let (_dir, root) = project("nothing-here");

        let err = VersionFile::discover(&root).expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("nothing_here"));
        assert!(msg.contains("__init__.py"));
    }

    #[test]
    fn missing_declaration_is_error() {
        let err = VersionFile::from_content(Path::new("x.py"), "VERSION = '1.0.0'".to_string())
            .expect_err("should fail");
        assert!(matches!(err, VersionError::MissingDeclaration { .. }));
    }

    #[test]
    fn invalid_version_is_error() {
        let err = VersionFile::from_content(Path::new("x.py"), "__version__ = '1.foo'".to_string())
            .expect_err("should fail");
        assert!(matches!(err, VersionError::Parse { .. }));
    }

    #[test]
    fn writes_new_version_in_place() {
        let (_dir, root) = project("changelet");
        fs::create_dir_all(root.join("changelet")).expect("create package");
        let init = root.join("changelet/__init__.py");
        fs::write(&init, "# __version__ = '0.1.3' #").expect("write init");

        let file = VersionFile::discover(&root).expect("should discover");
        file.write_version(&Version::new(1, 0, 0))
            .expect("should write");

        assert_eq!(
            fs::read_to_string(&init).expect("read init"),
            "# __version__ = '1.0.0' #"
        );
    }
}
