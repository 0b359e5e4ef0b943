//! Source tree assembly.
//!
//! Merges generated bindings with user-supplied Java sources and the fixed
//! runtime support files shipped with the bind package, then writes the Go
//! `main` package and the cgo flags needed to compile against JNI.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use crate::core::WorkspaceLayout;
use crate::util::fs::{copy_file, relative_path, write_bytes};

/// Suffix of Java sources picked up from the extra source directory.
pub const JAVA_SUFFIX: &str = ".java";

/// Name of the generated file carrying the cgo include flags.
pub const CGO_FLAGS_FILE: &str = "gojavacimport.go";

/// Java classes shipped by the bind runtime; no bound package may generate
/// a class with one of these names.
pub const RESERVED_CLASS_NAMES: [&str; 2] = ["Seq", "LoadJNI"];

/// Which scratch tree a support file is copied into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportTree {
    /// The Go binding package (`gojava_bind/`)
    Bind,
    /// The Java source tree (`src/go/`); these files are also compiled
    Java,
}

/// One support file: where it lands and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportEntry {
    /// Destination tree
    pub tree: SupportTree,

    /// File name in the destination tree
    pub name: String,

    /// Source path relative to the bind package install directory
    pub source: PathBuf,
}

impl SupportEntry {
    pub fn new(tree: SupportTree, name: &str, source: &str) -> Self {
        SupportEntry {
            tree,
            name: name.to_string(),
            source: PathBuf::from(source),
        }
    }
}

/// A (destination, source) copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub dst: PathBuf,
    pub src: PathBuf,
}

/// Support files copied from the bind package install directory.
#[derive(Debug, Clone)]
pub struct SupportManifest {
    install_dir: PathBuf,
    entries: Vec<SupportEntry>,
}

impl SupportManifest {
    /// The standard support files, resolved against `install_dir`.
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        SupportManifest::with_entries(install_dir, default_entries())
    }

    /// A manifest with custom entries.
    pub fn with_entries(install_dir: impl Into<PathBuf>, entries: Vec<SupportEntry>) -> Self {
        SupportManifest {
            install_dir: install_dir.into(),
            entries,
        }
    }

    /// Concrete copies for a scratch layout.
    pub fn resolve(&self, layout: &WorkspaceLayout) -> Vec<FilePair> {
        self.entries
            .iter()
            .map(|e| FilePair {
                dst: dest_dir(layout, e.tree).join(&e.name),
                src: self.install_dir.join(&e.source),
            })
            .collect()
    }

    /// Java support sources that must be compiled with the bindings.
    pub fn java_sources(&self, layout: &WorkspaceLayout) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|e| e.tree == SupportTree::Java)
            .map(|e| layout.java_dir.join(&e.name))
            .collect()
    }
}

fn dest_dir(layout: &WorkspaceLayout, tree: SupportTree) -> &Path {
    match tree {
        SupportTree::Bind => &layout.bind_dir,
        SupportTree::Java => &layout.java_dir,
    }
}

fn default_entries() -> Vec<SupportEntry> {
    vec![
        SupportEntry::new(SupportTree::Bind, "seq.go", "seq.go.support"),
        SupportEntry::new(SupportTree::Bind, "seq_java.go", "java/seq_android.go.support"),
        SupportEntry::new(SupportTree::Bind, "seq.c", "java/seq_android.c.support"),
        SupportEntry::new(SupportTree::Bind, "seq.h", "java/seq.h"),
        SupportEntry::new(SupportTree::Java, "Seq.java", "java/Seq.java"),
        SupportEntry::new(SupportTree::Java, "LoadJNI.java", "../../gojava/LoadJNI.java"),
    ]
}

/// Copy `.java` files from `source_dir` into `java_dir`, keeping relative paths.
///
/// Returns the copied destinations in traversal order. Without a source
/// directory nothing is read and the result is empty. A source that would
/// replace a file already in `java_dir` is an error.
pub fn add_extra_files(java_dir: &Path, source_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let Some(source_dir) = source_dir else {
        return Ok(Vec::new());
    };

    let mut extra_files = Vec::new();

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("failed to scan {}", source_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = relative_path(source_dir, entry.path());
        if !rel.to_string_lossy().ends_with(JAVA_SUFFIX) {
            continue;
        }

        let dst = java_dir.join(&rel);
        ensure_vacant(&dst, entry.path())?;
        tracing::debug!("copying {} -> {}", entry.path().display(), dst.display());
        copy_file(&dst, entry.path())?;
        extra_files.push(dst);
    }

    if extra_files.is_empty() {
        tracing::warn!(
            "-s was passed on the command line, but no .java files were found in '{}'",
            source_dir.display()
        );
    }

    Ok(extra_files)
}

/// Copy the support files and write the generated `main` and cgo flag sources.
///
/// Fails without copying anything if a support file would replace a file
/// already in the scratch tree.
pub fn create_support_files(
    layout: &WorkspaceLayout,
    manifest: &SupportManifest,
    bind_package: &str,
    include_dirs: &[PathBuf; 2],
) -> Result<()> {
    let pairs = manifest.resolve(layout);
    for pair in &pairs {
        ensure_vacant(&pair.dst, &pair.src)?;
    }

    for pair in pairs {
        copy_file(&pair.dst, &pair.src).with_context(|| {
            format!("failed to copy support file {}", pair.src.display())
        })?;
    }

    write_bytes(&layout.main_file, main_source(bind_package).as_bytes())?;

    let flag_file = layout.bind_dir.join(CGO_FLAGS_FILE);
    write_bytes(
        &flag_file,
        cgo_flags_source(&include_dirs[0], &include_dirs[1]).as_bytes(),
    )
}

fn ensure_vacant(dst: &Path, src: &Path) -> Result<()> {
    if dst.exists() {
        bail!(
            "{} would overwrite {}, which already exists in the source tree",
            src.display(),
            dst.display()
        );
    }
    Ok(())
}

/// The `main` package linking the bind runtime and the generated bindings.
///
/// Go import paths never contain quotes, backslashes or control characters,
/// so the path is emitted verbatim.
pub fn main_source(bind_package: &str) -> String {
    format!(
        "package main\n\nimport (\n\t_ \"{}\"\n\t_ \"..\"\n)\n\nfunc main() {{}}\n",
        bind_package
    )
}

/// cgo preamble adding the JNI include directories.
pub fn cgo_flags_source(include: &Path, os_include: &Path) -> String {
    format!(
        "package gojava_bind\n\n// #cgo CFLAGS: -Wall -I{} -I{}\nimport \"C\"\n\n",
        include.display(),
        os_include.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{capture_logs, support_install_dir};
    use tempfile::TempDir;

    #[test]
    fn test_no_source_dir_is_noop() {
        let tmp = TempDir::new().unwrap();
        let java_dir = tmp.path().join("does-not-exist");

        let files = add_extra_files(&java_dir, None).unwrap();

        assert!(files.is_empty());
        assert!(!java_dir.exists());
    }

    #[test]
    fn test_extra_files_keep_relative_paths() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("extra");
        std::fs::create_dir_all(src.join("com/example")).unwrap();
        std::fs::write(src.join("Top.java"), "class Top {}").unwrap();
        std::fs::write(src.join("com/example/Nested.java"), "class Nested {}").unwrap();
        std::fs::write(src.join("com/example/notes.txt"), "ignored").unwrap();
        let java_dir = tmp.path().join("java");

        let files = add_extra_files(&java_dir, Some(&src)).unwrap();

        assert_eq!(
            files,
            vec![
                java_dir.join("Top.java"),
                java_dir.join("com/example/Nested.java"),
            ]
        );
        assert_eq!(
            std::fs::read_to_string(java_dir.join("com/example/Nested.java")).unwrap(),
            "class Nested {}"
        );
        assert!(!java_dir.join("com/example/notes.txt").exists());
    }

    #[test]
    fn test_no_matching_files_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("extra");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("README.md"), "nothing to see").unwrap();

        let (files, logs) = capture_logs(|| add_extra_files(&tmp.path().join("java"), Some(&src)));

        assert!(files.unwrap().is_empty());
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("no .java files were found"), "{logs}");
    }

    #[test]
    fn test_extra_files_found_do_not_warn() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("extra");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("Util.java"), "class Util {}").unwrap();

        let (files, logs) = capture_logs(|| add_extra_files(&tmp.path().join("java"), Some(&src)));

        assert_eq!(files.unwrap().len(), 1);
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn test_extra_file_cannot_replace_generated_class() {
        let tmp = TempDir::new().unwrap();
        let java_dir = tmp.path().join("java");
        std::fs::create_dir_all(&java_dir).unwrap();
        std::fs::write(java_dir.join("Hello.java"), "// generated").unwrap();
        let src = tmp.path().join("extra");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("Hello.java"), "USER CODE").unwrap();

        let err = add_extra_files(&java_dir, Some(&src)).unwrap_err();

        assert!(err.to_string().contains("already exists in the source tree"));
        assert_eq!(
            std::fs::read_to_string(java_dir.join("Hello.java")).unwrap(),
            "// generated"
        );
    }

    #[test]
    fn test_support_file_cannot_replace_existing_source() {
        let tmp = TempDir::new().unwrap();
        let install = support_install_dir(&tmp.path().join("gopath"));
        let layout = WorkspaceLayout::new(&tmp.path().join("scratch"));
        layout.create_dirs().unwrap();
        std::fs::write(layout.java_dir.join("LoadJNI.java"), "USER CODE").unwrap();
        let includes = [PathBuf::from("/i"), PathBuf::from("/i/linux")];

        let err = create_support_files(&layout, &SupportManifest::new(&install), "bind", &includes)
            .unwrap_err();

        assert!(format!("{:#}", err).contains("LoadJNI.java"));
        assert_eq!(
            std::fs::read_to_string(layout.java_dir.join("LoadJNI.java")).unwrap(),
            "USER CODE"
        );
        assert!(!layout.bind_dir.join("seq.go").exists());
        assert!(!layout.main_file.exists());
    }

    #[test]
    fn test_reserved_names_match_java_support_files() {
        let layout = WorkspaceLayout::new(Path::new("/scratch"));
        let names: Vec<String> = SupportManifest::new("/bind")
            .java_sources(&layout)
            .iter()
            .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, RESERVED_CLASS_NAMES);
    }

    #[test]
    fn test_main_source_is_go_syntax() {
        assert_eq!(
            main_source("github.com/sridharv/gomobile-java/bind"),
            "package main\n\nimport (\n\t_ \"github.com/sridharv/gomobile-java/bind\"\n\t_ \"..\"\n)\n\nfunc main() {}\n"
        );

        // characters Rust's Debug would escape as `\u{..}` are written as is
        let main = main_source("example.com/soft\u{ad}hyphen");
        assert!(main.contains("\t_ \"example.com/soft\u{ad}hyphen\"\n"));
        assert!(!main.contains("\\u{"));
    }

    #[test]
    fn test_missing_source_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = add_extra_files(&tmp.path().join("java"), Some(&tmp.path().join("nope")));
        assert!(result.is_err());
    }

    #[test]
    fn test_manifest_resolution() {
        let layout = WorkspaceLayout::new(Path::new("/scratch"));
        let manifest = SupportManifest::new("/gopath/src/bind");

        let pairs = manifest.resolve(&layout);
        assert_eq!(pairs.len(), 6);
        assert!(pairs.contains(&FilePair {
            dst: PathBuf::from("/scratch/gojava_bind/seq_java.go"),
            src: PathBuf::from("/gopath/src/bind/java/seq_android.go.support"),
        }));
        assert!(pairs.contains(&FilePair {
            dst: PathBuf::from("/scratch/src/go/LoadJNI.java"),
            src: PathBuf::from("/gopath/src/bind/../../gojava/LoadJNI.java"),
        }));

        assert_eq!(
            manifest.java_sources(&layout),
            vec![
                PathBuf::from("/scratch/src/go/Seq.java"),
                PathBuf::from("/scratch/src/go/LoadJNI.java"),
            ]
        );
    }

    #[test]
    fn test_create_support_files() {
        let tmp = TempDir::new().unwrap();
        let install = support_install_dir(&tmp.path().join("gopath"));
        let layout = WorkspaceLayout::new(&tmp.path().join("scratch"));
        layout.create_dirs().unwrap();
        let includes = [
            PathBuf::from("/opt/jdk/include"),
            PathBuf::from("/opt/jdk/include/linux"),
        ];

        create_support_files(
            &layout,
            &SupportManifest::new(&install),
            "github.com/sridharv/gomobile-java/bind",
            &includes,
        )
        .unwrap();

        for name in ["seq.go", "seq_java.go", "seq.c", "seq.h"] {
            assert!(layout.bind_dir.join(name).is_file(), "{name} missing");
        }
        assert!(layout.java_dir.join("Seq.java").is_file());
        assert!(layout.java_dir.join("LoadJNI.java").is_file());

        let main = std::fs::read_to_string(&layout.main_file).unwrap();
        assert!(main.contains("_ \"github.com/sridharv/gomobile-java/bind\""));
        assert!(main.contains("_ \"..\""));
        assert!(main.contains("func main() {}"));

        let flags = std::fs::read_to_string(layout.bind_dir.join(CGO_FLAGS_FILE)).unwrap();
        assert!(flags.starts_with("package gojava_bind\n"));
        assert!(flags.contains("-Wall -I/opt/jdk/include -I/opt/jdk/include/linux"));
    }

    #[test]
    fn test_missing_support_file_aborts() {
        let tmp = TempDir::new().unwrap();
        let layout = WorkspaceLayout::new(&tmp.path().join("scratch"));
        layout.create_dirs().unwrap();
        let manifest = SupportManifest::with_entries(
            tmp.path(),
            vec![SupportEntry::new(SupportTree::Bind, "seq.go", "missing.support")],
        );
        let includes = [PathBuf::from("/i"), PathBuf::from("/i/linux")];

        let err = create_support_files(&layout, &manifest, "bind", &includes).unwrap_err();

        assert!(format!("{:#}", err).contains("missing.support"));
        assert!(!layout.main_file.exists());
    }
}
