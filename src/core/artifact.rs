//! Generated artifacts and the Java source list.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::package::capitalize;
use crate::core::workspace::WorkspaceLayout;

/// The four files generated for every bound package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Go source exporting the package over cgo (`go_<pkg>main.go`)
    NativeEntry,
    /// Java class wrapping the package (`<Pkg>.java`)
    ForeignClass,
    /// JNI glue in C (`java_<pkg>.c`)
    NativeGlue,
    /// Header shared by the glue and the entry point (`<pkg>.h`)
    NativeHeader,
}

impl ArtifactKind {
    /// All kinds, in generation order.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::NativeEntry,
        ArtifactKind::ForeignClass,
        ArtifactKind::NativeGlue,
        ArtifactKind::NativeHeader,
    ];

    /// File name of this artifact for a package short name.
    pub fn file_name(&self, pkg_name: &str) -> String {
        match self {
            ArtifactKind::NativeEntry => format!("go_{}main.go", pkg_name),
            ArtifactKind::ForeignClass => format!("{}.java", capitalize(pkg_name)),
            ArtifactKind::NativeGlue => format!("java_{}.c", pkg_name),
            ArtifactKind::NativeHeader => format!("{}.h", pkg_name),
        }
    }

    /// Directory this artifact is written to.
    pub fn dir<'a>(&self, layout: &'a WorkspaceLayout) -> &'a Path {
        match self {
            ArtifactKind::ForeignClass => &layout.java_dir,
            ArtifactKind::NativeEntry | ArtifactKind::NativeGlue | ArtifactKind::NativeHeader => {
                &layout.bind_dir
            }
        }
    }

    /// Full destination path of this artifact.
    pub fn path(&self, layout: &WorkspaceLayout, pkg_name: &str) -> PathBuf {
        self.dir(layout).join(self.file_name(pkg_name))
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactKind::NativeEntry => "go entry point",
            ArtifactKind::ForeignClass => "java class",
            ArtifactKind::NativeGlue => "jni glue",
            ArtifactKind::NativeHeader => "jni header",
        };
        f.write_str(s)
    }
}

/// Paths of the four artifacts written for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub native_entry: PathBuf,
    pub foreign_class: PathBuf,
    pub native_glue: PathBuf,
    pub native_header: PathBuf,
}

impl ArtifactSet {
    /// Compute the artifact paths for a package.
    pub fn new(layout: &WorkspaceLayout, pkg_name: &str) -> Self {
        ArtifactSet {
            native_entry: ArtifactKind::NativeEntry.path(layout, pkg_name),
            foreign_class: ArtifactKind::ForeignClass.path(layout, pkg_name),
            native_glue: ArtifactKind::NativeGlue.path(layout, pkg_name),
            native_header: ArtifactKind::NativeHeader.path(layout, pkg_name),
        }
    }

    /// Path of the artifact of the given kind.
    pub fn get(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::NativeEntry => &self.native_entry,
            ArtifactKind::ForeignClass => &self.foreign_class,
            ArtifactKind::NativeGlue => &self.native_glue,
            ArtifactKind::NativeHeader => &self.native_header,
        }
    }
}

/// Ordered list of Java sources handed to `javac`.
///
/// Order follows insertion: generated classes in package order, then extra
/// user sources, then the runtime support sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceList {
    files: Vec<PathBuf>,
}

impl SourceList {
    pub fn new() -> Self {
        SourceList::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    pub fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, paths: I) {
        self.files.extend(paths);
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
