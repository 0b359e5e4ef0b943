//! Test fixtures for common test scenarios.
//!
//! The fake tools are POSIX shell scripts with their paths baked in. They
//! understand just enough of the real command lines to drive the pipeline:
//!
//! - `go install` fails for any import path containing `broken`
//! - `go list -export -json` fails for import paths containing `unlisted`
//!   and otherwise writes export data and prints metadata
//! - `go build` needs a `main.go` in its working directory
//! - every `go` command line is logged with its `GO111MODULE` value
//! - `javac` writes `<out>/go/<Name>.class` for every source
//! - the generator fails for import paths containing `badgen`

use std::path::{Path, PathBuf};

use crate::builder::toolchain::Toolchain;
use crate::core::{PackageDescriptor, ResolvedPackage, TypeInfo};
use crate::util::Config;

const FAKE_GO: &str = r#"#!/bin/sh
echo "$* [GO111MODULE=${GO111MODULE:-unset}]" >> '@LOG@'
cmd="$1"
shift
case "$cmd" in
install)
    for p in "$@"; do
        case "$p" in
            *broken*) echo "cannot find package \"$p\"" >&2; exit 1 ;;
        esac
    done
    ;;
list)
    if [ "$1" = "-f" ]; then
        echo '@BIND@'
        exit 0
    fi
    pkg="$3"
    case "$pkg" in
        *unlisted*) echo "package $pkg is not in GOROOT" >&2; exit 1 ;;
    esac
    name="${pkg##*/}"
    mkdir -p '@CACHE@'
    printf 'export data for %s\n' "$pkg" > '@CACHE@'/"$name".a
    printf '{"ImportPath": "%s", "Name": "%s", "Dir": "/src/%s", "Export": "%s"}\n' \
        "$pkg" "$name" "$pkg" '@CACHE@'/"$name".a
    ;;
build)
    if [ ! -f main.go ]; then
        echo "no Go files in $PWD" >&2
        exit 1
    fi
    out="$2"
    mkdir -p "$(dirname "$out")"
    printf 'ELF shared library\n' > "$out"
    ;;
*)
    echo "go: unknown command $cmd" >&2
    exit 2
    ;;
esac
"#;

const FAKE_JAVAC: &str = r#"#!/bin/sh
out=""
while [ $# -gt 0 ]; do
    case "$1" in
        -d) out="$2"; shift 2 ;;
        -sourcepath) shift 2 ;;
        *.java)
            if [ ! -f "$1" ]; then
                echo "$1: file not found" >&2
                exit 1
            fi
            name=$(basename "$1" .java)
            mkdir -p "$out/go"
            printf 'class %s\n' "$name" > "$out/go/$name.class"
            shift
            ;;
        *) shift ;;
    esac
done
"#;

const FAKE_GENERATOR: &str = r#"#!/bin/sh
lang=""
pkg=""
for a in "$@"; do
    case "$a" in
        -lang=*) lang="${a#-lang=}" ;;
        -pkg=*) pkg="${a#-pkg=}" ;;
    esac
done
case "$pkg" in
    *badgen*) echo "cannot bind $pkg" >&2; exit 1 ;;
esac
printf '// %s binding for %s\n' "$lang" "$pkg"
"#;

/// Write an executable script.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Fake `go`, `javac` and generator executables plus a fake bind package.
#[derive(Debug, Clone)]
pub struct FakeToolchain {
    pub go: PathBuf,
    pub javac: PathBuf,
    pub generator: PathBuf,
    pub java_home: PathBuf,
    pub bind_install_dir: PathBuf,
    pub log_file: PathBuf,
}

#[cfg(unix)]
impl FakeToolchain {
    /// Lay out the fake tools under `root`.
    pub fn new(root: &Path) -> Self {
        let bin = root.join("bin");
        let log_file = root.join("go.log");
        let cache = root.join("go-cache");
        let bind_install_dir = support_install_dir(&root.join("gopath"));
        let java_home = root.join("jdk");
        std::fs::create_dir_all(&java_home).unwrap();

        let go_script = FAKE_GO
            .replace("@LOG@", &log_file.to_string_lossy())
            .replace("@BIND@", &bind_install_dir.to_string_lossy())
            .replace("@CACHE@", &cache.to_string_lossy());

        FakeToolchain {
            go: write_script(&bin, "go", &go_script),
            javac: write_script(&bin, "javac", FAKE_JAVAC),
            generator: write_script(&bin, "gojava-bind", FAKE_GENERATOR),
            java_home,
            bind_install_dir,
            log_file,
        }
    }

    /// Toolchain pointing at the fake tools.
    pub fn toolchain(&self) -> Toolchain {
        Toolchain {
            go: self.go.clone(),
            javac: self.javac.clone(),
            java_home: self.java_home.clone(),
        }
    }

    /// Configuration pointing at the fake tools and bind package.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.toolchain.go = Some(self.go.clone());
        config.toolchain.javac = Some(self.javac.clone());
        config.generator.program = Some(self.generator.clone());
        config.generator.install_dir = Some(self.bind_install_dir.clone());
        config
    }

    /// Every `go` command line run so far, one per line, each ending in
    /// `[GO111MODULE=<value>]`.
    pub fn log(&self) -> String {
        std::fs::read_to_string(&self.log_file).unwrap_or_default()
    }
}

/// Create a fake bind package install under `root` and return its directory.
///
/// The loader source lives two levels above the bind package, as in a
/// GOPATH checkout.
pub fn support_install_dir(root: &Path) -> PathBuf {
    let bind = root.join("gomobile-java").join("bind");
    let files = [
        (bind.join("seq.go.support"), "package gojava_bind\n"),
        (bind.join("java/seq_android.go.support"), "package gojava_bind\n"),
        (bind.join("java/seq_android.c.support"), "#include \"seq.h\"\n"),
        (bind.join("java/seq.h"), "#pragma once\n"),
        (bind.join("java/Seq.java"), "package go;\npublic class Seq {}\n"),
        (
            root.join("gojava/LoadJNI.java"),
            "package go;\npublic class LoadJNI {}\n",
        ),
    ];
    for (path, content) in files {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
    }
    bind
}

/// A resolved package `example.com/<name>` with real export data under `root`.
pub fn resolved_package(root: &Path, name: &str) -> ResolvedPackage {
    let export_dir = root.join("export");
    std::fs::create_dir_all(&export_dir).unwrap();
    let export_file = export_dir.join(format!("{}.a", name));
    let data = format!("export data for {}\n", name);
    std::fs::write(&export_file, &data).unwrap();

    ResolvedPackage::new(
        PackageDescriptor::new(format!("example.com/{}", name)),
        name,
        root.join("src").join(name),
        TypeInfo {
            export_file,
            size: data.len() as u64,
        },
    )
}
