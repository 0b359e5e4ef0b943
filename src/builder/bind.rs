//! Artifact generation for every bound package.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::builder::assemble::RESERVED_CLASS_NAMES;
use crate::builder::generator::{generate, GenerateError, Generator, GeneratorConfig, PositionTable};
use crate::core::{ArtifactKind, ArtifactSet, ResolvedPackage, WorkspaceLayout};

/// Error while generating bindings.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("packages `{first}` and `{second}` would both generate class `{class}`")]
    NameCollision {
        class: String,
        first: String,
        second: String,
    },

    #[error("package `{package}` would generate class `{class}`, which is reserved for the bind runtime")]
    ReservedName { class: String, package: String },

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Files written by [`bind_packages`].
#[derive(Debug, Clone, Default)]
pub struct BindOutput {
    /// One artifact set per package, in package order
    pub sets: Vec<ArtifactSet>,

    /// Generated Java classes, in package order
    pub java_files: Vec<PathBuf>,
}

/// Generate the four artifacts of every package.
///
/// All four artifacts of a package are generated in memory before any of
/// them is written, so a generation failure never leaves a partial set.
pub fn bind_packages(
    layout: &WorkspaceLayout,
    packages: &[ResolvedPackage],
    generator: &dyn Generator,
) -> Result<BindOutput, BindError> {
    check_class_names(packages)?;

    let mut positions = PositionTable::new();
    for pkg in packages {
        positions.add_file(pkg.import_path(), pkg.types().size as usize);
    }

    let mut output = BindOutput::default();

    for pkg in packages {
        tracing::info!("Binding {}", pkg.import_path());

        let conf = GeneratorConfig {
            positions: &positions,
            package: pkg,
            all: packages,
            name_override: None,
        };
        let set = ArtifactSet::new(layout, pkg.name());

        let mut generated = Vec::with_capacity(ArtifactKind::ALL.len());
        for kind in ArtifactKind::ALL {
            let mut buf = Vec::new();
            generate(generator, kind, &mut buf, &conf)?;
            generated.push((kind, buf));
        }

        for (kind, buf) in generated {
            let path = set.get(kind);
            tracing::debug!("writing {}", path.display());
            std::fs::write(path, &buf).map_err(|source| BindError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        output.java_files.push(set.foreign_class.clone());
        output.sets.push(set);
    }

    Ok(output)
}

/// Reject packages whose Java class names would collide with each other or
/// with the runtime support classes.
fn check_class_names(packages: &[ResolvedPackage]) -> Result<(), BindError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for pkg in packages {
        let class = pkg.class_name();
        if RESERVED_CLASS_NAMES.contains(&class.as_str()) {
            return Err(BindError::ReservedName {
                class,
                package: pkg.import_path().to_string(),
            });
        }
        if let Some(first) = seen.get(&class) {
            return Err(BindError::NameCollision {
                class,
                first: first.to_string(),
                second: pkg.import_path().to_string(),
            });
        }
        seen.insert(class, pkg.import_path());
    }
    Ok(())
}
