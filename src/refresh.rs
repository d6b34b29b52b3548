//! The refresh pipeline: build everything, then rewrite each group's
//! fixture directory and stage the result with the version-control client.

use std::path::PathBuf;

use anyhow::Result;
use log::info;

use crate::builder::Builder;
use crate::fixtures::{self, InstallMode};
use crate::outputs::OutputLayout;
use crate::vcs::Vcs;
use crate::workspace;

/// Common prefix of the proto contrib tree, relative to the repository root.
const CONTRIB_BASE: &str =
    "third_party/java_src/j2cl_proto/javatests/com/google/protobuf/contrib";

/// Output directory prefix the build tool writes under.
const BUILD_OUT_BASE: &str = "blaze-bin";

/// One family of golden fixtures sharing a build target and output layout.
pub struct Family {
    pub name: &'static str,
    pub build_target: String,
    pub build_flags: &'static [&'static str],
    pub fixtures_root: PathBuf,
    pub layout: OutputLayout,
    pub install_mode: InstallMode,
}

/// The fixture families refreshed by one run.
///
/// The directory family's outputs must be preserved on disk, so its files
/// are copied; the archive family installs out of disposable extraction
/// scratch space, so its files are moved.
pub fn families() -> Vec<Family> {
    vec![
        Family {
            name: "immutablejs",
            build_target: format!("{}/immutablejs/protos:all", CONTRIB_BASE),
            build_flags: &[],
            fixtures_root: PathBuf::from(format!(
                "{}/immutablejs/generator/golden_files",
                CONTRIB_BASE
            )),
            layout: OutputLayout::Directory {
                base: format!("{}/{}/immutablejs/protos", BUILD_OUT_BASE, CONTRIB_BASE),
                postfix: "-improto".to_string(),
            },
            install_mode: InstallMode::Copy,
        },
        Family {
            name: "j2cl",
            build_target: format!("{}/j2cl/protos:all", CONTRIB_BASE),
            build_flags: &["--define", "j2cl_proto=interop"],
            fixtures_root: PathBuf::from(format!(
                "{}/j2cl/generator/golden_files",
                CONTRIB_BASE
            )),
            layout: OutputLayout::Archive {
                base: format!("{}/{}/j2cl/protos", BUILD_OUT_BASE, CONTRIB_BASE),
                postfix: "_j2cl_proto_new__interop_for_testing_do_not_use.srcjar".to_string(),
                source_ext: "java".to_string(),
            },
            install_mode: InstallMode::Move,
        },
    ]
}

/// Run the full refresh against the real build and version-control tools.
///
/// Returns the number of fixture files staged for addition.
pub fn run() -> Result<usize> {
    workspace::ensure_repo_root()?;
    refresh_families(&Builder::default(), &Vcs::default(), &families())
}

/// Pipeline body, parameterized over the external tools and family table.
///
/// All builds run before any fixture directory is touched, so a failed build
/// leaves the tree exactly as it was. After that there is no rollback: a
/// version-control failure mid-refresh leaves a partially updated tree, and
/// the run must be restarted once the cause is fixed.
pub fn refresh_families(builder: &Builder, vcs: &Vcs, families: &[Family]) -> Result<usize> {
    for family in families {
        builder.build(family.build_flags, &family.build_target)?;
    }

    let mut installed = Vec::new();
    for family in families {
        for group in fixtures::discover_groups(&family.fixtures_root)? {
            info!("Updating {}/{}", family.name, group);
            let group_dir = family.fixtures_root.join(&group);
            fixtures::remove_stale(vcs, &group_dir)?;
            let outputs = family.layout.locate(&group)?;
            installed.extend(fixtures::install(&outputs, &group_dir, family.install_mode)?);
        }
    }

    if !installed.is_empty() {
        vcs.add(&installed)?;
    }
    vcs.revert_unchanged()?;

    Ok(installed.len())
}
