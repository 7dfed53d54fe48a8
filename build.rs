//! Build script for mpit-service
//!
//! With the `native` feature enabled this script:
//! 1. Locates the MPI installation via pkg-config, `mpicc -show` or a prefix
//! 2. Compiles the MPI_T shim (csrc/mpit_shim.c)
//! 3. Links against the MPI library
//!
//! Without the feature nothing is compiled and no MPI installation is needed.

use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=csrc/mpit_shim.c");
    println!("cargo:rerun-if-changed=csrc/mpit_shim.h");
    println!("cargo:rerun-if-env-changed=MPI_PKG_CONFIG");
    println!("cargo:rerun-if-env-changed=MPICC");
    println!("cargo:rerun-if-env-changed=MPI_HOME");

    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    let mpi = locate_mpi();

    let mut build = cc::Build::new();
    build
        .file("csrc/mpit_shim.c")
        .include("csrc")
        .warnings(true);
    for path in &mpi.include_paths {
        build.include(path);
    }
    build.compile("mpit_shim");

    for path in &mpi.link_paths {
        println!("cargo:rustc-link-search=native={}", path.display());
        println!("cargo:rustc-link-arg=-Wl,-rpath,{}", path.display());
    }
    for lib in &mpi.libs {
        println!("cargo:rustc-link-lib={lib}");
    }
}

struct MpiLocation {
    include_paths: Vec<PathBuf>,
    link_paths: Vec<PathBuf>,
    libs: Vec<String>,
}

fn locate_mpi() -> MpiLocation {
    let mut candidates: Vec<String> = Vec::new();
    if let Ok(name) = env::var("MPI_PKG_CONFIG") {
        candidates.push(name);
    }
    candidates.extend(["mpich", "ompi", "mpi"].iter().map(|s| s.to_string()));

    for name in &candidates {
        if let Ok(lib) = pkg_config::Config::new().cargo_metadata(false).probe(name) {
            eprintln!("mpit-service: MPI found via pkg-config '{name}'");
            return MpiLocation {
                include_paths: lib.include_paths,
                link_paths: lib.link_paths,
                libs: lib.libs,
            };
        }
    }

    if let Some(location) = from_mpicc() {
        eprintln!("mpit-service: MPI found via mpicc");
        return location;
    }

    let prefixes = env::var("MPI_HOME")
        .into_iter()
        .chain(["/usr", "/usr/local", "/opt/mpich", "/opt/openmpi"].map(String::from));
    for prefix in prefixes {
        let include = PathBuf::from(&prefix).join("include");
        if include.join("mpi.h").exists() {
            eprintln!("mpit-service: MPI found under {prefix}");
            return MpiLocation {
                include_paths: vec![include],
                link_paths: vec![PathBuf::from(&prefix).join("lib")],
                libs: vec!["mpi".to_string()],
            };
        }
    }

    panic!(
        "the `native` feature needs an MPI installation with MPI_T support; set MPI_PKG_CONFIG, \
         put mpicc in PATH (or set MPICC), or set MPI_HOME"
    );
}

fn from_mpicc() -> Option<MpiLocation> {
    let mpicc = env::var("MPICC").unwrap_or_else(|_| "mpicc".to_string());
    let output = Command::new(&mpicc).arg("-show").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let mut location = MpiLocation {
        include_paths: Vec::new(),
        link_paths: Vec::new(),
        libs: Vec::new(),
    };
    for part in String::from_utf8_lossy(&output.stdout).split_whitespace() {
        if let Some(path) = part.strip_prefix("-I") {
            location.include_paths.push(PathBuf::from(path));
        } else if let Some(path) = part.strip_prefix("-L") {
            location.link_paths.push(PathBuf::from(path));
        } else if let Some(lib) = part.strip_prefix("-l") {
            location.libs.push(lib.to_string());
        }
    }
    if location.libs.is_empty() {
        location.libs.push("mpi".to_string());
    }
    Some(location)
}
