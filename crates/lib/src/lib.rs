//! coverbuild-lib: build orchestration for the ScriptCover browser extension.
//!
//! The build fetches its own toolchain, compiles templates and script bundles
//! with external compilers, and assembles a loadable extension directory:
//! - `config`: the declarative description of what gets built
//! - `provision`: fetching the library checkout and compiler archives
//! - `compile`: driving the template and script compilers
//! - `assets`: copying static deliverables
//! - `pipeline`: the build and clean entry points

pub mod assets;
pub mod compile;
pub mod config;
pub mod consts;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod process;
pub mod provision;

#[cfg(test)]
mod util;

pub use config::BuildConfig;
pub use error::BuildError;
pub use pipeline::{BuildReport, CleanReport, Pipeline, clean};
