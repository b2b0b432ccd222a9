//! luastub: Lua API-reference stubs from documented host declarations.
//!
//! The pipeline reads a JSON declaration model exported by the host compiler,
//! extracts the documented modules and Lua-callable functions, renders their
//! documentation into the `--[[- ... ]]` doc-comment dialect and writes one
//! `.lua` stub per module.
//!
//! - [`program`] and [`hierarchy`] intern the model into id-keyed tables
//! - [`extract`] decides what is part of the Lua surface
//! - [`render`] converts documentation trees and host types
//! - [`emit`] groups functions into stubs and writes them

pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod extract;
pub mod hierarchy;
pub mod inherit;
pub mod loader;
pub mod model;
pub mod program;
pub mod render;

use std::path::PathBuf;

pub use config::{Capabilities, Config};
pub use diagnostics::{Diagnostic, Level, Reporter};
pub use emit::StubDocument;
pub use error::{Error, Result};

use emit::Emitter;
use extract::Declarations;
use model::Model;
use program::Program;

/// Build every stub for `models`. Nothing is written.
pub fn generate(
    models: impl IntoIterator<Item = Model>,
    config: &Config,
    reporter: &Reporter,
) -> Result<Vec<StubDocument>> {
    let program = Program::build(models)?;
    let decls = Declarations::extract(&program, &config.capabilities, reporter);
    Ok(Emitter::new(&program, &decls, config, reporter).build())
}

/// Load the given model files, generate stubs and write them to `config.output`.
///
/// Returns the number of stubs written. Non-fatal problems are left in `reporter`.
pub fn run(inputs: &[PathBuf], config: &Config, reporter: &Reporter) -> Result<usize> {
    let models = loader::load_models(inputs)?;
    let stubs = generate(models, config, reporter)?;
    emit::write_stubs(&stubs, &config.output)
}
