use std::path::PathBuf;

use typed_builder::TypedBuilder;

/// Options for creating a `GameBoy` session.
#[derive(Clone, Debug, TypedBuilder)]
pub struct SessionConfig {
    /// Cartridge image to load at address 0.
    #[builder(setter(into))]
    pub cartridge: PathBuf,

    /// Trace every executed instruction and log serial register changes.
    #[builder(default = false)]
    pub debug: bool,

    /// Stop after this many instructions.
    #[builder(default)]
    pub max_steps: Option<u64>,
}
