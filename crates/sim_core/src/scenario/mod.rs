//! Scenario inputs for the on-ramp merge network.
//!
//! Every run rewrites two engine documents: the edge (topology) document,
//! which carries the highway and ramp speed limits, and the route (flow)
//! document, which carries the mainline and ramp vehicle rates.

mod build;
mod params;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

pub use build::{render_edges_xml, render_routes_xml};
pub use params::{
    EdgeSpec, FlowSpec, RoadClass, ScenarioConfig, ScenarioParams, CAR_TYPE_ATTRIBUTES,
    DEFAULT_EDGES_FILE, DEFAULT_ROUTES_FILE, RAMP_EDGES, RAMP_FLOWS, VEHICLE_TYPE_ID,
};

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Paths of the documents written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedConfig {
    pub edges_file: PathBuf,
    pub routes_file: PathBuf,
}

/// Produces the engine input documents for one parameter combination.
pub trait ConfigEmitter {
    /// Write the topology (edge) document.
    fn emit_topology(&self, params: &ScenarioParams) -> Result<PathBuf, EmitError>;

    /// Write the flow (route) document.
    fn emit_flows(&self, params: &ScenarioParams) -> Result<PathBuf, EmitError>;

    /// Write both documents, topology first.
    fn emit(&self, params: &ScenarioParams) -> Result<EmittedConfig, EmitError> {
        let edges_file = self.emit_topology(params)?;
        let routes_file = self.emit_flows(params)?;
        Ok(EmittedConfig {
            edges_file,
            routes_file,
        })
    }
}

/// Writes the rendered XML documents to the paths in [`ScenarioConfig`].
///
/// Parent directories are not created: the engine configuration that
/// references these files must already live there.
#[derive(Debug, Clone, Default)]
pub struct XmlConfigEmitter {
    config: ScenarioConfig,
}

impl XmlConfigEmitter {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }
}

impl ConfigEmitter for XmlConfigEmitter {
    fn emit_topology(&self, params: &ScenarioParams) -> Result<PathBuf, EmitError> {
        write_document(&self.config.edges_file, &render_edges_xml(params))
    }

    fn emit_flows(&self, params: &ScenarioParams) -> Result<PathBuf, EmitError> {
        write_document(
            &self.config.routes_file,
            &render_routes_xml(params, &self.config),
        )
    }
}

fn write_document(path: &Path, contents: &str) -> Result<PathBuf, EmitError> {
    fs::write(path, contents).map_err(|source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote scenario document");
    Ok(path.to_path_buf())
}
