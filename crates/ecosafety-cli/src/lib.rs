pub mod loader;
pub mod pipeline;
pub mod report;

pub use loader::{load_nodes, load_nodes_path, LoadError, LoadOutcome, NODE_COLUMNS};
pub use pipeline::{
    certify, outlet_panel, risk_coordinates, site_flow, CertificationOutcome, PipelineError,
};
pub use report::CertificationReport;
