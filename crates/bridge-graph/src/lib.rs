pub mod config;
pub mod node;
pub mod walker;

pub use config::GraphConfig;
pub use node::MavenNode;
pub use walker::{build_graph, download_and_process, import, WalkerContext};
