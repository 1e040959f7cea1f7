//! Dependency edges: declaration from configuration and resolution into
//! build inputs.

mod declare;
mod edge;
mod resolve;

pub use declare::Declarator;
pub use edge::{DepEdge, DepKind};
pub use resolve::{DepInputs, Dependency, Peer, ResolvedDep, SdkDependency, SourceFileGenerator, collect_deps};
