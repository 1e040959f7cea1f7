//! jplan-lib: build planning for java modules.
//!
//! Given a blueprint of module declarations, the planner:
//! - declares each module's typed dependency edges ([`deps::Declarator`])
//! - folds resolved dependencies into classpath inputs ([`deps::collect_deps`])
//! - records the artifact transforms of each module ([`pipeline::Pipeline`])
//! - dispatches per module variant ([`module::Module`])
//! - plans the whole graph wave by wave ([`graph::ModuleGraph`])
//!
//! Nothing here runs a tool or writes a file. The output is a [`plan::Plan`]
//! for an external executor.

pub mod config;
pub mod consts;
pub mod deps;
pub mod env;
pub mod error;
pub mod flags;
pub mod graph;
pub mod module;
pub mod pipeline;
pub mod plan;
pub mod platform;
pub mod sources;
pub mod transform;
pub mod util;
