pub mod connection_resolver;
pub mod defer_stream;
pub mod disallow_typename_on_root;
pub mod match_module;
pub mod skip_include;
pub mod split_module_import;
pub mod viewer_handle;

use crate::errors::DiagnosticsResult;
use crate::feature_flags::FeatureFlags;
use crate::store::DocumentStore;

/// A pass in the ordered pipeline: consumes one store revision, produces the
/// next.
pub type TransformFn =
    fn(&DocumentStore, &FeatureFlags) -> DiagnosticsResult<DocumentStore>;

#[derive(Clone, Copy, Debug)]
pub struct Pass {
    pub name: &'static str,
    pub run: TransformFn,
}

/// The default ordered pass pipeline. A writer may configure a different
/// subset or order through its [`WriterConfig`](crate::compiler::WriterConfig).
pub fn default_pipeline() -> Vec<Pass> {
    vec![
        Pass {
            name: "skip-include",
            run: skip_include::transform,
        },
        Pass {
            name: "defer-stream",
            run: defer_stream::transform,
        },
        Pass {
            name: "match-module",
            run: match_module::transform,
        },
        Pass {
            name: "split-module-import",
            run: split_module_import::transform,
        },
        Pass {
            name: "connection-resolver",
            run: connection_resolver::transform,
        },
        Pass {
            name: "viewer-handle",
            run: viewer_handle::transform,
        },
        Pass {
            name: "disallow-typename-on-root",
            run: disallow_typename_on_root::transform,
        },
    ]
}

/// Run an ordered pass list over a store, collecting the diagnostics of the
/// first failing pass (later passes are skipped: they assume the invariants
/// established by their predecessors).
pub fn run_pipeline(
    store: &DocumentStore,
    passes: &[Pass],
    flags: &FeatureFlags,
) -> DiagnosticsResult<DocumentStore> {
    let mut current = store.clone();
    for pass in passes {
        log::debug!("Running transform pass `{}`...", pass.name);
        current = (pass.run)(&current, flags)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests;
