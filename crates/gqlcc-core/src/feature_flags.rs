/// The one variable name the flag-off validation path accepts for the `if`
/// argument of `@defer`/`@stream`.
pub const INCREMENTAL_DELIVERY_VARIABLE_NAME: &str = "__incremental_delivery";

/// Compiler-wide behavior toggles.
///
/// `enable_incremental_delivery` is a staged-rollout switch: while off,
/// `@defer`/`@stream` are only honored behind the reserved
/// [`INCREMENTAL_DELIVERY_VARIABLE_NAME`] `if` variable; once on, the
/// directives are always honored and a literal `if: false` strips them.
#[derive(Clone, Debug, Default)]
pub struct FeatureFlags {
    pub enable_incremental_delivery: bool,
}
