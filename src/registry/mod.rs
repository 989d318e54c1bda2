//! Builtin function registry for template expressions
//!
//! The registry is an immutable table mapping function names to
//! implementations. A shared default instance covering the full builtin
//! library is initialized lazily and lives for the process lifetime;
//! callers that need a custom function set construct their own registry
//! and inject it into the evaluator.

#![warn(missing_docs)]

pub mod function;
pub mod functions;
pub mod signature;

pub use function::{FunctionError, FunctionRegistry, FunctionResult, TemplateFunction};
pub use signature::{FunctionSignature, ParameterInfo};

use once_cell::sync::Lazy;
use std::sync::Arc;

/// Register all built-in template functions
pub fn register_builtin_functions(registry: &mut FunctionRegistry) {
    use functions::collection::*;
    use functions::logic::*;
    use functions::math::*;
    use functions::string::*;

    // String functions
    registry.register(ToUpperFunction);
    registry.register(ToLowerFunction);
    registry.register(SubstringFunction);
    registry.register(LengthFunction);
    registry.register(TrimFunction);
    registry.register(ReplaceFunction);
    registry.register(SplitFunction);
    registry.register(StartsWithFunction);
    registry.register(EndsWithFunction);
    registry.register(ContainsFunction);
    registry.register(FormatFunction);

    // Math functions
    registry.register(AddFunction);
    registry.register(SubFunction);
    registry.register(MulFunction);
    registry.register(DivFunction);
    registry.register(ModFunction);
    registry.register(MinFunction);
    registry.register(MaxFunction);
    registry.register(RoundFunction);
    registry.register(FloorFunction);
    registry.register(CeilFunction);
    registry.register(AbsFunction);

    // Logic functions
    registry.register(IfFunction);
    registry.register(EqualsFunction);
    registry.register(NotFunction);
    registry.register(AndFunction);
    registry.register(OrFunction);
    registry.register(GreaterThanFunction);
    registry.register(LessThanFunction);
    registry.register(ExistsFunction);
    registry.register(EmptyFunction);
    registry.register(IsMatchFunction);

    // Collection functions
    registry.register(CountFunction);
    registry.register(FirstFunction);
    registry.register(LastFunction);
}

static DEFAULT_REGISTRY: Lazy<Arc<FunctionRegistry>> = Lazy::new(|| {
    let mut registry = FunctionRegistry::new();
    register_builtin_functions(&mut registry);
    log::debug!(
        "initialized default function registry with {} builtins",
        registry.len()
    );
    Arc::new(registry)
});

/// Shared default registry with all builtin functions
///
/// Initialized on first use and never mutated afterwards, so the returned
/// handle can be read concurrently from any number of threads.
pub fn default_registry() -> Arc<FunctionRegistry> {
    Arc::clone(&DEFAULT_REGISTRY)
}
