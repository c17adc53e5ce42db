//! The template engine.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use htl_compiler::{compile, Bytecode};
use htl_runtime::HostValue;
use tracing::debug;

use crate::{EngineOptions, EngineResult, FsSourceProvider, SourceProvider};

/// Compiles templates on demand and renders them.
///
/// Bytecode is cached per file identifier for the lifetime of the engine.
pub struct Engine {
    source: Box<dyn SourceProvider>,
    cache: RwLock<HashMap<String, Arc<Bytecode>>>,
}

impl Engine {
    /// An engine reading templates from `options.root_dir()`.
    pub fn new(options: EngineOptions) -> Self {
        Self::with_provider(FsSourceProvider::new(&options))
    }

    pub fn with_provider(provider: impl SourceProvider + 'static) -> Self {
        Self {
            source: Box::new(provider),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Compile `file`, or return the cached bytecode if it was compiled before.
    pub fn compile(&self, file: &str) -> EngineResult<Arc<Bytecode>> {
        if let Some(bytecode) = self.cached(file) {
            debug!(file, "bytecode cache hit");
            return Ok(bytecode);
        }
        debug!(file, "bytecode cache miss");

        let source = self.source.get_text(file)?;
        let bytecode = Arc::new(compile(file, &source)?);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let entry = cache
            .entry(file.to_string())
            .or_insert_with(|| Arc::clone(&bytecode));
        Ok(Arc::clone(entry))
    }

    /// Compile `file` if needed, then render it against `args`.
    pub fn render(&self, file: &str, args: &HostValue) -> EngineResult<String> {
        let bytecode = self.compile(file)?;
        Ok(htl_runtime::render(&bytecode, args)?)
    }

    pub fn is_cached(&self, file: &str) -> bool {
        self.cached(file).is_some()
    }

    /// Drop all cached bytecode.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn cached(&self, file: &str) -> Option<Arc<Bytecode>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(file)
            .cloned()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("Engine").field("cached", &cached).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{host_args, EngineError, MemorySourceProvider, SourceError};
    use htl_runtime::RenderError;

    fn engine() -> Engine {
        Engine::with_provider(
            MemorySourceProvider::new()
                .with("hello.html", "Hi @name")
                .with("broken.html", "oops @1"),
        )
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_render() {
        let out = engine()
            .render("hello.html", &host_args! { "name" => "<b>" })
            .unwrap();
        assert_eq!(out, "Hi &lt;b&gt;");
    }

    #[test]
    fn test_compile_is_cached() {
        let engine = engine();
        assert!(!engine.is_cached("hello.html"));

        let first = engine.compile("hello.html").unwrap();
        let second = engine.compile("hello.html").unwrap();

        assert!(engine.is_cached("hello.html"));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_clear_cache() {
        let engine = engine();
        let first = engine.compile("hello.html").unwrap();
        engine.clear_cache();
        assert!(!engine.is_cached("hello.html"));
        let second = engine.compile("hello.html").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_syntax_error_is_not_cached() {
        let engine = engine();
        let err = engine.compile("broken.html").unwrap_err();
        assert!(matches!(err, EngineError::Compile(_)));
        assert!(!engine.is_cached("broken.html"));
    }

    #[test]
    fn test_unknown_template() {
        let err = engine().render("nope.html", &host_args! {}).unwrap_err();
        assert!(matches!(err, EngineError::Source(SourceError::NotFound { .. })));
    }

    #[test]
    fn test_missing_argument() {
        let err = engine().render("hello.html", &host_args! {}).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Render(RenderError::MissingArgument { ref name, .. }) if name == "name"
        ));
    }
}
