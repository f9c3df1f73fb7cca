//! Ordered composition of resolvers.

use std::path::PathBuf;

use tracing::debug;

use crate::{Context, Error, Request, Resolve, Result};

/// Tries each stage in turn until one resolves.
///
/// A stage reporting [`Error::NotFound`] hands over to the next one; any
/// other error is returned as is. When every stage misses, the chain
/// reports the request as not found from the caller's own context.
#[derive(Default)]
pub struct Chain<'a> {
    stages: Vec<Box<dyn Resolve + 'a>>,
}

impl<'a> Chain<'a> {
    pub fn new() -> Self { Self { stages: Vec::new() } }

    pub fn then(mut self, stage: impl Resolve + 'a) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize { self.stages.len() }

    pub fn is_empty(&self) -> bool { self.stages.is_empty() }
}

impl Resolve for Chain<'_> {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        for stage in &self.stages {
            match stage.resolve(request, context) {
                Ok(path) => {
                    debug!(stage = stage.name(), %request, path = %path.display(), "resolved");
                    return Ok(path);
                }
                Err(e) if e.is_not_found() => {
                    debug!(stage = stage.name(), %request, "not found, advancing");
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::not_found(request.as_str(), &context.dir))
    }

    fn name(&self) -> &str { "chain" }
}
