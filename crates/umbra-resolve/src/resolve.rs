//! The resolution contract.
//!
//! This is the only seam between Umbra and the host's module system: the
//! host lookup, every fallback stage and the composed engine all implement it.

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use crate::{Context, Request, Result};

pub trait Resolve {
    /// Resolve `request` as seen from `context`.
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) when the target
    /// does not exist; any other error is fatal to the whole lookup.
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf>;

    /// Name used in traces.
    fn name(&self) -> &str { "resolver" }
}

impl<R: Resolve + ?Sized> Resolve for &R {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        (**self).resolve(request, context)
    }

    fn name(&self) -> &str { (**self).name() }
}

impl<R: Resolve + ?Sized> Resolve for Box<R> {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        (**self).resolve(request, context)
    }

    fn name(&self) -> &str { (**self).name() }
}

impl<R: Resolve + ?Sized> Resolve for Rc<R> {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        (**self).resolve(request, context)
    }

    fn name(&self) -> &str { (**self).name() }
}

impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        (**self).resolve(request, context)
    }

    fn name(&self) -> &str { (**self).name() }
}
