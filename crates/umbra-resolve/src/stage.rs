//! The stages a [`ShadowResolver`](crate::ShadowResolver) chains together.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, trace, warn};
use umbra_redirect::RedirectStore;

use crate::zones::normalize;
use crate::{Context, Error, Request, Resolve, Result, Zone, Zones};

/// The host lookup against the caller's own context.
pub struct Original<H> {
    host: H,
}

impl<H: Resolve> Original<H> {
    pub fn new(host: H) -> Self { Self { host } }
}

impl<H: Resolve> Resolve for Original<H> {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        self.host.resolve(request, context)
    }

    fn name(&self) -> &str { "original" }
}

/// Returns a previously remembered cached path, if still valid.
///
/// A record is used only when its version matches the live package in the
/// source tree and its cached file still exists. Everything else is a miss.
pub struct Recorded {
    zones: Arc<Zones>,
    store: Arc<RedirectStore>,
}

impl Recorded {
    pub fn new(zones: Arc<Zones>, store: Arc<RedirectStore>) -> Self { Self { zones, store } }
}

impl Resolve for Recorded {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        let miss = || Error::not_found(request.as_str(), &context.dir);

        let key = self.zones.redirect_key(request, context).ok_or_else(miss)?;
        let record = self.store.lookup(&key).ok_or_else(miss)?;
        let live = self.zones.live_descriptor(&record);
        let record = self
            .store
            .invalidate_if_stale(&key, record, live.as_ref())
            .ok_or_else(miss)?;

        let path = record.cached_path(self.zones.shadow(), self.zones.tag().as_str());
        if path.is_file() {
            Ok(path)
        } else {
            trace!(%key, path = %path.display(), "recorded path is gone");
            Err(miss())
        }
    }

    fn name(&self) -> &str { "recorded" }
}

/// The host lookup re-rooted at one shadow zone.
pub struct ZoneFallback<H> {
    host:  H,
    zones: Arc<Zones>,
    zone:  Zone,
}

impl<H: Resolve> ZoneFallback<H> {
    pub fn portable(host: H, zones: Arc<Zones>) -> Self {
        Self {
            host,
            zones,
            zone: Zone::Portable,
        }
    }

    pub fn binary(host: H, zones: Arc<Zones>) -> Self {
        Self {
            host,
            zones,
            zone: Zone::Binary,
        }
    }

    /// Relative native artifacts are checked directly, since some hosts
    /// cannot locate them once the context directory only exists in the
    /// shadow tree.
    fn probe_native(&self, request: &Request, context: &Context) -> Option<PathBuf> {
        let ext = &self.zones.layout().native_extension;
        let mut candidate = context.dir.join(request.as_str());
        if candidate.extension().is_none_or(|e| e != ext.as_str()) {
            let mut name = candidate.into_os_string();
            name.push(".");
            name.push(ext);
            candidate = PathBuf::from(name);
        }
        let candidate = normalize(&candidate);
        candidate.is_file().then_some(candidate)
    }
}

impl<H: Resolve> Resolve for ZoneFallback<H> {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        let (rebased, rebased_context) = self
            .zones
            .rebase(request, context, self.zone)
            .ok_or_else(|| Error::not_found(request.as_str(), &context.dir))?;
        debug!(
            zone = ?self.zone,
            %request,
            dir = %rebased_context.dir.display(),
            "retrying in shadow zone"
        );

        if self.zone == Zone::Binary && rebased.is_relative() {
            if let Some(path) = self.probe_native(&rebased, &rebased_context) {
                return Ok(path);
            }
        }
        self.host.resolve(&rebased, &rebased_context)
    }

    fn name(&self) -> &str {
        match self.zone {
            Zone::Portable => "portable",
            Zone::Binary => "binary",
        }
    }
}

/// Stores a redirect record whenever the wrapped stage succeeds.
///
/// Failing to write the record never fails the lookup.
pub struct Remember<R> {
    inner: R,
    zones: Arc<Zones>,
    store: Arc<RedirectStore>,
}

impl<R: Resolve> Remember<R> {
    pub fn new(inner: R, zones: Arc<Zones>, store: Arc<RedirectStore>) -> Self {
        Self {
            inner,
            zones,
            store,
        }
    }
}

impl<R: Resolve> Resolve for Remember<R> {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        let path = self.inner.resolve(request, context)?;

        let key = self.zones.redirect_key(request, context);
        let record = self.zones.record_for(&path);
        if let (Some(key), Some(record)) = (key, record) {
            if let Err(e) = self.store.record(&key, &record) {
                warn!(%key, error = %e, "failed to store redirect record");
            }
        }
        Ok(path)
    }

    fn name(&self) -> &str { self.inner.name() }
}
