use std::path::PathBuf;
use std::sync::Arc;

use umbra_redirect::RedirectStore;

use crate::{Chain, Context, Original, Recorded, Remember, Request, Resolve, Result, ZoneFallback, Zones};

/// The installed resolution wrapper for one managed tree.
///
/// Built once from the host lookup and the zones, then handed to whatever
/// performs module lookups.
pub struct ShadowResolver {
    zones: Arc<Zones>,
    store: Arc<RedirectStore>,
    chain: Chain<'static>,
}

impl ShadowResolver {
    pub fn new<H>(host: H, zones: Zones) -> Self
    where
        H: Resolve + 'static,
    {
        let zones = Arc::new(zones);
        let store = Arc::new(RedirectStore::new(zones.redirect_root()));
        let host = Arc::new(host);

        let chain = Chain::new()
            .then(Original::new(Arc::clone(&host)))
            .then(Recorded::new(Arc::clone(&zones), Arc::clone(&store)))
            .then(Remember::new(
                ZoneFallback::portable(Arc::clone(&host), Arc::clone(&zones)),
                Arc::clone(&zones),
                Arc::clone(&store),
            ))
            .then(Remember::new(
                ZoneFallback::binary(host, Arc::clone(&zones)),
                Arc::clone(&zones),
                Arc::clone(&store),
            ));

        Self { zones, store, chain }
    }

    pub fn zones(&self) -> &Zones { &self.zones }

    pub fn store(&self) -> &RedirectStore { &self.store }
}

impl Resolve for ShadowResolver {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        self.chain.resolve(request, context)
    }

    fn name(&self) -> &str { "shadow" }
}
