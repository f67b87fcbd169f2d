//! Process-wide default [`SinkProvider`].
//!
//! Bridges built without an explicit provider resolve this one once, when
//! they are constructed. Installing a new provider affects bridges built
//! afterwards only.
use crate::sink::{NoopSinkProvider, SinkProvider};
use once_cell::sync::Lazy;
use std::{
    mem,
    sync::{Arc, RwLock},
};

/// The global `SinkProvider` singleton.
static GLOBAL_SINK_PROVIDER: Lazy<RwLock<Arc<dyn SinkProvider>>> =
    Lazy::new(|| RwLock::new(Arc::new(NoopSinkProvider::new())));

/// Returns the currently installed global [`SinkProvider`].
pub fn sink_provider() -> Arc<dyn SinkProvider> {
    match GLOBAL_SINK_PROVIDER.read() {
        Ok(provider) => provider.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Installs `new_provider` as the global [`SinkProvider`], returning the one
/// previously installed.
pub fn set_sink_provider<P>(new_provider: P) -> Arc<dyn SinkProvider>
where
    P: SinkProvider + 'static,
{
    let new_provider: Arc<dyn SinkProvider> = Arc::new(new_provider);
    let mut provider = match GLOBAL_SINK_PROVIDER.write() {
        Ok(provider) => provider,
        Err(poisoned) => poisoned.into_inner(),
    };
    mem::replace(&mut *provider, new_provider)
}
