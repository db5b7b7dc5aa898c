pub mod channel_setup;
pub mod home;
pub mod preferences;
pub mod subscribe;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use channel_setup::{NotificationChannelSetup, SetupState};
pub use home::HomePage;
pub use preferences::PreferencesPage;
pub use subscribe::SubscribePage;

/// A page's "request in flight" marker.
///
/// [`InFlight::begin`] sets it and hands back a guard that clears it on
/// drop, so a submit future that is cancelled mid-request does not leave
/// the page disabled.
#[derive(Debug, Default)]
pub(crate) struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub(crate) fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn begin(&self) -> InFlightGuard {
        self.0.store(true, Ordering::Release);
        InFlightGuard(Arc::clone(&self.0))
    }
}

pub(crate) struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
