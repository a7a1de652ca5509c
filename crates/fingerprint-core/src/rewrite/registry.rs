//! Registration table for the UI's URL capabilities.
//!
//! The host UI registers its original capabilities as its modules load;
//! [`OverrideRegistry::install_overrides`] composes the rewriting decorators over
//! whatever is registered. Installation arms the registry, so a capability that
//! registers afterwards is composed on arrival. Each capability is composed at
//! most once per registration, and a capability that never registers is simply
//! left alone.

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use super::UrlConstants;
use super::capabilities::{ActionUrlProvider, ThumbnailUrlGenerator, WebPreviewUrls};
use super::overrides::{ApiModeWebPreview, ServiceContextActionUrls, ServiceContextThumbnails};
use crate::metrics;

/// Key of a capability in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityName {
    /// Document library `getActionUrls`.
    ActionUrls,
    /// Web preview `getContentUrl` and `getThumbnailUrl`.
    WebPreview,
    /// Utility `generateThumbnailUrl`.
    ThumbnailUrls,
}

impl CapabilityName {
    pub const ALL: [Self; 3] = [Self::ActionUrls, Self::WebPreview, Self::ThumbnailUrls];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionUrls => "doclib.actions.getActionUrls",
            Self::WebPreview => "web-preview.urls",
            Self::ThumbnailUrls => "util.generateThumbnailUrl",
        }
    }
}

impl fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Slot<T: ?Sized> {
    current: Arc<T>,
    composed: bool,
}

impl<T: ?Sized> Slot<T> {
    fn original(capability: Arc<T>) -> Self {
        Self {
            current: capability,
            composed: false,
        }
    }
}

#[derive(Default)]
struct Slots {
    action_urls: Option<Slot<dyn ActionUrlProvider>>,
    web_preview: Option<Slot<dyn WebPreviewUrls>>,
    thumbnail_urls: Option<Slot<dyn ThumbnailUrlGenerator>>,
    /// Set once overrides were installed; later registrations compose with it.
    armed: Option<UrlConstants>,
}

impl Slots {
    fn compose(&mut self, name: CapabilityName, constants: &UrlConstants) -> bool {
        match name {
            CapabilityName::ActionUrls => compose_slot(&mut self.action_urls, name, |original| {
                Arc::new(ServiceContextActionUrls::new(original, constants.clone()))
                    as Arc<dyn ActionUrlProvider>
            }),
            CapabilityName::WebPreview => compose_slot(&mut self.web_preview, name, |original| {
                Arc::new(ApiModeWebPreview::new(original, constants.clone())) as Arc<dyn WebPreviewUrls>
            }),
            CapabilityName::ThumbnailUrls => {
                compose_slot(&mut self.thumbnail_urls, name, |original| {
                    Arc::new(ServiceContextThumbnails::new(original, constants.clone()))
                        as Arc<dyn ThumbnailUrlGenerator>
                })
            }
        }
    }

    fn is_registered(&self, name: CapabilityName) -> bool {
        match name {
            CapabilityName::ActionUrls => self.action_urls.is_some(),
            CapabilityName::WebPreview => self.web_preview.is_some(),
            CapabilityName::ThumbnailUrls => self.thumbnail_urls.is_some(),
        }
    }

    fn is_composed(&self, name: CapabilityName) -> bool {
        match name {
            CapabilityName::ActionUrls => self.action_urls.as_ref().is_some_and(|s| s.composed),
            CapabilityName::WebPreview => self.web_preview.as_ref().is_some_and(|s| s.composed),
            CapabilityName::ThumbnailUrls => {
                self.thumbnail_urls.as_ref().is_some_and(|s| s.composed)
            }
        }
    }
}

/// Wrap the slot's capability unless it is missing or already wrapped.
fn compose_slot<T: ?Sized>(
    slot: &mut Option<Slot<T>>,
    name: CapabilityName,
    wrap: impl FnOnce(Arc<T>) -> Arc<T>,
) -> bool {
    let Some(slot) = slot.as_mut() else {
        tracing::debug!(capability = %name, "capability not registered, override skipped");
        return false;
    };
    if slot.composed {
        return false;
    }

    slot.current = wrap(Arc::clone(&slot.current));
    slot.composed = true;

    tracing::info!(capability = %name, "url rewrite override installed");
    metrics::record_override_installed(name.as_str());
    true
}

static GLOBAL: LazyLock<OverrideRegistry> = LazyLock::new(OverrideRegistry::new);

/// Capability table shared by the UI and the overrides.
#[derive(Default)]
pub struct OverrideRegistry {
    slots: RwLock<Slots>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static OverrideRegistry {
        &GLOBAL
    }

    /// Compose the overrides over every registered capability.
    ///
    /// Returns the capabilities composed by this call; calling it again
    /// composes nothing new.
    pub fn install_overrides(&self, constants: UrlConstants) -> Vec<CapabilityName> {
        let mut slots = self.slots.write();
        let mut installed = Vec::new();
        for name in CapabilityName::ALL {
            if slots.compose(name, &constants) {
                installed.push(name);
            }
        }
        slots.armed = Some(constants);
        installed
    }

    pub fn register_action_urls(&self, original: Arc<dyn ActionUrlProvider>) {
        let mut slots = self.slots.write();
        slots.action_urls = Some(Slot::original(original));
        Self::compose_if_armed(&mut slots, CapabilityName::ActionUrls);
    }

    pub fn register_web_preview(&self, original: Arc<dyn WebPreviewUrls>) {
        let mut slots = self.slots.write();
        slots.web_preview = Some(Slot::original(original));
        Self::compose_if_armed(&mut slots, CapabilityName::WebPreview);
    }

    pub fn register_thumbnail_urls(&self, original: Arc<dyn ThumbnailUrlGenerator>) {
        let mut slots = self.slots.write();
        slots.thumbnail_urls = Some(Slot::original(original));
        Self::compose_if_armed(&mut slots, CapabilityName::ThumbnailUrls);
    }

    fn compose_if_armed(slots: &mut Slots, name: CapabilityName) {
        if let Some(constants) = slots.armed.clone() {
            slots.compose(name, &constants);
        }
    }

    /// Current `getActionUrls`, composed when overrides are installed.
    pub fn action_urls(&self) -> Option<Arc<dyn ActionUrlProvider>> {
        self.slots.read().action_urls.as_ref().map(|s| Arc::clone(&s.current))
    }

    /// Current web preview URLs, composed when overrides are installed.
    pub fn web_preview(&self) -> Option<Arc<dyn WebPreviewUrls>> {
        self.slots.read().web_preview.as_ref().map(|s| Arc::clone(&s.current))
    }

    /// Current `generateThumbnailUrl`, composed when overrides are installed.
    pub fn thumbnail_urls(&self) -> Option<Arc<dyn ThumbnailUrlGenerator>> {
        self.slots
            .read()
            .thumbnail_urls
            .as_ref()
            .map(|s| Arc::clone(&s.current))
    }

    pub fn is_registered(&self, name: CapabilityName) -> bool {
        self.slots.read().is_registered(name)
    }

    pub fn is_composed(&self, name: CapabilityName) -> bool {
        self.slots.read().is_composed(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::{JsNode, PreviewOptions};

    fn proxied_thumbnails() -> Arc<dyn ThumbnailUrlGenerator> {
        Arc::new(|_: &JsNode, name: &str| -> Option<String> {
            Some(format!("http://localhost:8080/share/proxy/alfresco/thumb/{name}"))
        })
    }

    struct ProxyPreview;

    impl WebPreviewUrls for ProxyPreview {
        fn content_url(&self, _options: &PreviewOptions, _download: bool) -> Option<String> {
            Some("/share/proxy/alfresco/content".to_string())
        }

        fn thumbnail_url(
            &self,
            _options: &PreviewOptions,
            _thumbnail: &str,
            _file_suffix: Option<&str>,
        ) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_install_without_capabilities_is_silent() {
        let registry = OverrideRegistry::new();
        assert!(registry.install_overrides(UrlConstants::default()).is_empty());
        assert!(registry.thumbnail_urls().is_none());
        assert!(!registry.is_registered(CapabilityName::ActionUrls));
    }

    #[test]
    fn test_install_composes_registered_capabilities() {
        let registry = OverrideRegistry::new();
        registry.register_thumbnail_urls(proxied_thumbnails());

        let installed = registry.install_overrides(UrlConstants::default());
        assert_eq!(installed, vec![CapabilityName::ThumbnailUrls]);
        assert!(registry.is_composed(CapabilityName::ThumbnailUrls));

        let url = registry
            .thumbnail_urls()
            .unwrap()
            .generate_thumbnail_url(&JsNode::default(), "doclib");
        assert_eq!(url.as_deref(), Some("/share/service/thumb/doclib"));
    }

    #[test]
    fn test_install_twice_does_not_double_wrap() {
        let registry = OverrideRegistry::new();
        registry.register_web_preview(Arc::new(ProxyPreview));

        assert_eq!(registry.install_overrides(UrlConstants::default()).len(), 1);
        assert!(registry.install_overrides(UrlConstants::default()).is_empty());

        let url = registry
            .web_preview()
            .unwrap()
            .content_url(&PreviewOptions::api_mode(), false);
        assert_eq!(url.as_deref(), Some("/share/service/content"));
    }

    #[test]
    fn test_registration_after_install_is_composed() {
        let registry = OverrideRegistry::new();
        registry.install_overrides(UrlConstants::default());
        assert!(!registry.is_composed(CapabilityName::ThumbnailUrls));

        registry.register_thumbnail_urls(proxied_thumbnails());
        assert!(registry.is_composed(CapabilityName::ThumbnailUrls));

        let url = registry
            .thumbnail_urls()
            .unwrap()
            .generate_thumbnail_url(&JsNode::default(), "imgpreview");
        assert_eq!(url.as_deref(), Some("/share/service/thumb/imgpreview"));
    }

    #[test]
    fn test_unarmed_registration_stays_original() {
        let registry = OverrideRegistry::new();
        registry.register_thumbnail_urls(proxied_thumbnails());
        assert!(registry.is_registered(CapabilityName::ThumbnailUrls));
        assert!(!registry.is_composed(CapabilityName::ThumbnailUrls));

        let url = registry
            .thumbnail_urls()
            .unwrap()
            .generate_thumbnail_url(&JsNode::default(), "doclib");
        assert_eq!(
            url.as_deref(),
            Some("http://localhost:8080/share/proxy/alfresco/thumb/doclib")
        );
    }

    #[test]
    fn test_capability_names() {
        assert_eq!(
            CapabilityName::ActionUrls.to_string(),
            "doclib.actions.getActionUrls"
        );
        assert_eq!(CapabilityName::ALL.len(), 3);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(OverrideRegistry::global(), OverrideRegistry::global()));
    }
}
