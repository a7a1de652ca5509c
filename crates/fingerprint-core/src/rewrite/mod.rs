//! URL rewriting for UI-generated content links.
//!
//! The document UI builds download, view, preview and thumbnail URLs that go
//! through its repository proxy. These overrides decorate the UI's URL
//! capabilities so the links point at the service context instead, where the
//! fingerprint endpoint and its streaming renderer live.
//!
//! # Overrides
//!
//! | Capability | Rewrite | Gate |
//! |---|---|---|
//! | `getActionUrls` | `downloadUrl`/`viewUrl` rebuilt from the content URL | none |
//! | `getContentUrl` | proxy-relative -> service context | `api` mode |
//! | `getThumbnailUrl` | proxy-relative -> service context | `api` mode |
//! | `generateThumbnailUrl` | absolute proxy -> service context | none |
//!
//! Overrides are installed through [`OverrideRegistry`].

mod capabilities;
mod overrides;
mod registry;

use std::sync::LazyLock;

use regex::Regex;

pub use capabilities::{
    ActionUrlProvider, ActionUrls, DocumentRecord, JsNode, PreviewOptions, ThumbnailUrlGenerator,
    WebPreviewUrls,
};
pub use overrides::{ApiModeWebPreview, ServiceContextActionUrls, ServiceContextThumbnails};
pub use registry::{CapabilityName, OverrideRegistry};

/// Mode value enabling content/thumbnail URL rewriting.
pub const API_MODE: &str = "api";

/// Query string appended to download links to force an attachment response.
pub const DOWNLOAD_FLAG: &str = "?a=true";

/// Suffix appended to view links; it closes the `href` attribute the UI
/// renders and opens the link in a new tab.
pub const NEW_TAB_SUFFIX: &str = "\" target=\"_blank";

/// Base paths the UI uses to reach the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlConstants {
    /// Absolute proxy base, e.g. `http://localhost:8080/share/proxy/alfresco/`.
    pub proxy_uri: String,
    /// Proxy base relative to the host, e.g. `/share/proxy/alfresco/`.
    pub proxy_uri_relative: String,
    /// Service context base, e.g. `/share/service/`.
    pub url_service_context: String,
}

impl Default for UrlConstants {
    fn default() -> Self {
        Self {
            proxy_uri: "http://localhost:8080/share/proxy/alfresco/".to_string(),
            proxy_uri_relative: "/share/proxy/alfresco/".to_string(),
            url_service_context: "/share/service/".to_string(),
        }
    }
}

impl UrlConstants {
    /// Replace the first occurrence of the relative proxy base with the service context.
    pub fn relative_proxy_to_service(&self, url: &str) -> String {
        url.replacen(&self.proxy_uri_relative, &self.url_service_context, 1)
    }

    /// Replace the first occurrence of the absolute proxy base with the service context.
    pub fn proxy_to_service(&self, url: &str) -> String {
        url.replacen(&self.proxy_uri, &self.url_service_context, 1)
    }
}

static REPEATED_SLASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^:])/{2,}").expect("valid regex"));

/// Join path segments the way the UI utility does.
///
/// Segments are joined with `/`, runs of slashes not preceded by `:` collapse
/// to one, and the trailing slash is dropped unless the last segment had one.
pub fn combine_paths<S: AsRef<str>>(segments: &[S]) -> String {
    let mut path = String::new();
    for segment in segments {
        let segment = segment.as_ref();
        path.push_str(segment);
        if segment != "/" {
            path.push('/');
        }
    }

    let mut path = REPEATED_SLASHES.replace_all(&path, "$1/").into_owned();

    let keep_trailing = segments
        .last()
        .is_some_and(|last| last.as_ref().ends_with('/'));
    if !keep_trailing && path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    path
}
