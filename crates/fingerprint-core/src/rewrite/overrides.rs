//! Decorators over the UI's URL capabilities.
//!
//! Each decorator keeps the original capability, delegates to it, and only
//! post-processes the URL-shaped parts of the result.

use std::sync::Arc;

use super::capabilities::{
    ActionUrlProvider, ActionUrls, DocumentRecord, JsNode, PreviewOptions, ThumbnailUrlGenerator,
    WebPreviewUrls,
};
use super::{DOWNLOAD_FLAG, NEW_TAB_SUFFIX, UrlConstants, combine_paths};

/// `getActionUrls` override.
///
/// Always rebuilds `download_url` and `view_url` from the record's content URL
/// under the service context, whatever the original produced. There is no mode
/// check here, unlike the preview overrides.
pub struct ServiceContextActionUrls {
    original: Arc<dyn ActionUrlProvider>,
    constants: UrlConstants,
}

impl ServiceContextActionUrls {
    pub fn new(original: Arc<dyn ActionUrlProvider>, constants: UrlConstants) -> Self {
        Self {
            original,
            constants,
        }
    }
}

impl ActionUrlProvider for ServiceContextActionUrls {
    fn action_urls(&self, record: &DocumentRecord, site_id: Option<&str>) -> ActionUrls {
        let mut urls = self.original.action_urls(record, site_id);

        let content_url = combine_paths(&[
            self.constants.url_service_context.as_str(),
            record.js_node.content_url.as_str(),
        ]);
        urls.download_url = format!("{content_url}{DOWNLOAD_FLAG}");
        urls.view_url = format!("{content_url}{NEW_TAB_SUFFIX}");

        urls
    }
}

/// `getContentUrl` / `getThumbnailUrl` override, active in `api` mode only.
pub struct ApiModeWebPreview {
    original: Arc<dyn WebPreviewUrls>,
    constants: UrlConstants,
}

impl ApiModeWebPreview {
    pub fn new(original: Arc<dyn WebPreviewUrls>, constants: UrlConstants) -> Self {
        Self {
            original,
            constants,
        }
    }

    fn rewrite(&self, options: &PreviewOptions, url: Option<String>) -> Option<String> {
        match url {
            Some(url) if options.is_api_mode() => {
                Some(self.constants.relative_proxy_to_service(&url))
            }
            other => other,
        }
    }
}

impl WebPreviewUrls for ApiModeWebPreview {
    fn content_url(&self, options: &PreviewOptions, download: bool) -> Option<String> {
        let url = self.original.content_url(options, download);
        self.rewrite(options, url)
    }

    fn thumbnail_url(
        &self,
        options: &PreviewOptions,
        thumbnail: &str,
        file_suffix: Option<&str>,
    ) -> Option<String> {
        let url = self.original.thumbnail_url(options, thumbnail, file_suffix);
        self.rewrite(options, url)
    }
}

/// `generateThumbnailUrl` override. Rewrites unconditionally.
pub struct ServiceContextThumbnails {
    original: Arc<dyn ThumbnailUrlGenerator>,
    constants: UrlConstants,
}

impl ServiceContextThumbnails {
    pub fn new(original: Arc<dyn ThumbnailUrlGenerator>, constants: UrlConstants) -> Self {
        Self {
            original,
            constants,
        }
    }
}

impl ThumbnailUrlGenerator for ServiceContextThumbnails {
    fn generate_thumbnail_url(&self, js_node: &JsNode, thumbnail_name: &str) -> Option<String> {
        self.original
            .generate_thumbnail_url(js_node, thumbnail_name)
            .map(|url| self.constants.proxy_to_service(&url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Mimics the UI: every URL goes through the proxy.
    struct ProxyActions;

    impl ActionUrlProvider for ProxyActions {
        fn action_urls(&self, record: &DocumentRecord, site_id: Option<&str>) -> ActionUrls {
            let proxied = format!("/share/proxy/alfresco/{}", record.js_node.content_url);
            let mut others = BTreeMap::new();
            others.insert(
                "documentDetailsUrl".to_string(),
                format!(
                    "/share/page/site/{}/document-details?nodeRef={}",
                    site_id.unwrap_or("-"),
                    record.js_node.node_ref
                ),
            );
            ActionUrls {
                download_url: format!("{proxied}?a=true"),
                view_url: proxied,
                others,
            }
        }
    }

    struct ProxyPreview;

    impl WebPreviewUrls for ProxyPreview {
        fn content_url(&self, _options: &PreviewOptions, download: bool) -> Option<String> {
            Some(format!(
                "/share/proxy/alfresco/api/node/content/workspace/SpacesStore/1/a.pdf?a={download}"
            ))
        }

        fn thumbnail_url(
            &self,
            _options: &PreviewOptions,
            thumbnail: &str,
            file_suffix: Option<&str>,
        ) -> Option<String> {
            if thumbnail.is_empty() {
                return None;
            }
            Some(format!(
                "/share/proxy/alfresco/api/node/workspace/SpacesStore/1/content/thumbnails/{thumbnail}{}",
                file_suffix.unwrap_or("")
            ))
        }
    }

    fn record() -> DocumentRecord {
        DocumentRecord {
            display_name: "a.pdf".to_string(),
            js_node: JsNode {
                node_ref: "workspace://SpacesStore/1".to_string(),
                content_url: "/api/node/content/workspace/SpacesStore/1/a.pdf".to_string(),
            },
        }
    }

    #[test]
    fn test_action_urls_rebuilt_under_service_context() {
        let actions = ServiceContextActionUrls::new(Arc::new(ProxyActions), UrlConstants::default());
        let urls = actions.action_urls(&record(), Some("swsdp"));

        assert_eq!(
            urls.download_url,
            "/share/service/api/node/content/workspace/SpacesStore/1/a.pdf?a=true"
        );
        assert_eq!(
            urls.view_url,
            "/share/service/api/node/content/workspace/SpacesStore/1/a.pdf\" target=\"_blank"
        );
        // untouched
        assert_eq!(
            urls.others["documentDetailsUrl"],
            "/share/page/site/swsdp/document-details?nodeRef=workspace://SpacesStore/1"
        );
    }

    #[test]
    fn test_content_url_rewritten_in_api_mode() {
        let preview = ApiModeWebPreview::new(Arc::new(ProxyPreview), UrlConstants::default());
        let url = preview
            .content_url(&PreviewOptions::api_mode(), true)
            .unwrap();
        assert_eq!(
            url,
            "/share/service/api/node/content/workspace/SpacesStore/1/a.pdf?a=true"
        );
    }

    #[test]
    fn test_content_url_verbatim_outside_api_mode() {
        let preview = ApiModeWebPreview::new(Arc::new(ProxyPreview), UrlConstants::default());
        for mode in ["", "proxy", "API"] {
            let options = PreviewOptions {
                api: mode.to_string(),
            };
            assert_eq!(
                preview.content_url(&options, false),
                ProxyPreview.content_url(&options, false)
            );
        }
    }

    #[test]
    fn test_thumbnail_url_rewritten_in_api_mode() {
        let preview = ApiModeWebPreview::new(Arc::new(ProxyPreview), UrlConstants::default());
        let options = PreviewOptions::api_mode();

        let url = preview
            .thumbnail_url(&options, "imgpreview", Some("png"))
            .unwrap();
        assert!(url.starts_with("/share/service/"));
        assert!(url.ends_with("thumbnails/imgpreviewpng"));

        // non-string results pass through
        assert_eq!(preview.thumbnail_url(&options, "", None), None);
    }

    #[test]
    fn test_generate_thumbnail_url_rewrites_without_mode() {
        let original: Arc<dyn ThumbnailUrlGenerator> =
            Arc::new(|node: &JsNode, name: &str| -> Option<String> {
                Some(format!(
                    "http://localhost:8080/share/proxy/alfresco/api/node/{}/content/thumbnails/{name}",
                    node.node_ref.replace("://", "/")
                ))
            });
        let thumbnails = ServiceContextThumbnails::new(original, UrlConstants::default());

        let url = thumbnails
            .generate_thumbnail_url(&record().js_node, "doclib")
            .unwrap();
        assert_eq!(
            url,
            "/share/service/api/node/workspace/SpacesStore/1/content/thumbnails/doclib"
        );
    }

    #[test]
    fn test_generate_thumbnail_url_passes_none_through() {
        let original: Arc<dyn ThumbnailUrlGenerator> =
            Arc::new(|_: &JsNode, _: &str| -> Option<String> { None });
        let thumbnails = ServiceContextThumbnails::new(original, UrlConstants::default());
        assert_eq!(thumbnails.generate_thumbnail_url(&JsNode::default(), "doclib"), None);
    }
}
