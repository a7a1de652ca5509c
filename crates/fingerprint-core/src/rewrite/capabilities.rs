//! URL capabilities of the document UI, as the overrides see them.
//!
//! The signatures follow the UI's own methods. A `None` URL stands for a
//! non-string result from the UI and is passed through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::API_MODE;

/// Node data the UI attaches to a document list record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsNode {
    pub node_ref: String,
    /// Repository-relative content URL, e.g. `api/node/content/workspace/SpacesStore/1/a.pdf`.
    #[serde(rename = "contentURL")]
    pub content_url: String,
}

/// A document list record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub display_name: String,
    pub js_node: JsNode,
}

/// Action links generated for a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionUrls {
    pub download_url: String,
    pub view_url: String,
    /// Every other link (`documentDetailsUrl`, `editMetadataUrl`, ...).
    #[serde(flatten)]
    pub others: BTreeMap<String, String>,
}

/// Options of a web preview instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewOptions {
    /// Which backend the preview talks to; `"api"` enables rewriting.
    #[serde(default)]
    pub api: String,
}

impl PreviewOptions {
    pub fn api_mode() -> Self {
        Self {
            api: API_MODE.to_string(),
        }
    }

    pub fn is_api_mode(&self) -> bool {
        self.api == API_MODE
    }
}

/// Document library actions: `getActionUrls(record, siteId)`.
pub trait ActionUrlProvider: Send + Sync {
    fn action_urls(&self, record: &DocumentRecord, site_id: Option<&str>) -> ActionUrls;
}

/// Web preview: `getContentUrl(download)` and `getThumbnailUrl(thumbnail, fileSuffix)`.
///
/// `options` are the options of the preview instance the call is made on.
pub trait WebPreviewUrls: Send + Sync {
    fn content_url(&self, options: &PreviewOptions, download: bool) -> Option<String>;

    fn thumbnail_url(
        &self,
        options: &PreviewOptions,
        thumbnail: &str,
        file_suffix: Option<&str>,
    ) -> Option<String>;
}

/// UI utility: `generateThumbnailUrl(jsNode, thumbnailName)`.
pub trait ThumbnailUrlGenerator: Send + Sync {
    fn generate_thumbnail_url(&self, js_node: &JsNode, thumbnail_name: &str) -> Option<String>;
}

impl<F> ThumbnailUrlGenerator for F
where
    F: Fn(&JsNode, &str) -> Option<String> + Send + Sync,
{
    fn generate_thumbnail_url(&self, js_node: &JsNode, thumbnail_name: &str) -> Option<String> {
        self(js_node, thumbnail_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_urls_serialize_flat() {
        let mut urls = ActionUrls {
            download_url: "/d".to_string(),
            view_url: "/v".to_string(),
            others: BTreeMap::new(),
        };
        urls.others
            .insert("documentDetailsUrl".to_string(), "/details".to_string());

        let json = serde_json::to_value(&urls).unwrap();
        assert_eq!(json["downloadUrl"], "/d");
        assert_eq!(json["viewUrl"], "/v");
        assert_eq!(json["documentDetailsUrl"], "/details");
    }

    #[test]
    fn test_js_node_field_names() {
        let node: JsNode = serde_json::from_str(
            r#"{"nodeRef": "workspace://SpacesStore/1", "contentURL": "api/node/content/x"}"#,
        )
        .unwrap();
        assert_eq!(node.content_url, "api/node/content/x");
    }

    #[test]
    fn test_api_mode() {
        assert!(PreviewOptions::api_mode().is_api_mode());
        assert!(!PreviewOptions::default().is_api_mode());
        assert!(!PreviewOptions { api: "API".to_string() }.is_api_mode());
    }
}
