//! UI panel message protocol.

use serde::{Deserialize, Serialize};

use super::FrameDescriptor;

/// Inbound message from the UI panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PanelMessage {
    /// Export the whole document as JSON.
    #[serde(alias = "export-json")]
    Export,
    /// Predict and apply a layout for the current selection at this size.
    DesiredSize { width: f64, height: f64 },
}

/// Outbound message to the UI panel.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PluginMessage {
    /// Pretty-printed export JSON for the user to download.
    DownloadJson { data: String },
    /// Sanitized descriptors of the processed frames.
    #[serde(rename = "result")]
    Frames { data: Vec<FrameDescriptor> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementSlots;
    use serde_json::json;

    #[test]
    fn test_parse_export() {
        let msg: PanelMessage = serde_json::from_value(json!({"type": "export"})).unwrap();
        assert_eq!(msg, PanelMessage::Export);
    }

    #[test]
    fn test_parse_legacy_export() {
        let msg: PanelMessage = serde_json::from_value(json!({"type": "export-json"})).unwrap();
        assert_eq!(msg, PanelMessage::Export);
    }

    #[test]
    fn test_parse_desired_size() {
        let msg: PanelMessage =
            serde_json::from_value(json!({"type": "desiredSize", "width": 1080, "height": 1920}))
                .unwrap();
        assert_eq!(
            msg,
            PanelMessage::DesiredSize {
                width: 1080.0,
                height: 1920.0
            }
        );
    }

    #[test]
    fn test_parse_unknown_message() {
        let result = serde_json::from_value::<PanelMessage>(json!({"type": "close"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_download_json_message() {
        let msg = PluginMessage::DownloadJson {
            data: "[]".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "download-json");
        assert_eq!(json["data"], "[]");
    }

    #[test]
    fn test_result_message() {
        let msg = PluginMessage::Frames {
            data: vec![FrameDescriptor {
                frame_name: "A".to_string(),
                width: 1.0,
                height: 2.0,
                elements: ElementSlots::default(),
            }],
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "result");
        assert_eq!(json["data"][0]["frameName"], "A");
        assert!(json["data"][0]["logo"].is_null());
    }
}
