//! Pipeline orchestration: export, per-frame prediction and panel dispatch.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use autoframe_config::{ClassifierConfig, Config, ExportConfig, LayoutConfig};
use autoframe_protocols::{
    DesignHost, ElementKey, FrameDescriptor, FrameError, HostError, LayoutPredictor, NodeId,
    NodeSnapshot, NodeType, PanelMessage, PluginMessage, PredictionRequest, SceneNode,
    SelectionError,
};

use crate::applicator::LayoutApplicator;
use crate::classifier::NameCounters;
use crate::extractor::{collect_images, describe_frame, extract_frames, extract_node, load_fonts};
use crate::geometry::Size;

/// The parts of [`Config`] the pipeline reads.
#[derive(Debug, Clone, Default)]
pub struct PipelineSettings {
    pub classifier: ClassifierConfig,
    pub layout: LayoutConfig,
    pub export: ExportConfig,
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            classifier: config.classifier,
            layout: config.layout,
            export: config.export,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Everything produced by one export pass.
#[derive(Debug, Clone, Serialize)]
pub struct ExportBundle {
    pub nodes: Vec<NodeSnapshot>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub images: BTreeMap<String, String>,
    #[serde(skip)]
    pub frames: Vec<FrameDescriptor>,
}

impl ExportBundle {
    /// Pretty-printed download document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of processing a single selected frame.
#[derive(Debug)]
pub enum FrameStatus {
    Applied {
        clone_id: NodeId,
        applied: Vec<ElementKey>,
    },
    Partial {
        clone_id: NodeId,
        applied: Vec<ElementKey>,
        skipped: Vec<String>,
    },
    Failed {
        error: FrameError,
    },
}

#[derive(Debug)]
pub struct FrameOutcome {
    pub frame_id: NodeId,
    pub frame_name: String,
    pub status: FrameStatus,
}

/// Summary of a predict-and-apply run over the selection.
#[derive(Debug, Default)]
pub struct RunReport {
    pub frames: Vec<FrameOutcome>,
    /// Descriptors sent to the predictor, in selection order.
    pub descriptors: Vec<FrameDescriptor>,
}

impl RunReport {
    pub fn applied_count(&self) -> usize {
        self.count(|s| matches!(s, FrameStatus::Applied { .. }))
    }

    pub fn partial_count(&self) -> usize {
        self.count(|s| matches!(s, FrameStatus::Partial { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, FrameStatus::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&FrameStatus) -> bool) -> usize {
        self.frames.iter().filter(|f| predicate(&f.status)).count()
    }
}

/// Drives the extract, predict and apply flow against a host.
pub struct Orchestrator {
    host: Arc<dyn DesignHost>,
    predictor: Arc<dyn LayoutPredictor>,
    settings: PipelineSettings,
}

impl Orchestrator {
    pub fn new(
        host: Arc<dyn DesignHost>,
        predictor: Arc<dyn LayoutPredictor>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            host,
            predictor,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Handle one message from the UI panel and return the replies.
    ///
    /// Failures are reported to the user through host notices, so this
    /// never errors; a failed request simply produces no reply.
    pub async fn handle_message(&self, message: PanelMessage) -> Vec<PluginMessage> {
        match message {
            PanelMessage::Export => match self.export_json().await {
                Ok((data, frames)) => vec![
                    PluginMessage::DownloadJson { data },
                    PluginMessage::Frames { data: frames },
                ],
                Err(e) => {
                    error!(error = %e, "Export failed");
                    self.host.notify(&format!("Export failed: {e}"));
                    Vec::new()
                }
            },
            PanelMessage::DesiredSize { width, height } => {
                match self.resize_selection(width, height).await {
                    Ok(report) => vec![PluginMessage::Frames {
                        data: report.descriptors,
                    }],
                    Err(_) => Vec::new(),
                }
            }
        }
    }

    async fn export_json(&self) -> Result<(String, Vec<FrameDescriptor>), ExportError> {
        let bundle = self.export().await?;
        let json = bundle.to_json()?;
        Ok((json, bundle.frames))
    }

    /// Snapshot every top-level node of the document.
    ///
    /// Classified nodes are renamed in the document as a side effect.
    pub async fn export(&self) -> Result<ExportBundle, ExportError> {
        let host = self.host.as_ref();
        let roots = host.top_level_nodes();
        info!(nodes = roots.len(), "Exporting document");

        for id in &roots {
            load_fonts(host, id).await?;
        }

        let mut nodes = Vec::with_capacity(roots.len());
        for id in &roots {
            let root = host.node(id)?;
            let mut counters = NameCounters::new();
            nodes.push(extract_node(
                host,
                id,
                root.area(),
                &mut counters,
                &self.settings.classifier,
            )?);
        }

        let frames = extract_frames(host, &roots, &self.settings.classifier)?;

        let images = if self.settings.export.include_image_data {
            let mut hashes = Vec::new();
            for node in &nodes {
                node.walk(&mut |n| hashes.extend(n.properties.image_hashes()));
            }
            collect_images(host, hashes).await
        } else {
            BTreeMap::new()
        };

        host.notify("Data exported successfully.");
        info!(
            nodes = nodes.len(),
            frames = frames.len(),
            images = images.len(),
            "Export complete"
        );

        Ok(ExportBundle {
            nodes,
            images,
            frames,
        })
    }

    /// Predict and apply a layout at `width` x `height` for each selected frame.
    ///
    /// Selection problems are reported before anything is mutated. Each
    /// frame then succeeds or fails on its own.
    pub async fn resize_selection(&self, width: f64, height: f64) -> Result<RunReport, SelectionError> {
        let frames = match self.selected_frames(width, height) {
            Ok(frames) => frames,
            Err(e) => {
                warn!(error = %e, "Rejected resize request");
                self.host.notify(&e.to_string());
                return Err(e);
            }
        };

        let host = self.host.as_ref();
        for frame in &frames {
            if let Err(e) = load_fonts(host, &frame.id).await {
                warn!(frame = %frame.name, error = %e, "Font pre-pass failed");
            }
        }

        let mut report = RunReport::default();
        for frame in frames {
            info!(frame = %frame.name, width, height, "Processing frame");
            let status = match self.process_frame(&frame, width, height, &mut report).await {
                Ok(status) => status,
                Err(e) => {
                    error!(frame = %frame.name, error = %e, "Frame failed");
                    host.notify(&format!("Error processing frame '{}': {}", frame.name, e));
                    FrameStatus::Failed { error: e }
                }
            };
            report.frames.push(FrameOutcome {
                frame_id: frame.id,
                frame_name: frame.name,
                status,
            });
        }

        info!(
            applied = report.applied_count(),
            partial = report.partial_count(),
            failed = report.failed_count(),
            "Resize complete"
        );
        Ok(report)
    }

    fn selected_frames(&self, width: f64, height: f64) -> Result<Vec<SceneNode>, SelectionError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(SelectionError::InvalidSize { width, height });
        }

        let selection = self.host.selection();
        if selection.is_empty() {
            return Err(SelectionError::Empty);
        }

        let mut frames = Vec::new();
        for id in &selection {
            match self.host.node(id) {
                Ok(node) if node.node_type == NodeType::Frame => frames.push(node),
                Ok(_) => {}
                Err(e) => warn!(node = %id, error = %e, "Selected node unavailable"),
            }
        }

        if frames.is_empty() {
            return Err(SelectionError::NoFrames);
        }
        Ok(frames)
    }

    async fn process_frame(
        &self,
        frame: &SceneNode,
        width: f64,
        height: f64,
        report: &mut RunReport,
    ) -> Result<FrameStatus, FrameError> {
        let host = self.host.as_ref();

        let descriptor = describe_frame(host, frame, &self.settings.classifier)?;
        report.descriptors.push(descriptor.clone());

        let mut request = PredictionRequest::new(descriptor, width, height);
        if self.settings.export.enrich_predictions {
            let hashes: Vec<String> = request
                .frame
                .elements
                .iter()
                .filter_map(|(_, element)| element)
                .flat_map(|element| element.properties.image_hashes().map(str::to_string))
                .collect();
            request.images = collect_images(host, hashes.iter().map(String::as_str)).await;
        }

        let prediction = self.predictor.predict(&request).await?;

        let clone_id = host.clone_node(&frame.id)?;
        let clone_name = if prediction.frame_name.is_empty() {
            format!("{} {}x{}", frame.name, prediction.width, prediction.height)
        } else {
            prediction.frame_name.clone()
        };
        host.rename(&clone_id, &clone_name)?;
        host.move_to(
            &clone_id,
            frame.x + frame.width + self.settings.layout.clone_gap,
            frame.y,
        )?;
        host.resize(&clone_id, prediction.width, prediction.height)?;

        let applicator = LayoutApplicator::new(host, &self.settings.layout);
        let applied = applicator
            .apply(
                &clone_id,
                &prediction,
                Size::new(frame.width, frame.height),
                Size::new(prediction.width, prediction.height),
            )
            .await?;

        info!(
            frame = %frame.name,
            clone = %clone_id,
            applied = applied.applied.len(),
            skipped = applied.skipped.len(),
            "Frame laid out"
        );

        Ok(if applied.is_complete() {
            FrameStatus::Applied {
                clone_id,
                applied: applied.applied,
            }
        } else {
            FrameStatus::Partial {
                clone_id,
                applied: applied.applied,
                skipped: applied.skipped.iter().map(ToString::to_string).collect(),
            }
        })
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
