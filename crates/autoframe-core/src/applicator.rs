//! Applying a predicted layout to a cloned frame.

use tracing::{debug, warn};

use autoframe_config::LayoutConfig;
use autoframe_protocols::{
    DesignHost, ElementKey, HostError, LayoutError, Mixed, NodeType, PredictedElement,
    PredictionResult, SceneNode, TextAutoResize, TextStyleUpdate,
};

use crate::classifier::clean_element_name;
use crate::extractor::load_node_fonts;
use crate::geometry::{
    clamp_to_frame, preserve_aspect_ratio, resolve_overlap, scale_position, uniform_scale, Rect,
    Size,
};
use crate::tree::find_first;

/// What happened while applying a prediction to one frame.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub applied: Vec<ElementKey>,
    /// Predicted elements with no matching node; these are not fatal.
    pub skipped: Vec<LayoutError>,
    pub overlaps_resolved: usize,
    /// Pushes stopped at the frame edge.
    pub boundary_limited: usize,
    /// Pushes after which the pair still overlaps.
    pub overlaps_remaining: usize,
}

impl ApplyReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Places predicted elements inside a frame.
pub struct LayoutApplicator<'a> {
    host: &'a dyn DesignHost,
    config: &'a LayoutConfig,
}

impl<'a> LayoutApplicator<'a> {
    pub fn new(host: &'a dyn DesignHost, config: &'a LayoutConfig) -> Self {
        Self { host, config }
    }

    /// Apply `prediction` to the frame `frame_id`.
    ///
    /// Predicted coordinates are in the `original` frame's space and get
    /// scaled to `target`, which must already be the frame's size.
    pub async fn apply(
        &self,
        frame_id: &str,
        prediction: &PredictionResult,
        original: Size,
        target: Size,
    ) -> Result<ApplyReport, LayoutError> {
        let frame = self.host.node(frame_id)?;
        let mut report = ApplyReport::default();

        for key in ElementKey::ALL {
            let Some(predicted) = prediction.element(key) else {
                continue;
            };

            let matches = |n: &SceneNode| clean_element_name(&n.name) == key.as_str();
            let Some(node) = find_first(self.host, frame.child_ids(), &matches)? else {
                let err = LayoutError::ElementNotFound {
                    key: key.to_string(),
                    frame: frame.name.clone(),
                };
                warn!(error = %err, "Skipping predicted element");
                report.skipped.push(err);
                continue;
            };

            self.place(&node, predicted, original, target).await?;
            report.applied.push(key);
        }

        self.resolve_overlaps(frame_id, target, &mut report)?;

        debug!(
            frame = %frame.name,
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            overlaps = report.overlaps_resolved,
            "Applied layout"
        );

        Ok(report)
    }

    async fn place(
        &self,
        node: &SceneNode,
        predicted: &PredictedElement,
        original: Size,
        target: Size,
    ) -> Result<(), HostError> {
        let position = scale_position(
            predicted.x,
            predicted.y,
            original.width,
            original.height,
            target.width,
            target.height,
        );
        let scaled = scale_position(
            predicted.width,
            predicted.height,
            original.width,
            original.height,
            target.width,
            target.height,
        );
        let max = Size::new(scaled.x.min(target.width), scaled.y.min(target.height));

        let size = if node.width > 0.0 && node.height > 0.0 {
            preserve_aspect_ratio(node.width, node.height, max.width, max.height, self.config.min_scale)
        } else {
            max
        };
        let clamped = clamp_to_frame(
            position.x,
            position.y,
            size.width,
            size.height,
            target.width,
            target.height,
        );

        if node.node_type == NodeType::Text {
            let element_scale = uniform_scale(
                Size::new(node.width, node.height),
                Size::new(scaled.x, scaled.y),
            );
            self.restyle_text(node, predicted, uniform_scale(original, target), element_scale)
                .await?;
        }

        if node.node_type.supports_resize() && size.width > 0.0 && size.height > 0.0 {
            self.host.resize(&node.id, size.width, size.height)?;
        }
        self.host.move_to(&node.id, clamped.x, clamped.y)?;

        debug!(
            node = %node.id,
            name = %node.name,
            x = clamped.x,
            y = clamped.y,
            width = size.width,
            height = size.height,
            "Placed element"
        );
        Ok(())
    }

    /// Fix the text box and scale font metrics.
    ///
    /// A font that cannot be loaded leaves the metrics unchanged.
    async fn restyle_text(
        &self,
        node: &SceneNode,
        predicted: &PredictedElement,
        frame_scale: f64,
        element_scale: f64,
    ) -> Result<(), HostError> {
        let text = node.text.clone().unwrap_or_default();
        let fonts = load_node_fonts(self.host, node).await;

        let mut update = TextStyleUpdate {
            auto_resize: Some(TextAutoResize::None),
            ..Default::default()
        };

        if fonts.failed.is_empty() {
            let base = predicted.font_size().or(match text.font_size {
                Some(Mixed::Uniform(size)) => Some(size),
                _ => None,
            });
            update.font_size = base.map(|size| (size * frame_scale).max(self.config.min_font_size));
            update.line_height = match text.line_height {
                Some(Mixed::Uniform(lh)) => lh.scaled(element_scale),
                _ => None,
            };
            update.letter_spacing = match text.letter_spacing {
                Some(Mixed::Uniform(ls)) => Some(ls.scaled(element_scale)),
                _ => None,
            };
        } else {
            warn!(node = %node.id, "Fonts unavailable, keeping text metrics");
        }

        match self.host.set_text_style(&node.id, &update) {
            Err(HostError::FontLoad { family, style, message }) => {
                warn!(node = %node.id, %family, %style, %message, "Could not restyle text");
                Ok(())
            }
            other => other,
        }
    }

    /// Push apart overlapping immediate children of the frame, pairwise in
    /// child order, in one pass.
    fn resolve_overlaps(
        &self,
        frame_id: &str,
        target: Size,
        report: &mut ApplyReport,
    ) -> Result<(), HostError> {
        let frame = self.host.node(frame_id)?;
        let ids = frame.child_ids();

        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let a = Rect::of_node(&self.host.node(&ids[i])?);
                let b = Rect::of_node(&self.host.node(&ids[j])?);
                let Some(resolution) = resolve_overlap(&a, &b, target, self.config.overlap_padding)
                else {
                    continue;
                };
                self.host
                    .move_to(&ids[j], resolution.position.x, resolution.position.y)?;
                report.overlaps_resolved += 1;
                if resolution.boundary_limited {
                    report.boundary_limited += 1;
                }
                if !resolution.cleared {
                    report.overlaps_remaining += 1;
                    debug!(
                        a = %ids[i],
                        b = %ids[j],
                        boundary_limited = resolution.boundary_limited,
                        "Overlap remains after push"
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "applicator_tests.rs"]
mod tests;
