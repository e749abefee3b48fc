//! Subcommand implementations
//!
//! Each command loads JSON fixtures, runs one engine component and returns
//! the text to print.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::debug;

use artview_anchor::{Boundary, RawSelection, RenderedContent, SelectionAnchor, TextSegment};
use artview_core::ViewConfig;
use artview_model::{sort_left_to_right, Artifact};
use artview_region::{CoordsChange, EditState, EditorRequest, RegionEditSession};
use artview_transcript::{TimeIndex, TimeSource};

/// Artifact record from a JSON file
pub(crate) fn load_artifact(path: &Path) -> Result<Artifact> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read artifact {}", path.display()))?;
    let artifact = Artifact::from_json(&json)
        .with_context(|| format!("failed to decode artifact {}", path.display()))?;
    debug!(artifact = %artifact.id, "artifact loaded");
    Ok(artifact)
}

/// Highlighted-text segments from a JSON array
pub(crate) fn load_segments(path: &Path) -> Result<Vec<TextSegment>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read text {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to decode text {}", path.display()))
}

/// Optional `--config` file
pub(crate) fn load_config(path: Option<&Path>) -> Result<ViewConfig> {
    match path {
        Some(path) => Ok(ViewConfig::load(path)?),
        None => Ok(ViewConfig::default()),
    }
}

/// Selection boundary as given on the command line
///
/// `node` counts text nodes in document order, skipping entity wrappers and
/// breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TextPoint {
    pub(crate) node: usize,
    pub(crate) offset: usize,
}

impl TextPoint {
    /// Boundary in `content`, if it has that many text nodes
    fn resolve(self, content: &RenderedContent) -> Result<Boundary> {
        let Some(node) = content.text_nodes().nth(self.node) else {
            bail!("text node {} out of range", self.node);
        };
        Ok(Boundary::new(node, self.offset))
    }
}

/// `node:offset` selection boundary
pub(crate) fn parse_boundary(value: &str) -> Result<TextPoint> {
    let Some((node, offset)) = value.split_once(':') else {
        bail!("expected NODE:OFFSET, got {value:?}");
    };
    let node = node.trim().parse().with_context(|| format!("invalid node in {value:?}"))?;
    let offset = offset
        .trim()
        .parse()
        .with_context(|| format!("invalid offset in {value:?}"))?;
    Ok(TextPoint { node, offset })
}

/// Transcript line active at a playback or scrubber position
pub(crate) fn transcript(artifact: &Artifact, source: TimeSource) -> String {
    let index = TimeIndex::from_artifact(artifact);
    match index.display(source) {
        Some(display) => display.to_string(),
        None => "no transcript entry".to_string(),
    }
}

/// Regions left to right: key, box and resolved title
pub(crate) fn regions(artifact: &Artifact) -> String {
    let mut objects = artifact.detected_objects.clone();
    sort_left_to_right(&mut objects);

    let mut out = String::new();
    for object in &objects {
        let record = object.flatten();
        let key = object.key().map_or_else(|| "-".to_string(), |key| key.to_string());
        let b = object.bbox;
        let _ = writeln!(
            out,
            "{key}\t{},{},{},{}\t{}",
            b.x1,
            b.y1,
            b.x2,
            b.y2,
            record.properties.title().unwrap_or_default()
        );
    }
    out
}

/// Result of evaluating one drag gesture
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DragOutcome {
    pub(crate) discarded: bool,
    pub(crate) state: EditState,
    pub(crate) editor: Option<EditorRequest>,
}

/// Evaluate a region drag against a fresh edit session
pub(crate) fn drag(artifact: &Artifact, change: &CoordsChange, config: &ViewConfig) -> DragOutcome {
    let mut session =
        RegionEditSession::new(artifact.id.clone()).with_min_extent(config.min_region_extent);
    let transition = session.coords_changed(change, &artifact.detected_objects);
    DragOutcome {
        discarded: transition.opened.is_none(),
        state: session.state().clone(),
        editor: transition.opened,
    }
}

/// Anchored selection payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnchorOutcome {
    pub(crate) start_offset: usize,
    pub(crate) end_offset: usize,
    pub(crate) text: String,
    pub(crate) snippet: String,
}

/// Anchor a selection over rendered segments
pub(crate) fn anchor(
    segments: &[TextSegment],
    anchor: TextPoint,
    focus: TextPoint,
    config: &ViewConfig,
) -> Result<AnchorOutcome> {
    let content = RenderedContent::render(segments);
    let selection = RawSelection::new(anchor.resolve(&content)?, focus.resolve(&content)?);
    let anchored = SelectionAnchor::new(config.context_words)
        .try_anchor(&selection, &content)
        .context("selection not anchored")?;
    Ok(AnchorOutcome {
        start_offset: anchored.offsets.start_offset,
        end_offset: anchored.offsets.end_offset,
        snippet: anchored.snippet.to_markup(),
        text: anchored.text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use artview_model::{BoundingBox, RegionKey};
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VIDEO: &str = r#"{
        "id": "video-1",
        "properties": {"title": {"value": "Interview"}},
        "concept": {"displayType": "video"},
        "videoDuration": 10000,
        "videoTranscript": {"entries": [
            {"start": 0, "end": 2000, "text": "A"},
            {"start": 2000, "end": 5000, "text": "B"}
        ]},
        "detectedObjects": [
            {"_rowKey": "row-2", "x1": 80, "y1": 5, "x2": 120, "y2": 50},
            {"graphVertexId": "obj-1", "x1": 10, "y1": 10, "x2": 60, "y2": 60,
             "entityVertex": {"id": "person-9", "properties": {"title": {"value": "Ada"}}}}
        ]
    }"#;

    fn file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn video() -> Artifact {
        load_artifact(file(VIDEO).path()).unwrap()
    }

    #[test]
    fn transcript_by_time_and_frame() {
        let artifact = video();
        assert_eq!(
            transcript(&artifact, TimeSource::playback(2.5)),
            "[0:00:02 - 0:00:05] B"
        );
        assert_eq!(
            transcript(&artifact, TimeSource::frame(1, 10)),
            "[0:00:00 - 0:00:02] A"
        );
        assert_eq!(
            transcript(&artifact, TimeSource::frame(1, 0)),
            "no transcript entry"
        );
    }

    #[test]
    fn regions_sorted_with_titles() {
        let listing = regions(&video());
        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines, vec!["obj-1\t10,10,60,60\tAda", "row-2\t80,5,120,50\t"]);
    }

    #[test]
    fn small_drag_is_discarded() {
        let change = CoordsChange::new(Some(RegionKey::new("obj-1")), BoundingBox::new(10.0, 10.0, 12.0, 40.0));
        let outcome = drag(&video(), &change, &ViewConfig::default());
        assert!(outcome.discarded);
        assert!(outcome.state.is_idle());
    }

    #[test]
    fn drag_over_existing_region_edits_it() {
        let change = CoordsChange::new(Some(RegionKey::new("obj-1")), BoundingBox::new(0.0, 0.0, 40.0, 40.0));
        let outcome = drag(&video(), &change, &ViewConfig::default());
        let editor = outcome.editor.unwrap();
        assert!(editor.existing);
        let json = serde_json::to_value(&outcome.state).unwrap();
        assert_eq!(json["state"], "editingExisting");
    }

    #[test]
    fn anchor_from_segment_file() {
        let path = file(
            r#"[
                {"type": "plain", "text": "Meet "},
                {"type": "entity", "text": "Jane Doe", "start": 5, "end": 13},
                {"type": "plain", "text": " today."}
            ]"#,
        );
        let segments = load_segments(path.path()).unwrap();
        let outcome = anchor(
            &segments,
            parse_boundary("1:0").unwrap(),
            parse_boundary("1:4").unwrap(),
            &ViewConfig::default(),
        )
        .unwrap();
        assert_eq!((outcome.start_offset, outcome.end_offset), (5, 9));
        assert_eq!(outcome.text, "Jane");
    }

    #[test]
    fn reverse_selection_across_entity() {
        let segments = vec![
            TextSegment::plain("Meet "),
            TextSegment::entity("Jane Doe", 5, 13),
            TextSegment::plain(" today."),
        ];
        let outcome = anchor(
            &segments,
            parse_boundary("2:3").unwrap(),
            parse_boundary("0:0").unwrap(),
            &ViewConfig::default(),
        )
        .unwrap();
        assert_eq!((outcome.start_offset, outcome.end_offset), (0, 16));
    }

    #[test]
    fn node_index_out_of_range_fails() {
        let segments = vec![TextSegment::plain("hello world")];
        let err = anchor(
            &segments,
            parse_boundary("0:0").unwrap(),
            parse_boundary("1:2").unwrap(),
            &ViewConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn collapsed_anchor_fails() {
        let segments = vec![TextSegment::plain("hello world")];
        let caret = parse_boundary("0:3").unwrap();
        assert!(anchor(&segments, caret, caret, &ViewConfig::default()).is_err());
    }

    #[test]
    fn boundary_parsing() {
        assert_eq!(parse_boundary("2:7").unwrap(), TextPoint { node: 2, offset: 7 });
        assert!(parse_boundary("27").is_err());
        assert!(parse_boundary("a:1").is_err());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let path = file("min_region_extent = 50.0\n");
        let config = load_config(Some(path.path())).unwrap();
        assert_eq!(config.min_region_extent, 50.0);
        assert_eq!(load_config(None).unwrap(), ViewConfig::default());
    }

    #[test]
    fn missing_artifact_file_reports_path() {
        let err = load_artifact(Path::new("/nonexistent/artifact.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/artifact.json"));
    }
}
