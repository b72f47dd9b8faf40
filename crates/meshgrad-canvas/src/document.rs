//! JSON documents: the point list plus canvas settings.

use std::collections::HashSet;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, Result};
use crate::pipeline::RenderSettings;
use crate::point::{Point, PointId};
use crate::stops::StopList;

pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub version: u32,
    pub points: Vec<Point>,
    #[serde(default)]
    pub settings: RenderSettings,
}

impl Document {
    pub fn new(points: Vec<Point>, settings: RenderSettings) -> Self {
        Self { version: DOCUMENT_VERSION, points, settings }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and normalizes a document.
    ///
    /// Values are clamped into range and duplicate point ids are reassigned.
    /// A gradient point with fewer than two stops is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut doc: Document = serde_json::from_str(json)?;
        if doc.version > DOCUMENT_VERSION {
            return Err(serde_json::Error::custom(format!(
                "document version {} is newer than supported version {DOCUMENT_VERSION}",
                doc.version
            ))
            .into());
        }
        doc.normalize()?;
        Ok(doc)
    }

    fn normalize(&mut self) -> Result<()> {
        let mut next = self.points.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        let mut seen = HashSet::new();
        for point in &mut self.points {
            point.clamp();
            point.gradient_stops = StopList::new(point.gradient_stops.as_slice().iter().copied());
            if !point.has_valid_stops() {
                log::warn!("point {} has {} stops", point.id.0, point.gradient_stops.len());
                return Err(CanvasError::DegenerateGradient);
            }
            if !seen.insert(point.id) {
                log::debug!("reassigning duplicate point id {}", point.id.0);
                point.id = PointId(next);
                seen.insert(point.id);
                next += 1;
            }
        }
        self.version = DOCUMENT_VERSION;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{sample_point, GradientType};
    use crate::stops::{GradientStop, StopId};
    use meshgrad_engine::paint::Rgb;

    fn doc(points: Vec<Point>) -> Document {
        Document::new(points, RenderSettings::default())
    }

    // ── round trip ────────────────────────────────────────────────────────

    #[test]
    fn json_round_trip() {
        let original = doc(vec![sample_point(1, 10.0, 20.0), sample_point(2, -5.0, 0.5)]);
        let back = Document::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn json_uses_camel_case_and_hex_colors() {
        let json = doc(vec![sample_point(1, 0.0, 0.0)]).to_json().unwrap();
        assert!(json.contains("\"gradientStops\""));
        assert!(json.contains("\"#3b82f6\""));
    }

    // ── normalization ─────────────────────────────────────────────────────

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut p = sample_point(1, 0.0, 0.0);
        p.radius = 3.0;
        p.opacity = 7.0;
        let json = doc(vec![p]).to_json().unwrap();
        let back = Document::from_json(&json).unwrap();
        assert_eq!(back.points[0].radius, 20.0);
        assert_eq!(back.points[0].opacity, 1.0);
    }

    #[test]
    fn duplicate_ids_are_reassigned() {
        let json = doc(vec![sample_point(4, 0.0, 0.0), sample_point(4, 1.0, 0.0)]).to_json().unwrap();
        let back = Document::from_json(&json).unwrap();
        assert_eq!(back.points[0].id, PointId(4));
        assert_eq!(back.points[1].id, PointId(5));
    }

    #[test]
    fn gradient_with_one_stop_is_rejected() {
        let mut p = sample_point(1, 0.0, 0.0);
        p.gradient_type = GradientType::Radial;
        p.gradient_stops = StopList::new([GradientStop::new(StopId(1), Rgb::new(0, 0, 0), 0.0)]);
        let json = doc(vec![p]).to_json().unwrap();
        assert!(matches!(Document::from_json(&json), Err(CanvasError::DegenerateGradient)));
    }

    #[test]
    fn stop_positions_are_clamped_on_load() {
        let mut p = sample_point(1, 0.0, 0.0);
        let json = {
            p.gradient_type = GradientType::Linear;
            doc(vec![p]).to_json().unwrap().replace("\"position\": 100.0", "\"position\": 250.0")
        };
        assert!(json.contains("250.0"));
        let back = Document::from_json(&json).unwrap();
        assert_eq!(back.points[0].gradient_stops.as_slice()[1].position, 100.0);
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn malformed_and_future_documents_fail() {
        assert!(matches!(Document::from_json("{"), Err(CanvasError::Document(_))));
        let future = doc(vec![]).to_json().unwrap().replace("\"version\": 1", "\"version\": 9");
        assert!(matches!(Document::from_json(&future), Err(CanvasError::Document(_))));
    }

    #[test]
    fn settings_default_when_missing() {
        let back = Document::from_json(r#"{"version":1,"points":[]}"#).unwrap();
        assert_eq!(back.settings, RenderSettings::default());
    }
}
