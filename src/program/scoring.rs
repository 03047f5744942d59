//! Area scoring and banding - turns the seven facial metrics into a
//! weakest-first priority order over the four target areas

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exercises::TargetArea;

/// The seven facial metrics as scored upstream, each on a 0-100 scale.
/// Callers clamp before handing them over; `validate` still rejects
/// anything out of range rather than generating a malformed program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub jawline: f64,
    pub cheekbones: f64,
    pub eyes_symmetry: f64,
    pub nose_harmony: f64,
    pub facial_symmetry: f64,
    pub skin_quality: f64,
    pub sexual_dimorphism: f64,
}

#[derive(Debug, Error, PartialEq)]
#[error("metric {metric} out of range: {value} (expected 0-100)")]
pub struct ScoreError {
    pub metric: &'static str,
    pub value: f64,
}

impl ScoreVector {
    /// All metrics with their wire names, in declaration order
    pub fn metrics(&self) -> [(&'static str, f64); 7] {
        [
            ("jawline", self.jawline),
            ("cheekbones", self.cheekbones),
            ("eyes_symmetry", self.eyes_symmetry),
            ("nose_harmony", self.nose_harmony),
            ("facial_symmetry", self.facial_symmetry),
            ("skin_quality", self.skin_quality),
            ("sexual_dimorphism", self.sexual_dimorphism),
        ]
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        for (metric, value) in self.metrics() {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ScoreError { metric, value });
            }
        }
        Ok(())
    }

    /// Score backing a target area. The three remaining metrics
    /// (symmetry, skin, dimorphism) influence seeding only, not targeting.
    pub fn area_score(&self, area: TargetArea) -> f64 {
        match area {
            TargetArea::Jawline => self.jawline,
            TargetArea::Cheekbones => self.cheekbones,
            TargetArea::Eyes => self.eyes_symmetry,
            TargetArea::Nose => self.nose_harmony,
        }
    }
}

/// Severity band driving how much work an area receives per day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Band {
    Critical,
    Needs,
    Moderate,
    Strong,
}

impl Band {
    pub fn from_score(score: f64) -> Self {
        if score < 50.0 {
            Band::Critical
        } else if score < 65.0 {
            Band::Needs
        } else if score < 80.0 {
            Band::Moderate
        } else {
            Band::Strong
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Critical => "critical",
            Band::Needs => "needs",
            Band::Moderate => "moderate",
            Band::Strong => "strong",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AreaScore {
    pub area: TargetArea,
    pub raw_score: f64,
    pub band: Band,
}

/// Rank the four areas weakest-first. Ties keep the fixed precedence
/// jawline, cheekbones, eyes, nose, so the order is fully deterministic.
pub fn rank_areas(scores: &ScoreVector) -> [AreaScore; 4] {
    let mut ranked: Vec<AreaScore> = TargetArea::all()
        .iter()
        .map(|area| {
            let raw = scores.area_score(*area);
            AreaScore {
                area: *area,
                raw_score: raw,
                band: Band::from_score(raw),
            }
        })
        .collect();

    // Stable sort preserves the precedence order of TargetArea::all() on ties
    ranked.sort_by(|a, b| {
        a.raw_score
            .partial_cmp(&b.raw_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    [ranked[0], ranked[1], ranked[2], ranked[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(jaw: f64, cheeks: f64, eyes: f64, nose: f64) -> ScoreVector {
        ScoreVector {
            jawline: jaw,
            cheekbones: cheeks,
            eyes_symmetry: eyes,
            nose_harmony: nose,
            facial_symmetry: 70.0,
            skin_quality: 70.0,
            sexual_dimorphism: 70.0,
        }
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(Band::from_score(0.0), Band::Critical);
        assert_eq!(Band::from_score(49.9), Band::Critical);
        assert_eq!(Band::from_score(50.0), Band::Needs);
        assert_eq!(Band::from_score(64.9), Band::Needs);
        assert_eq!(Band::from_score(65.0), Band::Moderate);
        assert_eq!(Band::from_score(79.9), Band::Moderate);
        assert_eq!(Band::from_score(80.0), Band::Strong);
        assert_eq!(Band::from_score(100.0), Band::Strong);
    }

    #[test]
    fn test_rank_weakest_first() {
        // jawline critical, cheekbones moderate, eyes strong, nose needs
        let ranked = rank_areas(&scores(30.0, 70.0, 85.0, 60.0));
        let order: Vec<TargetArea> = ranked.iter().map(|a| a.area).collect();
        assert_eq!(
            order,
            vec![
                TargetArea::Jawline,
                TargetArea::Nose,
                TargetArea::Cheekbones,
                TargetArea::Eyes
            ]
        );
        assert_eq!(ranked[0].band, Band::Critical);
        assert_eq!(ranked[1].band, Band::Needs);
        assert_eq!(ranked[2].band, Band::Moderate);
        assert_eq!(ranked[3].band, Band::Strong);
    }

    #[test]
    fn test_rank_tie_break_uses_precedence() {
        let ranked = rank_areas(&scores(60.0, 60.0, 60.0, 60.0));
        let order: Vec<TargetArea> = ranked.iter().map(|a| a.area).collect();
        assert_eq!(order, TargetArea::all().to_vec());
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(scores(0.0, 100.0, 50.0, 50.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = scores(101.0, 50.0, 50.0, 50.0).validate().unwrap_err();
        assert_eq!(err.metric, "jawline");

        let err = scores(50.0, -0.1, 50.0, 50.0).validate().unwrap_err();
        assert_eq!(err.metric, "cheekbones");
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(scores(50.0, 50.0, f64::NAN, 50.0).validate().is_err());
    }
}
