//! Exercise definitions - the compiled-in facial exercise catalog

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Facial target areas for focus rotation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetArea {
    Jawline,
    Cheekbones,
    Eyes,
    Nose,
}

impl TargetArea {
    pub fn label(&self) -> &'static str {
        match self {
            TargetArea::Jawline => "jawline",
            TargetArea::Cheekbones => "cheekbones",
            TargetArea::Eyes => "eyes",
            TargetArea::Nose => "nose",
        }
    }

    /// All areas in tie-break precedence order
    pub fn all() -> &'static [TargetArea] {
        &[
            TargetArea::Jawline,
            TargetArea::Cheekbones,
            TargetArea::Eyes,
            TargetArea::Nose,
        ]
    }
}

/// What an exercise works on: one named area, or everything at once
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Target {
    Area(TargetArea),
    AllAreas,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,   // Main sculpting work for one area
    Secondary, // Lighter complement to a primary
    Support,   // Neck, posture, circulation
    Universal, // Whole-face work, also the filler and load-shedding fallback
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Support => "support",
            Role::Universal => "universal",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub role: Role,
    pub intensity: Intensity,
    pub targets: &'static [Target],
    pub protocol: &'static str,
}

impl Exercise {
    /// True if this exercise works the given area (all-areas entries count)
    pub fn targets_area(&self, area: TargetArea) -> bool {
        self.targets
            .iter()
            .any(|t| matches!(t, Target::AllAreas) || *t == Target::Area(area))
    }

    /// True only for an explicit named target, not the all-areas sentinel
    pub fn targets_area_literally(&self, area: TargetArea) -> bool {
        self.targets.iter().any(|t| *t == Target::Area(area))
    }

    fn literal_area_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t, Target::Area(_)))
            .count()
    }

    /// Multi-benefit = works two or more named areas in one movement
    pub fn is_multi_benefit(&self) -> bool {
        self.literal_area_count() >= 2
    }
}

/// The low-intensity universal pick forced by the load-shedding rule
pub const RECOVERY_EXERCISE_ID: &str = "full_face_release";

/// The one exercise whose presence drives the jaw-resistance streak
pub const JAW_RESISTANCE_ID: &str = "jaw_resistance_press";

/// Combinations that must never all land on the same day
pub const OVERLOAD_TRIPLES: &[[&str; 3]] = &[
    // Jaw-focused heavy work
    ["jaw_resistance_press", "chin_lift_hold", "cheek_jaw_sculpt"],
    // Cheek-focused heavy work
    ["cheek_lift_press", "fish_face_sculpt", "cheek_jaw_sculpt"],
    // Neck/support stack
    ["neck_posture_reset", "scalp_release", "shoulder_drop_stretch"],
];

pub const CATALOG: &[Exercise] = &[
    // === JAWLINE ===
    Exercise {
        id: "jaw_resistance_press",
        name: "jaw resistance press",
        role: Role::Primary,
        intensity: Intensity::High,
        targets: &[Target::Area(TargetArea::Jawline)],
        protocol: "Fist under chin, open the jaw against steady resistance. 3 sets of 10 slow reps, 3 second hold at peak tension",
    },
    Exercise {
        id: "chin_lift_hold",
        name: "chin lift hold",
        role: Role::Primary,
        intensity: Intensity::Medium,
        targets: &[Target::Area(TargetArea::Jawline)],
        protocol: "Tilt the head back, push the lower jaw forward and hold 10 seconds. 3 sets of 8 holds",
    },
    Exercise {
        id: "neck_curl_up",
        name: "neck curl-up",
        role: Role::Secondary,
        intensity: Intensity::Medium,
        targets: &[Target::Area(TargetArea::Jawline)],
        protocol: "Lying down, tongue on the roof of the mouth, curl chin to chest. 2 sets of 12 reps",
    },
    Exercise {
        id: "jaw_unclench_cycle",
        name: "jaw unclench cycle",
        role: Role::Secondary,
        intensity: Intensity::Low,
        targets: &[Target::Area(TargetArea::Jawline)],
        protocol: "Clench lightly for 5 seconds, release completely for 10. 10 cycles, ending relaxed",
    },
    // === CHEEKBONES ===
    Exercise {
        id: "cheek_lift_press",
        name: "cheek lift press",
        role: Role::Primary,
        intensity: Intensity::Medium,
        targets: &[Target::Area(TargetArea::Cheekbones)],
        protocol: "Fingertips on cheekbones, smile upward against light fingertip pressure. 3 sets of 15 reps",
    },
    Exercise {
        id: "fish_face_sculpt",
        name: "fish face sculpt",
        role: Role::Primary,
        intensity: Intensity::High,
        targets: &[Target::Area(TargetArea::Cheekbones)],
        protocol: "Suck the cheeks in hard, then attempt to smile against the suction. 3 sets of 10, 5 second holds",
    },
    Exercise {
        id: "cheek_puff_roll",
        name: "cheek puff roll",
        role: Role::Secondary,
        intensity: Intensity::Low,
        targets: &[Target::Area(TargetArea::Cheekbones)],
        protocol: "Puff air into one cheek, roll it to the other side and back. 2 sets of 20 passes",
    },
    Exercise {
        id: "smile_resistance",
        name: "smile resistance",
        role: Role::Secondary,
        intensity: Intensity::Medium,
        targets: &[Target::Area(TargetArea::Cheekbones)],
        protocol: "Fingers at the mouth corners resisting, smile as wide as possible. 2 sets of 12 reps",
    },
    // === EYES ===
    Exercise {
        id: "eye_squeeze_release",
        name: "eye squeeze and release",
        role: Role::Primary,
        intensity: Intensity::Medium,
        targets: &[Target::Area(TargetArea::Eyes)],
        protocol: "Squeeze the eyes shut for 3 seconds, open wide for 3. 3 sets of 10 cycles",
    },
    Exercise {
        id: "brow_lift_resistance",
        name: "brow lift resistance",
        role: Role::Primary,
        intensity: Intensity::Medium,
        targets: &[Target::Area(TargetArea::Eyes)],
        protocol: "Index fingers above the brows pressing down, raise the eyebrows against them. 3 sets of 12 reps",
    },
    Exercise {
        id: "temple_circle_massage",
        name: "temple circle massage",
        role: Role::Secondary,
        intensity: Intensity::Low,
        targets: &[Target::Area(TargetArea::Eyes)],
        protocol: "Slow circular pressure at the temples, 30 seconds each direction. 3 rounds",
    },
    Exercise {
        id: "focus_shift_drill",
        name: "focus shift drill",
        role: Role::Secondary,
        intensity: Intensity::Low,
        targets: &[Target::Area(TargetArea::Eyes)],
        protocol: "Alternate focus between a near point and a far point every 3 seconds. 2 sets of 20 shifts",
    },
    // === NOSE ===
    Exercise {
        id: "nose_shaper_press",
        name: "nose shaper press",
        role: Role::Primary,
        intensity: Intensity::Medium,
        targets: &[Target::Area(TargetArea::Nose)],
        protocol: "Index fingers along the nose sides, flare the nostrils against gentle pressure. 3 sets of 10 reps",
    },
    Exercise {
        id: "nostril_flare_control",
        name: "nostril flare control",
        role: Role::Primary,
        intensity: Intensity::Low,
        targets: &[Target::Area(TargetArea::Nose)],
        protocol: "Flare and narrow the nostrils slowly without moving the rest of the face. 2 sets of 15 cycles",
    },
    Exercise {
        id: "nose_bridge_pinch",
        name: "nose bridge pinch",
        role: Role::Secondary,
        intensity: Intensity::Low,
        targets: &[Target::Area(TargetArea::Nose)],
        protocol: "Light pinch-and-release down the bridge, nostrils to brow. 2 sets of 12 passes",
    },
    // === MULTI-BENEFIT ===
    Exercise {
        id: "tongue_posture_hold",
        name: "tongue posture hold",
        role: Role::Primary,
        intensity: Intensity::Medium,
        targets: &[
            Target::Area(TargetArea::Jawline),
            Target::Area(TargetArea::Cheekbones),
        ],
        protocol: "Whole tongue flat against the palate, lips closed, teeth apart. Hold 60 seconds, 5 rounds",
    },
    Exercise {
        id: "cheek_jaw_sculpt",
        name: "cheek and jaw sculpt",
        role: Role::Secondary,
        intensity: Intensity::High,
        targets: &[
            Target::Area(TargetArea::Jawline),
            Target::Area(TargetArea::Cheekbones),
        ],
        protocol: "Exaggerated vowel shapes (O-E-U) under full muscle tension. 3 sets of 10 slow cycles",
    },
    Exercise {
        id: "midface_lift",
        name: "midface lift",
        role: Role::Secondary,
        intensity: Intensity::Medium,
        targets: &[
            Target::Area(TargetArea::Cheekbones),
            Target::Area(TargetArea::Eyes),
            Target::Area(TargetArea::Nose),
        ],
        protocol: "Lift the midface with the upper lip curled over the teeth, eyes wide. 2 sets of 10, 5 second holds",
    },
    Exercise {
        id: "profile_alignment_hold",
        name: "profile alignment hold",
        role: Role::Secondary,
        intensity: Intensity::Medium,
        targets: &[
            Target::Area(TargetArea::Jawline),
            Target::Area(TargetArea::Nose),
        ],
        protocol: "Chin tucked, crown tall, breathe through the nose only. Hold 45 seconds, 4 rounds",
    },
    // === UNIVERSAL ===
    Exercise {
        id: "full_face_release",
        name: "full face release massage",
        role: Role::Universal,
        intensity: Intensity::Low,
        targets: &[Target::AllAreas],
        protocol: "Slow upward strokes from chin to hairline with light oil. 3 minutes total",
    },
    Exercise {
        id: "lymph_sweep",
        name: "lymphatic sweep",
        role: Role::Universal,
        intensity: Intensity::Low,
        targets: &[Target::AllAreas],
        protocol: "Feather-light strokes from the face center outward, then down the neck. 2 minutes",
    },
    Exercise {
        id: "warm_palm_compress",
        name: "warm palm compress",
        role: Role::Universal,
        intensity: Intensity::Low,
        targets: &[Target::AllAreas],
        protocol: "Rub the palms warm, cup them over the face and breathe slowly. 5 rounds of 30 seconds",
    },
    Exercise {
        id: "breath_and_soften",
        name: "breath and soften",
        role: Role::Universal,
        intensity: Intensity::Low,
        targets: &[Target::AllAreas],
        protocol: "Nasal inhale 4 counts, exhale 8, releasing all facial tension on the exhale. 10 breaths",
    },
    // === SUPPORT ===
    Exercise {
        id: "neck_posture_reset",
        name: "neck posture reset",
        role: Role::Support,
        intensity: Intensity::Low,
        targets: &[Target::AllAreas],
        protocol: "Chin tucks against a wall, shoulder blades down. 2 sets of 10, 3 second holds",
    },
    Exercise {
        id: "scalp_release",
        name: "scalp release",
        role: Role::Support,
        intensity: Intensity::Low,
        targets: &[Target::AllAreas],
        protocol: "Fingertip circles across the whole scalp, front to back. 2 minutes",
    },
    Exercise {
        id: "shoulder_drop_stretch",
        name: "shoulder drop stretch",
        role: Role::Support,
        intensity: Intensity::Low,
        targets: &[Target::AllAreas],
        protocol: "Ear toward shoulder, opposite arm reaching down. 30 seconds per side, 2 rounds",
    },
    Exercise {
        id: "chewing_endurance",
        name: "chewing endurance",
        role: Role::Support,
        intensity: Intensity::Medium,
        targets: &[Target::Area(TargetArea::Jawline)],
        protocol: "Even bilateral chewing on a firm gum substitute. 2 rounds of 3 minutes",
    },
];

pub fn all_exercises() -> &'static [Exercise] {
    CATALOG
}

pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    CATALOG.iter().find(|e| e.id == id)
}

/// Candidates for a (role, area) selection context, in catalog order
pub fn role_area_candidates(role: Role, area: TargetArea) -> Vec<&'static Exercise> {
    CATALOG
        .iter()
        .filter(|e| e.role == role && e.targets_area_literally(area))
        .collect()
}

pub fn multi_benefit_pool() -> Vec<&'static Exercise> {
    CATALOG.iter().filter(|e| e.is_multi_benefit()).collect()
}

pub fn multi_benefit_for(area: TargetArea) -> Vec<&'static Exercise> {
    CATALOG
        .iter()
        .filter(|e| e.is_multi_benefit() && e.targets_area_literally(area))
        .collect()
}

pub fn universal_pool() -> Vec<&'static Exercise> {
    CATALOG.iter().filter(|e| e.role == Role::Universal).collect()
}

pub fn support_pool() -> Vec<&'static Exercise> {
    CATALOG.iter().filter(|e| e.role == Role::Support).collect()
}

/// Low-load pool recovery days draw from
pub fn recovery_pool() -> Vec<&'static Exercise> {
    CATALOG
        .iter()
        .filter(|e| e.intensity == Intensity::Low)
        .collect()
}

/// Replacement pool for intensity capping; low only, so a swap never breaks a cap
pub fn fallback_pool() -> Vec<&'static Exercise> {
    CATALOG
        .iter()
        .filter(|e| {
            e.intensity == Intensity::Low && matches!(e.role, Role::Universal | Role::Support)
        })
        .collect()
}

/// Filler pool for topping a day up to its full exercise count
pub fn maintenance_pool() -> Vec<&'static Exercise> {
    CATALOG
        .iter()
        .filter(|e| matches!(e.role, Role::Universal | Role::Support | Role::Secondary))
        .collect()
}

/// The catalog is broken in a way generation cannot work around
#[derive(Debug, Error)]
#[error("catalog misconfiguration: {0}")]
pub struct CatalogError(pub String);

/// Startup-time invariant check. A failure here is a deployment defect,
/// not a per-request condition.
pub fn validate_catalog() -> Result<(), CatalogError> {
    for (i, e) in CATALOG.iter().enumerate() {
        if e.targets.is_empty() {
            return Err(CatalogError(format!("exercise {} has no targets", e.id)));
        }
        if e.targets.contains(&Target::AllAreas) && e.targets.len() > 1 {
            return Err(CatalogError(format!(
                "exercise {} mixes all-areas with literal areas",
                e.id
            )));
        }
        if CATALOG[..i].iter().any(|other| other.id == e.id) {
            return Err(CatalogError(format!("duplicate exercise id {}", e.id)));
        }
    }

    for area in TargetArea::all() {
        if role_area_candidates(Role::Primary, *area).len() < 2 {
            return Err(CatalogError(format!(
                "area {} needs at least two primary exercises",
                area.label()
            )));
        }
        if role_area_candidates(Role::Secondary, *area).is_empty() {
            return Err(CatalogError(format!(
                "area {} has no secondary exercise",
                area.label()
            )));
        }
        if multi_benefit_for(*area).is_empty() {
            return Err(CatalogError(format!(
                "area {} has no multi-benefit exercise",
                area.label()
            )));
        }
    }

    if universal_pool().len() < 2 {
        return Err(CatalogError(
            "need at least two universal exercises for anti-repeat swaps".into(),
        ));
    }
    if support_pool().len() < 2 {
        return Err(CatalogError("need at least two support exercises".into()));
    }
    if recovery_pool().len() < 5 {
        return Err(CatalogError(
            "recovery pool cannot fill a five-exercise day".into(),
        ));
    }
    if fallback_pool().len() < 3 {
        return Err(CatalogError(
            "not enough low-intensity universal/support fallbacks".into(),
        ));
    }
    if maintenance_pool().len() < 8 {
        return Err(CatalogError("maintenance pool too small".into()));
    }

    match find_exercise(RECOVERY_EXERCISE_ID) {
        Some(e) if e.role == Role::Universal && e.intensity == Intensity::Low => {}
        Some(_) => {
            return Err(CatalogError(
                "designated recovery exercise must be low-intensity universal".into(),
            ));
        }
        None => {
            return Err(CatalogError("designated recovery exercise missing".into()));
        }
    }
    if find_exercise(JAW_RESISTANCE_ID).is_none() {
        return Err(CatalogError("jaw-resistance exercise missing".into()));
    }

    for triple in OVERLOAD_TRIPLES {
        for &id in triple {
            if find_exercise(id).is_none() {
                return Err(CatalogError(format!(
                    "overload triple references unknown id {id}"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_valid() {
        validate_catalog().expect("compiled-in catalog must pass validation");
    }

    #[test]
    fn test_find_exercise() {
        let ex = find_exercise("jaw_resistance_press").unwrap();
        assert_eq!(ex.name, "jaw resistance press");
        assert_eq!(ex.role, Role::Primary);
        assert!(find_exercise("does_not_exist").is_none());
    }

    #[test]
    fn test_all_areas_counts_as_target() {
        let ex = find_exercise("full_face_release").unwrap();
        for area in TargetArea::all() {
            assert!(ex.targets_area(*area));
            assert!(!ex.targets_area_literally(*area));
        }
    }

    #[test]
    fn test_multi_benefit_detection() {
        assert!(find_exercise("cheek_jaw_sculpt").unwrap().is_multi_benefit());
        assert!(find_exercise("midface_lift").unwrap().is_multi_benefit());
        // Single-area and all-areas entries are not multi-benefit
        assert!(!find_exercise("chin_lift_hold").unwrap().is_multi_benefit());
        assert!(!find_exercise("lymph_sweep").unwrap().is_multi_benefit());
    }

    #[test]
    fn test_every_area_has_two_primaries() {
        for area in TargetArea::all() {
            let primaries = role_area_candidates(Role::Primary, *area);
            assert!(
                primaries.len() >= 2,
                "area {} has only {} primaries",
                area.label(),
                primaries.len()
            );
        }
    }

    #[test]
    fn test_universal_pool_is_all_low_intensity() {
        // The anti-repeat swap and capping fallback rely on this
        for ex in universal_pool() {
            assert_eq!(ex.intensity, Intensity::Low, "{} is not low", ex.id);
        }
    }

    #[test]
    fn test_recovery_pool_is_low_only() {
        for ex in recovery_pool() {
            assert_eq!(ex.intensity, Intensity::Low);
        }
        assert!(recovery_pool().len() >= 5);
    }

    #[test]
    fn test_overload_triples_resolve() {
        for triple in OVERLOAD_TRIPLES {
            for &id in triple {
                assert!(find_exercise(id).is_some(), "unknown id {id}");
            }
        }
    }
}
