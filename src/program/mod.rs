//! Program generation - 70-day facial exercise plans
//!
//! Features:
//! - Area scoring and severity banding over the seven facial metrics
//! - Deterministic selection: same scores always produce the same plan
//! - Weekly intensity budgets, overload avoidance and fatigue tracking

pub mod day_builder;
pub mod rng;
pub mod rotation;
pub mod scoring;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::exercises::{CatalogError, Exercise, TargetArea, validate_catalog};

use day_builder::{DayBuilder, WeekCounters};
use rng::ScoreRng;
use rotation::RotationState;
use scoring::{ScoreError, ScoreVector, rank_areas};

pub const PROGRAM_DAYS: u32 = 70;
pub const EXERCISES_PER_DAY: usize = 5;
pub const PROGRAM_VERSION: &str = "1.0";

/// Coarse progression stage; drives the weekly high-intensity budget
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Phase {
    Foundation,
    Development,
    Peak,
}

impl Phase {
    pub fn for_day(day_number: u32) -> Self {
        match day_number {
            1..=21 => Phase::Foundation,
            22..=49 => Phase::Development,
            _ => Phase::Peak,
        }
    }

    pub fn high_intensity_cap(&self) -> u32 {
        match self {
            Phase::Foundation => 2,
            Phase::Development | Phase::Peak => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Foundation => "foundation",
            Phase::Development => "development",
            Phase::Peak => "peak",
        }
    }
}

/// One slot of a day's plan, 1-based order included
#[derive(Debug, Clone, Serialize)]
pub struct PlannedExercise {
    pub order: u32,
    pub exercise: &'static Exercise,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgramDay {
    pub day_number: u32,
    pub week_number: u32,
    pub phase: Phase,
    pub focus_areas: Vec<TargetArea>,
    pub is_recovery_day: bool,
    pub exercises: Vec<PlannedExercise>,
}

impl ProgramDay {
    /// Sorted-id fingerprint; equal fingerprints mean the same exercise set
    pub fn signature(&self) -> String {
        let mut ids: Vec<&str> = self.exercises.iter().map(|p| p.exercise.id).collect();
        ids.sort_unstable();
        ids.join(",")
    }
}

/// A fully generated plan. Immutable once built; regenerating always
/// yields a brand-new value with a fresh id.
#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub program_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub version: &'static str,
    pub scores_snapshot: ScoreVector,
    pub day_count: u32,
    pub exercise_count: u32,
    pub days: Vec<ProgramDay>,
}

/// Bad input is the caller's to fix; a broken catalog is a deployment
/// defect. The two must stay distinguishable at the service boundary.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("invalid input: {0}")]
    InvalidScore(#[from] ScoreError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Generate the full 70-day program for one score vector.
///
/// Pure apart from the id and timestamp stamped on the result: the `days`
/// array depends only on the scores and the compiled-in catalog.
pub fn generate_program(scores: &ScoreVector) -> Result<Program, ProgramError> {
    scores.validate()?;
    validate_catalog()?;

    let areas = rank_areas(scores);
    let mut rng = ScoreRng::from_scores(scores);
    let mut rotation = RotationState::new();
    let mut counters = WeekCounters::default();

    let mut days = Vec::with_capacity(PROGRAM_DAYS as usize);
    let mut prev_signature: Option<String> = None;

    for day_number in 1..=PROGRAM_DAYS {
        if (day_number - 1) % 7 == 0 {
            counters.reset();
        }
        let mut builder = DayBuilder {
            areas: &areas,
            counters: &mut counters,
            rotation: &mut rotation,
            rng: &mut rng,
        };
        let day = builder.build_day(day_number, prev_signature.as_deref());
        prev_signature = Some(day.signature());
        days.push(day);
    }

    let program = Program {
        program_id: Uuid::new_v4(),
        created_at: Utc::now(),
        version: PROGRAM_VERSION,
        scores_snapshot: scores.clone(),
        day_count: PROGRAM_DAYS,
        exercise_count: EXERCISES_PER_DAY as u32,
        days,
    };

    info!(
        program_id = %program.program_id,
        weakest_area = areas[0].area.label(),
        "generated {}-day program",
        PROGRAM_DAYS
    );
    Ok(program)
}
