//! Day builder - the single-day scheduling pass
//!
//! One call plans one calendar day: it classifies the day, picks exercises
//! per area/band rules, enforces the weekly intensity budget, avoids
//! same-area overload and exact repeats of yesterday, and tracks the
//! fatigue streaks that force lighter days.

use tracing::debug;

use crate::exercises::{
    Exercise, Intensity, Role, TargetArea, fallback_pool, find_exercise, maintenance_pool,
    multi_benefit_for, multi_benefit_pool, recovery_pool, role_area_candidates, support_pool,
    universal_pool, JAW_RESISTANCE_ID, OVERLOAD_TRIPLES, RECOVERY_EXERCISE_ID,
};

use super::rng::ScoreRng;
use super::rotation::{RotationState, SelectionKey};
use super::scoring::{AreaScore, Band};
use super::{Phase, PlannedExercise, ProgramDay, EXERCISES_PER_DAY};

/// Weekly budget in medium-intensity slots
const MEDIUM_INTENSITY_CAP: u32 = 5;

/// Jaw work may not run more than this many consecutive non-recovery days
const JAW_STREAK_LIMIT: u32 = 2;

/// Per-week scheduling state, reset at every week boundary
#[derive(Debug, Clone, Default)]
pub struct WeekCounters {
    pub high_used: u32,
    pub medium_used: u32,
    pub jaw_heavy_streak_days: u32,
    pub jaw_resistance_streak_days: u32,
    pub had_high_intensity_yesterday: bool,
}

impl WeekCounters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 7th day of each week; the milestone days 21/42/63 fall on those anyway
pub fn is_recovery_day(day_number: u32) -> bool {
    (day_number - 1) % 7 == 6 || matches!(day_number, 21 | 42 | 63)
}

/// Sorted-id fingerprint used for the anti-repeat check
pub fn day_signature(exercises: &[&'static Exercise]) -> String {
    let mut ids: Vec<&str> = exercises.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids.join(",")
}

/// One-day scheduler over the shared per-generation state
pub struct DayBuilder<'a> {
    /// Priority order, weakest area first; computed once per generation
    pub areas: &'a [AreaScore; 4],
    pub counters: &'a mut WeekCounters,
    pub rotation: &'a mut RotationState,
    pub rng: &'a mut ScoreRng,
}

impl DayBuilder<'_> {
    pub fn build_day(&mut self, day_number: u32, prev_signature: Option<&str>) -> ProgramDay {
        let day_of_week = (day_number - 1) % 7;
        let week_number = (day_number - 1) / 7 + 1;
        let phase = Phase::for_day(day_number);
        let recovery = is_recovery_day(day_number);

        let (focus_areas, mut picked) = if recovery {
            let focus = vec![self.areas[0].area, self.areas[1].area];
            (focus, self.recovery_picks())
        } else {
            let focus = self.focus_for(day_of_week);
            let picked = self.working_picks(&focus, phase);
            (focus.iter().map(|a| a.area).collect(), picked)
        };

        self.shuffle(&mut picked);
        picked.truncate(EXERCISES_PER_DAY);

        if let Some(prev) = prev_signature {
            if day_signature(&picked) == prev {
                self.break_repeat(&mut picked);
            }
        }

        self.update_streaks(&picked);
        if !recovery && self.counters.jaw_heavy_streak_days > JAW_STREAK_LIMIT {
            self.shed_jaw_load(&mut picked);
        }

        self.counters.had_high_intensity_yesterday =
            picked.iter().any(|e| e.intensity == Intensity::High);
        self.counters.high_used += count_intensity(&picked, Intensity::High);
        self.counters.medium_used += count_intensity(&picked, Intensity::Medium);

        ProgramDay {
            day_number,
            week_number,
            phase,
            focus_areas,
            is_recovery_day: recovery,
            exercises: picked
                .iter()
                .enumerate()
                .map(|(i, &e)| PlannedExercise {
                    order: i as u32 + 1,
                    exercise: e,
                })
                .collect(),
        }
    }

    /// Recovery days draw everything from the fixed low-load pool. The
    /// overload rule still applies; refills come from the same pool.
    fn recovery_picks(&mut self) -> Vec<&'static Exercise> {
        let pool = recovery_pool();
        let mut picked = Vec::with_capacity(EXERCISES_PER_DAY);
        let mut banned: Vec<&'static str> = Vec::new();
        loop {
            while picked.len() < EXERCISES_PER_DAY {
                let candidates = without(&pool, &picked, &banned);
                match self.rotation.next(SelectionKey::Recovery, &candidates, self.rng) {
                    Some(e) => picked.push(e),
                    None => break,
                }
            }
            if !self.drop_overload(&mut picked, &mut banned) {
                break;
            }
        }
        picked
    }

    /// Day-of-week pattern over the priority order. The weekly shape keeps
    /// the weakest area from being hammered every single day.
    fn focus_for(&self, day_of_week: u32) -> Vec<AreaScore> {
        match day_of_week {
            // Critical areas absorb the whole primary budget alone
            0 | 3 if self.areas[0].band == Band::Critical => vec![self.areas[0]],
            0 | 1 | 3 | 4 => vec![self.areas[0], self.areas[1]],
            _ => vec![self.areas[1], self.areas[2]],
        }
    }

    /// A working day: band-driven mixes, the multi-benefit extra, the
    /// universal/support guarantees, maintenance fill, overload breaking
    /// and weekly capping.
    fn working_picks(&mut self, focus: &[AreaScore], phase: Phase) -> Vec<&'static Exercise> {
        let mut picked: Vec<&'static Exercise> = Vec::with_capacity(EXERCISES_PER_DAY + 2);

        for area in focus {
            self.add_area_mix(&mut picked, area);
        }

        let weak_areas = self.areas.iter().filter(|a| a.raw_score < 65.0).count();
        if weak_areas >= 2 {
            self.add_pick(&mut picked, SelectionKey::MultiBenefit, &multi_benefit_pool());
        }

        // The universal and support guarantees must survive to the final
        // five, so area work can claim at most three slots.
        picked.truncate(EXERCISES_PER_DAY - 2);

        self.ensure_universal(&mut picked);
        self.ensure_support(&mut picked);

        let mut banned: Vec<&'static str> = Vec::new();
        loop {
            self.fill(&mut picked, &banned);
            if !self.drop_overload(&mut picked, &mut banned) {
                break;
            }
        }

        self.enforce_weekly_caps(&mut picked, phase);
        picked
    }

    /// Band decides how much work an area gets and in which roles
    fn add_area_mix(&mut self, picked: &mut Vec<&'static Exercise>, area: &AreaScore) {
        let primary = SelectionKey::RoleArea {
            role: Role::Primary,
            area: area.area,
        };
        let secondary = SelectionKey::RoleArea {
            role: Role::Secondary,
            area: area.area,
        };
        match area.band {
            Band::Critical => {
                self.add_pick(picked, primary, &role_area_candidates(Role::Primary, area.area));
                self.add_pick(picked, secondary, &role_area_candidates(Role::Secondary, area.area));
                self.add_pick(picked, primary, &role_area_candidates(Role::Primary, area.area));
            }
            Band::Needs => {
                self.add_pick(picked, primary, &role_area_candidates(Role::Primary, area.area));
                self.add_pick(picked, secondary, &role_area_candidates(Role::Secondary, area.area));
            }
            Band::Moderate => {
                self.add_pick(picked, primary, &role_area_candidates(Role::Primary, area.area));
            }
            Band::Strong => {
                // Maintain a strong area through multi-benefit work only
                self.add_pick(
                    picked,
                    SelectionKey::MultiBenefitFor(area.area),
                    &multi_benefit_for(area.area),
                );
            }
        }
    }

    /// Rotation pick excluding ids already on the day; an exhausted pool
    /// degrades to a skip, never an error
    fn add_pick(
        &mut self,
        picked: &mut Vec<&'static Exercise>,
        key: SelectionKey,
        pool: &[&'static Exercise],
    ) {
        let candidates = without(pool, picked, &[]);
        if let Some(e) = self.rotation.next(key, &candidates, self.rng) {
            picked.push(e);
        }
    }

    fn ensure_universal(&mut self, picked: &mut Vec<&'static Exercise>) {
        if picked.iter().any(|e| e.role == Role::Universal) {
            return;
        }
        // Load shedding: after a high-intensity day or a long jaw-resistance
        // streak, the universal slot becomes the designated recovery pick
        if self.counters.had_high_intensity_yesterday
            || self.counters.jaw_resistance_streak_days >= 3
        {
            if let Some(e) = find_exercise(RECOVERY_EXERCISE_ID) {
                if !contains(picked, e) {
                    debug!(exercise = e.id, "load shedding: forcing recovery pick");
                    picked.push(e);
                    return;
                }
            }
        }
        self.add_pick(picked, SelectionKey::Universal, &universal_pool());
    }

    fn ensure_support(&mut self, picked: &mut Vec<&'static Exercise>) {
        if picked.iter().any(|e| e.role == Role::Support) {
            return;
        }
        self.add_pick(picked, SelectionKey::Support, &support_pool());
    }

    /// Top the day up to its full count from the maintenance pool
    fn fill(&mut self, picked: &mut Vec<&'static Exercise>, banned: &[&'static str]) {
        while picked.len() < EXERCISES_PER_DAY {
            let candidates = without(&maintenance_pool(), picked, banned);
            match self
                .rotation
                .next(SelectionKey::Maintenance, &candidates, self.rng)
            {
                Some(e) => picked.push(e),
                None => break,
            }
        }
    }

    /// If a known overload triple is fully present, drop its latest-added
    /// member and ban it for the rest of the day so refills cannot restore it
    fn drop_overload(
        &mut self,
        picked: &mut Vec<&'static Exercise>,
        banned: &mut Vec<&'static str>,
    ) -> bool {
        let mut dropped = false;
        for triple in OVERLOAD_TRIPLES {
            let complete = triple.iter().all(|id| picked.iter().any(|e| e.id == *id));
            if !complete {
                continue;
            }
            if let Some(pos) = picked.iter().rposition(|e| triple.contains(&e.id)) {
                debug!(exercise = picked[pos].id, "breaking overload triple");
                banned.push(picked[pos].id);
                picked.remove(pos);
                dropped = true;
            }
        }
        dropped
    }

    /// Walk the day in order, swapping intensity beyond the weekly budget
    /// for a low universal/support fallback
    fn enforce_weekly_caps(&mut self, picked: &mut Vec<&'static Exercise>, phase: Phase) {
        let high_cap = phase.high_intensity_cap();
        let mut high = self.counters.high_used;
        let mut medium = self.counters.medium_used;

        for i in 0..picked.len() {
            match picked[i].intensity {
                Intensity::High => {
                    if high >= high_cap {
                        self.replace_over_cap(picked, i);
                    } else {
                        high += 1;
                    }
                }
                Intensity::Medium => {
                    if medium >= MEDIUM_INTENSITY_CAP {
                        self.replace_over_cap(picked, i);
                    } else {
                        medium += 1;
                    }
                }
                Intensity::Low => {}
            }
        }
    }

    fn replace_over_cap(&mut self, picked: &mut Vec<&'static Exercise>, i: usize) {
        // The capping pass runs after overload breaking, so the replacement
        // itself must not quietly complete a triple
        let candidates: Vec<&'static Exercise> = without(&fallback_pool(), picked, &[])
            .into_iter()
            .filter(|&e| !completes_triple(picked, i, e))
            .collect();
        if let Some(e) = self
            .rotation
            .next(SelectionKey::Maintenance, &candidates, self.rng)
        {
            debug!(from = picked[i].id, to = e.id, "weekly cap replacement");
            picked[i] = e;
        }
    }

    /// Deterministic Fisher-Yates so list position carries no information
    /// about selection order
    fn shuffle(&mut self, picked: &mut [&'static Exercise]) {
        for i in (1..picked.len()).rev() {
            let j = self.rng.pick_index(i + 1);
            picked.swap(i, j);
        }
    }

    /// Swap one universal entry for a different universal exercise; accept
    /// the repeat if the catalog has no alternative
    fn break_repeat(&mut self, picked: &mut [&'static Exercise]) {
        let Some(pos) = picked.iter().position(|e| e.role == Role::Universal) else {
            return;
        };
        let current = picked[pos].id;
        let replacement = universal_pool()
            .into_iter()
            .find(|&e| e.id != current && !contains(picked, e));
        if let Some(e) = replacement {
            debug!(from = current, to = e.id, "breaking exact repeat of yesterday");
            picked[pos] = e;
        }
    }

    fn update_streaks(&mut self, picked: &[&'static Exercise]) {
        if picked.iter().any(|e| e.id == JAW_RESISTANCE_ID) {
            self.counters.jaw_resistance_streak_days += 1;
        } else {
            self.counters.jaw_resistance_streak_days = 0;
        }
        if picked
            .iter()
            .any(|e| e.targets_area_literally(TargetArea::Jawline))
        {
            self.counters.jaw_heavy_streak_days += 1;
        } else {
            self.counters.jaw_heavy_streak_days = 0;
        }
    }

    /// Jaw work cannot run unchecked past the streak limit: the first
    /// high-intensity entry gives way to a universal pick
    fn shed_jaw_load(&mut self, picked: &mut [&'static Exercise]) {
        let Some(pos) = picked.iter().position(|e| e.intensity == Intensity::High) else {
            return;
        };
        let candidates: Vec<&'static Exercise> = universal_pool()
            .into_iter()
            .filter(|&e| !contains(picked, e))
            .collect();
        if let Some(e) = self
            .rotation
            .next(SelectionKey::Universal, &candidates, self.rng)
        {
            debug!(from = picked[pos].id, to = e.id, "jaw streak limit: shedding load");
            picked[pos] = e;
        }
    }
}

fn contains(picked: &[&'static Exercise], e: &Exercise) -> bool {
    picked.iter().any(|p| p.id == e.id)
}

fn without(
    pool: &[&'static Exercise],
    picked: &[&'static Exercise],
    banned: &[&'static str],
) -> Vec<&'static Exercise> {
    pool.iter()
        .copied()
        .filter(|&e| !contains(picked, e) && !banned.contains(&e.id))
        .collect()
}

/// Would placing `candidate` at position `skip` leave a full triple on the day?
fn completes_triple(picked: &[&'static Exercise], skip: usize, candidate: &Exercise) -> bool {
    OVERLOAD_TRIPLES.iter().any(|triple| {
        triple.contains(&candidate.id)
            && triple
                .iter()
                .filter(|&&id| id != candidate.id)
                .all(|&id| {
                    picked
                        .iter()
                        .enumerate()
                        .any(|(j, e)| j != skip && e.id == id)
                })
    })
}

fn count_intensity(picked: &[&'static Exercise], intensity: Intensity) -> u32 {
    picked.iter().filter(|e| e.intensity == intensity).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::rng::ScoreRng;
    use crate::program::scoring::{rank_areas, AreaScore, ScoreVector};

    fn scores() -> ScoreVector {
        // jawline critical, nose needs, cheekbones moderate, eyes strong
        ScoreVector {
            jawline: 30.0,
            cheekbones: 70.0,
            eyes_symmetry: 85.0,
            nose_harmony: 60.0,
            facial_symmetry: 72.0,
            skin_quality: 64.0,
            sexual_dimorphism: 55.0,
        }
    }

    struct Fixture {
        areas: [AreaScore; 4],
        counters: WeekCounters,
        rotation: RotationState,
        rng: ScoreRng,
    }

    impl Fixture {
        fn new(scores: &ScoreVector) -> Self {
            Self {
                areas: rank_areas(scores),
                counters: WeekCounters::default(),
                rotation: RotationState::new(),
                rng: ScoreRng::from_scores(scores),
            }
        }

        fn build(&mut self, day_number: u32, prev: Option<&str>) -> ProgramDay {
            let mut builder = DayBuilder {
                areas: &self.areas,
                counters: &mut self.counters,
                rotation: &mut self.rotation,
                rng: &mut self.rng,
            };
            builder.build_day(day_number, prev)
        }
    }

    #[test]
    fn test_recovery_day_placement() {
        for day in 1..=70 {
            assert_eq!(
                is_recovery_day(day),
                day % 7 == 0,
                "day {day} recovery flag wrong"
            );
        }
        // The milestone days are multiples of 7 already; no extra days appear
        assert!(is_recovery_day(21));
        assert!(is_recovery_day(42));
        assert!(is_recovery_day(63));
    }

    #[test]
    fn test_day_has_five_unique_exercises() {
        let mut fx = Fixture::new(&scores());
        let day = fx.build(1, None);
        assert_eq!(day.exercises.len(), 5);

        let mut ids: Vec<&str> = day.exercises.iter().map(|p| p.exercise.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5, "duplicate exercise within one day");
    }

    #[test]
    fn test_order_index_is_one_based() {
        let mut fx = Fixture::new(&scores());
        let day = fx.build(1, None);
        let orders: Vec<u32> = day.exercises.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_critical_area_owns_day_one() {
        // Worked example: jawline critical on a day-of-week-0 focus day
        let mut fx = Fixture::new(&scores());
        let day = fx.build(1, None);

        assert_eq!(day.focus_areas, vec![TargetArea::Jawline]);

        let jaw_count = day
            .exercises
            .iter()
            .filter(|p| p.exercise.targets_area_literally(TargetArea::Jawline))
            .count();
        assert!(jaw_count >= 2, "critical jawline got only {jaw_count} picks");

        let has_primary = day.exercises.iter().any(|p| {
            p.exercise.role == Role::Primary
                && p.exercise.targets_area_literally(TargetArea::Jawline)
        });
        let has_secondary = day.exercises.iter().any(|p| {
            p.exercise.role == Role::Secondary
                && p.exercise.targets_area_literally(TargetArea::Jawline)
        });
        assert!(has_primary, "no jawline primary on a critical day");
        assert!(has_secondary, "no jawline secondary on a critical day");

        assert!(
            day.exercises.iter().any(|p| p.exercise.role == Role::Universal),
            "no universal entry"
        );
        assert!(
            day.exercises.iter().any(|p| p.exercise.role == Role::Support),
            "no support entry"
        );
    }

    #[test]
    fn test_non_critical_day_spreads_two_areas() {
        let mut balanced = scores();
        balanced.jawline = 55.0; // needs, not critical
        let mut fx = Fixture::new(&balanced);
        let day = fx.build(1, None);
        assert_eq!(day.focus_areas.len(), 2);
    }

    #[test]
    fn test_midweek_day_skips_weakest_area_focus() {
        let mut fx = Fixture::new(&scores());
        let day = fx.build(3, None); // day-of-week 2: second + third weakest
        assert!(!day.focus_areas.contains(&TargetArea::Jawline));
    }

    #[test]
    fn test_recovery_day_is_all_low_intensity() {
        let mut fx = Fixture::new(&scores());
        let day = fx.build(7, None);
        assert!(day.is_recovery_day);
        assert_eq!(day.exercises.len(), 5);
        for p in &day.exercises {
            assert_eq!(p.exercise.intensity, Intensity::Low, "{}", p.exercise.id);
        }
        // Recovery focuses on the two weakest areas
        assert_eq!(day.focus_areas, vec![TargetArea::Jawline, TargetArea::Nose]);
    }

    #[test]
    fn test_working_day_has_universal_or_support() {
        let mut fx = Fixture::new(&scores());
        for day_number in 1..=6 {
            let day = fx.build(day_number, None);
            assert!(
                day.exercises
                    .iter()
                    .any(|p| matches!(p.exercise.role, Role::Universal | Role::Support)),
                "day {day_number} lacks a universal/support entry"
            );
        }
    }

    #[test]
    fn test_load_shedding_after_high_intensity_day() {
        let mut fx = Fixture::new(&scores());
        fx.counters.had_high_intensity_yesterday = true;
        let day = fx.build(2, None);
        assert!(
            day.exercises
                .iter()
                .any(|p| p.exercise.id == RECOVERY_EXERCISE_ID),
            "high-intensity yesterday must force the recovery pick"
        );
    }

    #[test]
    fn test_overload_triples_never_complete() {
        let mut fx = Fixture::new(&scores());
        let mut prev: Option<String> = None;
        for day_number in 1..=70 {
            if (day_number - 1) % 7 == 0 {
                fx.counters.reset();
            }
            let day = fx.build(day_number, prev.as_deref());
            for triple in OVERLOAD_TRIPLES {
                let complete = triple
                    .iter()
                    .all(|id| day.exercises.iter().any(|p| p.exercise.id == *id));
                assert!(
                    !complete,
                    "day {day_number} carries a full overload triple {triple:?}"
                );
            }
            prev = Some(day.signature());
        }
    }

    #[test]
    fn test_signature_is_order_independent() {
        let a = find_exercise("lymph_sweep").unwrap();
        let b = find_exercise("scalp_release").unwrap();
        assert_eq!(day_signature(&[a, b]), day_signature(&[b, a]));
    }
}
