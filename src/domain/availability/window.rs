//! AvailabilityWindow entity.
//!
//! A window is a recurring weekly rule ("Mondays 09:00-12:00 in
//! America/Sao_Paulo"), not a reserved slot. Windows belong to exactly one
//! mentor. Overlapping windows on the same day are legal; they are only
//! reconciled when a booking instant is matched against them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AvailabilityId, MentorId, Timestamp, ValidationError};

use super::time_of_day::TimeOfDay;
use super::validation::{validate_window_order, AvailabilityPatch, ValidWindow};
use super::weekday::IsoWeekday;
use super::zone::CivilZone;

/// Recurring weekly availability of a mentor.
///
/// # Invariants
///
/// - `end_time` is strictly after `start_time` (no overnight wraparound)
/// - `mentor_id` never changes after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    id: AvailabilityId,
    mentor_id: MentorId,
    day_of_week: IsoWeekday,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    timezone: CivilZone,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AvailabilityWindow {
    /// Creates a window for a mentor from validated fields.
    pub fn new(mentor_id: MentorId, fields: ValidWindow) -> Self {
        let now = Timestamp::now();
        Self {
            id: AvailabilityId::new(),
            mentor_id,
            day_of_week: fields.day_of_week,
            start_time: fields.start_time,
            end_time: fields.end_time,
            timezone: fields.timezone,
            is_active: fields.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a window from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AvailabilityId,
        mentor_id: MentorId,
        day_of_week: IsoWeekday,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        timezone: CivilZone,
        is_active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            mentor_id,
            day_of_week,
            start_time,
            end_time,
            timezone,
            is_active,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &AvailabilityId {
        &self.id
    }

    pub fn mentor_id(&self) -> &MentorId {
        &self.mentor_id
    }

    pub fn day_of_week(&self) -> IsoWeekday {
        self.day_of_week
    }

    pub fn start_time(&self) -> TimeOfDay {
        self.start_time
    }

    pub fn end_time(&self) -> TimeOfDay {
        self.end_time
    }

    pub fn timezone(&self) -> CivilZone {
        self.timezone
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// True if the window is owned by `mentor_id`.
    pub fn belongs_to(&self, mentor_id: &MentorId) -> bool {
        &self.mentor_id == mentor_id
    }

    /// Checks whether an instant falls inside this window.
    ///
    /// The instant is read on the wall clock of the window's own zone, so the
    /// zone a requester used to express the booking does not matter. Start is
    /// inclusive, end exclusive. Inactive windows never match.
    pub fn covers(&self, instant: &Timestamp) -> bool {
        if !self.is_active {
            return false;
        }
        let local = self.timezone.local_datetime(instant);
        let time = TimeOfDay::from_naive(local.time());
        IsoWeekday::of(&local.date()) == self.day_of_week
            && self.start_time <= time
            && time < self.end_time
    }

    /// Merges a validated partial update into the window.
    ///
    /// Ordering is re-checked when the patch moves either bound; the window is
    /// left untouched on failure.
    pub fn apply_patch(&mut self, patch: &AvailabilityPatch) -> Result<(), ValidationError> {
        let start = patch.start_time.unwrap_or(self.start_time);
        let end = patch.end_time.unwrap_or(self.end_time);
        if patch.touches_bounds() {
            validate_window_order(start, end)?;
        }

        self.start_time = start;
        self.end_time = end;
        if let Some(day) = patch.day_of_week {
            self.day_of_week = day;
        }
        if let Some(zone) = patch.timezone {
            self.timezone = zone;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> TimeOfDay {
        TimeOfDay::parse("t", s).unwrap()
    }

    fn monday_morning(zone: &str) -> AvailabilityWindow {
        AvailabilityWindow::new(
            MentorId::new(),
            ValidWindow {
                day_of_week: IsoWeekday::MONDAY,
                start_time: time("09:00"),
                end_time: time("12:00"),
                timezone: CivilZone::parse("timezone", zone).unwrap(),
                is_active: true,
            },
        )
    }

    fn at(iso: &str) -> Timestamp {
        Timestamp::parse_iso("x", iso).unwrap()
    }

    #[test]
    fn covers_instant_inside_window() {
        // Monday 10:30 in Sao Paulo.
        assert!(monday_morning("America/Sao_Paulo").covers(&at("2024-06-03T13:30:00Z")));
    }

    #[test]
    fn start_is_inclusive_end_is_exclusive() {
        let window = monday_morning("America/Sao_Paulo");
        assert!(window.covers(&at("2024-06-03T12:00:00Z")));
        assert!(!window.covers(&at("2024-06-03T15:00:00Z")));
    }

    #[test]
    fn rejects_other_weekday() {
        // Tuesday 10:30 in Sao Paulo.
        assert!(!monday_morning("America/Sao_Paulo").covers(&at("2024-06-04T13:30:00Z")));
    }

    #[test]
    fn reads_instant_in_window_zone() {
        // 10:30 Monday in Lisbon (UTC+1 in June) is 06:30 in Sao Paulo.
        let lisbon = monday_morning("Europe/Lisbon");
        let sao_paulo = monday_morning("America/Sao_Paulo");
        let instant = at("2024-06-03T09:30:00Z");
        assert!(lisbon.covers(&instant));
        assert!(!sao_paulo.covers(&instant));
    }

    #[test]
    fn weekday_is_taken_after_zone_conversion() {
        // Monday 01:00 UTC is still Sunday evening in Sao Paulo.
        let mut window = monday_morning("America/Sao_Paulo");
        window
            .apply_patch(&AvailabilityPatch {
                start_time: Some(time("00:00")),
                end_time: Some(time("23:59")),
                ..Default::default()
            })
            .unwrap();
        assert!(!window.covers(&at("2024-06-03T01:00:00Z")));
    }

    #[test]
    fn inactive_window_never_covers() {
        let mut window = monday_morning("America/Sao_Paulo");
        window
            .apply_patch(&AvailabilityPatch {
                is_active: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert!(!window.covers(&at("2024-06-03T13:30:00Z")));
    }

    #[test]
    fn patch_rechecks_merged_order() {
        let mut window = monday_morning("America/Sao_Paulo");
        let err = window
            .apply_patch(&AvailabilityPatch {
                start_time: Some(time("13:00")),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.field(), "endTime");
        assert_eq!(window.start_time(), time("09:00"));
    }

    #[test]
    fn patch_updates_supplied_fields_only() {
        let mut window = monday_morning("America/Sao_Paulo");
        window
            .apply_patch(&AvailabilityPatch {
                end_time: Some(time("18:00")),
                day_of_week: Some(IsoWeekday::SUNDAY),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(window.end_time(), time("18:00"));
        assert_eq!(window.start_time(), time("09:00"));
        assert_eq!(window.day_of_week(), IsoWeekday::SUNDAY);
        assert!(window.is_active());
    }
}
