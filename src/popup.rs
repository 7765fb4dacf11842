//! Popup scheduling rules.
//!
//! A page load walks one popup session through
//! Idle → Eligible → Displaying → Dismissed. Eligibility is a pure
//! function of the active popup record, the clock, and the visitor's
//! last-shown instant; the handlers feed it and persist the side effects
//! (view/click counters, the visitor cool-down stamp).

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::models::Popup;

/// Per-visitor cool-down state, injected into the popup handlers.
///
/// Both operations are best-effort: a failed read means "never shown"
/// (the popup may display once more), a failed write is logged by the
/// implementation and otherwise ignored.
pub trait VisitorStore {
    async fn last_shown(&self, visitor_id: &str) -> Option<DateTime<Utc>>;
    async fn record_shown(&self, visitor_id: &str, when: DateTime<Utc>);
}

/// Why the popup stays hidden for this page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoActivePopup,
    NotStarted,
    Expired,
    CoolingDown,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NoActivePopup => "no_active_popup",
            SkipReason::NotStarted => "not_started",
            SkipReason::Expired => "expired",
            SkipReason::CoolingDown => "cooling_down",
        };
        write!(f, "{}", reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Show { delay_seconds: i32 },
    Skip(SkipReason),
}

/// Decide whether the popup may display.
///
/// The date window is inclusive on both ends and unbounded where unset.
/// The cool-down rejects while strictly less than `show_frequency_days`
/// days have passed since the popup was last shown to this visitor.
pub fn evaluate(
    popup: Option<&Popup>,
    last_shown: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Eligibility {
    let popup = match popup {
        Some(popup) => popup,
        None => return Eligibility::Skip(SkipReason::NoActivePopup),
    };

    if let Some(start) = popup.start_date {
        if start > now {
            return Eligibility::Skip(SkipReason::NotStarted);
        }
    }
    if let Some(end) = popup.end_date {
        if end < now {
            return Eligibility::Skip(SkipReason::Expired);
        }
    }

    if let Some(last_shown) = last_shown {
        if now - last_shown < Duration::days(popup.show_frequency_days as i64) {
            return Eligibility::Skip(SkipReason::CoolingDown);
        }
    }

    Eligibility::Show {
        delay_seconds: popup.delay_seconds,
    }
}

/// A recorded popup interaction, aggregated into the per-day counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatEvent {
    View,
    Click,
}

/// Next `(views, clicks)` pair for today's stat row. An absent row counts
/// from zero, so a click landing before any view yields `(0, 1)`. Counters
/// only ever grow.
pub fn next_stat(existing: Option<(i32, i32)>, event: StatEvent) -> (i32, i32) {
    let (views, clicks) = existing.unwrap_or((0, 0));
    match event {
        StatEvent::View => (views + 1, clicks),
        StatEvent::Click => (views, clicks + 1),
    }
}

/// Session state for one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Eligible { delay_seconds: i32 },
    Displaying,
    Dismissed,
}

/// The page-load state machine. Dismissed is terminal: once the visitor
/// closes the popup (or clicks through) nothing else displays this load.
/// A session abandoned before `fire` simply drops — cancellation is
/// cooperative and leaves no persisted side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupSession {
    phase: Phase,
}

impl PopupSession {
    pub fn new() -> Self {
        PopupSession { phase: Phase::Idle }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the eligibility check. Only meaningful from Idle; a session
    /// that already moved on keeps its phase.
    pub fn check(
        &mut self,
        popup: Option<&Popup>,
        last_shown: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Phase {
        if self.phase == Phase::Idle {
            if let Eligibility::Show { delay_seconds } = evaluate(popup, last_shown, now) {
                self.phase = Phase::Eligible { delay_seconds };
            }
        }
        self.phase
    }

    /// The display delay elapsed. Returns true when the transition
    /// happened, i.e. the caller must record a view and stamp the
    /// visitor's last-shown instant.
    pub fn fire(&mut self) -> bool {
        match self.phase {
            Phase::Eligible { .. } => {
                self.phase = Phase::Displaying;
                true
            }
            _ => false,
        }
    }

    /// Close button or outside click.
    pub fn dismiss(&mut self) {
        if self.phase == Phase::Displaying {
            self.phase = Phase::Dismissed;
        }
    }

    /// Call-to-action click. Returns true when a click must be recorded;
    /// the session ends either way.
    pub fn click(&mut self) -> bool {
        match self.phase {
            Phase::Displaying => {
                self.phase = Phase::Dismissed;
                true
            }
            _ => false,
        }
    }
}

impl Default for PopupSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popup_with(
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        show_frequency_days: i32,
        delay_seconds: i32,
    ) -> Popup {
        Popup {
            id: 1,
            title: "Offerta".to_string(),
            message: "Sconto di primavera".to_string(),
            button_text: Some("Prenota".to_string()),
            button_link: Some("https://example.com".to_string()),
            image_url: None,
            bg_color: Some("#1B7B7E".to_string()),
            text_color: Some("#FFFFFF".to_string()),
            is_active: true,
            start_date,
            end_date,
            delay_seconds,
            show_frequency_days,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn no_active_popup_stays_idle() {
        let now = Utc::now();
        assert_eq!(
            evaluate(None, None, now),
            Eligibility::Skip(SkipReason::NoActivePopup)
        );
    }

    #[test]
    fn future_start_date_never_displays_regardless_of_delay() {
        let now = Utc::now();
        let tomorrow = now + Duration::days(1);
        for delay in [0, 3, 600] {
            let popup = popup_with(Some(tomorrow), None, 7, delay);
            assert_eq!(
                evaluate(Some(&popup), None, now),
                Eligibility::Skip(SkipReason::NotStarted)
            );
        }
    }

    #[test]
    fn past_end_date_is_expired() {
        let now = Utc::now();
        let popup = popup_with(None, Some(now - Duration::days(1)), 7, 3);
        assert_eq!(
            evaluate(Some(&popup), None, now),
            Eligibility::Skip(SkipReason::Expired)
        );
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let now = Utc::now();
        let popup = popup_with(Some(now), Some(now), 7, 3);
        assert_eq!(
            evaluate(Some(&popup), None, now),
            Eligibility::Show { delay_seconds: 3 }
        );
    }

    #[test]
    fn frequency_cap_holds_while_cooling_down() {
        let now = Utc::now();
        let popup = popup_with(None, None, 7, 3);

        let three_days_ago = Some(now - Duration::days(3));
        assert_eq!(
            evaluate(Some(&popup), three_days_ago, now),
            Eligibility::Skip(SkipReason::CoolingDown)
        );

        let eight_days_ago = Some(now - Duration::days(8));
        assert_eq!(
            evaluate(Some(&popup), eight_days_ago, now),
            Eligibility::Show { delay_seconds: 3 }
        );

        assert_eq!(
            evaluate(Some(&popup), None, now),
            Eligibility::Show { delay_seconds: 3 }
        );
    }

    #[test]
    fn cool_down_ends_exactly_at_the_frequency_boundary() {
        let now = Utc::now();
        let popup = popup_with(None, None, 7, 3);
        let exactly_seven = Some(now - Duration::days(7));
        assert_eq!(
            evaluate(Some(&popup), exactly_seven, now),
            Eligibility::Show { delay_seconds: 3 }
        );
    }

    #[test]
    fn click_without_a_views_row_creates_one_with_zero_views() {
        assert_eq!(next_stat(None, StatEvent::Click), (0, 1));
    }

    #[test]
    fn first_view_of_the_day_counts_from_zero() {
        assert_eq!(next_stat(None, StatEvent::View), (1, 0));
    }

    #[test]
    fn existing_row_is_incremented_in_place() {
        assert_eq!(next_stat(Some((4, 1)), StatEvent::View), (5, 1));
        assert_eq!(next_stat(Some((4, 1)), StatEvent::Click), (4, 2));
    }

    #[test]
    fn counters_never_decrement() {
        let mut stat: Option<(i32, i32)> = None;
        let events = [
            StatEvent::Click,
            StatEvent::View,
            StatEvent::View,
            StatEvent::Click,
        ];
        for event in events {
            let (views, clicks) = stat.unwrap_or((0, 0));
            let next = next_stat(stat, event);
            assert!(next.0 >= views);
            assert!(next.1 >= clicks);
            stat = Some(next);
        }
        assert_eq!(stat, Some((2, 2)));
    }

    #[test]
    fn session_walks_idle_eligible_displaying_dismissed() {
        let now = Utc::now();
        let popup = popup_with(None, None, 7, 3);
        let mut session = PopupSession::new();

        assert_eq!(
            session.check(Some(&popup), None, now),
            Phase::Eligible { delay_seconds: 3 }
        );
        assert!(session.fire());
        assert_eq!(session.phase(), Phase::Displaying);

        session.dismiss();
        assert_eq!(session.phase(), Phase::Dismissed);
    }

    #[test]
    fn ineligible_session_never_fires() {
        let now = Utc::now();
        let popup = popup_with(Some(now + Duration::days(1)), None, 7, 3);
        let mut session = PopupSession::new();

        assert_eq!(session.check(Some(&popup), None, now), Phase::Idle);
        assert!(!session.fire());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn click_records_once_and_terminates_the_session() {
        let now = Utc::now();
        let popup = popup_with(None, None, 7, 3);
        let mut session = PopupSession::new();
        session.check(Some(&popup), None, now);
        session.fire();

        assert!(session.click());
        assert_eq!(session.phase(), Phase::Dismissed);
        // Terminal: no second click, no re-check.
        assert!(!session.click());
        assert_eq!(session.check(Some(&popup), None, now), Phase::Dismissed);
    }
}
