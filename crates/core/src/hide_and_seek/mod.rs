//! The hide-and-seek round: catalog, session, constraint set, clock, hider
//! hand and position tracking behind one aggregate.
//!
//! Everything is single-threaded and event-driven. Each public method is one
//! external trigger (a selection, a captured fix, a timer tick, an answer)
//! and runs to completion; no partial update is ever observable between
//! events.

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

use crate::hide_and_seek::cards::{HiderCard, HiderHand};
use crate::hide_and_seek::catalog::{Answer, QuestionCatalog, QuestionKind};
use crate::hide_and_seek::clock::RoundClock;
use crate::hide_and_seek::constraint::{Constraint, ConstraintSet};
use crate::hide_and_seek::question::QuestionDetail;
use crate::hide_and_seek::session::QuestionSession;
use crate::hide_and_seek::state::GameConfig;
use crate::position::{
    Position, PositionProvider, PositionTracker, ProviderStatus, WatchOptions,
};
use crate::shape::ShapeRecord;
use crate::shape::types::LatLng;

pub mod cards;
pub mod catalog;
pub mod clock;
pub mod constraint;
pub mod question;
pub mod session;
pub mod state;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hider,
    Seeker,
}

/// Everything that can go wrong inside a round. All of it is recoverable;
/// nothing here corrupts the constraint set or crashes a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no {0} questions remaining")]
    PoolExhausted(QuestionKind),
    #[error("no question in progress awaiting this input")]
    NoActiveQuestion,
    #[error("an anchor point is required first")]
    MissingAnchor,
    #[error("question details are incomplete")]
    MissingDetail,
    #[error("{answer} is not a valid answer for a {kind} question")]
    UnsupportedAnswer { kind: QuestionKind, answer: Answer },
    #[error("prompt is not classifiable as directional")]
    AmbiguousDetail,
    #[error("position provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("hider hand is full")]
    HandFull,
}

/// Where a question anchor comes from: the live fix or a tapped map point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorSource {
    CurrentPosition,
    MapPoint(LatLng),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Started,
    /// Same kind re-selected: toggle semantics, session discarded.
    Cancelled,
    /// Pool exhausted: silently rejected, no state change.
    Rejected,
}

pub struct HideAndSeekGame {
    config: GameConfig,
    role: Role,
    code: String,
    catalog: QuestionCatalog,
    session: QuestionSession,
    constraints: ConstraintSet,
    clock: RoundClock,
    hand: HiderHand,
    tracker: PositionTracker,
}

impl HideAndSeekGame {
    pub fn new(role: Role) -> Self {
        Self::with_config(role, GameConfig::default())
    }

    pub fn with_config(role: Role, config: GameConfig) -> Self {
        let code = new_game_code(&mut rand::rng());
        tracing::info!(?role, %code, "starting game");
        HideAndSeekGame {
            config,
            role,
            code,
            catalog: QuestionCatalog::new(),
            session: QuestionSession::new(),
            constraints: ConstraintSet::new(),
            clock: RoundClock::new(),
            hand: HiderHand::new(),
            tracker: PositionTracker::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &QuestionSession {
        &self.session
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn hand(&self) -> &HiderHand {
        &self.hand
    }

    // --- round lifecycle -------------------------------------------------

    /// Begin the hide phase.
    pub fn start(&mut self) {
        self.clock.start(self.config.hide_time_secs);
    }

    /// One-second timer tick, forwarded from the host.
    pub fn tick(&mut self) {
        self.clock.tick();
    }

    /// Hider declares themselves hidden before the countdown runs out.
    pub fn begin_hunt(&mut self) {
        self.clock.begin_hunt();
    }

    pub fn mark_caught(&mut self) -> bool {
        let caught = self.clock.mark_caught();
        if caught {
            tracing::info!(score = self.score_seconds(), "hider caught");
        }
        caught
    }

    /// Hider score: frozen hunt time plus bonus cards still held.
    pub fn score_seconds(&self) -> u32 {
        self.clock.score_seconds(self.hand.time_bonus_minutes())
    }

    /// Full round reset, distinct from the clears: pools back to their
    /// starting counts, log emptied, clock back to setup.
    pub fn reset(&mut self) {
        self.session.cancel();
        self.catalog.reset();
        self.constraints.clear_all();
        self.clock = RoundClock::new();
        self.hand = HiderHand::new();
        tracing::info!("game reset");
    }

    // --- question flow ---------------------------------------------------

    /// True when `kind` is selectable right now: uses remaining and no
    /// session for it already pending.
    pub fn can_ask(&self, kind: QuestionKind) -> bool {
        self.catalog.can_ask(kind) && self.session.pending_kind() != Some(kind)
    }

    /// Seeker picks a question card. Re-selecting the pending kind toggles
    /// the session off; selecting a different kind replaces it.
    pub fn select_question(&mut self, kind: QuestionKind) -> SelectOutcome {
        if self.session.pending_kind() == Some(kind) {
            self.session.cancel();
            tracing::debug!(%kind, "question toggled off");
            return SelectOutcome::Cancelled;
        }
        if !self.catalog.can_ask(kind) {
            tracing::debug!(%kind, "selection rejected, pool exhausted");
            return SelectOutcome::Rejected;
        }
        self.session.cancel();
        self.session.begin(kind);
        SelectOutcome::Started
    }

    pub fn cancel_question(&mut self) {
        if self.session.cancel() {
            tracing::debug!("question cancelled");
        }
    }

    pub fn capture_anchor(&mut self, source: AnchorSource) -> Result<(), GameError> {
        let position = match source {
            AnchorSource::MapPoint(point) => {
                Position::new(point.lat, point.lng).with_timestamp(Utc::now())
            }
            AnchorSource::CurrentPosition => {
                self.tracker
                    .last_known()
                    .copied()
                    .ok_or_else(|| match self.tracker.status() {
                        ProviderStatus::Unavailable { message } => {
                            GameError::ProviderUnavailable(message.clone())
                        }
                        _ => GameError::MissingAnchor,
                    })?
            }
        };
        self.session.capture_anchor(position)
    }

    pub fn confirm_detail(&mut self, detail: QuestionDetail) -> Result<(), GameError> {
        self.session.confirm_detail(detail)
    }

    /// Resolve the pending question: derive the constraint, burn the card,
    /// append. The session is discarded even when the answer is rejected.
    pub fn submit_answer(&mut self, answer: Answer) -> Result<(), GameError> {
        let (kind, anchors, detail) = self.session.take_resolved()?;
        let constraint = question::derive(kind, &anchors, &detail, answer, Utc::now())?;
        self.catalog.decrement(kind)?;
        tracing::info!(%kind, %answer, "question resolved");
        self.constraints.append(constraint, &self.config);
        Ok(())
    }

    /// Hider draws after answering.
    pub fn draw_card(&mut self) -> Result<HiderCard, GameError> {
        self.hand.draw(&mut rand::rng(), self.config.hand_limit)
    }

    pub fn play_card(&mut self, index: usize) -> Option<HiderCard> {
        self.hand.play(index)
    }

    pub fn discard_card(&mut self, index: usize) -> Option<HiderCard> {
        self.hand.discard(index)
    }

    // --- rendering & history ---------------------------------------------

    pub fn renderable_shapes(&self) -> &[ShapeRecord] {
        self.constraints.shapes()
    }

    /// Everything the map surface needs, as GeoJSON. The renderer draws
    /// features as-is.
    pub fn render_features(&self) -> geojson::FeatureCollection {
        crate::shape::geojson::feature_collection(
            self.constraints.shapes(),
            self.config.ring_samples,
            self.config.outer_bound,
        )
    }

    pub fn history(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.history()
    }

    pub fn clear_shapes(&mut self) {
        self.constraints.clear_shapes();
    }

    pub fn clear_all(&mut self) {
        self.constraints.clear_all();
    }

    pub fn redraw(&mut self) {
        self.constraints.redraw(&self.config);
    }

    // --- position --------------------------------------------------------

    pub fn start_tracking(
        &mut self,
        provider: &mut dyn PositionProvider,
        options: WatchOptions,
    ) {
        self.tracker.start(provider, options);
    }

    pub fn stop_tracking(&mut self) {
        self.tracker.stop();
    }

    /// Forward one provider sample or error.
    pub fn handle_position(&mut self, sample: Result<Position, String>) {
        self.tracker.handle_sample(sample);
    }

    pub fn provider_status(&self) -> &ProviderStatus {
        self.tracker.status()
    }

    pub fn last_known_position(&self) -> Option<&Position> {
        self.tracker.last_known()
    }
}

fn new_game_code(rng: &mut impl Rng) -> String {
    rng.sample_iter(Alphanumeric)
        .take(5)
        .map(char::from)
        .collect::<String>()
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hide_and_seek::catalog::MatchingPrompt;
    use crate::hide_and_seek::constraint::Region;
    use crate::hide_and_seek::session::SessionState;

    fn seeker() -> HideAndSeekGame {
        HideAndSeekGame::new(Role::Seeker)
    }

    fn at(lat: f64, lng: f64) -> AnchorSource {
        AnchorSource::MapPoint(LatLng::new(lat, lng))
    }

    #[test]
    fn test_game_code_shape() {
        let game = seeker();
        assert_eq!(game.code().len(), 5);
        assert!(game.code().chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!game.code().chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_radar_resolution_burns_exactly_one_card() {
        let mut game = seeker();
        assert_eq!(game.select_question(QuestionKind::Radar), SelectOutcome::Started);
        game.capture_anchor(at(52.95, -1.16)).unwrap();
        game.confirm_detail(QuestionDetail::Distance("1 mi".into())).unwrap();
        game.submit_answer(Answer::No).unwrap();

        assert_eq!(game.catalog().remaining(QuestionKind::Radar), 1);
        for kind in [
            QuestionKind::Matching,
            QuestionKind::Measuring,
            QuestionKind::Thermometer,
            QuestionKind::Photo,
        ] {
            assert_eq!(game.catalog().remaining(kind), kind.starting_pool());
        }

        assert_eq!(game.constraints().len(), 1);
        assert!(matches!(
            game.constraints().all()[0].region,
            Region::DiskExclusion { .. }
        ));
        assert!(game.session().is_idle());
    }

    #[test]
    fn test_exhausted_pool_rejects_selection() {
        let mut game = seeker();
        for _ in 0..2 {
            game.select_question(QuestionKind::Radar);
            game.capture_anchor(at(52.95, -1.16)).unwrap();
            game.confirm_detail(QuestionDetail::Distance("1 mi".into())).unwrap();
            game.submit_answer(Answer::Yes).unwrap();
        }

        assert!(!game.can_ask(QuestionKind::Radar));
        assert_eq!(
            game.select_question(QuestionKind::Radar),
            SelectOutcome::Rejected
        );
        assert!(game.session().is_idle());
    }

    #[test]
    fn test_thermometer_flow_and_toggle_cancellation() {
        let mut game = seeker();

        // toggling before the end anchor cancels cleanly
        game.select_question(QuestionKind::Thermometer);
        game.capture_anchor(at(52.95, -1.16)).unwrap();
        assert_eq!(
            game.select_question(QuestionKind::Thermometer),
            SelectOutcome::Cancelled
        );
        assert!(game.constraints().is_empty());
        assert_eq!(game.catalog().remaining(QuestionKind::Thermometer), 2);

        // full flow keeps the anchors in capture order
        game.select_question(QuestionKind::Thermometer);
        game.capture_anchor(at(52.95, -1.16)).unwrap();
        game.capture_anchor(at(52.96, -1.15)).unwrap();
        game.submit_answer(Answer::Closer).unwrap();

        assert_eq!(game.constraints().len(), 1);
        let constraint = &game.constraints().all()[0];
        let (start, end) = constraint.anchors.pair().unwrap();
        assert_eq!((start.lat, start.lng), (52.95, -1.16));
        assert_eq!((end.lat, end.lng), (52.96, -1.15));
        assert_eq!(game.catalog().remaining(QuestionKind::Thermometer), 1);
    }

    #[test]
    fn test_switching_kinds_replaces_the_session() {
        let mut game = seeker();
        game.select_question(QuestionKind::Radar);
        game.capture_anchor(at(52.95, -1.16)).unwrap();

        assert_eq!(
            game.select_question(QuestionKind::Matching),
            SelectOutcome::Started
        );
        assert_eq!(game.session().pending_kind(), Some(QuestionKind::Matching));
        assert!(matches!(
            game.session().state(),
            SessionState::SelectingAnchor { start: None, .. }
        ));
    }

    #[test]
    fn test_bad_answer_discards_session_without_burning_a_card() {
        let mut game = seeker();
        game.select_question(QuestionKind::Radar);
        game.capture_anchor(at(52.95, -1.16)).unwrap();
        game.confirm_detail(QuestionDetail::Distance("1 mi".into())).unwrap();

        let err = game.submit_answer(Answer::Received).unwrap_err();
        assert!(matches!(err, GameError::UnsupportedAnswer { .. }));
        assert!(game.session().is_idle());
        assert_eq!(game.catalog().remaining(QuestionKind::Radar), 2);
        assert!(game.constraints().is_empty());
    }

    #[test]
    fn test_current_position_anchor_uses_last_fix() {
        let mut game = seeker();
        game.handle_position(Ok(Position::new(52.95, -1.16).with_accuracy(8.0)));

        game.select_question(QuestionKind::Matching);
        game.capture_anchor(AnchorSource::CurrentPosition).unwrap();
        game.confirm_detail(QuestionDetail::Prompt(MatchingPrompt::predefined()[0].clone()))
            .unwrap();
        game.submit_answer(Answer::South).unwrap();

        let constraint = &game.constraints().all()[0];
        assert_eq!(constraint.anchors.primary().lat, 52.95);
        assert!(matches!(constraint.region, Region::HalfPlane { .. }));
    }

    #[test]
    fn test_no_fix_yet_blocks_current_position_anchor() {
        let mut game = seeker();
        game.select_question(QuestionKind::Radar);

        let err = game.capture_anchor(AnchorSource::CurrentPosition).unwrap_err();
        assert_eq!(err, GameError::MissingAnchor);

        game.handle_position(Err("permission denied".into()));
        let err = game.capture_anchor(AnchorSource::CurrentPosition).unwrap_err();
        assert_eq!(
            err,
            GameError::ProviderUnavailable("permission denied".into())
        );

        // manual anchoring still works in the degraded state
        game.capture_anchor(at(52.95, -1.16)).unwrap();
        game.confirm_detail(QuestionDetail::Distance("1 mi".into())).unwrap();
        game.submit_answer(Answer::No).unwrap();
        assert_eq!(game.constraints().len(), 1);
    }

    #[test]
    fn test_clear_and_reset_are_distinct() {
        let mut game = seeker();
        game.select_question(QuestionKind::Radar);
        game.capture_anchor(at(52.95, -1.16)).unwrap();
        game.confirm_detail(QuestionDetail::Distance("1 mi".into())).unwrap();
        game.submit_answer(Answer::No).unwrap();

        game.clear_shapes();
        assert!(game.renderable_shapes().is_empty());
        assert_eq!(game.constraints().len(), 1);

        game.redraw();
        assert!(!game.renderable_shapes().is_empty());

        game.clear_all();
        assert!(game.constraints().is_empty());
        // clears never refill the pool
        assert_eq!(game.catalog().remaining(QuestionKind::Radar), 1);

        game.reset();
        assert_eq!(game.catalog().remaining(QuestionKind::Radar), 2);
        assert_eq!(game.catalog().total_remaining(), 11);
    }

    #[test]
    fn test_full_round_scoring() {
        let mut game = HideAndSeekGame::with_config(
            Role::Hider,
            GameConfig {
                hide_time_secs: 2,
                ..GameConfig::default()
            },
        );
        game.start();
        game.tick();
        game.tick();
        // now hunting
        for _ in 0..30 {
            game.tick();
        }
        assert!(game.mark_caught());
        assert_eq!(game.score_seconds(), 30);
    }
}
