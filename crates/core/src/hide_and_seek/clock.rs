use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Setup,
    Hiding,
    Hunting,
    Finished,
}

/// Hide-phase countdown that rolls into a hunt-phase stopwatch. Ticks are
/// externally driven, one per second while a phase timer is active.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundClock {
    phase: Phase,
    hide_remaining: u32,
    hunt_elapsed: u32,
}

impl RoundClock {
    pub fn new() -> Self {
        RoundClock::default()
    }

    pub fn start(&mut self, hide_time_secs: u32) {
        if self.phase != Phase::Setup {
            return;
        }
        self.hide_remaining = hide_time_secs;
        self.phase = if hide_time_secs == 0 {
            Phase::Hunting
        } else {
            Phase::Hiding
        };
    }

    pub fn tick(&mut self) {
        match self.phase {
            Phase::Hiding => {
                self.hide_remaining = self.hide_remaining.saturating_sub(1);
                if self.hide_remaining == 0 {
                    tracing::info!("hide time is up, hunt begins");
                    self.phase = Phase::Hunting;
                }
            }
            Phase::Hunting => self.hunt_elapsed += 1,
            Phase::Setup | Phase::Finished => {}
        }
    }

    /// Terminal hiding action: the hider declares themselves hidden early.
    pub fn begin_hunt(&mut self) {
        if self.phase == Phase::Hiding {
            self.hide_remaining = 0;
            self.phase = Phase::Hunting;
        }
    }

    /// Explicit catch. Freezes the elapsed hunt time.
    pub fn mark_caught(&mut self) -> bool {
        if self.phase == Phase::Hunting {
            self.phase = Phase::Finished;
            true
        } else {
            false
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hide_remaining(&self) -> u32 {
        self.hide_remaining
    }

    pub fn hunt_elapsed(&self) -> u32 {
        self.hunt_elapsed
    }

    /// Hider score: hunt time survived plus card time bonuses.
    pub fn score_seconds(&self, bonus_minutes: u32) -> u32 {
        self.hunt_elapsed + bonus_minutes * 60
    }
}

/// "M:SS", as shown in the round header.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
