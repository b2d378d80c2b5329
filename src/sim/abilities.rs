//! Timed abilities: shrink and translucency
//!
//! Each ability is a small state machine driven by the arena's timer queue:
//!
//! ```text
//! Available --trigger--> Active --expire--> Cooldown --ready--> Available
//! ```
//!
//! Every timer an ability schedules is recorded on the ability so a reset can
//! cancel the whole set at once.

use serde::{Deserialize, Serialize};

use super::state::{ArenaTimer, GameEvent};
use super::timers::{TimerId, TimerQueue};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    Shrink,
    Translucency,
}

impl AbilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbilityKind::Shrink => "shrink",
            AbilityKind::Translucency => "translucency",
        }
    }
}

/// Exactly one phase holds at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AbilityPhase {
    #[default]
    Available,
    Active,
    /// Deactivated, waiting out the cooldown
    Cooldown,
}

/// One ability and the timers it owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub phase: AbilityPhase,
    /// Pending timers scheduled on behalf of this ability
    timers: Vec<TimerId>,
}

impl Ability {
    pub fn new(kind: AbilityKind) -> Self {
        Self {
            kind,
            phase: AbilityPhase::Available,
            timers: Vec::new(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == AbilityPhase::Active
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.phase == AbilityPhase::Available
    }

    /// Handles still pending for this ability
    pub fn pending_timers(&self) -> &[TimerId] {
        &self.timers
    }

    fn schedule(&mut self, timers: &mut TimerQueue<ArenaTimer>, delay_ms: f64, event: ArenaTimer) {
        let id = timers.schedule(delay_ms, event);
        self.timers.push(id);
    }

    fn forget(&mut self, id: TimerId) {
        self.timers.retain(|t| *t != id);
    }

    fn cancel_timers(&mut self, timers: &mut TimerQueue<ArenaTimer>) {
        timers.cancel_all(&mut self.timers);
    }

    fn reset(&mut self, timers: &mut TimerQueue<ArenaTimer>) {
        self.cancel_timers(timers);
        self.phase = AbilityPhase::Available;
    }
}

/// Both abilities plus the visual state they drive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Abilities {
    pub shrink: Ability,
    pub translucency: Ability,
    /// Render scale of the target (1.0 normal)
    pub scale: f32,
    /// Render opacity of the target (1.0 fully visible)
    pub opacity: f32,
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            shrink: Ability::new(AbilityKind::Shrink),
            translucency: Ability::new(AbilityKind::Translucency),
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

impl Abilities {
    pub fn get(&self, kind: AbilityKind) -> &Ability {
        match kind {
            AbilityKind::Shrink => &self.shrink,
            AbilityKind::Translucency => &self.translucency,
        }
    }

    fn get_mut(&mut self, kind: AbilityKind) -> &mut Ability {
        match kind {
            AbilityKind::Shrink => &mut self.shrink,
            AbilityKind::Translucency => &mut self.translucency,
        }
    }

    /// Activate whichever ability the pointer distance qualifies for.
    ///
    /// Shrink and translucency exclude each other: neither triggers while the
    /// other is active.
    pub fn try_trigger(
        &mut self,
        distance_px: f32,
        tuning: &Tuning,
        timers: &mut TimerQueue<ArenaTimer>,
    ) -> Option<GameEvent> {
        if self.shrink.is_available()
            && !self.translucency.is_active()
            && distance_px < tuning.shrink_trigger_px
        {
            self.activate_shrink(tuning, timers);
            return Some(GameEvent::AbilityActivated(AbilityKind::Shrink));
        }

        if self.translucency.is_available()
            && !self.shrink.is_active()
            && distance_px >= tuning.translucent_min_px
            && distance_px < tuning.translucent_max_px
        {
            self.activate_translucency(tuning, timers);
            return Some(GameEvent::AbilityActivated(AbilityKind::Translucency));
        }

        None
    }

    fn activate_shrink(&mut self, tuning: &Tuning, timers: &mut TimerQueue<ArenaTimer>) {
        self.shrink.phase = AbilityPhase::Active;
        self.shrink.schedule(
            timers,
            tuning.shrink_active_ms,
            ArenaTimer::AbilityExpired(AbilityKind::Shrink),
        );
        self.scale = tuning.shrink_scale;
        log::info!("Shrink activated (scale {})", self.scale);
    }

    fn activate_translucency(&mut self, tuning: &Tuning, timers: &mut TimerQueue<ArenaTimer>) {
        let ability = &mut self.translucency;
        ability.phase = AbilityPhase::Active;
        ability.schedule(
            timers,
            tuning.translucent_active_ms,
            ArenaTimer::AbilityExpired(AbilityKind::Translucency),
        );

        // First flicker starts immediately, then every period
        self.opacity = tuning.pulse_opacity;
        ability.schedule(timers, tuning.pulse_on_ms, ArenaTimer::PulseOff);
        let pulse = timers.schedule_repeating(
            tuning.pulse_period_ms,
            tuning.pulse_period_ms,
            ArenaTimer::PulseOn,
        );
        ability.timers.push(pulse);
        log::info!("Translucency activated");
    }

    /// Apply a fired ability timer. Returns the event to report, if any.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        timer: ArenaTimer,
        tuning: &Tuning,
        timers: &mut TimerQueue<ArenaTimer>,
    ) -> Option<GameEvent> {
        match timer {
            ArenaTimer::AbilityExpired(kind) => {
                let ability = self.get_mut(kind);
                ability.forget(id);
                if !ability.is_active() {
                    return None;
                }
                ability.cancel_timers(timers);
                ability.phase = AbilityPhase::Cooldown;
                let cooldown = match kind {
                    AbilityKind::Shrink => tuning.shrink_cooldown_ms,
                    AbilityKind::Translucency => tuning.translucent_cooldown_ms,
                };
                ability.schedule(timers, cooldown, ArenaTimer::AbilityReady(kind));

                match kind {
                    AbilityKind::Shrink => self.scale = 1.0,
                    AbilityKind::Translucency => self.opacity = 1.0,
                }
                log::info!("{} expired, cooling down for {}ms", kind.as_str(), cooldown);
                Some(GameEvent::AbilityDeactivated(kind))
            }
            ArenaTimer::AbilityReady(kind) => {
                let ability = self.get_mut(kind);
                ability.forget(id);
                if ability.phase != AbilityPhase::Cooldown {
                    return None;
                }
                ability.phase = AbilityPhase::Available;
                log::debug!("{} ready", kind.as_str());
                Some(GameEvent::AbilityReady(kind))
            }
            ArenaTimer::PulseOn => {
                if self.translucency.is_active() {
                    self.opacity = tuning.pulse_opacity;
                    self.translucency
                        .schedule(timers, tuning.pulse_on_ms, ArenaTimer::PulseOff);
                }
                None
            }
            ArenaTimer::PulseOff => {
                self.translucency.forget(id);
                if self.translucency.is_active() {
                    self.opacity = 0.0;
                }
                None
            }
            ArenaTimer::ChaseTick => None,
        }
    }

    /// Cancel every pending ability timer and make both abilities available
    pub fn reset(&mut self, timers: &mut TimerQueue<ArenaTimer>) {
        self.shrink.reset(timers);
        self.translucency.reset(timers);
        self.scale = 1.0;
        self.opacity = 1.0;
    }
}
