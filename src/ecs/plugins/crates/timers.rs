use bevy::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrateTimer {
    /// Reconcile live crates into the roster.
    Scan,
    /// Redraw the crate counters for admins with the menu open.
    UiRefresh,
    /// Kill every loot container; only runs while an admin has it enabled.
    AutoKill,
}

impl CrateTimer {
    pub const ALL: [CrateTimer; 3] = [CrateTimer::Scan, CrateTimer::UiRefresh, CrateTimer::AutoKill];
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerElapsed(pub CrateTimer);

/// Named repeating timers. Starting a running timer restarts it with the new
/// interval; stopping a stopped one does nothing.
#[derive(Resource, Debug, Default)]
pub struct CrateTimers {
    timers: HashMap<CrateTimer, Timer>,
}

impl CrateTimers {
    pub fn start(&mut self, kind: CrateTimer, interval: Duration) {
        self.timers.insert(kind, Timer::new(interval, TimerMode::Repeating));
    }

    /// Returns whether the timer was running.
    pub fn stop(&mut self, kind: CrateTimer) -> bool {
        self.timers.remove(&kind).is_some()
    }

    pub fn stop_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_running(&self, kind: CrateTimer) -> bool {
        self.timers.contains_key(&kind)
    }

    /// Advances every running timer and lists the ones that fired, in
    /// declaration order. A timer fires at most once per tick.
    pub fn tick(&mut self, delta: Duration) -> Vec<CrateTimer> {
        CrateTimer::ALL
            .into_iter()
            .filter(|kind| {
                self.timers
                    .get_mut(kind)
                    .is_some_and(|timer| timer.tick(delta).just_finished())
            })
            .collect()
    }
}

pub fn tick_crate_timers_system(
    time: Res<Time>,
    mut timers: ResMut<CrateTimers>,
    mut elapsed: EventWriter<TimerElapsed>,
) {
    for kind in timers.tick(time.delta()) {
        elapsed.send(TimerElapsed(kind));
    }
}
