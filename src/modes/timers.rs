//! Game timers that only exist while a game is running

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::Phase;

/// Tick and big-food timers
///
/// Both are dropped whenever the game leaves [`Phase::Running`], so nothing
/// queued before a pause, reset or game over can fire afterwards. Re-arming
/// waits one full period before the first fire.
#[derive(Default)]
pub struct GameTimers {
    pub tick: Option<Interval>,
    pub big_food: Option<Interval>,
    tick_period: Option<Duration>,
}

impl GameTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm or clear the timers for the current phase
    ///
    /// A changed tick period restarts the tick timer.
    pub fn sync(&mut self, phase: Phase, tick_period: Duration, big_food_period: Option<Duration>) {
        if phase != Phase::Running {
            self.clear();
            return;
        }

        if self.tick.is_none() || self.tick_period != Some(tick_period) {
            self.tick = Some(Self::delayed(tick_period));
            self.tick_period = Some(tick_period);
        }

        match big_food_period {
            Some(period) if self.big_food.is_none() => {
                self.big_food = Some(Self::delayed(period));
            }
            Some(_) => {}
            None => self.big_food = None,
        }
    }

    pub fn clear(&mut self) {
        self.tick = None;
        self.big_food = None;
        self.tick_period = None;
    }

    pub fn is_armed(&self) -> bool {
        self.tick.is_some()
    }

    /// Wait for the next fire of `timer`, forever if it is not armed
    pub async fn wait(timer: &mut Option<Interval>) {
        match timer {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    fn delayed(period: Duration) -> Interval {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(200);

    #[tokio::test]
    async fn test_armed_only_while_running() {
        let mut timers = GameTimers::new();

        timers.sync(Phase::NotStarted, TICK, None);
        assert!(!timers.is_armed());

        timers.sync(Phase::Running, TICK, Some(Duration::from_secs(15)));
        assert!(timers.is_armed());
        assert!(timers.big_food.is_some());

        for phase in [Phase::Paused, Phase::GameOver, Phase::NotStarted] {
            timers.sync(Phase::Running, TICK, Some(Duration::from_secs(15)));
            timers.sync(phase, TICK, Some(Duration::from_secs(15)));
            assert!(!timers.is_armed(), "{:?}", phase);
            assert!(timers.big_food.is_none(), "{:?}", phase);
        }
    }

    #[tokio::test]
    async fn test_no_big_food_timer_without_period() {
        let mut timers = GameTimers::new();
        timers.sync(Phase::Running, TICK, None);

        assert!(timers.is_armed());
        assert!(timers.big_food.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut timers = GameTimers::new();
        timers.sync(Phase::Running, TICK, None);
        let start = Instant::now();

        GameTimers::wait(&mut timers.tick).await;
        assert!(start.elapsed() >= TICK);

        GameTimers::wait(&mut timers.tick).await;
        assert!(start.elapsed() >= TICK * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_period_change_restarts_tick() {
        let mut timers = GameTimers::new();
        timers.sync(Phase::Running, TICK, None);
        tokio::time::advance(Duration::from_millis(150)).await;

        let hard = Duration::from_millis(100);
        timers.sync(Phase::Running, hard, None);
        let restarted = Instant::now();

        GameTimers::wait(&mut timers.tick).await;
        assert!(restarted.elapsed() >= hard);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unarmed_timer_never_fires() {
        let mut timers = GameTimers::new();

        let fired = tokio::time::timeout(Duration::from_secs(60), GameTimers::wait(&mut timers.tick))
            .await;
        assert!(fired.is_err());
    }
}
