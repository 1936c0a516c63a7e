//! Delayed advance after an exclusive choice.

use std::{future, pin::Pin, time::Duration};

use tokio::time::Sleep;

/// Identifies one scheduled auto-advance.
///
/// Issued by the wizard when a radio option is chosen. A ticket is only honored
/// while it is the wizard's pending ticket: a newer choice, or any navigation,
/// makes older tickets stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoAdvanceTicket {
    step: usize,
    generation: u64,
}

impl AutoAdvanceTicket {
    pub(crate) fn new(step: usize, generation: u64) -> Self {
        Self { step, generation }
    }

    /// The step the choice was made on.
    pub fn step(&self) -> usize {
        self.step
    }
}

/// A single cancellable deferred callback.
///
/// Holds at most one pending ticket. Arming again replaces the pending ticket
/// and restarts the delay; cancelling drops it. `fired` resolves when the delay
/// of the pending ticket elapses and never resolves while nothing is armed, so
/// it can sit in a `tokio::select!` next to input handling.
#[derive(Debug)]
pub struct AutoAdvanceTimer {
    delay: Duration,
    pending: Option<(AutoAdvanceTicket, Pin<Box<Sleep>>)>,
}

impl AutoAdvanceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `ticket`, replacing anything already pending.
    ///
    /// Must be called from within a Tokio runtime with the time driver enabled.
    pub fn arm(&mut self, ticket: AutoAdvanceTicket) {
        tracing::trace!(
            step = ticket.step,
            delay_ms = self.delay.as_millis() as u64,
            "auto-advance armed"
        );
        self.pending = Some((ticket, Box::pin(tokio::time::sleep(self.delay))));
    }

    /// Drop the pending ticket, if any.
    pub fn cancel(&mut self) -> Option<AutoAdvanceTicket> {
        let cancelled = self.pending.take().map(|(ticket, _)| ticket);
        if let Some(ticket) = cancelled {
            tracing::trace!(step = ticket.step, "auto-advance cancelled");
        }
        cancelled
    }

    pub fn pending(&self) -> Option<AutoAdvanceTicket> {
        self.pending.as_ref().map(|(ticket, _)| *ticket)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the pending ticket's delay to elapse and hand the ticket out.
    ///
    /// Cancel-safe: dropping the future before it completes leaves the ticket
    /// armed with its original deadline.
    pub async fn fired(&mut self) -> AutoAdvanceTicket {
        let Some((ticket, sleep)) = self.pending.as_mut() else {
            return future::pending().await;
        };
        sleep.as_mut().await;
        let ticket = *ticket;
        self.pending = None;
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let mut timer = AutoAdvanceTimer::new(Duration::from_millis(300));
        let ticket = AutoAdvanceTicket::new(4, 1);
        let start = Instant::now();

        timer.arm(ticket);
        assert_eq!(timer.fired().await, ticket);

        assert!(start.elapsed() >= Duration::from_millis(300));
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_restarts_the_delay() {
        let mut timer = AutoAdvanceTimer::new(Duration::from_millis(300));
        timer.arm(AutoAdvanceTicket::new(4, 1));
        tokio::time::advance(Duration::from_millis(200)).await;

        let start = Instant::now();
        let newer = AutoAdvanceTicket::new(4, 2);
        timer.arm(newer);

        assert_eq!(timer.fired().await, newer);
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn unarmed_timer_never_fires() {
        let mut timer = AutoAdvanceTimer::new(Duration::from_millis(300));
        timer.arm(AutoAdvanceTicket::new(4, 1));
        assert!(timer.cancel().is_some());

        let outcome = tokio::time::timeout(Duration::from_secs(5), timer.fired()).await;
        assert!(outcome.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_wait_keeps_the_ticket() {
        let mut timer = AutoAdvanceTimer::new(Duration::from_millis(300));
        let ticket = AutoAdvanceTicket::new(4, 1);
        timer.arm(ticket);

        let early = tokio::time::timeout(Duration::from_millis(100), timer.fired()).await;
        assert!(early.is_err());
        assert_eq!(timer.pending(), Some(ticket));

        assert_eq!(timer.fired().await, ticket);
    }
}
