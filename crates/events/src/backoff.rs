use std::time::Duration;

use rand::Rng;

/// Jittered exponential backoff for reconnect scheduling.
///
/// The ceiling doubles per failed attempt up to `cap`; each delay is
/// drawn uniformly from the upper half of the current ceiling so retries
/// from many clients spread out instead of thundering together.
#[derive(Debug)]
pub struct Backoff {
	base: Duration,
	cap: Duration,
	attempt: u32,
}

impl Backoff {
	pub fn new(base: Duration, cap: Duration) -> Self {
		Self {
			base,
			cap,
			attempt: 0,
		}
	}

	/// Ceiling for the next delay, before jitter.
	pub fn ceiling(&self) -> Duration {
		let exp = self.base.saturating_mul(2u32.saturating_pow(self.attempt));
		exp.min(self.cap)
	}

	/// Draws the next delay and advances the attempt counter.
	pub fn next_delay(&mut self) -> Duration {
		let ceiling = self.ceiling();
		self.attempt = self.attempt.saturating_add(1);

		let ceiling_ms = ceiling.as_millis() as u64;
		if ceiling_ms == 0 {
			return Duration::ZERO;
		}

		let floor_ms = ceiling_ms / 2;
		Duration::from_millis(rand::thread_rng().gen_range(floor_ms..=ceiling_ms))
	}

	/// Called after a successful connection so the next failure starts
	/// over from the base delay.
	pub fn reset(&mut self) {
		self.attempt = 0;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ceiling_doubles_and_caps() {
		let mut backoff = Backoff::new(Duration::from_secs(1), Duration::from_secs(8));

		assert_eq!(backoff.ceiling(), Duration::from_secs(1));
		backoff.next_delay();
		assert_eq!(backoff.ceiling(), Duration::from_secs(2));
		backoff.next_delay();
		assert_eq!(backoff.ceiling(), Duration::from_secs(4));
		backoff.next_delay();
		assert_eq!(backoff.ceiling(), Duration::from_secs(8));
		backoff.next_delay();
		assert_eq!(backoff.ceiling(), Duration::from_secs(8));
	}

	#[test]
	fn test_delay_stays_within_jitter_window() {
		let mut backoff = Backoff::new(Duration::from_millis(100), Duration::from_secs(60));

		for _ in 0..20 {
			let ceiling = backoff.ceiling();
			let delay = backoff.next_delay();
			assert!(delay <= ceiling);
			assert!(delay >= ceiling / 2);
		}
	}

	#[test]
	fn test_reset_returns_to_base() {
		let mut backoff = Backoff::new(Duration::from_secs(1), Duration::from_secs(60));
		backoff.next_delay();
		backoff.next_delay();
		backoff.reset();

		assert_eq!(backoff.ceiling(), Duration::from_secs(1));
	}
}
