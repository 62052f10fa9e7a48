use super::{Role, RoleEvent};
use crossbeam_channel::{RecvTimeoutError, Sender};
use std::{
    io, thread,
    time::{Duration, Instant},
};

const SECOND: Duration = Duration::from_secs(1);

/// Time left until the next whole second counted from `anchor`.
pub(crate) fn until_next_second(anchor: Instant, now: Instant) -> Duration {
    let elapsed = now.saturating_duration_since(anchor);
    SECOND - Duration::from_nanos(elapsed.subsec_nanos() as u64)
}

/// Sleep until the next second boundary, or until stopped. Returns the stop sender.
pub(crate) fn spawn(anchor: Instant, events: Sender<RoleEvent>) -> io::Result<Sender<()>> {
    let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);

    thread::Builder::new()
        .name(Role::Ticker.to_string())
        .spawn(move || {
            let wait = until_next_second(anchor, Instant::now());
            let interrupted = !matches!(stop_rx.recv_timeout(wait), Err(RecvTimeoutError::Timeout));
            let _ = events.send(RoleEvent::Tick { interrupted });
        })?;

    Ok(stop_tx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_the_remainder_of_the_second() {
        let anchor = Instant::now();

        assert_eq!(until_next_second(anchor, anchor), SECOND);
        assert_eq!(
            until_next_second(anchor, anchor + Duration::from_millis(2_250)),
            Duration::from_millis(750)
        );
    }

    #[test]
    fn future_anchor_counts_as_zero() {
        let now = Instant::now();
        assert_eq!(until_next_second(now + Duration::from_secs(5), now), SECOND);
    }

    #[test]
    fn natural_tick_is_not_interrupted() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let anchor = Instant::now() - Duration::from_millis(950);
        let _stop = spawn(anchor, tx).unwrap();

        match rx.recv_timeout(Duration::from_secs(2)).unwrap() {
            RoleEvent::Tick { interrupted } => assert!(!interrupted),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn stop_cuts_the_tick_short() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let stop = spawn(Instant::now(), tx).unwrap();
        stop.send(()).unwrap();

        match rx.recv_timeout(Duration::from_millis(500)).unwrap() {
            RoleEvent::Tick { interrupted } => assert!(interrupted),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
