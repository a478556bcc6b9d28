//! Drag tracking: one pointer gesture from press to release.
//!
//! A tool that needs to follow the pointer registers a [`DragSession`] with
//! [`DragTracker::start_drag`]. From then on every pointer-move in the
//! viewport goes to the session's move handler, and the first release
//! terminates it: the session is taken out of the tracker (releasing both
//! listeners and any ticker it owns) and its end handler runs exactly once.

use super::events::PointerEvent;
use crate::draw::DrawingContext;
use rand::rngs::StdRng;
use std::fmt;
use std::time::{Duration, Instant};

/// Continuation run for every pointer-move of a gesture.
pub type MoveHandler = Box<dyn FnMut(&PointerEvent, &mut DrawingContext)>;
/// Hook run once when a gesture terminates.
pub type EndHandler = Box<dyn FnOnce(&PointerEvent, &mut DrawingContext)>;
/// Callback of a periodic ticker.
pub type TickHandler = Box<dyn FnMut(&mut DrawingContext, &mut StdRng)>;

/// Identifies one drag subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

/// A periodic task owned by a drag session.
pub struct Ticker {
    period: Duration,
    next_due: Instant,
    on_tick: TickHandler,
    fired: u64,
}

impl Ticker {
    fn new(period: Duration, start: Instant, on_tick: TickHandler) -> Self {
        // A zero period would never let `advance` catch up
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: start + period,
            on_tick,
            fired: 0,
        }
    }

    /// Fires every tick due at or before `now`, in order.
    fn advance(&mut self, now: Instant, cx: &mut DrawingContext, rng: &mut StdRng) -> u64 {
        let mut fired = 0;
        while self.next_due <= now {
            (self.on_tick)(cx, rng);
            self.next_due += self.period;
            fired += 1;
        }
        self.fired += fired;
        fired
    }
}

/// One in-progress gesture.
pub struct DragSession {
    id: SessionId,
    on_move: MoveHandler,
    on_end: Option<EndHandler>,
    ticker: Option<Ticker>,
    moves: u64,
}

impl DragSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Attaches a periodic task that runs every `period` starting one period
    /// after `start`. The task lives exactly as long as this session.
    pub fn every(
        &mut self,
        period: Duration,
        start: Instant,
        on_tick: impl FnMut(&mut DrawingContext, &mut StdRng) + 'static,
    ) -> &mut Self {
        if self.ticker.is_some() {
            log::warn!("Drag session {:?} already has a ticker; replacing it", self.id);
        }
        self.ticker = Some(Ticker::new(period, start, Box::new(on_tick)));
        self
    }

    fn finish(mut self, event: &PointerEvent, cx: &mut DrawingContext) {
        let ticks = self.ticker.take().map_or(0, |ticker| ticker.fired);
        log::debug!(
            "Drag session {:?} ended after {} moves and {} ticks",
            self.id,
            self.moves,
            ticks
        );
        if let Some(on_end) = self.on_end.take() {
            on_end(event, cx);
        }
    }
}

impl fmt::Debug for DragSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("id", &self.id)
            .field("has_end_hook", &self.on_end.is_some())
            .field("has_ticker", &self.ticker.is_some())
            .field("moves", &self.moves)
            .finish()
    }
}

/// Holds the active drag session of a surface, if any.
#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<DragSession>,
    next_id: u64,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `on_move` to pointer-moves and a terminator to the next
    /// pointer-release, both viewport-wide.
    ///
    /// Only one session may be active at a time and the dispatcher never
    /// starts a tool while one is. Starting a second session anyway is a
    /// caller error: debug builds panic, release builds drop the first
    /// session without running its end hook.
    pub fn start_drag(
        &mut self,
        on_move: impl FnMut(&PointerEvent, &mut DrawingContext) + 'static,
        on_end: Option<EndHandler>,
    ) -> &mut DragSession {
        debug_assert!(self.active.is_none(), "concurrent drag sessions");
        if let Some(stale) = self.active.take() {
            log::error!("Drag session started while {:?} is still active", stale.id);
        }

        self.next_id += 1;
        let id = SessionId(self.next_id);
        log::debug!("Drag session {id:?} started");
        self.active.insert(DragSession {
            id,
            on_move: Box::new(on_move),
            on_end,
            ticker: None,
            moves: 0,
        })
    }

    /// Returns true while a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Returns true while the given session is still subscribed.
    pub fn is_subscribed(&self, id: SessionId) -> bool {
        self.active.as_ref().is_some_and(|session| session.id == id)
    }

    /// Number of viewport listeners currently registered: a move listener
    /// and a release listener per active session.
    pub fn listener_count(&self) -> usize {
        if self.active.is_some() { 2 } else { 0 }
    }

    /// Routes a pointer-move to the active session. Returns false if no
    /// session is listening.
    pub fn pointer_move(&mut self, event: &PointerEvent, cx: &mut DrawingContext) -> bool {
        match self.active.as_mut() {
            Some(session) => {
                session.moves += 1;
                (session.on_move)(event, cx);
                true
            }
            None => false,
        }
    }

    /// Terminates the active session on pointer-release.
    ///
    /// The session is detached before its end hook runs, so the tracker is
    /// already idle when the hook executes. Returns false if no session was
    /// listening.
    pub fn pointer_up(&mut self, event: &PointerEvent, cx: &mut DrawingContext) -> bool {
        match self.active.take() {
            Some(session) => {
                session.finish(event, cx);
                true
            }
            None => false,
        }
    }

    /// Runs every ticker tick due by `now`. Returns the number of ticks fired.
    pub fn advance(&mut self, now: Instant, cx: &mut DrawingContext, rng: &mut StdRng) -> u64 {
        self.active
            .as_mut()
            .and_then(|session| session.ticker.as_mut())
            .map_or(0, |ticker| ticker.advance(now, cx, rng))
    }
}

impl Drop for DragTracker {
    fn drop(&mut self) {
        if let Some(session) = &self.active {
            log::warn!("Drag session {:?} dropped before its release", session.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::PaintStyle;
    use crate::input::MouseButton;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn context() -> DrawingContext {
        DrawingContext::new(20, 20, PaintStyle::default()).unwrap()
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn recording_session(tracker: &mut DragTracker, log: &Log) -> SessionId {
        let moves = Rc::clone(log);
        let ends = Rc::clone(log);
        tracker
            .start_drag(
                move |event, _cx| {
                    moves
                        .borrow_mut()
                        .push(format!("move {}", event.client_x));
                },
                Some(Box::new(move |_event: &PointerEvent, _cx: &mut DrawingContext| {
                    ends.borrow_mut().push("end".to_string());
                })),
            )
            .id()
    }

    #[test]
    fn end_fires_once_after_all_moves() {
        let mut tracker = DragTracker::new();
        let mut cx = context();
        let log: Log = Rc::default();
        let id = recording_session(&mut tracker, &log);
        assert!(tracker.is_subscribed(id));
        assert_eq!(tracker.listener_count(), 2);

        for x in 1..=3 {
            assert!(tracker.pointer_move(&PointerEvent::moved(f64::from(x), 0.0), &mut cx));
        }
        assert!(tracker.pointer_up(&PointerEvent::up(MouseButton::Left, 3.0, 0.0), &mut cx));

        // Anything after the release is no longer delivered
        assert!(!tracker.pointer_move(&PointerEvent::moved(9.0, 0.0), &mut cx));
        assert!(!tracker.pointer_up(&PointerEvent::up(MouseButton::Left, 9.0, 0.0), &mut cx));

        assert_eq!(*log.borrow(), vec!["move 1", "move 2", "move 3", "end"]);
        assert!(!tracker.is_subscribed(id));
        assert_eq!(tracker.listener_count(), 0);
    }

    #[test]
    fn release_without_moves_still_ends() {
        let mut tracker = DragTracker::new();
        let mut cx = context();
        let log: Log = Rc::default();
        recording_session(&mut tracker, &log);

        tracker.pointer_up(&PointerEvent::up(MouseButton::Left, 0.0, 0.0), &mut cx);
        assert_eq!(*log.borrow(), vec!["end"]);
        assert!(!tracker.is_active());
    }

    #[test]
    fn end_hook_runs_with_tracker_already_idle() {
        let mut tracker = DragTracker::new();
        let mut cx = context();
        let observed = Rc::new(RefCell::new(None));
        let seen = Rc::clone(&observed);
        tracker.start_drag(
            |_, _| {},
            Some(Box::new(move |event: &PointerEvent, _cx: &mut DrawingContext| {
                *seen.borrow_mut() = Some(event.client_x);
            })),
        );

        tracker.pointer_up(&PointerEvent::up(MouseButton::Right, 42.0, 0.0), &mut cx);
        assert_eq!(*observed.borrow(), Some(42.0));
    }

    #[test]
    fn ticker_fires_per_elapsed_period_and_stops_on_release() {
        let mut tracker = DragTracker::new();
        let mut cx = context();
        let mut rng = StdRng::seed_from_u64(1);
        let ticks = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&ticks);
        let start = Instant::now();

        tracker
            .start_drag(|_, _| {}, None)
            .every(Duration::from_millis(25), start, move |_cx, _rng| {
                *counter.borrow_mut() += 1;
            });

        assert_eq!(tracker.advance(start + Duration::from_millis(24), &mut cx, &mut rng), 0);
        assert_eq!(tracker.advance(start + Duration::from_millis(25), &mut cx, &mut rng), 1);
        assert_eq!(tracker.advance(start + Duration::from_millis(100), &mut cx, &mut rng), 3);
        assert_eq!(*ticks.borrow(), 4);

        tracker.pointer_up(&PointerEvent::up(MouseButton::Left, 0.0, 0.0), &mut cx);
        assert_eq!(tracker.advance(start + Duration::from_secs(5), &mut cx, &mut rng), 0);
        assert_eq!(*ticks.borrow(), 4);
    }

    #[test]
    fn session_ids_are_unique() {
        let mut tracker = DragTracker::new();
        let mut cx = context();
        let first = tracker.start_drag(|_, _| {}, None).id();
        tracker.pointer_up(&PointerEvent::up(MouseButton::Left, 0.0, 0.0), &mut cx);
        let second = tracker.start_drag(|_, _| {}, None).id();
        assert_ne!(first, second);
        assert!(!tracker.is_subscribed(first));
        assert!(tracker.is_subscribed(second));
        tracker.pointer_up(&PointerEvent::up(MouseButton::Left, 0.0, 0.0), &mut cx);
    }
}
