//! Player behaviour on tokio's paused clock.

use std::cell::RefCell;
use std::time::Duration;

use morse_translator_core::{
    Clock, MorseError, MorseResult, NoTone, PlayOutcome, PlaybackConfig, Player, SignalEmitter,
    ToneEmitter,
};
use tokio::time::{Instant, sleep};

struct Lamp {
    start: Instant,
    events: RefCell<Vec<(u64, bool)>>,
}

impl Lamp {
    fn new(start: Instant) -> Self {
        Lamp {
            start,
            events: RefCell::new(Vec::new()),
        }
    }

    fn on_times(&self) -> Vec<u64> {
        self.events
            .borrow()
            .iter()
            .filter(|(_, on)| *on)
            .map(|(t, _)| *t)
            .collect()
    }
}

impl SignalEmitter for Lamp {
    fn set_signal(&self, on: bool) {
        let t = self.start.elapsed().as_millis() as u64;
        self.events.borrow_mut().push((t, on));
    }
}

#[derive(Default)]
struct Speaker {
    pulses: RefCell<Vec<Duration>>,
    silenced: RefCell<u32>,
}

impl ToneEmitter for Speaker {
    fn play_tone(&self, frequency_hz: f64, duration: Duration) -> MorseResult<()> {
        assert_eq!(frequency_hz, 600.0);
        self.pulses.borrow_mut().push(duration);
        Ok(())
    }

    fn silence(&self) {
        *self.silenced.borrow_mut() += 1;
    }
}

#[derive(Default)]
struct SleepClock {
    waits: RefCell<Vec<Duration>>,
}

impl Clock for SleepClock {
    async fn wait(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
        sleep(duration).await;
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn assert_near(actual: u64, expected: u64) {
    assert!(
        actual.abs_diff(expected) <= 10,
        "expected ~{expected} ms, got {actual} ms"
    );
}

#[tokio::test(start_paused = true)]
async fn sos_follows_unit_timing() {
    let start = Instant::now();
    let (lamp, speaker, clock) = (Lamp::new(start), Speaker::default(), SleepClock::default());
    let player = Player::new(&lamp, &speaker, &clock, PlaybackConfig::default()).unwrap();

    let outcome = player.play("... --- ...").await;

    assert_eq!(outcome, PlayOutcome::Finished { iterations: 1 });
    assert_near(start.elapsed().as_millis() as u64, 1680);

    let expected_on = [0, 120, 240, 480, 720, 960, 1320, 1440, 1560];
    let on = lamp.on_times();
    assert_eq!(on.len(), expected_on.len());
    for (actual, expected) in on.into_iter().zip(expected_on) {
        assert_near(actual, expected);
    }

    assert_eq!(
        *speaker.pulses.borrow(),
        vec![ms(60), ms(60), ms(60), ms(180), ms(180), ms(180), ms(60), ms(60), ms(60)]
    );
    assert!(!player.is_playing());
    // Signal always ends off.
    assert_eq!(lamp.events.borrow().last().map(|e| e.1), Some(false));
}

#[tokio::test(start_paused = true)]
async fn loop_pauses_once_then_restarts_from_first_token() {
    let start = Instant::now();
    let (lamp, speaker, clock) = (Lamp::new(start), Speaker::default(), SleepClock::default());
    let player = Player::new(&lamp, &speaker, &clock, PlaybackConfig::default()).unwrap();
    player.session().set_loop(true);

    let (outcome, _) = tokio::join!(player.play(".-"), async {
        // Inside the second repetition (3360..3720 ms).
        sleep(ms(3400)).await;
        player.session().set_loop(false);
    });

    assert_eq!(outcome, PlayOutcome::Finished { iterations: 2 });
    assert_eq!(
        *clock.waits.borrow(),
        vec![
            ms(60),
            ms(60),
            ms(180),
            ms(60),
            ms(3000),
            ms(60),
            ms(60),
            ms(180),
            ms(60),
        ]
    );
    let on = lamp.on_times();
    assert_eq!(on.len(), 4);
    assert_near(on[2], 3360);
    assert_near(start.elapsed().as_millis() as u64, 3720);
}

#[tokio::test(start_paused = true)]
async fn disabling_loop_during_pause_prevents_restart() {
    let (lamp, speaker, clock) = (
        Lamp::new(Instant::now()),
        Speaker::default(),
        SleepClock::default(),
    );
    let player = Player::new(&lamp, &speaker, &clock, PlaybackConfig::default()).unwrap();
    player.session().set_loop(true);

    let (outcome, _) = tokio::join!(player.play("."), async {
        sleep(ms(1000)).await;
        assert!(!player.toggle_loop());
    });

    assert_eq!(outcome, PlayOutcome::Finished { iterations: 1 });
    assert_eq!(speaker.pulses.borrow().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_mid_sequence_halts_and_silences() {
    let start = Instant::now();
    let (lamp, speaker, clock) = (Lamp::new(start), Speaker::default(), SleepClock::default());
    let player = Player::new(&lamp, &speaker, &clock, PlaybackConfig::default()).unwrap();

    let (outcome, _) = tokio::join!(player.play("... --- ..."), async {
        // During the second dot of the first S.
        sleep(ms(130)).await;
        assert!(player.is_playing());
        assert!(player.stop());
    });

    assert_eq!(outcome, PlayOutcome::Stopped { iterations: 0 });
    assert_eq!(speaker.pulses.borrow().len(), 2);
    assert_eq!(*speaker.silenced.borrow(), 1);
    assert_eq!(lamp.on_times().len(), 2);

    // The signal went off at the stop request, not only at the end.
    let events = lamp.events.borrow();
    assert!(events.iter().any(|&(t, on)| !on && t.abs_diff(130) <= 1));
    // The pulse in flight finishes its own wait; nothing after it.
    assert_near(start.elapsed().as_millis() as u64, 240);
    assert!(!player.is_playing());
    assert!(!player.session().is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn play_while_playing_is_ignored() {
    let (lamp, speaker, clock) = (
        Lamp::new(Instant::now()),
        Speaker::default(),
        SleepClock::default(),
    );
    let player = Player::new(&lamp, &speaker, &clock, PlaybackConfig::default()).unwrap();

    let (first, second) = tokio::join!(player.play("-"), async {
        sleep(ms(10)).await;
        let events_before = lamp.events.borrow().len();
        let outcome = player.play("...").await;
        assert_eq!(lamp.events.borrow().len(), events_before);
        outcome
    });

    assert_eq!(first, PlayOutcome::Finished { iterations: 1 });
    assert_eq!(second, PlayOutcome::AlreadyPlaying);
    assert_eq!(*speaker.pulses.borrow(), vec![ms(180)]);
}

#[tokio::test(start_paused = true)]
async fn nothing_to_play_leaves_state_untouched() {
    let (lamp, speaker, clock) = (
        Lamp::new(Instant::now()),
        Speaker::default(),
        SleepClock::default(),
    );
    let player = Player::new(&lamp, &speaker, &clock, PlaybackConfig::default()).unwrap();

    assert_eq!(player.play("").await, PlayOutcome::NothingToPlay);
    assert_eq!(player.play("  \n ").await, PlayOutcome::NothingToPlay);
    assert_eq!(player.play("abc / ").await, PlayOutcome::NothingToPlay);
    assert!(!player.is_playing());
    assert!(lamp.events.borrow().is_empty());
    assert!(clock.waits.borrow().is_empty());
}

#[tokio::test(start_paused = true)]
async fn stop_when_idle_is_a_no_op() {
    let (lamp, speaker, clock) = (
        Lamp::new(Instant::now()),
        Speaker::default(),
        SleepClock::default(),
    );
    let player = Player::new(&lamp, &speaker, &clock, PlaybackConfig::default()).unwrap();

    assert!(!player.stop());
    assert!(lamp.events.borrow().is_empty());
    assert_eq!(*speaker.silenced.borrow(), 0);
    // A later play is not affected by the earlier stop.
    assert_eq!(player.play(".").await, PlayOutcome::Finished { iterations: 1 });
}

#[tokio::test(start_paused = true)]
async fn mute_applies_from_next_pulse() {
    let (lamp, speaker, clock) = (
        Lamp::new(Instant::now()),
        Speaker::default(),
        SleepClock::default(),
    );
    let player = Player::new(&lamp, &speaker, &clock, PlaybackConfig::default()).unwrap();

    let (outcome, _) = tokio::join!(player.play("-.-"), async {
        // During the first dash.
        sleep(ms(100)).await;
        assert!(player.toggle_mute());
    });

    assert_eq!(outcome, PlayOutcome::Finished { iterations: 1 });
    assert_eq!(*speaker.pulses.borrow(), vec![ms(180)]);
    assert_eq!(lamp.on_times().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn rate_change_applies_on_next_repetition() {
    let (lamp, speaker, clock) = (
        Lamp::new(Instant::now()),
        Speaker::default(),
        SleepClock::default(),
    );
    let player = Player::new(&lamp, &speaker, &clock, PlaybackConfig::default()).unwrap();
    player.session().set_loop(true);

    let (outcome, _) = tokio::join!(player.play("."), async {
        // First repetition at 20 WPM, change during it.
        sleep(ms(30)).await;
        player.set_wpm(10).unwrap();
        // Second repetition starts at 3120 ms; stop looping inside it.
        sleep(ms(3200)).await;
        player.session().set_loop(false);
    });

    assert_eq!(outcome, PlayOutcome::Finished { iterations: 2 });
    assert_eq!(*speaker.pulses.borrow(), vec![ms(60), ms(120)]);
}

#[tokio::test(start_paused = true)]
async fn session_resets_after_stop() {
    let (lamp, speaker, clock) = (
        Lamp::new(Instant::now()),
        Speaker::default(),
        SleepClock::default(),
    );
    let player = Player::new(&lamp, &speaker, &clock, PlaybackConfig::default()).unwrap();

    let (outcome, _) = tokio::join!(player.play("----"), async {
        sleep(ms(50)).await;
        player.stop();
    });
    assert_eq!(outcome, PlayOutcome::Stopped { iterations: 0 });

    assert_eq!(player.play(".").await, PlayOutcome::Finished { iterations: 1 });
}

#[tokio::test(start_paused = true)]
async fn silent_tone_device_keeps_signal_timing() {
    let start = Instant::now();
    let (lamp, clock) = (Lamp::new(start), SleepClock::default());
    let player = Player::new(&lamp, NoTone, &clock, PlaybackConfig::default()).unwrap();

    assert_eq!(player.play("-.").await, PlayOutcome::Finished { iterations: 1 });

    let on = lamp.on_times();
    assert_eq!(on.len(), 2);
    assert_near(on[1], 240);
    assert_eq!(*clock.waits.borrow(), vec![ms(180), ms(60), ms(60), ms(60)]);
    assert_near(start.elapsed().as_millis() as u64, 360);
}

#[test]
fn invalid_config_is_rejected() {
    let (lamp, speaker, clock) = (
        Lamp::new(Instant::now()),
        Speaker::default(),
        SleepClock::default(),
    );
    let config = PlaybackConfig {
        wpm: 0,
        ..Default::default()
    };
    let result = Player::new(&lamp, &speaker, &clock, config);
    assert!(matches!(result, Err(MorseError::InvalidWpm { value: 0 })));
}
