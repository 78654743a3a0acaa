//! Application state: the intro phase machine, tick scheduling, and the
//! slots the renderer reads.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::runtime::Runtime;
use tracing::{error, info, warn};

use crate::animation::{FRAME_INTERVAL, Reel};
use crate::art;
use crate::calendar::{CalendarLinks, EventDetails};
use crate::config::Settings;
use crate::countdown::{Countdown, CountdownDisplay};
use crate::guests::{self, GuestBoard};
use crate::player::MusicPlayer;
use crate::popup::PopupRegistry;
use crate::scroll::{AutoScroll, PageScroll};
use crate::theme::Theme;

/// How long the intro keeps covering the page after the bloom ends.
pub const INTRO_FADE: Duration = Duration::from_millis(1500);
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    /// Static rose, waiting for the first press.
    Waiting,
    /// The bloom reel is running.
    Blooming,
    /// Bloom finished; the intro is fading out over the page.
    Fading { since: Instant },
    /// Intro removed, page fully interactive.
    Done,
}

pub struct App {
    pub settings: Settings,
    pub details: EventDetails,
    pub theme: Theme,

    pub intro: IntroPhase,
    pub rose: Reel,

    pub countdown: Countdown,
    pub countdown_display: Option<CountdownDisplay>,
    pub guest_board: Arc<Mutex<GuestBoard>>,
    pub links: CalendarLinks,
    pub popups: PopupRegistry,
    pub page: PageScroll,
    pub auto_scroll: AutoScroll,

    player: Box<dyn MusicPlayer>,
    revealed: bool,
    next_countdown_tick: Option<Instant>,
    next_frame_tick: Instant,
}

impl App {
    pub fn new(settings: Settings, player: Box<dyn MusicPlayer>) -> anyhow::Result<Self> {
        let details = settings.event_details()?;
        let target = settings.countdown_target_utc()?;
        let now = Instant::now();

        Ok(Self {
            popups: PopupRegistry::new(&details),
            details,
            theme: Theme::default(),
            intro: IntroPhase::Waiting,
            rose: Reel::new(&art::BLOOM_FRAMES),
            countdown: Countdown::new(target),
            countdown_display: None,
            guest_board: Arc::new(Mutex::new(GuestBoard::pending())),
            links: CalendarLinks::default(),
            page: PageScroll::default(),
            auto_scroll: AutoScroll::default(),
            player,
            revealed: false,
            // first countdown tick fires on the first loop pass
            next_countdown_tick: Some(now),
            next_frame_tick: now + FRAME_INTERVAL,
            settings,
        })
    }

    /// First key or mouse press on the static rose: start the music and
    /// the bloom reel. Ignored outside the waiting phase.
    pub fn begin_intro(&mut self) {
        if self.intro != IntroPhase::Waiting {
            return;
        }
        if let Err(err) = self.player.play() {
            warn!("music playback unavailable: {err:#}");
        }
        self.intro = IntroPhase::Blooming;
        self.rose.rewind();
        self.rose.play();
    }

    /// Jump straight past the intro, running the same one-shot reveal.
    pub fn skip_intro(&mut self, rt: &Runtime, now: Instant) {
        self.intro = IntroPhase::Done;
        self.reveal(rt, now);
    }

    /// Advance every due cadence: the one-second countdown, the frame
    /// reels, the intro fade-out, and the auto-scroll drift.
    pub fn tick(&mut self, now: Instant, now_utc: DateTime<Utc>, rt: &Runtime) {
        if let Some(due) = self.next_countdown_tick {
            if due <= now {
                if let Some(update) = self.countdown.tick(now_utc) {
                    self.countdown_display = Some(update);
                }
                self.next_countdown_tick = if self.countdown.is_expired() {
                    None
                } else {
                    let mut next = due + COUNTDOWN_INTERVAL;
                    if next <= now {
                        // resnap after a stall instead of burst-firing
                        next = now + COUNTDOWN_INTERVAL;
                    }
                    Some(next)
                };
            }
        }

        if now >= self.next_frame_tick {
            self.advance_frames(rt, now);
            let mut next = self.next_frame_tick + FRAME_INTERVAL;
            if next <= now {
                next = now + FRAME_INTERVAL;
            }
            self.next_frame_tick = next;
        }

        if let IntroPhase::Fading { since } = self.intro {
            if now.duration_since(since) >= INTRO_FADE {
                self.intro = IntroPhase::Done;
            }
        }

        self.auto_scroll.on_tick(now, &mut self.page);
    }

    fn advance_frames(&mut self, rt: &Runtime, now: Instant) {
        if self.intro == IntroPhase::Blooming && self.rose.advance() {
            self.intro_ended(rt, now);
        }
        self.popups.gala.advance();
    }

    /// The bloom reel's end edge. Reached at most once per run: the reel
    /// pauses itself on its final frame and the phase leaves `Blooming`.
    fn intro_ended(&mut self, rt: &Runtime, now: Instant) {
        self.intro = IntroPhase::Fading { since: now };
        self.reveal(rt, now);
    }

    /// Start the downstream work exactly once: the guest-count fetch, the
    /// calendar links, and the auto-scroll drift.
    pub fn reveal(&mut self, rt: &Runtime, now: Instant) {
        if self.revealed {
            return;
        }
        self.revealed = true;
        info!("invitation revealed");

        self.spawn_guest_fetch(rt);
        self.links.fill(&self.details, Utc::now());
        if self.settings.auto_scroll {
            self.auto_scroll.start(now);
        }
    }

    fn spawn_guest_fetch(&self, rt: &Runtime) {
        let url = self.settings.sheet_url.clone();
        let board = Arc::clone(&self.guest_board);
        rt.spawn(async move {
            let outcome = match guests::fetch_client() {
                Ok(client) => guests::fetch_guest_count(&client, &url).await,
                Err(err) => Err(err),
            };
            let mut slot = board.lock().unwrap();
            match outcome {
                Ok(count) => slot.settle(count.to_string()),
                Err(err) => {
                    error!("guest count fetch failed: {err}");
                    slot.settle(guests::FALLBACK_COUNT);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::ARRIVED_MESSAGE;
    use crate::player::RecordingPlayer;
    use crate::popup;

    fn test_app(settings: Settings) -> (App, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
        let player = RecordingPlayer::default();
        let counter = player.counter();
        let app = App::new(settings, Box::new(player)).unwrap();
        (app, counter)
    }

    fn drive_through_bloom(app: &mut App, rt: &Runtime, start: Instant) -> Instant {
        app.begin_intro();
        let mut now = start;
        for _ in 0..=art::BLOOM_FRAMES.len() {
            now += FRAME_INTERVAL;
            app.tick(now, Utc::now(), rt);
            if !matches!(app.intro, IntroPhase::Blooming) {
                break;
            }
        }
        now
    }

    #[test]
    fn first_press_starts_music_and_bloom_once() {
        let (mut app, counter) = test_app(Settings::for_tests());

        app.begin_intro();
        assert_eq!(app.intro, IntroPhase::Blooming);
        assert!(app.rose.is_playing());
        assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 1);

        app.begin_intro();
        assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn bloom_end_fades_the_intro_and_starts_downstream_work() {
        let rt = Runtime::new().unwrap();
        let (mut app, _) = test_app(Settings::for_tests());
        let start = Instant::now();

        let ended = drive_through_bloom(&mut app, &rt, start);

        assert!(matches!(app.intro, IntroPhase::Fading { .. }));
        assert!(app.links.google().is_some());
        assert!(app.links.ics().is_some());
        assert!(app.auto_scroll.is_running());

        // dead port, so the fetch settles on the fallback
        for _ in 0..200 {
            if !app.guest_board.lock().unwrap().loading {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        let board = app.guest_board.lock().unwrap();
        assert!(!board.loading);
        assert_eq!(board.text, guests::FALLBACK_COUNT);
        drop(board);

        app.tick(ended + INTRO_FADE, Utc::now(), &rt);
        assert_eq!(app.intro, IntroPhase::Done);
    }

    #[test]
    fn reveal_does_not_rearm_a_stopped_auto_scroll() {
        let rt = Runtime::new().unwrap();
        let (mut app, _) = test_app(Settings::for_tests());
        let now = Instant::now();

        app.skip_intro(&rt, now);
        assert!(app.auto_scroll.is_running());

        app.auto_scroll.stop();
        app.reveal(&rt, now + Duration::from_secs(1));
        assert!(!app.auto_scroll.is_running());
    }

    #[test]
    fn disabled_auto_scroll_stays_off_after_reveal() {
        let rt = Runtime::new().unwrap();
        let mut settings = Settings::for_tests();
        settings.auto_scroll = false;
        let (mut app, _) = test_app(settings);

        app.skip_intro(&rt, Instant::now());
        assert!(!app.auto_scroll.is_running());
    }

    #[test]
    fn past_target_arrives_on_the_first_tick_and_stays_arrived() {
        let rt = Runtime::new().unwrap();
        let mut settings = Settings::for_tests();
        settings.countdown_target = "2020-01-01 00:00:00".into();
        let (mut app, _) = test_app(settings);
        let now = Instant::now();

        app.tick(now, Utc::now(), &rt);
        assert!(app.countdown.is_expired());
        assert!(matches!(app.countdown_display, Some(CountdownDisplay::Arrived)));
        assert_eq!(ARRIVED_MESSAGE, "The day is here!");

        app.tick(now + COUNTDOWN_INTERVAL * 3, Utc::now(), &rt);
        assert!(matches!(app.countdown_display, Some(CountdownDisplay::Arrived)));
    }

    #[test]
    fn gala_reel_advances_while_the_rsvp_popup_is_open() {
        let rt = Runtime::new().unwrap();
        let (mut app, _) = test_app(Settings::for_tests());
        let start = Instant::now();
        app.skip_intro(&rt, start);

        app.popups.toggle(popup::RSVP_POPUP);
        assert_eq!(app.popups.gala.frame_index(), 0);

        app.tick(start + FRAME_INTERVAL, Utc::now(), &rt);
        assert_eq!(app.popups.gala.frame_index(), 1);

        app.popups.toggle(popup::RSVP_POPUP);
        app.tick(start + FRAME_INTERVAL * 2, Utc::now(), &rt);
        assert_eq!(app.popups.gala.frame_index(), 1);
    }
}
