//! Steady Drop entry point
//!
//! Terminal front-end: reads key events, drives the session at a fixed
//! cadence, and renders the drop's tilt. All game logic lives in the library;
//! this binary is presentation plumbing.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use steady_drop::consts::TICK_HZ;
use steady_drop::input::{InputTracker, Zone, ZoneEvent};
use steady_drop::score::MID_THRESHOLD_SECS;
use steady_drop::{GamePhase, GameResult, Session, Tuning};

/// Which exclusive view is mounted, keyed by session status
enum Screen {
    Start,
    Playing,
    Finished(GameResult),
}

/// Key taps are converted to short press pulses, since terminals deliver no
/// key-release events; repeat events keep extending the deadline.
const PRESS_PULSE_MS: u64 = 120;

struct App {
    session: Session,
    screen: Screen,
    show_rules: bool,
    tracker: InputTracker,
    epoch: Instant,
    left_until: Instant,
    right_until: Instant,
    last_frame: Instant,
    accumulator: f64,
    width: u16,
    height: u16,
}

impl App {
    fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let now = Instant::now();
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Ok(Self {
            session: Session::new(seed, Tuning::default()),
            screen: Screen::Start,
            show_rules: false,
            tracker: InputTracker::new(),
            epoch: now,
            left_until: now,
            right_until: now,
            last_frame: now,
            accumulator: 0.0,
            width,
            height,
        })
    }

    fn now_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn begin_session(&mut self) {
        self.tracker.clear();
        self.session.start(self.now_secs());
        self.screen = Screen::Playing;
    }

    /// Drain pending key events; returns false to quit
    fn handle_input(&mut self) -> io::Result<bool> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) => {
                    let pressish =
                        k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat;
                    if !pressish {
                        continue;
                    }

                    match k.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(false);
                        }
                        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => {
                            self.show_rules = !self.show_rules;
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => self.begin_session(),
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            if matches!(self.screen, Screen::Start | Screen::Finished(_)) {
                                self.begin_session();
                            }
                        }
                        KeyCode::Left | KeyCode::Char('z') | KeyCode::Char('Z') => {
                            self.tracker.apply(ZoneEvent::Press(Zone::Left));
                            self.left_until = Instant::now()
                                + Duration::from_millis(PRESS_PULSE_MS);
                        }
                        KeyCode::Right | KeyCode::Char('x') | KeyCode::Char('X') => {
                            self.tracker.apply(ZoneEvent::Press(Zone::Right));
                            self.right_until = Instant::now()
                                + Duration::from_millis(PRESS_PULSE_MS);
                        }
                        _ => {}
                    }
                }
                Event::Resize(w, h) => {
                    self.width = w;
                    self.height = h;
                }
                _ => {}
            }
        }
        Ok(true)
    }

    /// Expire press pulses, turning them into releases
    fn update_pulses(&mut self, now: Instant) {
        if now > self.left_until {
            self.tracker.apply(ZoneEvent::Release(Zone::Left));
        }
        if now > self.right_until {
            self.tracker.apply(ZoneEvent::Release(Zone::Right));
        }
    }

    /// Run fixed-rate session ticks out of the frame accumulator
    fn update(&mut self) {
        let tick_dt = 1.0 / TICK_HZ;
        while self.accumulator >= tick_dt {
            self.accumulator -= tick_dt;
            if self.session.phase() != GamePhase::Running {
                continue;
            }
            self.session.set_input(self.tracker.signals());
            if let Some(result) = self.session.tick(self.now_secs()) {
                self.screen = Screen::Finished(result);
            }
        }
    }
}

fn write_text_line(buf: &mut [u8], w: usize, y: usize, text: &str) {
    if w == 0 || y >= buf.len() / w {
        return;
    }
    let bytes = text.as_bytes();
    let len = bytes.len().min(w.saturating_sub(1));
    buf[y * w..y * w + len].copy_from_slice(&bytes[..len]);
}

fn write_centered(buf: &mut [u8], w: usize, y: usize, text: &str) {
    let x = (w.saturating_sub(text.len())) / 2;
    if w == 0 || y >= buf.len() / w {
        return;
    }
    let bytes = text.as_bytes();
    let len = bytes.len().min(w.saturating_sub(x));
    buf[y * w + x..y * w + x + len].copy_from_slice(&bytes[..len]);
}

/// Draw the drop as a tilted column of glyphs above the baseline
fn draw_drop(buf: &mut [u8], w: usize, h: usize, angle_deg: f32) {
    let base_y = (h * 3) / 4;
    let cx = w / 2;
    let drop_h = (h / 3).clamp(4, 14);
    let rad = angle_deg.to_radians();

    // Baseline
    if base_y < h {
        for x in 0..w {
            buf[base_y * w + x] = b'-';
        }
    }

    // Terminal cells are ~2x taller than wide
    for i in 0..drop_h {
        let dx = (rad.sin() * i as f32 * 2.0).round() as i32;
        let x = cx as i32 + dx;
        let y = base_y as i32 - 1 - i as i32;
        if x >= 0 && (x as usize) < w && y >= 0 && (y as usize) < h {
            let glyph = if i + 2 >= drop_h { b'@' } else { b'o' };
            buf[(y as usize) * w + x as usize] = glyph;
        }
    }
}

fn render(app: &App, out: &mut Stdout) -> io::Result<()> {
    let w = app.width as usize;
    let h = app.height as usize;
    if w == 0 || h == 0 {
        return Ok(());
    }

    let mut buf = vec![b' '; w * h];
    let mut hud = String::new();
    let mut hud_color = Color::White;

    match &app.screen {
        Screen::Start => {
            write_centered(&mut buf, w, h / 3, "S T E A D Y   D R O P");
            write_centered(&mut buf, w, h / 3 + 2, "keep the water drop standing");
            write_centered(
                &mut buf,
                w,
                h / 3 + 5,
                "[Enter] start   [?] rules   [Q] quit",
            );
        }
        Screen::Playing => {
            let snap = app.session.snapshot();
            draw_drop(&mut buf, w, h, snap.angle);
            write_centered(
                &mut buf,
                w,
                h.saturating_sub(3),
                "< hold Left . balance . hold Right >",
            );

            hud = format!(
                "time {:>5.1}s | tilt {:>6.1} deg | [</>] push  [R] restart  [?] rules  [Q] quit",
                snap.elapsed_secs, snap.angle
            );
            // Timer turns "water" colored once the mid tier is locked in
            hud_color = if snap.elapsed_secs >= MID_THRESHOLD_SECS {
                Color::Cyan
            } else {
                Color::White
            };
        }
        Screen::Finished(result) => {
            let mut stars = String::new();
            for i in 0..3u8 {
                stars.push_str(if i < result.score { "* " } else { ". " });
            }
            write_centered(&mut buf, w, h / 3, stars.trim_end());
            write_centered(&mut buf, w, h / 3 + 2, &result.message);
            write_centered(&mut buf, w, h / 3 + 3, &result.sub_message);
            write_centered(
                &mut buf,
                w,
                h / 3 + 5,
                &format!("stood for {:.1}s", result.duration_secs),
            );
            write_centered(&mut buf, w, h / 3 + 7, "[R] play again   [Q] quit");
        }
    }

    if app.show_rules {
        let rules = [
            "+--------------- RULES ---------------+",
            "| The drop is balanced on its tip.    |",
            "| It drifts, and tilting feeds on     |",
            "| itself. Push against the lean with  |",
            "| Left/Right before it passes 45 deg. |",
            "| Stand for 20s to win.               |",
            "|                                     |",
            "| [?] close                           |",
            "+-------------------------------------+",
        ];
        let top = h.saturating_sub(rules.len()) / 2;
        for (i, line) in rules.iter().enumerate() {
            write_centered(&mut buf, w, top + i, line);
        }
    }

    write_text_line(&mut buf, w, 0, &hud);

    let mut frame = String::with_capacity((w + 2) * h);
    for y in 0..h {
        frame.push_str(&String::from_utf8_lossy(&buf[y * w..(y + 1) * w]));
        if y + 1 < h {
            frame.push('\r');
            frame.push('\n');
        }
    }

    execute!(
        out,
        cursor::MoveTo(0, 0),
        SetForegroundColor(hud_color),
        Print(frame),
        ResetColor
    )?;
    out.flush()?;
    Ok(())
}

fn run(out: &mut Stdout) -> io::Result<()> {
    let mut app = App::new()?;
    let frame_cap = Duration::from_millis(16);

    loop {
        let now = Instant::now();
        let dt = (now - app.last_frame).as_secs_f64().min(0.05);
        app.last_frame = now;
        app.accumulator += dt;

        if !app.handle_input()? {
            break;
        }
        app.update_pulses(now);
        app.update();
        render(&app, out)?;

        std::thread::sleep(frame_cap);
    }

    Ok(())
}

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Steady Drop starting...");

    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, cursor::Hide)?;

    let res = run(&mut out);

    execute!(out, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}
