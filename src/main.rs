//! Perfect Circle entry point
//!
//! Web: wires the drawing canvas, scoring and leaderboard into the page.
//! Native: scores a JSON file of sample points from the command line.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, MouseEvent, TouchEvent};

    use perfect_circle::analysis::CircleAnalysis;
    use perfect_circle::audio::AudioManager;
    use perfect_circle::confetti::ConfettiBurst;
    use perfect_circle::feedback::{FeedbackCue, FeedbackSink, cues_for};
    use perfect_circle::gesture::{CanvasMapping, GestureOutcome, GestureRecorder, RoundPhase};
    use perfect_circle::highscores::{HighScoreRecord, Leaderboard, PersonalBest, device_id};
    use perfect_circle::rating::{ScoreBand, ScoreTier, count_up_frames, count_up_interval_ms, format_score};
    use perfect_circle::platform::now_ms;
    use perfect_circle::{Point, Settings, share};

    /// Delay before an open path is cleared
    const NOT_CLOSED_RESET_MS: f64 = 500.0;
    /// Delay before a timed-out round is cleared
    const TIMEOUT_RESET_MS: f64 = 1500.0;

    const STROKE_COLOR: &str = "#06b6d4";
    const TARGET_COLOR: &str = "#ef4444";

    /// Page state for one player session
    struct Game {
        recorder: GestureRecorder,
        settings: Settings,
        audio: AudioManager,
        leaderboard: Leaderboard,
        personal_best: PersonalBest,
        record: HighScoreRecord,
        /// Last scored round, waiting for a leaderboard name
        pending: Option<CircleAnalysis>,
        last_score: Option<f64>,
        /// Count-up frames and the time they started
        count_up: Option<(Vec<f64>, f64)>,
        reset_at: Option<f64>,
        confetti: Option<(ConfettiBurst, f64)>,
        rng: Pcg32,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        confetti_ctx: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
    }

    impl Game {
        fn new(
            canvas: HtmlCanvasElement,
            ctx: CanvasRenderingContext2d,
            confetti_ctx: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
        ) -> Self {
            let settings = Settings::load();
            let recorder = GestureRecorder::new(settings.time_limit_ms(), settings.search_window());
            Self {
                recorder,
                audio: AudioManager::from_settings(&settings),
                settings,
                leaderboard: Leaderboard::load(),
                personal_best: PersonalBest::load(),
                record: HighScoreRecord::load(),
                pending: None,
                last_score: None,
                count_up: None,
                reset_at: None,
                confetti: None,
                rng: Pcg32::seed_from_u64(now_ms() as u64),
                canvas,
                ctx,
                confetti_ctx,
            }
        }

        fn mapping(&self) -> CanvasMapping {
            let rect = self.canvas.get_bounding_client_rect();
            CanvasMapping::new(
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            )
        }

        fn pointer_down(&mut self, client_x: f64, client_y: f64, now: f64) {
            let point = self.mapping().to_canvas(client_x, client_y);
            if self.recorder.begin(point, now) {
                self.reset_at = None;
                self.audio.resume();
                self.clear_canvas();
                self.draw_target();
                set_hidden("result", true);
                set_hidden("name-entry", true);
            }
        }

        fn pointer_move(&mut self, client_x: f64, client_y: f64, now: f64) {
            let point = self.mapping().to_canvas(client_x, client_y);
            if let Some(previous) = self.recorder.extend(point, now) {
                self.draw_segment(previous, point);
            }
        }

        fn pointer_up(&mut self, now: f64) {
            match self.recorder.finish(now) {
                GestureOutcome::Scored(analysis) => self.show_result(analysis, now),
                GestureOutcome::NotClosed { .. } => {
                    set_text("status", "Close the loop to get a score!");
                    self.reset_at = Some(now + NOT_CLOSED_RESET_MS);
                }
                GestureOutcome::Ignored => {}
            }
        }

        fn show_result(&mut self, analysis: CircleAnalysis, now: f64) {
            let score = analysis.display_score();
            self.last_score = Some(score);

            let made_leaderboard = self.leaderboard.qualifies(score);
            let new_best = self.personal_best.record(score);
            if new_best {
                self.personal_best.save();
            }

            let cues = cues_for(score, made_leaderboard, new_best);
            self.audio.cue_all(&cues);

            self.draw_fit(&analysis);

            let band = ScoreBand::from_score(score);
            let tier = ScoreTier::from_score(score);
            self.count_up = Some((count_up_frames(score), now));
            set_text("score-value", &format_score(0.0));
            set_text("score-message", band.message());
            set_attr("score-value", "data-tier", tier.as_str());
            set_hidden("new-record", !new_best);
            set_hidden("result", false);
            if let Some(best) = self.personal_best.best {
                set_text("personal-best", &format_score(best));
            }

            if made_leaderboard {
                self.pending = Some(analysis);
                if let Some(rank) = self.leaderboard.potential_rank(score) {
                    set_text("name-prompt", &format!("You made the leaderboard at #{}!", rank));
                }
                set_hidden("name-entry", false);
                if self.settings.confetti && cues.contains(&FeedbackCue::Celebration) {
                    self.start_confetti(now);
                }
            }
        }

        fn submit_name(&mut self, name: &str) {
            let Some(analysis) = self.pending else {
                return;
            };
            let score = analysis.display_score();
            let device = device_id(&mut self.rng, now_ms() as u64);
            let created_at = String::from(js_sys::Date::new_0().to_iso_string());

            if let Some(rank) = self
                .leaderboard
                .add_entry(name, score, Some(device), Some(created_at))
            {
                log::info!("Leaderboard rank {} with {:.1}%", rank, score);
                self.leaderboard.save();
                if self.record.claim(name, score) {
                    self.record.save();
                }
                self.pending = None;
                set_hidden("name-entry", true);
                self.render_leaderboard();
            }
        }

        fn tick(&mut self, now: f64) {
            if self.recorder.check_timeout(now) {
                self.audio.cue(FeedbackCue::Timeout);
                set_text("status", "Time's up!");
                self.reset_at = Some(now + TIMEOUT_RESET_MS);
            }

            if self.recorder.phase() == RoundPhase::Drawing {
                set_text("timer", &format!("Time: {}s", self.recorder.seconds_left(now)));
            }

            if let Some(at) = self.reset_at {
                if now >= at {
                    self.reset();
                }
            }

            self.update_count_up(now);
            self.update_confetti(now);
        }

        fn update_count_up(&mut self, now: f64) {
            let Some((frames, started)) = &self.count_up else {
                return;
            };
            let index = ((now - started) / count_up_interval_ms()) as usize;
            if let Some(value) = frames.get(index).or(frames.last()) {
                set_text("score-value", &format_score(*value));
            }
            if index + 1 >= frames.len() {
                self.count_up = None;
            }
        }

        fn reset(&mut self) {
            self.recorder.reset();
            self.reset_at = None;
            self.pending = None;
            self.count_up = None;
            self.clear_canvas();
            self.draw_target();
            set_text("status", "Draw a perfect circle");
            set_text("timer", "");
            set_hidden("result", true);
            set_hidden("name-entry", true);
        }

        // === Drawing ===

        fn clear_canvas(&self) {
            self.ctx.clear_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );
        }

        /// Red dot marking the canvas center
        fn draw_target(&self) {
            let cx = self.canvas.width() as f64 / 2.0;
            let cy = self.canvas.height() as f64 / 2.0;
            self.ctx.set_fill_style_str(TARGET_COLOR);
            self.ctx.begin_path();
            let _ = self.ctx.arc(cx, cy, 4.0, 0.0, std::f64::consts::TAU);
            self.ctx.fill();
        }

        fn draw_segment(&self, from: Point, to: Point) {
            self.ctx.set_line_width(3.0);
            self.ctx.set_line_cap("round");
            self.ctx.set_line_join("round");
            self.ctx.set_stroke_style_str(STROKE_COLOR);
            self.ctx.begin_path();
            self.ctx.move_to(from.x, from.y);
            self.ctx.line_to(to.x, to.y);
            self.ctx.stroke();
        }

        /// Faint outline of the estimated circle
        fn draw_fit(&self, analysis: &CircleAnalysis) {
            if analysis.average_radius <= 0.0 {
                return;
            }
            let tier = ScoreTier::from_score(analysis.score);
            self.ctx.set_global_alpha(0.5);
            self.ctx.set_line_width(1.0);
            self.ctx.set_stroke_style_str(tier.color());
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                analysis.center.x,
                analysis.center.y,
                analysis.average_radius,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.stroke();
            self.ctx.set_global_alpha(1.0);
        }

        fn start_confetti(&mut self, now: f64) {
            let Some((canvas, _)) = &self.confetti_ctx else {
                return;
            };
            self.confetti = Some((ConfettiBurst::new(now as u64, canvas.width() as f64), now));
        }

        fn update_confetti(&mut self, now: f64) {
            let Some((canvas, ctx)) = &self.confetti_ctx else {
                return;
            };
            let width = canvas.width() as f64;
            let height = canvas.height() as f64;
            ctx.clear_rect(0.0, 0.0, width, height);

            let Some((burst, started)) = &mut self.confetti else {
                return;
            };
            if burst.is_expired(now - *started) {
                self.confetti = None;
                return;
            }
            burst.step(height);
            for piece in &burst.pieces {
                ctx.save();
                let _ = ctx.translate(piece.x, piece.y);
                let _ = ctx.rotate(piece.rotation.to_radians());
                ctx.set_fill_style_str(piece.color);
                ctx.fill_rect(-piece.size / 2.0, -piece.size / 2.0, piece.size, piece.size);
                ctx.restore();
            }
        }

        fn render_leaderboard(&self) {
            let lines: Vec<String> = self
                .leaderboard
                .entries
                .iter()
                .enumerate()
                .map(|(i, e)| format!("{}. {} - {}", i + 1, e.username, format_score(e.score)))
                .collect();
            set_text("leaderboard-list", &lines.join("\n"));
            set_text(
                "record-holder",
                &format!("{} ({})", self.record.name, format_score(self.record.score)),
            );
        }
    }

    // === DOM helpers ===

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_attr(id: &str, name: &str, value: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute(name, value);
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        set_attr(id, "class", if hidden { "hidden" } else { "" });
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
        canvas.get_context("2d").ok()??.dyn_into().ok()
    }

    /// Match the backing store to the element size at the device pixel ratio
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) {
        let dpr = window.device_pixel_ratio();
        canvas.set_width((canvas.client_width() as f64 * dpr) as u32);
        canvas.set_height((canvas.client_height() as f64 * dpr) as u32);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Perfect Circle starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        fit_canvas(&window, &canvas);
        let ctx = context_2d(&canvas).expect("no 2d context");

        let confetti_ctx = document
            .get_element_by_id("confetti-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|c| {
                fit_canvas(&window, &c);
                context_2d(&c).map(|ctx| (c, ctx))
            });

        let game = Rc::new(RefCell::new(Game::new(canvas.clone(), ctx, confetti_ctx)));
        {
            let g = game.borrow();
            g.draw_target();
            g.render_leaderboard();
            if let Some(best) = g.personal_best.best {
                set_text("personal-best", &format_score(best));
            }
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Perfect Circle running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer_down(
                    event.client_x() as f64,
                    event.client_y() as f64,
                    now_ms(),
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer_move(
                    event.client_x() as f64,
                    event.client_y() as f64,
                    now_ms(),
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up / leaving the canvas both end the gesture
        for event_name in ["mouseup", "mouseleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pointer_up(now_ms());
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().pointer_down(
                        touch.client_x() as f64,
                        touch.client_y() as f64,
                        now_ms(),
                    );
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().pointer_move(
                        touch.client_x() as f64,
                        touch.client_y() as f64,
                        now_ms(),
                    );
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().pointer_up(now_ms());
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("play-again-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("share-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let Some(score) = game.borrow().last_score else {
                    return;
                };
                let Some(window) = web_sys::window() else {
                    return;
                };
                let page = window.location().href().unwrap_or_default();
                if let Some(url) = share::tweet_url(score, &page) {
                    let _ = window.open_with_url_and_target(&url, "_blank");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("name-submit") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let name = document_input_value("name-input");
                game.borrow_mut().submit_name(&name);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn document_input_value(id: &str) -> String {
        document()
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().tick(now_ms());
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();

    let cli = cli::Cli::parse();
    if let Err(e) = cli::run(&cli) {
        log::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::Read;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use perfect_circle::analysis::{Point, analyze_report, sample_circle};
    use perfect_circle::feedback::{FeedbackSink, RecordingSink, cues_for};
    use perfect_circle::rating::{ScoreBand, format_score};
    use perfect_circle::{Settings, share};

    #[derive(Parser, Debug)]
    #[command(
        name = "perfect-circle",
        version,
        about = "Score a freehand circle drawn as a JSON array of {\"x\", \"y\"} points"
    )]
    pub struct Cli {
        /// Settings JSON (center search window)
        #[arg(long, value_name = "FILE")]
        pub settings: Option<PathBuf>,

        /// Score a synthetic 64-point circle instead of reading points
        #[arg(long, conflicts_with = "input")]
        pub demo: bool,

        /// Points file, or '-' for stdin
        #[arg(value_name = "FILE|-", required_unless_present = "demo")]
        pub input: Option<String>,
    }

    fn read_settings(path: &Path) -> Result<Settings> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings = Settings::from_json(&json)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn read_points(input: &str) -> Result<Vec<Point>> {
        let json = if input == "-" {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .context("reading points from stdin")?;
            json
        } else {
            std::fs::read_to_string(input).with_context(|| format!("reading points {}", input))?
        };
        serde_json::from_str(&json).with_context(|| format!("parsing points {}", input))
    }

    /// Closed 64-point circle, the reference input for a near-perfect score
    fn demo_points() -> Vec<Point> {
        let mut points = sample_circle(Point::new(200.0, 200.0), 100.0, 64);
        points.push(points[0]);
        points
    }

    pub fn run(cli: &Cli) -> Result<()> {
        let settings = match &cli.settings {
            Some(path) => read_settings(path)?,
            None => Settings::default(),
        };

        let points = match (&cli.input, cli.demo) {
            (_, true) => demo_points(),
            (Some(input), false) => read_points(input)?,
            (None, false) => bail!("no points given; pass a FILE, '-' or --demo"),
        };

        log::info!("Scoring {} samples", points.len());
        let report = analyze_report(&points, &settings.search_window());
        let score = report.analysis.display_score();

        // One-shot runs keep no history, so only the score cue applies
        let mut sink = RecordingSink::default();
        sink.cue_all(&cues_for(score, false, false));
        log::info!("Feedback cues: {:?}", sink.cues);

        println!("{}", serde_json::to_string_pretty(&report)?);
        println!(
            "{} {}",
            format_score(score),
            ScoreBand::from_score(score).message()
        );
        println!("{}", share::share_text(score));
        Ok(())
    }

}
