//! Pastel Slots entry point
//!
//! Web builds wire the session to the page; native builds run a small
//! terminal front end over the same session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement, KeyboardEvent};

    use pastel_slots::audio::{AudioManager, SoundEffect};
    use pastel_slots::consts::*;
    use pastel_slots::engine::{GameState, ReelGrid};
    use pastel_slots::ui::{self, Intent, Message, READY_MESSAGE};
    use pastel_slots::{Settings, SlotError};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        audio: AudioManager,
        /// Bumped per message so stale timeouts don't clear newer text
        message_id: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.volume());
            Self {
                state: GameState::new(seed),
                settings,
                audio,
                message_id: 0,
            }
        }

        /// Update counters and the spin button
        fn update_display(&self) {
            let doc = document();
            let s = &self.state;

            set_text(&doc, "balance", &s.balance.to_string());
            set_text(&doc, "betAmount", &s.bet_per_line().to_string());
            set_text(&doc, "totalBet", &s.total_bet().to_string());
            set_text(&doc, "lastWin", &s.last_win.to_string());
            set_text(&doc, "totalSpins", &s.total_spins.to_string());

            if let Some(btn) = doc
                .get_element_by_id("spinBtn")
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                btn.set_disabled(!s.can_spin());
            }

            // Highlight the active line-count button
            for el in elements(&doc, ".bet-btn") {
                let lines = el
                    .get_attribute("data-lines")
                    .and_then(|v| v.parse::<u8>().ok());
                let _ = el
                    .class_list()
                    .toggle_with_force("active", lines == Some(s.lines()));
            }
        }
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn set_text(doc: &Document, id: &str, text: &str) {
        if let Some(el) = doc.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn elements(doc: &Document, selector: &str) -> Vec<Element> {
        let Ok(list) = doc.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn set_timeout(ms: u32, f: impl FnOnce() + 'static) {
        let cb = Closure::once_into_js(f);
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                ms as i32,
            );
        }
    }

    fn set_modal(open: bool) {
        if let Some(modal) = document().get_element_by_id("depositModal") {
            let _ = modal.class_list().toggle_with_force("active", open);
        }
    }

    /// Show a status message, reverting to the idle text after its duration
    fn show_message(game: &Rc<RefCell<Game>>, message: Message) {
        let id = {
            let mut g = game.borrow_mut();
            g.message_id = g.message_id.wrapping_add(1);
            g.message_id
        };
        set_text(&document(), "messageText", &message.text);

        let game = game.clone();
        set_timeout(message.duration_ms, move || {
            if game.borrow().message_id == id {
                set_text(&document(), "messageText", READY_MESSAGE);
            }
        });
    }

    /// Flip a preference, persist it and apply it to the audio
    fn change_setting(game: &Rc<RefCell<Game>>, intent: Intent) {
        let message = {
            let mut g = game.borrow_mut();
            let message = ui::apply_setting(&mut g.settings, intent);
            g.settings.save();
            let volume = g.settings.volume();
            g.audio.set_volume(volume);
            log::info!(
                "Sound {}, speed {}",
                if g.settings.sound { "on" } else { "off" },
                g.settings.spin_speed.as_str()
            );
            message
        };
        if let Some(message) = message {
            show_message(game, message);
        }
    }

    /// Route a player intent through the session and update the page
    fn dispatch(game: &Rc<RefCell<Game>>, intent: Intent) {
        match intent {
            Intent::ShowDeposit => return set_modal(true),
            Intent::HideDeposit => return set_modal(false),
            _ if intent.is_setting() => return change_setting(game, intent),
            _ => {}
        }

        let (message, started, deposited, duration) = {
            let mut g = game.borrow_mut();
            let was_spinning = g.state.is_spinning();
            let balance = g.state.balance;
            let message = ui::apply_intent(&mut g.state, intent);
            let started = !was_spinning && g.state.is_spinning();
            let deposited = matches!(intent, Intent::Deposit(_)) && g.state.balance > balance;

            match intent {
                Intent::Spin if started => g.audio.play(SoundEffect::Spin),
                Intent::IncreaseBet
                | Intent::DecreaseBet
                | Intent::SetLines(_)
                | Intent::MaxBet => g.audio.play(SoundEffect::Bet),
                Intent::Deposit(_) if deposited => g.audio.play(SoundEffect::Bet),
                _ => {}
            }
            g.update_display();
            (message, started, deposited, g.settings.spin_duration_ms())
        };

        if deposited {
            set_modal(false);
        }
        if started {
            start_reels();
            let game = game.clone();
            set_timeout(duration, move || finish_spin(&game));
        }
        if let Some(message) = message {
            show_message(game, message);
        }
    }

    fn start_reels() {
        let doc = document();
        for line in 0..ROWS {
            if let Some(el) = doc.get_element_by_id(&format!("line{}", line + 1)) {
                let _ = el.class_list().remove_1("active");
            }
        }
        for i in 0..REELS {
            if let Some(reel) = doc.get_element_by_id(&format!("reel{}", i + 1)) {
                let _ = reel.class_list().add_1("spinning");
            }
        }
    }

    fn show_grid(doc: &Document, grid: &ReelGrid) {
        for (i, symbols) in grid.reels().iter().enumerate() {
            let Some(reel) = doc.get_element_by_id(&format!("reel{}", i + 1)) else {
                continue;
            };
            let _ = reel.class_list().remove_1("spinning");
            let Ok(cells) = reel.query_selector_all(".symbol") else {
                continue;
            };
            for (row, symbol) in symbols.iter().enumerate() {
                if let Some(cell) = cells.get(row as u32) {
                    cell.set_text_content(Some(symbol.as_str()));
                }
            }
        }
    }

    /// Reels stopped: credit the payout and reveal it
    fn finish_spin(game: &Rc<RefCell<Game>>) {
        let outcome = {
            let mut g = game.borrow_mut();
            let outcome = match g.state.finish_spin() {
                Ok(outcome) => outcome,
                Err(SlotError::NoPendingSpin) => return,
                Err(e) => {
                    log::warn!("Could not resolve spin: {}", e);
                    return;
                }
            };
            g.audio.play(SoundEffect::for_outcome(&outcome));
            g.update_display();
            outcome
        };

        let doc = document();
        show_grid(&doc, &outcome.grid);
        for line in &outcome.winning_lines {
            if let Some(el) = doc.get_element_by_id(&format!("line{}", line + 1)) {
                let _ = el.class_list().add_1("active");
            }
        }
        show_message(game, ui::outcome_message(&outcome));
    }

    fn on_click(el: &Element, game: &Rc<RefCell<Game>>, intent: Intent) {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            dispatch(&game, intent);
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click_id(doc: &Document, id: &str, game: &Rc<RefCell<Game>>, intent: Intent) {
        if let Some(el) = doc.get_element_by_id(id) {
            on_click(&el, game, intent);
        }
    }

    fn setup_controls(game: &Rc<RefCell<Game>>) {
        let doc = document();

        on_click_id(&doc, "spinBtn", game, Intent::Spin);
        on_click_id(&doc, "maxBetBtn", game, Intent::MaxBet);
        on_click_id(&doc, "increaseBet", game, Intent::IncreaseBet);
        on_click_id(&doc, "decreaseBet", game, Intent::DecreaseBet);
        on_click_id(&doc, "closeModal", game, Intent::HideDeposit);
        on_click_id(&doc, "resetBtn", game, Intent::Reset);

        if let Some(lever) = doc.query_selector(".lever").ok().flatten() {
            on_click(&lever, game, Intent::Spin);
        }
        if let Some(slot) = doc.query_selector(".coin-slot").ok().flatten() {
            on_click(&slot, game, Intent::ShowDeposit);
        }

        for btn in elements(&doc, ".bet-btn") {
            if let Some(lines) = btn
                .get_attribute("data-lines")
                .and_then(|v| v.parse::<u8>().ok())
            {
                on_click(&btn, game, Intent::SetLines(lines));
            }
        }

        for btn in elements(&doc, ".deposit-btn") {
            if let Some(amount) = btn
                .get_attribute("data-amount")
                .and_then(|v| v.parse::<i64>().ok())
            {
                on_click(&btn, game, Intent::Deposit(amount));
            }
        }

        // Typed deposit
        if let Some(btn) = doc.get_element_by_id("customDepositBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(input) = document()
                    .get_element_by_id("customAmount")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                match ui::typed_deposit(&input.value()) {
                    Ok(intent) => {
                        let before = game.borrow().state.balance;
                        dispatch(&game, intent);
                        if game.borrow().state.balance > before {
                            input.set_value("");
                        }
                    }
                    Err(message) => show_message(&game, message),
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: &Rc<RefCell<Game>>) {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(intent) = ui::intent_for_key(&event.code()) else {
                return;
            };
            if intent == Intent::Spin {
                event.prevent_default();
                if game.borrow().state.is_spinning() {
                    return;
                }
            }
            dispatch(&game, intent);
        });
        let _ = document()
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pastel Slots starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Session started with seed: {}", seed);

        setup_controls(&game);
        setup_keyboard(&game);
        game.borrow().update_display();
        set_text(&document(), "messageText", READY_MESSAGE);

        log::info!("Press SPACE to spin, D to deposit, M for max bet, S to toggle sound, F for spin speed.");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use clap::Parser;

    use pastel_slots::consts::*;
    use pastel_slots::engine::{GameState, SpinOutcome};
    use pastel_slots::ui::{self, Intent};

    #[derive(Parser)]
    #[command(name = "pastel-slots", about = "Play Pastel Slots in the terminal")]
    struct Cli {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Number of spins to play
        #[arg(long, default_value_t = 1)]
        spins: u32,
        /// Credits wagered per line
        #[arg(long, default_value_t = DEFAULT_BET_PER_LINE,
              value_parser = clap::value_parser!(u64).range(MIN_BET..=MAX_BET))]
        bet: u64,
        /// Active paylines
        #[arg(long, default_value_t = DEFAULT_LINES,
              value_parser = clap::value_parser!(u8).range(MIN_LINES as i64..=MAX_LINES as i64))]
        lines: u8,
        /// Credits to deposit before playing
        #[arg(long, allow_hyphen_values = true)]
        deposit: Option<i64>,
        /// Print outcomes and the final state as JSON lines
        #[arg(long)]
        json: bool,
    }

    fn print_outcome(outcome: &SpinOutcome) {
        for row in 0..ROWS {
            let cells: Vec<&str> = outcome.grid.row(row).iter().map(|s| s.as_str()).collect();
            let mark = if outcome.winning_lines.contains(&(row as u8)) {
                "  <- WIN"
            } else {
                ""
            };
            println!("  {}{}", cells.join(" | "), mark);
        }
        println!(
            "#{} bet {} net {:+} -> {}",
            outcome.spin_number,
            outcome.total_bet(),
            outcome.net(),
            ui::outcome_message(outcome).text
        );
    }

    pub fn run() {
        let cli = Cli::parse();
        let seed = cli.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        });

        let mut state = GameState::new(seed);
        if let Err(e) = state.set_bet(cli.bet) {
            log::warn!("{}", e);
        }
        if let Err(e) = state.set_lines(cli.lines) {
            log::warn!("{}", e);
        }
        log::info!("Session started with seed: {}", seed);

        if let Some(amount) = cli.deposit {
            if let Some(message) = ui::apply_intent(&mut state, Intent::Deposit(amount)) {
                log::info!("{}", message.text);
            }
        }

        for _ in 0..cli.spins {
            let message = ui::apply_intent(&mut state, Intent::Spin);
            if !state.is_spinning() {
                log::warn!(
                    "{}",
                    message.map(|m| m.text).unwrap_or_else(|| "Spin rejected".into())
                );
                break;
            }
            let outcome = match state.finish_spin() {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("{}", e);
                    break;
                }
            };

            if cli.json {
                if let Ok(json) = serde_json::to_string(&outcome) {
                    println!("{}", json);
                }
            } else {
                print_outcome(&outcome);
            }
        }

        let snapshot = state.snapshot();
        if cli.json {
            if let Ok(json) = serde_json::to_string(&snapshot) {
                println!("{}", json);
            }
        } else {
            println!(
                "balance {} | spins {} | wagered {} | won {}",
                snapshot.balance, snapshot.total_spins, snapshot.total_wagered, snapshot.total_won
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
