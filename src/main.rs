//! Road Rush entry point
//!
//! Native headless runner: loads settings, opens the save directory and
//! drives the game through a scripted session at a fixed frame step. A
//! windowed host would replace the script with real device input.

use road_rush::audio::{AudioDirector, LogSink};
use road_rush::consts::FRAME_DT;
use road_rush::sim::{Button, InputSnapshot};
use road_rush::{Game, SessionStore, Settings};

/// One scripted input held for a number of frames
struct Step {
    input: InputSnapshot,
    frames: u32,
}

impl Step {
    fn hold(buttons: &[Button], frames: u32) -> Self {
        Self {
            input: InputSnapshot::holding(buttons),
            frames,
        }
    }

    fn tap(button: Button) -> [Self; 2] {
        [Self::hold(&[button], 1), Self::hold(&[], 1)]
    }

    fn typing(text: &str) -> [Self; 2] {
        [
            Self {
                input: InputSnapshot::typing(text),
                frames: 1,
            },
            Self::hold(&[], 1),
        ]
    }
}

/// Start a run, try to cross once, save, return to the menu and exit
fn demo_script() -> Vec<Step> {
    let mut script = Vec::new();
    script.extend(Step::tap(Button::Confirm));
    script.push(Step::hold(&[Button::Up], 8 * 60));
    script.push(Step::hold(&[], 3 * 60));
    script.extend(Step::tap(Button::Pause));
    script.extend(Step::tap(Button::Save));
    script.extend(Step::typing("Runner"));
    script.extend(Step::tap(Button::Confirm));
    script.extend(Step::tap(Button::Menu));
    script.extend(Step::tap(Button::Back));
    script
}

fn main() {
    env_logger::init();
    log::info!("Road Rush (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Settings::FILE_NAME.to_string());
    let settings = Settings::load(&settings_path);

    let store = match SessionStore::open(&settings.save_dir) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Cannot open save directory {}: {}", settings.save_dir.display(), e);
            std::process::exit(1);
        }
    };

    let mut audio = AudioDirector::new(LogSink, &settings);
    let mut game = Game::new(settings, store);
    let mut frames = 0u64;

    'script: for step in demo_script() {
        for _ in 0..step.frames {
            game.tick(step.input.clone(), FRAME_DT);
            audio.handle_all(&game.drain_events());
            frames += 1;
            if game.quit_requested() {
                break 'script;
            }
        }
    }

    let frame = game.snapshot();
    log::info!(
        "Finished after {} frames in {}: level {}, score {}",
        frames,
        frame.mode.as_str(),
        frame.hud.level,
        frame.hud.score
    );

    if let Err(e) = game.settings().save(&settings_path) {
        log::warn!("Could not save settings: {}", e);
    }
}
