//! Top-level coordinator
//!
//! [`Game`] owns every component and routes one frame of input to whichever
//! mode is active. Every mode has a handler, and every transition goes
//! through [`GameStateMachine::switch`] so it is logged in one place.
//! Storage failures are logged and leave the game where it was.

use crate::consts::MAX_FRAME_DT;
use crate::menu::{MainMenu, MenuOption, NameEntry, OptionsMenu, SaveBrowser};
use crate::sessions::SessionStore;
use crate::settings::Settings;
use crate::sim::{
    Button, FrameInput, GameEvent, GameMode, GameStateMachine, InputSnapshot, InputTracker,
    TickOutcome, World, tick,
};
use crate::snapshot::{FrameSnapshot, build_frame_snapshot};

pub struct Game {
    machine: GameStateMachine,
    world: World,
    store: SessionStore,
    settings: Settings,
    input: InputTracker,
    main_menu: MainMenu,
    options: OptionsMenu,
    browser: SaveBrowser,
    name: NameEntry,
    quit_requested: bool,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: Settings, store: SessionStore) -> Self {
        let mut world = World::new(
            settings.screen_width,
            settings.screen_height,
            settings.road_width,
            settings.points_to_next_level,
        );
        world.reset(settings.road_style.road_type());

        Self {
            machine: GameStateMachine::new(),
            world,
            store,
            options: OptionsMenu::showing(settings.road_style),
            settings,
            input: InputTracker::new(),
            main_menu: MainMenu::default(),
            browser: SaveBrowser::default(),
            name: NameEntry::default(),
            quit_requested: false,
            events: vec![GameEvent::MenuMusic],
        }
    }

    pub fn mode(&self) -> GameMode {
        self.machine.mode()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn main_menu(&self) -> &MainMenu {
        &self.main_menu
    }

    pub fn options_menu(&self) -> &OptionsMenu {
        &self.options
    }

    pub fn browser(&self) -> &SaveBrowser {
        &self.browser
    }

    pub fn name_entry(&self) -> &NameEntry {
        &self.name
    }

    /// Set once the player chose Exit (or pressed Back on the main menu).
    /// The host decides what quitting means.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        build_frame_snapshot(self)
    }

    /// Run one frame
    pub fn tick(&mut self, snapshot: InputSnapshot, dt: f32) {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        let input = self.input.advance(snapshot);

        match self.machine.mode() {
            GameMode::MainMenu => self.update_main_menu(&input),
            GameMode::Playing => self.update_playing(&input, dt),
            GameMode::Paused => self.update_paused(&input),
            GameMode::Options => self.update_options(&input),
            GameMode::About | GameMode::HowToPlay => self.update_info(&input),
            GameMode::Saving => self.update_saving(&input),
            GameMode::Loading => self.update_loading(&input),
            GameMode::Won => self.update_won(&input),
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn to_main_menu(&mut self) {
        self.machine.switch(GameMode::MainMenu);
        self.main_menu.reset();
        self.emit(GameEvent::MenuMusic);
    }

    /// Follow the current mode's Back edge
    fn go_back(&mut self) {
        match self.machine.mode().parent() {
            Some(GameMode::MainMenu) => self.to_main_menu(),
            Some(parent) => {
                self.machine.switch(parent);
            }
            None => self.request_quit(),
        }
    }

    // === Per-mode handlers ===

    fn update_main_menu(&mut self, input: &FrameInput) {
        if input.pressed(Button::Back) {
            self.go_back();
            return;
        }
        if input.pressed(Button::Up) {
            self.main_menu.previous();
        }
        if input.pressed(Button::Down) {
            self.main_menu.next();
        }
        if !input.pressed(Button::Confirm) {
            return;
        }

        match self.main_menu.selected() {
            MenuOption::Play => self.start_new_run(),
            MenuOption::Load => {
                self.refresh_browser();
                self.browser.reset();
                self.machine.switch(GameMode::Loading);
            }
            MenuOption::Options => {
                self.options = OptionsMenu::showing(self.settings.road_style);
                self.machine.switch(GameMode::Options);
            }
            MenuOption::HowToPlay => {
                self.machine.switch(GameMode::HowToPlay);
            }
            MenuOption::About => {
                self.machine.switch(GameMode::About);
            }
            MenuOption::Exit => self.request_quit(),
        }
    }

    fn update_playing(&mut self, input: &FrameInput, dt: f32) {
        // The interstitial can't be interrupted
        if !self.world.progression.is_loading() {
            if input.pressed(Button::Pause) {
                self.machine.switch(GameMode::Paused);
                return;
            }
            if input.pressed(Button::Back) {
                self.go_back();
                return;
            }
        }

        let outcome = tick(&mut self.world, input.movement(), dt);
        self.events.extend(self.world.drain_events());

        if outcome == TickOutcome::Won {
            log::info!("Game won with {} points", self.world.score());
            self.machine.switch(GameMode::Won);
        }
    }

    fn update_paused(&mut self, input: &FrameInput) {
        if input.pressed(Button::Save) {
            self.name.clear();
            self.machine.switch(GameMode::Saving);
        } else if input.pressed(Button::Resume) {
            self.machine.switch(GameMode::Playing);
        } else if input.pressed(Button::Menu) {
            self.to_main_menu();
        } else if input.pressed(Button::Back) {
            self.go_back();
        }
    }

    fn update_options(&mut self, input: &FrameInput) {
        if input.pressed(Button::Back) {
            self.go_back();
            return;
        }
        if input.pressed(Button::Up) {
            self.options.previous();
        }
        if input.pressed(Button::Down) {
            self.options.next();
        }
        if input.pressed(Button::Confirm) {
            let style = self.options.selected();
            self.settings.road_style = style;
            self.world.road_style = style.road_type();
            log::info!("Road style set to {}", style.as_str());
            self.machine.switch(GameMode::MainMenu);
        }
    }

    fn update_info(&mut self, input: &FrameInput) {
        if input.pressed(Button::Back) || input.pressed(Button::Confirm) {
            self.go_back();
        }
    }

    fn update_saving(&mut self, input: &FrameInput) {
        if input.pressed(Button::Back) {
            self.name.clear();
            self.go_back();
            return;
        }

        self.name.type_chars(&input.text);
        if input.pressed(Button::Erase) {
            self.name.erase();
        }

        if input.pressed(Button::Confirm) {
            if self.name.is_blank() {
                log::warn!("Save ignored: name is empty");
                return;
            }
            match self.store.save(
                self.name.as_str(),
                self.world.score(),
                self.world.level(),
                self.world.road,
            ) {
                Ok(_) => self.emit(GameEvent::Saved),
                Err(e) => log::warn!("Save failed: {}", e),
            }
            self.name.clear();
            self.machine.switch(GameMode::Paused);
        }
    }

    fn update_loading(&mut self, input: &FrameInput) {
        if input.pressed(Button::Back) {
            self.go_back();
            return;
        }
        if input.pressed(Button::Up) {
            self.browser.previous();
        }
        if input.pressed(Button::Down) {
            self.browser.next();
        }
        if input.pressed(Button::Delete) {
            self.delete_selected();
        } else if input.pressed(Button::Confirm) {
            self.load_selected();
        }
    }

    fn update_won(&mut self, input: &FrameInput) {
        if input.pressed(Button::Back) {
            self.world.reset(self.settings.road_style.road_type());
            self.go_back();
        }
    }

    // === Actions ===

    fn request_quit(&mut self) {
        log::info!("Quit requested");
        self.quit_requested = true;
    }

    fn start_new_run(&mut self) {
        self.world.reset(self.settings.road_style.road_type());
        self.emit(GameEvent::TransitionMusic);
        self.machine.switch(GameMode::Playing);
    }

    fn refresh_browser(&mut self) {
        self.browser.refresh(self.store.rank());
    }

    /// Index of the highlighted save in the store's listing
    fn selected_store_index(&self) -> Option<usize> {
        let entry = self.browser.selected()?;
        self.store.position(&entry.key)
    }

    fn load_selected(&mut self) {
        let Some(index) = self.selected_store_index() else {
            log::debug!("Load ignored: nothing selected");
            return;
        };

        let record = match self.store.load(index) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Load failed: {}", e);
                self.refresh_browser();
                return;
            }
        };

        self.world.road_style = self.settings.road_style.road_type();
        if let Err(e) = self
            .world
            .restore(record.score, record.level, record.road_type)
        {
            log::warn!("Could not restore '{}': {}", record.name, e);
            return;
        }

        log::info!(
            "Loaded '{}': level {}, {} points",
            record.name,
            record.level,
            record.score
        );
        self.emit(GameEvent::Loaded);
        self.emit(GameEvent::TransitionMusic);
        self.machine.switch(GameMode::Playing);
    }

    fn delete_selected(&mut self) {
        let Some(index) = self.selected_store_index() else {
            log::debug!("Delete ignored: nothing selected");
            return;
        };
        match self.store.delete(index) {
            Ok(_) => self.emit(GameEvent::Deleted),
            Err(e) => log::warn!("Delete failed: {}", e),
        }
        self.refresh_browser();
    }
}
