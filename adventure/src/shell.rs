//! Interactive menu shell
//!
//! Reads choices line by line and renders the session as text. Generic
//! over the reader and writer so it can be driven by a script.

use crate::error::SessionError;
use crate::save::{list_saves, load_from_path, save_file_name, save_to_path};
use crate::session::{Discovery, ExploreReport, GameSession};
use content_core::ContentRegistry;
use item_core::Item;
use quest_core::QuestCompletion;
use rand::Rng;
use stat_core::{Character, CharacterClass, CombatAction, CombatEvent, CombatInput, Enemy};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Line-oriented prompt over any reader and writer
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Print `question` and read one trimmed line
    ///
    /// End of input is reported as `UnexpectedEof`.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask for a number; `None` if the answer is not one
    pub fn ask_number(&mut self, question: &str) -> io::Result<Option<usize>> {
        Ok(self.ask(question)?.parse().ok())
    }

    /// Ask for a 1-based pick from a listing, 0 to cancel
    ///
    /// The index is 0-based. Non-numbers and out-of-range numbers are
    /// `Pick::Invalid`.
    fn ask_pick(&mut self, question: &str, len: usize) -> io::Result<Pick> {
        Ok(match self.ask_number(question)? {
            Some(0) => Pick::Cancel,
            Some(n) if n <= len => Pick::Index(n - 1),
            _ => Pick::Invalid,
        })
    }
}

enum Pick {
    Index(usize),
    Cancel,
    Invalid,
}

/// Combat decisions read from the prompt
///
/// The first IO error is kept and the fight is played out with plain
/// attacks; the shell reports the error once combat returns.
struct TerminalCombat<'p, R, W> {
    prompt: &'p mut Prompt<R, W>,
    error: Option<io::Error>,
}

impl<'p, R: BufRead, W: Write> TerminalCombat<'p, R, W> {
    fn new(prompt: &'p mut Prompt<R, W>) -> Self {
        TerminalCombat {
            prompt,
            error: None,
        }
    }

    fn keep<T>(&mut self, result: io::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                if self.error.is_none() {
                    self.error = Some(error);
                }
                None
            }
        }
    }

    fn read_action(&mut self, player: &Character, enemy: &Enemy) -> io::Result<CombatAction> {
        self.prompt.say(format!(
            "\nYour Health: {}/{}",
            player.current_health, player.max_health
        ))?;
        self.prompt.say(format!(
            "{} Health: {}/{}",
            enemy.name, enemy.current_health, enemy.max_health
        ))?;

        loop {
            self.prompt.say("\nWhat do you want to do?")?;
            for (i, action) in CombatAction::all().iter().enumerate() {
                self.prompt.say(format!("{}. {}", i + 1, action.label()))?;
            }
            let choice = self.prompt.ask_number("Choose your action: ")?;
            match choice.and_then(|n| n.checked_sub(1)) {
                Some(index) if index < CombatAction::all().len() => {
                    return Ok(CombatAction::all()[index]);
                }
                _ => self.prompt.say("Invalid choice!")?,
            }
        }
    }

    fn read_consumable(&mut self, options: &[&Item]) -> io::Result<Option<usize>> {
        self.prompt.say("\nConsumable Items:")?;
        for (i, item) in options.iter().enumerate() {
            self.prompt
                .say(format!("{}. {} - {}", i + 1, item.name, item.description))?;
        }
        Ok(match self.prompt.ask_pick("Choose item to use (0 to cancel): ", options.len())? {
            Pick::Index(index) => Some(index),
            Pick::Cancel => None,
            // Out of range on purpose so the resolver reports it
            Pick::Invalid => Some(options.len()),
        })
    }
}

impl<R: BufRead, W: Write> CombatInput for TerminalCombat<'_, R, W> {
    fn choose_action(&mut self, player: &Character, enemy: &Enemy) -> CombatAction {
        if self.error.is_some() {
            return CombatAction::Attack;
        }
        let result = self.read_action(player, enemy);
        self.keep(result).unwrap_or(CombatAction::Attack)
    }

    fn choose_consumable(&mut self, options: &[&Item]) -> Option<usize> {
        if self.error.is_some() {
            return None;
        }
        let result = self.read_consumable(options);
        self.keep(result).flatten()
    }

    fn notify(&mut self, event: &CombatEvent) {
        let text = match event {
            CombatEvent::EncounterStarted { .. } | CombatEvent::EnemyDefeated { .. } => {
                format!("\n{}", event)
            }
            _ => event.to_string(),
        };
        let result = self.prompt.say(text);
        self.keep(result);
    }
}

/// The main menu loop around one game session
pub struct Shell<R, W, G> {
    prompt: Prompt<R, W>,
    session: GameSession,
    save_dir: PathBuf,
    rng: G,
}

impl<R: BufRead, W: Write, G: Rng> Shell<R, W, G> {
    pub fn new(prompt: Prompt<R, W>, session: GameSession, save_dir: PathBuf, rng: G) -> Self {
        Shell {
            prompt,
            session,
            save_dir,
            rng,
        }
    }

    /// Ask for a name and class, then open a new game
    pub fn create(
        mut prompt: Prompt<R, W>,
        content: ContentRegistry,
        save_dir: PathBuf,
        rng: G,
    ) -> io::Result<Self> {
        prompt.say("Welcome to the Text-Based RPG Adventure!")?;
        prompt.say("\nCreate Your Character")?;
        let name = prompt.ask("Enter character name: ")?;
        prompt.say("Choose your class: Warrior, Mage, Rogue")?;
        let class = CharacterClass::parse(&prompt.ask("Character class: ")?);

        let character = Character::new(name, class);
        prompt.say(format!("\nWelcome, {} the {}!", character.name, character.class))?;

        let session = GameSession::new(character, content);
        Ok(Shell::new(prompt, session, save_dir, rng))
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn prompt(&self) -> &Prompt<R, W> {
        &self.prompt
    }

    /// Run the main menu until Exit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        match self.main_menu() {
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::debug!("input closed, leaving");
                Ok(())
            }
            other => other,
        }
    }

    fn main_menu(&mut self) -> io::Result<()> {
        loop {
            self.prompt.say("\nMain Menu")?;
            self.prompt.say("1. View Character")?;
            self.prompt.say("2. Explore")?;
            self.prompt.say("3. Quests")?;
            self.prompt.say("4. Save Game")?;
            self.prompt.say("5. Load Game")?;
            self.prompt.say("6. Exit")?;

            match self.prompt.ask("Choose an option: ")?.as_str() {
                "1" => self.view_character()?,
                "2" => self.explore()?,
                "3" => self.quests_menu()?,
                "4" => self.save()?,
                "5" => self.load()?,
                "6" => {
                    self.prompt.say("Thanks for playing!")?;
                    return Ok(());
                }
                _ => self.prompt.say("Invalid choice. Try again.")?,
            }
        }
    }

    fn view_character(&mut self) -> io::Result<()> {
        self.show_stats()?;
        self.show_inventory()?;

        self.prompt.say("\nEquipment Management:")?;
        self.prompt.say("1. Equip Weapon")?;
        self.prompt.say("2. Equip Armor")?;
        self.prompt.say("3. Use Item")?;
        self.prompt.say("4. Return to Main Menu")?;

        match self.prompt.ask("Choose an option: ")?.as_str() {
            "1" => self.equip_weapon(),
            "2" => self.equip_armor(),
            "3" => self.use_item(),
            _ => Ok(()),
        }
    }

    fn show_stats(&mut self) -> io::Result<()> {
        let sheet = self.session.character().stat_sheet();
        self.prompt.say(format!("\n{} the {}", sheet.name, sheet.class))?;
        self.prompt.say(format!("Level: {}", sheet.level))?;
        self.prompt
            .say(format!("Health: {}/{}", sheet.health.0, sheet.health.1))?;
        self.prompt.say(format!(
            "Experience: {}/{}",
            sheet.experience.0, sheet.experience.1
        ))?;
        self.prompt.say(format!("Strength: {}", sheet.strength))?;
        self.prompt.say(format!("Magic: {}", sheet.magic))?;
        self.prompt.say(format!("Defense: {}", sheet.defense))?;
        self.prompt.say(format!("Agility: {}", sheet.agility))?;
        self.prompt.say(format!("Gold: {}", sheet.gold))?;
        if let Some(weapon) = sheet.weapon {
            self.prompt.say(format!("Weapon: {}", weapon))?;
        }
        if let Some(armor) = sheet.armor {
            self.prompt.say(format!("Armor: {}", armor))?;
        }
        Ok(())
    }

    fn show_inventory(&mut self) -> io::Result<()> {
        let character = self.session.character();
        let mut lines = vec![format!("\n{}'s Inventory:", character.name)];
        if character.inventory.is_empty() {
            lines.push("Empty".to_string());
        }
        for (i, item) in character.inventory.iter().enumerate() {
            lines.push(format!("{}. {} - {}", i + 1, item.name, item.description));
        }
        for line in lines {
            self.prompt.say(line)?;
        }
        Ok(())
    }

    /// Print a numbered listing and read a pick from it
    fn pick_from(&mut self, title: &str, entries: Vec<String>, question: &str) -> io::Result<Pick> {
        self.prompt.say(title)?;
        let len = entries.len();
        for (i, entry) in entries.into_iter().enumerate() {
            self.prompt.say(format!("{}. {}", i + 1, entry))?;
        }
        self.prompt.ask_pick(question, len)
    }

    fn equip_weapon(&mut self) -> io::Result<()> {
        let entries = listing(self.session.character().inventory.weapons());
        if entries.is_empty() {
            return self.prompt.say(SessionError::NoWeapons);
        }
        let index = match self.pick_from(
            "\nAvailable Weapons:",
            entries,
            "Choose weapon to equip (0 to cancel): ",
        )? {
            Pick::Index(index) => index,
            Pick::Cancel => return Ok(()),
            Pick::Invalid => return self.prompt.say(SessionError::InvalidChoice),
        };

        match self.session.equip_weapon(index) {
            Ok(completions) => {
                if let Some(weapon) = &self.session.character().equipped_weapon {
                    let text = format!("Equipped {}!", weapon.name);
                    self.prompt.say(text)?;
                }
                self.show_completions(&completions)
            }
            Err(error) => self.prompt.say(error),
        }
    }

    fn equip_armor(&mut self) -> io::Result<()> {
        let entries = listing(self.session.character().inventory.armor());
        if entries.is_empty() {
            return self.prompt.say(SessionError::NoArmor);
        }
        let index = match self.pick_from(
            "\nAvailable Armor:",
            entries,
            "Choose armor to equip (0 to cancel): ",
        )? {
            Pick::Index(index) => index,
            Pick::Cancel => return Ok(()),
            Pick::Invalid => return self.prompt.say(SessionError::InvalidChoice),
        };

        match self.session.equip_armor(index) {
            Ok(()) => {
                if let Some(armor) = &self.session.character().equipped_armor {
                    let text = format!("Equipped {}!", armor.name);
                    self.prompt.say(text)?;
                }
                Ok(())
            }
            Err(error) => self.prompt.say(error),
        }
    }

    fn use_item(&mut self) -> io::Result<()> {
        let entries: Vec<String> = self
            .session
            .character()
            .inventory
            .consumables()
            .into_iter()
            .map(|(_, item)| format!("{} - {}", item.name, item.description))
            .collect();
        if entries.is_empty() {
            return self.prompt.say(SessionError::NoConsumables);
        }
        let index = match self.pick_from(
            "\nConsumable Items:",
            entries,
            "Choose item to use (0 to cancel): ",
        )? {
            Pick::Index(index) => index,
            Pick::Cancel => return Ok(()),
            Pick::Invalid => return self.prompt.say(SessionError::InvalidChoice),
        };

        match self.session.use_item(index) {
            Ok((item, healed)) => self
                .prompt
                .say(format!("Used {} and recovered {} HP!", item.name, healed)),
            Err(error) => self.prompt.say(error),
        }
    }

    fn explore(&mut self) -> io::Result<()> {
        if self.session.is_game_over() {
            return self.prompt.say(format!(
                "{}. Load a saved game to continue.",
                SessionError::PlayerDefeated(self.session.character().name.clone())
            ));
        }
        self.prompt.say("\nYou venture into the wilderness...")?;

        let mut input = TerminalCombat::new(&mut self.prompt);
        let result = self.session.explore(&mut input, &mut self.rng);
        if let Some(error) = input.error.take() {
            return Err(error);
        }

        match result {
            Ok(report) => self.show_exploration(&report)?,
            Err(error) => self.prompt.say(error)?,
        }

        if self.session.is_game_over() {
            self.prompt.say("\nGAME OVER")?;
            self.prompt.say("Your adventure ends here...")?;
        }
        self.prompt.ask("\nPress Enter to continue...")?;
        Ok(())
    }

    fn show_exploration(&mut self, report: &ExploreReport) -> io::Result<()> {
        if let Discovery::Gold(amount) = report.discovery {
            self.prompt.say("You explore peacefully and find some gold!")?;
            self.prompt.say(format!("Found {} gold!", amount))?;
        }
        self.show_completions(&report.completions)
    }

    fn show_completions(&mut self, completions: &[QuestCompletion]) -> io::Result<()> {
        for completion in completions {
            self.prompt.say(format!("\n{}", completion))?;
            self.prompt.say(&completion.description)?;
            if completion.experience > 0 {
                self.prompt
                    .say(format!("Gained {} experience!", completion.experience))?;
            }
            if completion.gold > 0 {
                self.prompt.say(format!("Gained {} gold!", completion.gold))?;
            }
            for item in &completion.items {
                self.prompt.say(format!("Received: {}!", item.name))?;
            }
        }
        Ok(())
    }

    fn quests_menu(&mut self) -> io::Result<()> {
        loop {
            self.prompt.say("\nQuest Management")?;
            self.prompt.say("1. View Available Quests")?;
            self.prompt.say("2. View Active Quests")?;
            self.prompt.say("3. View Completed Quests")?;
            self.prompt.say("4. Request Daily Quest")?;
            self.prompt.say("5. Return to Main Menu")?;

            match self.prompt.ask("Choose an option: ")?.as_str() {
                "1" => self.available_quests()?,
                "2" => self.active_quests()?,
                "3" => self.completed_quests()?,
                "4" => self.daily_quest()?,
                "5" => return Ok(()),
                _ => self.prompt.say("Invalid choice. Try again.")?,
            }
        }
    }

    fn available_quests(&mut self) -> io::Result<()> {
        let lines: Vec<String> = self
            .session
            .available_quests()
            .iter()
            .enumerate()
            .map(|(i, quest)| {
                format!(
                    "\n{}. {}\n   {}\n   Reward: {}",
                    i + 1,
                    quest.name,
                    quest.description,
                    quest.reward_text()
                )
            })
            .collect();
        if lines.is_empty() {
            return self.prompt.say("No quests available at your current level.");
        }

        self.prompt.say("\nAvailable Quests:")?;
        for line in lines {
            self.prompt.say(line)?;
        }

        let answer = self
            .prompt
            .ask("Choose a quest to start or press Enter to cancel: ")?;
        let Ok(number) = answer.parse::<usize>() else {
            return Ok(());
        };
        let accepted = number
            .checked_sub(1)
            .is_some_and(|index| self.session.accept_quest(index));
        if !accepted {
            return self.prompt.say("Invalid choice or quest already accepted.");
        }

        let text = self.session.active_quests().last().map(|quest| {
            format!(
                "Quest accepted: {}\n{}\nReward: {}",
                quest.name,
                quest.description,
                quest.reward_text()
            )
        });
        match text {
            Some(text) => self.prompt.say(text),
            None => Ok(()),
        }
    }

    fn active_quests(&mut self) -> io::Result<()> {
        let lines: Vec<String> = self
            .session
            .active_quests()
            .iter()
            .map(|quest| format!("{}\n   {}\n", quest, quest.description))
            .collect();
        if lines.is_empty() {
            return self.prompt.say("No active quests.");
        }
        self.prompt.say("\nActive Quests:")?;
        for line in lines {
            self.prompt.say(line)?;
        }
        Ok(())
    }

    fn completed_quests(&mut self) -> io::Result<()> {
        let names: Vec<String> = self
            .session
            .completed_quests()
            .iter()
            .map(|quest| quest.name.clone())
            .collect();
        if names.is_empty() {
            return self.prompt.say("No completed quests yet.");
        }
        self.prompt.say("\nCompleted Quests:")?;
        for name in names {
            self.prompt.say(name)?;
        }
        Ok(())
    }

    fn daily_quest(&mut self) -> io::Result<()> {
        let Some(id) = self.session.request_daily_quest(&mut self.rng) else {
            return self.prompt.say("No daily quests today.");
        };
        let text = self.session.ledger().quest(&id).map(|quest| {
            format!(
                "New daily quest: {}\n{}\nReward: {}",
                quest.name,
                quest.description,
                quest.reward_text()
            )
        });
        match text {
            Some(text) => self.prompt.say(text),
            None => Ok(()),
        }
    }

    fn save(&mut self) -> io::Result<()> {
        let path = self
            .save_dir
            .join(save_file_name(self.session.character()));
        match save_to_path(&self.session, &path) {
            Ok(()) => self.prompt.say(format!("Game saved as {}", path.display())),
            Err(error) => self.prompt.say(format!("Could not save: {}", error)),
        }
    }

    fn load(&mut self) -> io::Result<()> {
        let saves = match list_saves(&self.save_dir) {
            Ok(saves) => saves,
            Err(error) => return self.prompt.say(format!("Could not list saves: {}", error)),
        };
        if saves.is_empty() {
            return self.prompt.say("No saved games found.");
        }

        self.prompt.say("Available Saves:")?;
        for (i, path) in saves.iter().enumerate() {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
            self.prompt
                .say(format!("{}. {}", i + 1, name.unwrap_or_default()))?;
        }

        let answer = self
            .prompt
            .ask("Enter save number to load or press Enter to cancel: ")?;
        let Ok(number) = answer.parse::<usize>() else {
            return self.prompt.say("Cancelled loading.");
        };
        let Some(path) = number.checked_sub(1).and_then(|index| saves.get(index)) else {
            return self.prompt.say("Invalid choice.");
        };

        match load_from_path(path, self.session.content().clone()) {
            Ok(session) => {
                self.session = session;
                self.prompt.say(format!("Loaded {}", path.display()))
            }
            Err(error) => self.prompt.say(format!("Could not load: {}", error)),
        }
    }
}

fn listing(entries: Vec<(usize, &Item)>) -> Vec<String> {
    entries
        .into_iter()
        .map(|(_, item)| format!("{} - {}", item.summary(), item.description))
        .collect()
}
