//! Example Game - A headless dungeon crawl driving combat_core
//!
//! This game shows:
//! - Generating monsters per floor (MonsterFactory)
//! - Fighting through the encounter driver with a simple action policy
//! - Experience, level ups and loot drops
//! - Observers receiving the combat log
//! - Saving the hero through a Roster

use anyhow::Result;
use clap::Parser;
use combat_core::prelude::*;
use combat_core::{
    default_skills, JsonFileRepository, MessageLog, Roster, SpellcasterAi, TracingObserver,
    WeaponBonuses,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Headless dungeon crawl
#[derive(Parser)]
#[command(name = "example_game")]
#[command(about = "Auto-play a dungeon crawl on the combat engine", long_about = None)]
struct Cli {
    /// easy, normal or hard
    #[arg(short, long, default_value = "normal")]
    difficulty: Difficulty,

    /// Seed for monster and combat rolls; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Deepest floor to attempt
    #[arg(long, default_value_t = 10)]
    max_floor: u32,

    /// Where to save the hero afterwards
    #[arg(long, default_value = "saves/heroes.json")]
    save: PathBuf,

    /// Hero name
    #[arg(long, default_value = "Aria")]
    name: String,

    /// Also send the combat log to the tracing subscriber
    #[arg(long)]
    trace: bool,
}

/// Turn limit per encounter so a stalemate cannot spin forever
const MAX_ROUNDS: u32 = 200;

/// Main game state
struct GameState {
    hero: Character,
    service: CombatService,
    factory: MonsterFactory,
    difficulty: Difficulty,
    floor: u32,
    kills: u32,
    recent: Arc<MessageLog>,
}

/// Outfit the hero with the starting skills, weapon and potions
fn create_hero(name: &str) -> Result<Character> {
    let mut hero = Character::default_hero(name)?;
    let skills = default_skills();
    for id in ["fireball", "heal"] {
        if let Some(skill) = skills.get(id) {
            hero.learn_skill(skill.clone());
        }
    }
    hero.equip_weapon(Some(
        Weapon::new("Iron Sword", 5, WeaponType::Sword).with_bonuses(WeaponBonuses {
            hp: 10,
            ..Default::default()
        }),
    ));
    hero.add_item(Consumable::HealthPotion);
    hero.add_item(Consumable::HealthPotion);
    hero.add_item(Consumable::ManaPotion);
    Ok(hero)
}

impl GameState {
    fn new(cli: &Cli) -> Result<Self> {
        let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
        info!(seed, difficulty = %cli.difficulty, "starting run");

        let mut service = CombatService::with_rng(PhysicalDamage, ChaCha8Rng::seed_from_u64(seed));
        let recent = Arc::new(MessageLog::new(5));
        service.attach(Arc::new(|message: &str| println!("  {}", message)) as Arc<dyn CombatObserver>);
        service.attach(recent.clone());
        if cli.trace {
            service.attach(Arc::new(TracingObserver));
        }

        let factory = MonsterFactory::with_rng(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));

        Ok(GameState {
            hero: create_hero(&cli.name)?,
            service,
            factory,
            difficulty: cli.difficulty,
            floor: 1,
            kills: 0,
            recent,
        })
    }

    /// Every fifth floor hosts a spellcaster
    fn spawn_enemy(&mut self) -> Result<Character> {
        let boss = self.floor % 5 == 0;
        if boss {
            self.factory.set_ai(Arc::new(SpellcasterAi::default()));
        }
        let monster = self.factory.create_random_monster(self.floor, self.difficulty);
        if boss {
            self.factory.set_ai(combat_core::ai::default_strategy());
        }

        let mut monster = monster?;
        if boss {
            if let Some(shard) = default_skills().remove("ice_shard") {
                monster.learn_skill(shard);
                let max_mp = monster.stats().max_mp();
                monster.restore_mana(max_mp);
            }
        }
        Ok(monster)
    }

    /// Pick the hero's next move
    fn choose_action(&self, monster: &Character) -> HeroAction {
        let stats = self.hero.stats();
        let find_skill = |id: &str| {
            self.hero
                .skills()
                .iter()
                .position(|s| s.id == id && s.mana_cost <= stats.mp())
        };
        let find_item = |wanted: &Consumable| self.hero.inventory().iter().position(|i| i == wanted);

        if stats.hp_percent() < 35 {
            if let Some(index) = find_skill("heal") {
                return HeroAction::Cast(index);
            }
            if let Some(index) = find_item(&Consumable::HealthPotion).or_else(|| find_item(&Consumable::Elixir)) {
                return HeroAction::UseItem(index);
            }
            if stats.hp_percent() < 15 {
                return HeroAction::Flee;
            }
        }
        if stats.mp() < 20 {
            if let Some(index) = find_item(&Consumable::ManaPotion) {
                return HeroAction::UseItem(index);
            }
        }
        if monster.stats().hp() > self.hero.physical_attack() {
            if let Some(index) = find_skill("fireball") {
                return HeroAction::Cast(index);
            }
        }
        HeroAction::Attack
    }

    /// Fight one monster; returns the final state
    fn fight(&mut self, monster: Character) -> EncounterState {
        println!(
            "\n=== Floor {} === {} (HP {}, STR {}, DEF {})",
            self.floor,
            monster.name(),
            monster.stats().max_hp(),
            monster.stats().strength(),
            monster.stats().defense()
        );

        let mut encounter = Encounter::new(monster);
        while !encounter.state().is_over() && encounter.rounds() < MAX_ROUNDS {
            let action = self.choose_action(encounter.monster());
            let report = encounter.play_round(&mut self.service, &mut self.hero, action);
            if !report.hero.consumed_turn() {
                // fall back to a plain attack so the round still happens
                let fallback = encounter.play_round(&mut self.service, &mut self.hero, HeroAction::Attack);
                if !fallback.hero.consumed_turn() {
                    warn!(outcome = ?fallback.hero, "hero cannot act; abandoning encounter");
                    break;
                }
            }
        }

        encounter.state()
    }

    fn print_status(&self) {
        let stats = self.hero.stats();
        println!(
            "  {} Lv {} | HP {}/{} | MP {}/{} | XP {}/{} | items {}",
            stats.name(),
            stats.level(),
            stats.hp(),
            stats.max_hp(),
            stats.mp(),
            stats.max_mp(),
            self.hero.experience(),
            self.hero.experience_to_next_level(),
            self.hero.inventory().len()
        );
    }

    fn run(&mut self, max_floor: u32) -> Result<()> {
        while self.floor <= max_floor && self.hero.is_alive() {
            let monster = self.spawn_enemy()?;
            match self.fight(monster) {
                EncounterState::HeroVictory => {
                    self.kills += 1;
                    self.floor += 1;
                }
                EncounterState::Fled => {
                    println!("  Retreating to rest before trying floor {} again.", self.floor);
                    let max_hp = self.hero.stats().max_hp();
                    self.hero.heal(max_hp / 2);
                }
                EncounterState::HeroDefeat => break,
                EncounterState::Ongoing => {
                    println!("  The fight drags on; both sides withdraw.");
                }
            }
            self.print_status();
        }

        if self.hero.is_alive() {
            println!("\n{} cleared {} floors with {} kills.", self.hero.name(), self.floor - 1, self.kills);
        } else {
            println!("\n{} fell on floor {}. Last words of the log:", self.hero.name(), self.floor);
            for line in self.recent.messages() {
                println!("  {}", line);
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut state = GameState::new(&cli)?;
    state.run(cli.max_floor)?;

    let mut roster = Roster::new(JsonFileRepository::new(&cli.save));
    if roster.save(&state.hero) {
        println!(
            "Saved {} to {}",
            state.hero.name(),
            roster.repository().path().display()
        );
    }
    Ok(())
}
