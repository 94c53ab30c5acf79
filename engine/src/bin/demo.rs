//! Headless scripted casino session against the real clock.
//!
//! Runs one spin of each wheel and a short poker hand, logging every event.
//! Useful for eyeballing payouts and timings without the frontend.

use std::thread;
use std::time::Duration;

use anyhow::Result;

use piggyworld_engine::casino::roulette::BetKey;
use piggyworld_engine::casino::GameRng;
use piggyworld_engine::clock::SystemClock;
use piggyworld_engine::storage::MemoryStorage;
use piggyworld_engine::world::{World, WorldEvent};
use tracing::info;

fn drain(world: &mut World<MemoryStorage, SystemClock>, pending: usize) {
    let mut settled = 0;
    while settled < pending {
        thread::sleep(Duration::from_millis(250));
        for event in world.poll() {
            info!(?event, chips = world.player().chips, "event");
            settled += 1;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let mut world = World::new(
        "Piggy".to_string(),
        MemoryStorage::new(),
        SystemClock,
        GameRng::from_entropy(),
    );

    info!(chips = world.player().chips, "session start");

    if let Ok(receipt) = world.check_in() {
        info!(streak = receipt.streak, reward = receipt.reward, "checked in");
    }

    world.set_slot_bet(50)?;
    world.spin_slots()?;
    world.place_roulette_bet(BetKey::Red, 20)?;
    world.place_roulette_bet(BetKey::Straight(17), 10)?;
    world.spin_roulette()?;
    drain(&mut world, 2);

    world.deal_poker()?;
    loop {
        let done = {
            let hand = world.poker().ok_or_else(|| anyhow::anyhow!("hand missing"))?;
            if hand.result().is_some() {
                true
            } else {
                if hand.is_player_turn() {
                    if hand.current_bet() > 0 {
                        world.poker_call()?;
                    } else {
                        world.poker_check()?;
                    }
                }
                false
            }
        };
        if done {
            break;
        }
        thread::sleep(Duration::from_millis(250));
        for event in world.poll() {
            info!(?event, "poker");
            if matches!(event, WorldEvent::HandFinished { .. }) {
                info!(chips = world.player().chips, "session end");
                return Ok(());
            }
        }
    }

    info!(chips = world.player().chips, "session end");
    Ok(())
}
