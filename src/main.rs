mod agent;
mod game;
mod graph;
mod interface;
mod model;
mod strategy;

use std::io;
use std::process;

use game::Game;
use interface::ParseError;

fn main() {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let layout = match interface::read_layout(&mut input) {
        Ok(layout) => layout,
        Err(err) => fail("initialization", err),
    };
    let mut game = Game::new(layout);

    // game loop
    loop {
        match interface::read_snapshot(&mut input) {
            Ok(Some(snapshot)) => {
                for action in game.update(snapshot) {
                    println!("{}", interface::format_action(&action));
                }
            }
            Ok(None) => break,
            Err(err) => fail("turn input", err),
        }
    }
}

fn fail(stage: &str, err: ParseError) -> ! {
    eprintln!("{}: {}", stage, err);
    process::exit(1);
}
