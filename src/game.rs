use super::agent;
use super::model::*;

/// Turn loop bookkeeping: the turn counter, the append-only snapshot history,
/// and the guarantee that every turn yields exactly the number of actions the
/// snapshot asked for.
pub struct Game {
    pub layout: Layout,
    pub turn: u32,
    pub history: Vec<Snapshot>,
    trace: bool,
}
impl Game {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            turn: 0,
            history: Vec::new(),
            trace: std::env::var_os("ORGANISM_TRACE").is_some(),
        }
    }

    pub fn update(&mut self, snapshot: Snapshot) -> Vec<Action> {
        self.turn += 1;
        eprintln!("turn {}: {} entities", self.turn, snapshot.entities.len());

        // The history keeps the immutable snapshot only; the graph and the
        // candidates built below never survive past this call.
        self.history.push(snapshot);
        let snapshot = self.history.last().expect("just appended");

        if self.trace {
            match serde_json::to_string(snapshot) {
                Ok(json) => eprintln!("{}", json),
                Err(err) => eprintln!("trace failed: {}", err),
            }
        }

        let required = snapshot.required_actions;
        let mut actions = agent::act(&self.layout, snapshot);

        // Cap before emission, pad after: the action count must match the
        // snapshot's requirement no matter what the strategy produced.
        actions.truncate(required);
        while actions.len() < required {
            actions.push(Action::Wait);
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::model::fixtures;

    fn game_for(layout: Layout) -> Game {
        Game {
            layout,
            turn: 0,
            history: Vec::new(),
            trace: false,
        }
    }

    #[test]
    fn pads_with_wait_up_to_the_required_count() {
        // One legal candidate, three required actions.
        let (layout, snapshot) = fixtures::board(&[
            "#.#",
            "#R#",
            "###",
        ], fixtures::plenty(), 3);

        let actions = game_for(layout).update(snapshot);
        assert_eq!(actions.len(), 3);
        assert!(matches!(actions[0], Action::Grow { .. }));
        assert!(matches!(actions[1], Action::Wait));
        assert!(matches!(actions[2], Action::Wait));
    }

    #[test]
    fn all_wait_turn_when_nothing_is_growable() {
        let (layout, snapshot) = fixtures::board(&[
            "###",
            "#R#",
            "###",
        ], fixtures::plenty(), 2);

        let actions = game_for(layout).update(snapshot);
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| matches!(a, Action::Wait)));
    }

    #[test]
    fn action_count_always_matches_the_requirement() {
        for required in 0..4 {
            let (layout, snapshot) = fixtures::board(&[
                "R..",
                ".#A",
            ], fixtures::plenty(), required);

            let actions = game_for(layout).update(snapshot);
            assert_eq!(actions.len(), required);
        }
    }

    #[test]
    fn counts_turns_and_appends_history() {
        let (layout, first) = fixtures::board(&["R."], fixtures::plenty(), 1);
        let (_, second) = fixtures::board(&["RO"], fixtures::plenty(), 1);

        let mut game = game_for(layout);
        game.update(first);
        game.update(second);

        assert_eq!(game.turn, 2);
        assert_eq!(game.history.len(), 2);
        assert_eq!(game.history[0].entities.len(), 1);
        assert_eq!(game.history[1].entities.len(), 2);
    }
}
