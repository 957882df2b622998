//! Integration tests for swaps, cascades and scoring

use wordcrush::core::scanner::find_matches;
use wordcrush::core::{
    word_score, EngineError, GameConfig, GameState, Grid, ScriptedTiles, SwapError, WordList,
};
use wordcrush::types::{Position, GRID_SIZE};

const QUIET: [&str; 6] = ["QXZJKQ", "XZJKQX", "ZJKQXZ", "JKQXZJ", "KQXZJK", "QXZJKQ"];

fn scripted_game(rows: [&str; 6], words: &[&str], script: &str) -> GameState<WordList, ScriptedTiles> {
    GameState::with_grid(
        GameConfig::default(),
        WordList::from_words(words.iter().copied()),
        ScriptedTiles::from_letters(script),
        Grid::from_rows(&rows).unwrap(),
    )
}

fn seeded_game(seed: u64) -> GameState {
    let config = GameConfig {
        dictionary_path: "/nonexistent/wordcrush/words".into(),
        ..GameConfig::default()
    }
    .with_seed(seed);
    GameState::from_config(config)
}

#[test]
fn test_longest_word_wins_overlap() {
    let mut state = scripted_game(
        ["CAXSQZ", "XZTKQX", "ZJKQXZ", "JKQXZJ", "KQXZJK", "QXZJKQ"],
        &["CAT", "CATS"],
        "Q",
    );
    let outcome = state.swap(Position::new(0, 2), Position::new(1, 2)).unwrap();

    let words: Vec<&str> = outcome.words().collect();
    assert_eq!(words, vec!["CATS"]);
    assert_eq!(state.score(), 6);
    assert_eq!(state.session().moves_left(), 9);
}

#[test]
fn test_swap_without_word_keeps_swap() {
    let mut state = scripted_game(QUIET, &["CAT"], "Q");
    let before = state.grid().clone();
    state.swap(Position::new(2, 2), Position::new(3, 2)).unwrap();

    assert_eq!(state.score(), 0);
    assert_eq!(state.session().moves_left(), 9);
    assert_eq!(state.grid().letter(Position::new(2, 2)), before.letter(Position::new(3, 2)));
    assert_eq!(state.grid().letter(Position::new(3, 2)), before.letter(Position::new(2, 2)));
}

#[test]
fn test_refill_chains_into_second_round() {
    // Swapping (4,2)<->(4,3) spells DOG. The refill then drops C, A, T into row 0.
    let mut state = scripted_game(
        ["QXZJKQ", "XZJKQX", "ZJKQXZ", "JKQXZJ", "DOXGZQ", "QXZJKQ"],
        &["DOG", "CAT"],
        "CATQ",
    );
    let outcome = state.swap(Position::new(4, 2), Position::new(4, 3)).unwrap();

    assert!(outcome.rounds() >= 2);
    assert!(outcome.cascade.chained());
    assert_eq!(outcome.words().collect::<Vec<_>>(), vec!["DOG", "CAT"]);
    assert_eq!(state.score(), word_score("DOG") + word_score("CAT"));
    assert!(find_matches(state.grid(), state.lexicon()).is_empty());
}

#[test]
fn test_score_is_sum_of_cleared_words() {
    let mut state = seeded_game(2024);
    let mut expected = 0;
    while !state.is_over() {
        let Some(best) = state.suggestions(1).into_iter().next() else {
            break;
        };
        let outcome = state.swap(best.from, best.to).unwrap();
        expected += outcome.words().map(word_score).sum::<u32>();
        assert_eq!(state.score(), expected);
    }
}

#[test]
fn test_grid_settles_after_every_swap() {
    for seed in [1, 7, 42] {
        let mut state = seeded_game(seed);
        assert!(find_matches(state.grid(), state.lexicon()).is_empty());

        while !state.is_over() {
            let Some(best) = state.suggestions(1).into_iter().next() else {
                break;
            };
            state.swap(best.from, best.to).unwrap();
            assert!(state.grid().is_full());
            assert!(
                find_matches(state.grid(), state.lexicon()).is_empty(),
                "seed {} left words on:\n{}",
                seed,
                state.grid()
            );
        }
        assert_eq!(state.session().moves_left(), 0);
    }
}

#[test]
fn test_only_adjacent_swaps_are_accepted() {
    let mut state = scripted_game(QUIET, &["CAT"], "Q");
    let before = state.grid().clone();

    for (a, b) in [
        (Position::new(0, 0), Position::new(1, 1)),
        (Position::new(0, 0), Position::new(0, 0)),
        (Position::new(2, 0), Position::new(2, 3)),
    ] {
        assert_eq!(
            state.swap(a, b),
            Err(EngineError::Swap(SwapError::NotAdjacent(a, b)))
        );
    }
    assert_eq!(
        state.swap(Position::new(GRID_SIZE, 0), Position::new(GRID_SIZE - 1, 0)),
        Err(EngineError::Swap(SwapError::OutOfBounds(Position::new(GRID_SIZE, 0))))
    );

    assert_eq!(state.grid(), &before);
    assert_eq!(state.session().moves_left(), 10);
}

#[test]
fn test_scan_is_idempotent() {
    let state = seeded_game(99);
    let grid = Grid::from_rows(&["CATSQZ", "XZTKQX", "ZJKQXZ", "JKQXZJ", "KQXZJK", "QXZJKQ"])
        .unwrap();
    let first = find_matches(&grid, state.lexicon());
    let second = find_matches(&grid, state.lexicon());
    assert_eq!(first, second);
    assert!(!first.is_empty());
}
