//! Mate-in-one puzzle suite driven by a JSON problem set.

use serde::Deserialize;

use lodestone::board::{search, Board, SearchState, VALUE_MATE_IN_MAX_PLY};

#[derive(Deserialize)]
struct ProblemSet {
    problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct Problem {
    #[serde(rename = "type")]
    kind: String,
    fen: String,
    #[allow(dead_code)]
    moves: String,
}

#[test]
fn mate_in_one_suite() {
    let data = include_str!("data/problems.json");
    let set: ProblemSet = serde_json::from_str(data).expect("invalid problems.json");

    let mut state = SearchState::new();

    for problem in set.problems.iter().filter(|p| p.kind == "Mate in One") {
        let mut board = Board::from_fen(&problem.fen);
        let result = search(&mut board, &mut state, 4, 0);

        let best = result
            .best_move
            .unwrap_or_else(|| panic!("no move found for {}", problem.fen));

        assert!(
            result.score >= VALUE_MATE_IN_MAX_PLY,
            "no mate score for fen: {} (got {})",
            problem.fen,
            result.score
        );

        board.make_move(&best);
        assert!(
            board.is_checkmate(),
            "move {} does not mate in: {}",
            best,
            problem.fen
        );
    }
}
