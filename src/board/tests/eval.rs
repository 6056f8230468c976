//! Evaluation tests: symmetry, purity, and material sanity.

use crate::board::{search, Board, SearchState};

/// Mirror a FEN vertically and swap the colors of every piece. The
/// resulting position is the same game from the other side's chair.
fn color_flip_fen(fen: &str) -> String {
    let parts: Vec<&str> = fen.split_whitespace().collect();

    let flipped_placement: Vec<String> = parts[0]
        .split('/')
        .rev()
        .map(|rank| {
            rank.chars()
                .map(|c| {
                    if c.is_ascii_alphabetic() {
                        if c.is_uppercase() {
                            c.to_ascii_lowercase()
                        } else {
                            c.to_ascii_uppercase()
                        }
                    } else {
                        c
                    }
                })
                .collect()
        })
        .collect();

    let side = if parts[1] == "w" { "b" } else { "w" };

    let castling: String = if parts[2] == "-" {
        "-".to_string()
    } else {
        parts[2]
            .chars()
            .map(|c| {
                if c.is_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect()
    };

    let ep = if parts[3] == "-" {
        "-".to_string()
    } else {
        let file = &parts[3][0..1];
        let rank = if &parts[3][1..2] == "3" { "6" } else { "3" };
        format!("{file}{rank}")
    };

    format!(
        "{} {} {} {} {} {}",
        flipped_placement.join("/"),
        side,
        castling,
        ep,
        parts.get(4).unwrap_or(&"0"),
        parts.get(5).unwrap_or(&"1"),
    )
}

const SYMMETRY_FENS: [&str; 5] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
    "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1",
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
];

#[test]
fn evaluation_is_color_symmetric() {
    for fen in SYMMETRY_FENS {
        let board = Board::from_fen(fen);
        let mirrored = Board::from_fen(&color_flip_fen(fen));
        assert_eq!(
            board.evaluate(),
            mirrored.evaluate(),
            "asymmetric eval for {fen}"
        );
    }
}

#[test]
fn evaluation_is_pure() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    let mut board = Board::from_fen(fen);
    let before = board.evaluate();
    assert_eq!(board.evaluate(), before);

    // A full search must not disturb the static evaluation either
    let mut state = SearchState::new();
    let _ = search(&mut board, &mut state, 4, 0);
    assert_eq!(board.evaluate(), before);
}

#[test]
fn startpos_evaluates_to_zero() {
    let board = Board::new();
    assert_eq!(board.evaluate(), 0);
}

#[test]
fn extra_material_scores_positive_for_its_owner() {
    // White is a rook up
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
    assert!(board.evaluate() >= 400, "got {}", board.evaluate());

    // Same position from black's perspective scores the mirror image
    let board_black = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 b - - 0 1");
    assert!(board_black.evaluate() <= -400, "got {}", board_black.evaluate());
}

#[test]
fn pawn_up_endgame_is_positive() {
    let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    assert!(board.evaluate() > 0);
}
