//! Export tests: exact output, round trips and idempotence

use movetext::pgn::formats::{json, FormatRegistry};
use movetext::pgn::testing::assert_game;
use movetext::pgn::{export_game, parse_game, parse_movetext, Color, ExportOptions, Game};
use rstest::rstest;
use std::fs;

fn read_fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{}", name)).expect("Failed to read fixture")
}

fn parse(text: &str) -> Game {
    parse_game(text).game.expect("game to parse")
}

const SCENARIO: &str =
    "1. e4 {Main line} (1. d4 d5 2. c4) (1... c5 {Sicilian}) 1... e5 2. Nf3 Nc6 (2... d6) *";

#[test]
fn test_variation_export_and_reparse() {
    let exported = export_game(&parse(SCENARIO), &ExportOptions::default());
    assert!(exported.contains("(1... c5 {Sicilian})"));
    insta::assert_snapshot!(
        exported.trim_end(),
        @"1. e4 {Main line} (1. d4 d5 2. c4) (1... c5 {Sicilian}) e5 2. Nf3 Nc6 (2... d6) *"
    );

    let reparsed = parse(&exported);
    assert_game(&reparsed).slot(0, |s| {
        s.variation_count(2);
    });
    assert_eq!(reparsed.moves[0].variations_for(Color::White).count(), 2);
}

#[test]
fn test_headers_and_blank_line() {
    let game = parse("[White \"A\"]\n[Result \"*\"]\n[Black \"B\"]\n[Event \"Casual\"]\n\n1. e4 e5 *");
    insta::assert_snapshot!(export_game(&game, &ExportOptions::default()).trim_end(), @r#"
    [Event "Casual"]
    [White "A"]
    [Black "B"]
    [Result "*"]

    1. e4 e5 *
    "#);
}

#[test]
fn test_nested_fixture_export() {
    let game = parse(&read_fixture("nested_lines.pgn"));
    let exported = export_game(&game, &ExportOptions::new().with_headers(false));
    insta::assert_snapshot!(
        exported.trim_end(),
        @"{Open games} 1. e4 (1. d4 d5 (1... Nf6 2. c4 (2. Nf3) e6) 2. c4) e5 2. Nf3 (2. Bc4 Nf6 (2... Bc5 3. Qh5?!)) Nc6 3. Bb5 $14 {Ruy Lopez} a6 *"
    );
}

#[test]
fn test_black_start_export() {
    let game = parse(&read_fixture("black_to_move.pgn"));
    let exported = export_game(&game, &ExportOptions::new().with_headers(false));
    assert_eq!(exported, "3... Nf6 (3... Bc5 4. c3) 4. Ng5 d5 5. exd5 *\n");
}

#[test]
fn test_export_switches() {
    let game = parse(&read_fixture("nested_lines.pgn"));
    let bare = ExportOptions::new()
        .with_headers(false)
        .with_comments(false)
        .with_variations(false)
        .with_annotations(false);
    assert_eq!(
        export_game(&game, &bare),
        "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 *\n"
    );
}

#[test]
fn test_wrapping() {
    let game = parse_movetext("1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O Be7 *")
        .game
        .unwrap();
    let options = ExportOptions::new().with_max_line_length(Some(20));
    insta::assert_snapshot!(export_game(&game, &options).trim_end(), @r"
    1. e4 e5 2. Nf3 Nc6
    3. Bb5 a6 4. Ba4 Nf6
    5. O-O Be7 *
    ");
}

#[rstest]
#[case("opera_game.pgn")]
#[case("nested_lines.pgn")]
#[case("black_to_move.pgn")]
fn test_round_trip_preserves_structure(#[case] fixture: &str) {
    let game = parse(&read_fixture(fixture));
    let reparsed = parse(&export_game(&game, &ExportOptions::default()));
    assert_eq!(reparsed, game);
}

#[rstest]
#[case("opera_game.pgn", None)]
#[case("opera_game.pgn", Some(40))]
#[case("nested_lines.pgn", Some(30))]
#[case("black_to_move.pgn", None)]
fn test_export_is_idempotent(#[case] fixture: &str, #[case] width: Option<usize>) {
    let options = ExportOptions::new().with_max_line_length(width);
    let first = export_game(&parse(&read_fixture(fixture)), &options);
    let second = export_game(&parse(&first), &options);
    let third = export_game(&parse(&second), &options);
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn test_unbalanced_comment_round_trip() {
    let mut game = parse_movetext("1. e4 e5 *").game.unwrap();
    game.moves[0].white_comment = Some("a } b".to_string());
    let exported = export_game(&game, &ExportOptions::default());
    assert_eq!(exported, "1. e4 ;a } b\n e5 *\n");
    assert_eq!(parse(&exported), game);
}

#[test]
fn test_glyph_order_survives_round_trip() {
    let game = parse("1. e4 $16 $1 e5 $2 $3 *");
    assert_game(&game).slot(0, |s| {
        s.annotations(Color::White, &["\u{b1}", "!"])
            .annotations(Color::Black, &["?", "!!"]);
    });
    let exported = export_game(&game, &ExportOptions::default());
    assert_eq!(exported, "1. e4 $16 $1 e5? $3 *\n");
    assert_eq!(parse(&exported), game);
}

#[test]
fn test_registry_formats() {
    let game = parse(SCENARIO);
    let registry = FormatRegistry::default();
    assert_eq!(
        registry.serialize(&game, "pgn").unwrap(),
        export_game(&game, &ExportOptions::default())
    );
    let text = registry.serialize(&game, "json").unwrap();
    assert_eq!(json::from_json(&text).unwrap(), game);
    assert!(registry.serialize(&game, "xml").is_err());
}
