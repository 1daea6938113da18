extern crate sokoban_backend as backend;

use backend::*;

const SOLUTIONS: [&str; 3] = [
    "ulL",
    "uLrRdldRlL",
    "ldlUUdddrrruLLrrrruulDuuullldRR",
];

fn char_to_direction(c: char) -> Direction {
    use self::Direction::*;
    match c {
        'l' | 'L' => Left,
        'r' | 'R' => Right,
        'u' | 'U' => Up,
        'd' | 'D' => Down,
        _ => panic!("Invalid character"),
    }
}

#[test]
fn test_builtin_solutions() {
    let catalog = Catalog::builtin();
    for (index, solution) in SOLUTIONS.iter().enumerate() {
        let mut board = catalog.board(index).unwrap();
        for (i, mv) in solution.chars().map(char_to_direction).enumerate() {
            assert!(!board.is_won(), "Level {} solved early:\n{}\n", index + 1, board);
            assert!(
                board.move_player(mv),
                "Move #{} failed in level {}:\n{}\n",
                i,
                index + 1,
                board
            );
        }
        assert!(board.is_won(), "\n{}\n", board);
        assert_eq!(board.moves_to_string(), *solution);
        assert_eq!(
            board.number_of_pushes(),
            solution.chars().filter(char::is_ascii_uppercase).count()
        );
    }
}

#[test]
fn test_play_through_catalog() {
    let mut game = Game::new(Catalog::builtin()).unwrap();
    for (index, solution) in SOLUTIONS.iter().enumerate() {
        assert_eq!(game.level_index(), index);
        for mv in solution.chars().map(char_to_direction) {
            game.execute(&Command::Move(mv));
        }
        assert!(game.is_won());
        assert_eq!(game.number_of_moves(), solution.len());
        game.execute(&Command::NextLevel);
    }
    // There is nothing after the last level.
    assert_eq!(game.level_index(), 2);
    assert!(game.is_won());
}

#[test]
fn test_box_count_is_preserved() {
    let level = Level::parse(
        "crowded",
        "#########\n\
         #.$ @ $.#\n\
         # $$*$$ #\n\
         #. . . .#\n\
         #########",
    )
    .unwrap();
    let mut board = Board::from(&level);
    let boxes = level.number_of_boxes();

    for mv in "lldrrrrrruullllll".chars().map(char_to_direction) {
        board.move_player(mv);
        assert_eq!(board.count(Tile::Box) + board.count(Tile::BoxOnTarget), boxes);
        assert_eq!(board.boxes_remaining(), board.count(Tile::Box));
    }
}
