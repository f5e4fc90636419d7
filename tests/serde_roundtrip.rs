#![cfg(feature = "serde")]

use mailbox_chess::types::{Move, PieceKind, Square};

#[test]
fn move_round_trips_through_json() {
    let mv = Move {
        from: Square(6, 4),
        to: Square(4, 4),
        promotion: PieceKind::Empty,
        is_castle: false,
        score: 0,
    };
    let json = serde_json::to_string(&mv).expect("move should serialize");
    let back: Move = serde_json::from_str(&json).expect("move should deserialize");
    assert_eq!(mv, back);
}

#[test]
fn square_round_trips_through_json() {
    let sq = Square(0, 0);
    let json = serde_json::to_string(&sq).unwrap();
    let back: Square = serde_json::from_str(&json).unwrap();
    assert_eq!(sq, back);
}
