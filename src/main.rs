use anyhow::{Context, Result, bail};
use regent_core::{Game, GameStatus, PieceKind, parse_coordinate, parse_promotion_choice};
use tracing::info;

/// Split a move such as `e2e4` or `a7a8q` into its parts.
fn split_move(text: &str) -> Result<(&str, &str, Option<&str>)> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        bail!("expected a move like e2e4 or a7a8q, found {text:?}");
    }
    let promotion = (text.len() == 5).then(|| &text[4..]);
    Ok((&text[0..2], &text[2..4], promotion))
}

/// Play one move given as text, promoting to a queen unless told otherwise.
fn replay(game: &mut Game, text: &str) -> Result<GameStatus> {
    let (from, to, promotion) = split_move(text)?;
    let from = parse_coordinate(from).with_context(|| format!("bad origin in {text}"))?;
    let to = parse_coordinate(to).with_context(|| format!("bad target in {text}"))?;

    if promotion.is_some() {
        let promotes = game.unit_at(from).is_some_and(|unit| {
            unit.piece_kind() == PieceKind::Pawn
                && to.row() == unit.color().far_row()
        });
        if !promotes {
            bail!("{text} does not promote a pawn");
        }
    }

    let mut status = game
        .attempt_move_from(from, to)
        .with_context(|| format!("cannot play {text}"))?;

    if game.promotable_unit().is_some() {
        let kind = parse_promotion_choice(promotion.unwrap_or("q"))?;
        status = game
            .promote(kind)
            .with_context(|| format!("cannot promote in {text}"))?;
    }
    Ok(status)
}

/// Replay the moves given on the command line and print the final board.
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("regent starting");

    let mut game = Game::new();
    for text in std::env::args().skip(1) {
        let status = replay(&mut game, &text)?;
        if status.is_terminal() {
            info!(%status, "game over");
            break;
        }
    }

    println!("{}", game.pretty());
    println!("{} to move, {}", game.current_side(), game.status());
    Ok(())
}
