use tide_runner::assets::SpriteKey;
use tide_runner::enemy::Enemy;
use tide_runner::frame::{DrawLayer, Frame};
use tide_runner::geometry::{Point, Rect};
use tide_runner::particles::{ParticleEffect, ParticleKind};
use tide_runner::settings::TILE_SIZE;
use tide_runner::tiles::{CoinKind, PalmKind, Tile, TileKind};

fn constraint_at(col: i32) -> Tile {
    Tile::new(TileKind::Constraint, Point::new(col * TILE_SIZE, 0))
}

// ── World shift ───────────────────────────────────────────────────────────────

#[test]
fn tiles_move_by_exactly_the_world_shift() {
    let kinds = [
        TileKind::Terrain(3),
        TileKind::Grass(1),
        TileKind::Crate,
        TileKind::Constraint,
        TileKind::Goal,
        TileKind::Coin(CoinKind::Gold),
        TileKind::Palm(PalmKind::Large),
        TileKind::Palm(PalmKind::Background),
    ];
    for kind in kinds {
        let mut tile = Tile::new(kind, Point::new(640, 128));
        let x0 = tile.rect.x;
        tile.update(-8);
        assert_eq!(tile.rect.x, x0 - 8, "{kind:?}");
        tile.update(8);
        tile.update(8);
        assert_eq!(tile.rect.x, x0 + 8, "{kind:?}");
        assert_eq!(tile.origin, Point::new(640, 128));
    }
}

#[test]
fn particles_move_by_exactly_the_world_shift() {
    let mut effect = ParticleEffect::new(Point::new(300, 300), ParticleKind::Jump);
    let x0 = effect.rect.x;
    effect.update(-8);
    assert_eq!(effect.rect.x, x0 - 8);
}

#[test]
fn enemy_moves_by_shift_plus_own_speed() {
    let mut enemy = Enemy::new(Point::new(640, 0), 4);
    let x0 = enemy.rect.x;
    enemy.update(-8);
    assert_eq!(enemy.rect.x, x0 - 8 + 4);
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[test]
fn crate_sits_on_cell_bottom() {
    let tile = Tile::new(TileKind::Crate, Point::new(64, 128));
    assert_eq!(tile.rect.bottomleft(), Point::new(64, 128 + TILE_SIZE));
    assert_eq!((tile.rect.w, tile.rect.h), SpriteKey::Crate.size());
}

#[test]
fn coin_is_centred_in_cell() {
    let tile = Tile::new(TileKind::Coin(CoinKind::Silver), Point::new(64, 128));
    assert_eq!(tile.rect.center(), Point::new(96, 160));
    assert_eq!(tile.coin_value(), Some(1));
    assert_eq!(Tile::new(TileKind::Crate, Point::new(0, 0)).coin_value(), None);
}

#[test]
fn palms_are_raised_by_kind() {
    let small = Tile::new(TileKind::Palm(PalmKind::Small), Point::new(0, 256));
    let large = Tile::new(TileKind::Palm(PalmKind::Large), Point::new(0, 256));
    assert_eq!(small.rect.y, 256 - 38);
    assert_eq!(large.rect.y, 256 - 64);
    assert_eq!(large.rect.w, TILE_SIZE);
}

#[test]
fn enemy_feet_rest_on_cell_bottom() {
    let enemy = Enemy::new(Point::new(128, 64), 3);
    assert_eq!(enemy.rect.bottom(), 64 + TILE_SIZE);
    assert_eq!(enemy.rect.left(), 128);
}

// ── Enemy patrol ──────────────────────────────────────────────────────────────

#[test]
fn enemy_reverses_on_entering_constraint() {
    // Enemy spans 0..52, constraint at 54..118.
    let constraints = vec![constraint_at(-2), Tile::new(TileKind::Constraint, Point::new(54, 0))];
    let mut enemy = Enemy::new(Point::new(0, 0), 3);

    enemy.update(0);
    assert!(enemy.check_constraints(&constraints));
    assert!(!enemy.moving_right());

    enemy.update(0);
    assert!(!enemy.check_constraints(&constraints));
    assert!(!enemy.moving_right());
}

#[test]
fn enemy_does_not_flip_back_while_still_inside() {
    let constraints = vec![Tile::new(TileKind::Constraint, Point::new(40, 0))];
    let mut enemy = Enemy::new(Point::new(0, 0), 3);
    // Deep overlap: 0..52 against 40..104 even after backing off.
    enemy.rect = Rect::new(10, 24, 52, 40);

    assert!(enemy.check_constraints(&constraints));
    assert_eq!(enemy.speed, -3);
    enemy.update(0);
    assert!(!enemy.check_constraints(&constraints));
    assert_eq!(enemy.speed, -3);
}

#[test]
fn enemy_turns_again_at_opposite_constraint() {
    let constraints = vec![constraint_at(0), constraint_at(4)];
    let mut enemy = Enemy::new(Point::new(2 * TILE_SIZE, 0), 4);
    let mut turns = Vec::new();

    for _ in 0..200 {
        enemy.update(0);
        if enemy.check_constraints(&constraints) {
            turns.push(enemy.moving_right());
        }
    }
    assert!(turns.len() >= 2);
    // Alternates: first the right wall sends it left, then the left wall right.
    for pair in turns.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    assert!(!turns[0]);
}

#[test]
fn enemy_without_constraints_walks_forever() {
    let mut enemy = Enemy::new(Point::new(0, 0), 5);
    for _ in 0..100 {
        enemy.update(0);
        assert!(!enemy.check_constraints(&[]));
    }
    assert_eq!(enemy.rect.x, 500);
}

#[test]
fn enemy_sprite_faces_walking_direction() {
    let mut frame = Frame::new();
    let mut enemy = Enemy::new(Point::new(0, 0), 3);
    enemy.draw(&mut frame);
    enemy.reverse();
    enemy.draw(&mut frame);
    assert_eq!(frame.commands[0].layer, DrawLayer::Enemies);
    assert!(frame.commands[0].flip_x);
    assert!(!frame.commands[1].flip_x);
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[test]
fn particle_finishes_after_one_loop_and_stops_drawing() {
    let mut effect = ParticleEffect::new(Point::new(0, 0), ParticleKind::Explosion);
    let updates = SpriteKey::Explosion.frames().count * 2;
    for _ in 0..updates - 1 {
        effect.update(0);
    }
    assert!(!effect.is_finished());
    effect.update(0);
    assert!(effect.is_finished());

    let mut frame = Frame::new();
    effect.draw(DrawLayer::Explosions, &mut frame);
    assert!(frame.commands.is_empty());
}

#[test]
fn enemy_turns_again_on_entering_an_adjacent_constraint() {
    // A spans 40..104, B spans -24..40 and touches it.
    let constraints = vec![
        Tile::new(TileKind::Constraint, Point::new(40, 0)),
        Tile::new(TileKind::Constraint, Point::new(-24, 0)),
    ];
    let mut enemy = Enemy::new(Point::new(0, 0), 3);
    enemy.rect.x = 50;

    assert!(enemy.check_constraints(&constraints));
    assert_eq!(enemy.speed, -3);

    let mut xs = Vec::new();
    for _ in 0..4 {
        enemy.update(0);
        xs.push(enemy.rect.x);
        if enemy.check_constraints(&constraints) {
            break;
        }
    }
    // Still inside A at 47, 44 and 41; reaching B at 38 turns it around.
    assert_eq!(xs, vec![47, 44, 41, 38]);
    assert!(enemy.moving_right());
}
