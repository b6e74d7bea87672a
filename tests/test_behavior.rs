use dodge_arena::behavior::*;
use dodge_arena::config::Tunables;
use dodge_arena::entities::*;
use dodge_arena::geometry::{Rect, Vec2};
use dodge_arena::projectile;

use rand::rngs::StdRng;
use rand::SeedableRng;

const PLAYER_CENTER: Vec2 = Vec2::new(400.0, 300.0);

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn patrol_at(center: Vec2, state: EnemyState) -> Patrol {
    let t = Tunables::default();
    Patrol {
        state,
        waypoints: waypoint_grid(&t),
        target: center,
        attack_range: t.attack_range,
        disengage_range: t.disengage_range,
    }
}

fn grunt_at(center: Vec2, state: EnemyState) -> Enemy {
    let t = Tunables::default();
    Enemy {
        rect: Rect::from_center(center, t.enemy_size, t.enemy_size),
        speed: t.enemy_speed,
        kind: EnemyKind::Grunt(patrol_at(center, state)),
    }
}

fn shooter_at(center: Vec2) -> Enemy {
    let t = Tunables::default();
    Enemy {
        rect: Rect::from_center(center, t.shooting_enemy_size, t.shooting_enemy_size),
        speed: t.shooting_enemy_speed,
        kind: EnemyKind::Shooter {
            patrol: patrol_at(center, EnemyState::Patrol),
            gun: Gun {
                cooldown_ms: t.shoot_cooldown_ms,
                last_shot: None,
                bullets: Vec::new(),
            },
        },
    }
}

fn patrol_of(enemy: &Enemy) -> &Patrol {
    match &enemy.kind {
        EnemyKind::Grunt(p) | EnemyKind::Shooter { patrol: p, .. } => p,
        EnemyKind::Strong { .. } => panic!("strong enemies do not patrol"),
    }
}

fn step(enemy: &mut Enemy, has_power: bool, now: u64) {
    update_enemy(
        enemy,
        PLAYER_CENTER,
        has_power,
        now,
        &Tunables::default(),
        &mut seeded_rng(),
    );
}

// ── waypoint grid ─────────────────────────────────────────────────────────────

#[test]
fn waypoint_grid_covers_arena_in_steps() {
    let t = Tunables::default();
    let grid = waypoint_grid(&t);
    // x ∈ {0, 200, 400, 600}, y ∈ {0, 200, 400}
    assert_eq!(grid.len(), 12);
    assert!(grid.contains(&Vec2::new(600.0, 400.0)));
    assert!(grid.iter().all(|p| p.x < t.arena_width && p.y < t.arena_height));
}

// ── patrol / attack transitions ───────────────────────────────────────────────

#[test]
fn patrol_engages_inside_attack_range() {
    let mut e = grunt_at(Vec2::new(599.0, 300.0), EnemyState::Patrol); // d = 199
    step(&mut e, false, 0);
    assert_eq!(patrol_of(&e).state, EnemyState::Attack);
}

#[test]
fn patrol_does_not_engage_at_exact_attack_range() {
    let mut e = grunt_at(Vec2::new(600.0, 300.0), EnemyState::Patrol); // d = 200
    step(&mut e, false, 0);
    assert_eq!(patrol_of(&e).state, EnemyState::Patrol);
}

#[test]
fn attack_holds_inside_hysteresis_band() {
    for d in [201.0, 250.0, 300.0] {
        let mut e = grunt_at(Vec2::new(400.0 + d, 300.0), EnemyState::Attack);
        step(&mut e, false, 0);
        assert_eq!(patrol_of(&e).state, EnemyState::Attack, "d = {d}");
    }
}

#[test]
fn attack_disengages_past_disengage_range() {
    let mut e = grunt_at(Vec2::new(701.0, 300.0), EnemyState::Attack); // d = 301
    step(&mut e, false, 0);
    let p = patrol_of(&e);
    assert_eq!(p.state, EnemyState::Patrol);
    // Still moved toward the player this tick, then patrols from where it stands
    assert_eq!(e.rect.center(), Vec2::new(698.0, 300.0));
    assert_eq!(p.target, e.rect.center());
}

#[test]
fn attack_moves_toward_player_at_speed() {
    let mut e = grunt_at(Vec2::new(400.0, 100.0), EnemyState::Attack);
    step(&mut e, false, 0);
    assert_eq!(e.rect.center(), Vec2::new(400.0, 103.0));
}

#[test]
fn attack_ranges_keep_hysteresis_order() {
    let e = grunt_at(Vec2::new(0.0, 0.0), EnemyState::Patrol);
    let p = patrol_of(&e);
    assert!(p.attack_range < p.disengage_range);
}

// ── patrol movement ───────────────────────────────────────────────────────────

#[test]
fn patrol_step_moves_speed_toward_far_target() {
    let mut rect = Rect::from_center(Vec2::new(100.0, 100.0), 30.0, 30.0);
    let mut patrol = patrol_at(Vec2::new(200.0, 100.0), EnemyState::Patrol);
    patrol_step(&mut rect, 3.0, &mut patrol, &mut seeded_rng());
    assert_eq!(rect.center(), Vec2::new(103.0, 100.0));
    assert_eq!(patrol.target, Vec2::new(200.0, 100.0));
}

#[test]
fn patrol_step_lands_on_target_within_one_step() {
    // 2 px away with speed 3: a full step would overshoot
    let mut rect = Rect::from_center(Vec2::new(52.0, 50.0), 30.0, 30.0);
    let mut patrol = patrol_at(Vec2::new(50.0, 50.0), EnemyState::Patrol);
    patrol_step(&mut rect, 3.0, &mut patrol, &mut seeded_rng());
    assert_eq!(rect.center(), Vec2::new(50.0, 50.0));
    // A fresh waypoint from the grid was picked
    assert_ne!(patrol.target, Vec2::new(50.0, 50.0));
    assert!(patrol.waypoints.contains(&patrol.target));
}

// ── degenerate geometry ───────────────────────────────────────────────────────

#[test]
fn chase_skips_zero_distance() {
    let mut rect = Rect::from_center(PLAYER_CENTER, 30.0, 30.0);
    let before = rect;
    assert!(!chase(&mut rect, 3.0, PLAYER_CENTER));
    assert_eq!(rect, before);
}

// ── shooter runaway ───────────────────────────────────────────────────────────

#[test]
fn runaway_moves_away_from_player() {
    let arena = Tunables::default().arena();
    let mut rect = Rect::from_center(Vec2::new(650.0, 300.0), 30.0, 30.0);
    assert!(runaway(&mut rect, 2.5, PLAYER_CENTER, &arena));
    assert_eq!(rect.center(), Vec2::new(652.5, 300.0));
}

#[test]
fn runaway_is_dropped_at_arena_edge() {
    let arena = Tunables::default().arena();
    let mut rect = Rect::square(0.0, 285.0, 30.0);
    let before = rect;
    assert!(!runaway(&mut rect, 2.5, PLAYER_CENTER, &arena));
    assert_eq!(rect, before);
}

#[test]
fn powered_player_makes_shooter_flee_without_engaging() {
    let mut e = shooter_at(Vec2::new(500.0, 300.0)); // d = 100 < attack_range
    step(&mut e, true, 0);
    assert_eq!(patrol_of(&e).state, EnemyState::Patrol);
    assert_eq!(e.rect.center(), Vec2::new(502.5, 300.0));
}

#[test]
fn shooter_fires_regardless_of_power() {
    let mut e = shooter_at(Vec2::new(500.0, 300.0));
    step(&mut e, true, 7);
    assert_eq!(e.bullets().len(), 1);
    match &e.kind {
        EnemyKind::Shooter { gun, .. } => assert_eq!(gun.last_shot, Some(7)),
        _ => unreachable!(),
    }
}

// ── fire control ──────────────────────────────────────────────────────────────

fn gun() -> Gun {
    Gun {
        cooldown_ms: 1000,
        last_shot: None,
        bullets: Vec::new(),
    }
}

#[test]
fn fresh_gun_fires_immediately() {
    let mut g = gun();
    assert!(fire_control(&mut g, Vec2::new(100.0, 100.0), PLAYER_CENTER, 0, &Tunables::default()));
    assert_eq!(g.bullets.len(), 1);
    assert_eq!(g.last_shot, Some(0));
}

#[test]
fn cooldown_must_be_strictly_exceeded() {
    let t = Tunables::default();
    let mut g = gun();
    g.last_shot = Some(0);
    assert!(!fire_control(&mut g, Vec2::new(100.0, 100.0), PLAYER_CENTER, 1000, &t));
    assert!(fire_control(&mut g, Vec2::new(100.0, 100.0), PLAYER_CENTER, 1001, &t));
    assert_eq!(g.last_shot, Some(1001));
}

/// Drive a shooter through `update_enemy` for 5000 ms of 16 ms ticks and
/// count the shots fired.
fn run_shooter_for_five_seconds(enemy: &mut Enemy, has_power: bool) -> usize {
    let t = Tunables::default();
    let mut rng = seeded_rng();
    let mut shots = 0;
    let mut last = None;
    for now in (0..=5000u64).step_by(16) {
        update_enemy(enemy, PLAYER_CENTER, has_power, now, &t, &mut rng);
        if let EnemyKind::Shooter { gun, .. } = &enemy.kind {
            if gun.last_shot != last {
                shots += 1;
                last = gun.last_shot;
            }
        }
    }
    shots
}

#[test]
fn five_shots_in_five_seconds_while_fleeing() {
    let mut e = shooter_at(Vec2::new(500.0, 300.0));
    let shots = run_shooter_for_five_seconds(&mut e, true);
    assert_eq!(shots, 5);
    // Fled right until the wall stopped it
    assert_eq!(e.rect.center(), Vec2::new(785.0, 300.0));
    // Shots 1 to 3 crossed the whole arena and were culled
    assert_eq!(e.bullets().len(), 2);
}

#[test]
fn five_shots_in_five_seconds_while_patrolling() {
    let mut e = shooter_at(Vec2::new(100.0, 100.0));
    // A single far-off waypoint keeps the shooter out of attack range
    if let EnemyKind::Shooter { patrol, .. } = &mut e.kind {
        patrol.waypoints = vec![Vec2::new(50.0, 50.0)];
        patrol.target = Vec2::new(50.0, 50.0);
    }
    let shots = run_shooter_for_five_seconds(&mut e, false);
    assert_eq!(shots, 5);
    assert_eq!(patrol_of(&e).state, EnemyState::Patrol);
    assert!(e.rect.center().distance(Vec2::new(50.0, 50.0)) < 0.01);
    assert!(!e.bullets().is_empty());
    assert!(e.bullets().len() < shots);
}

#[test]
fn bullet_is_aimed_at_player() {
    let t = Tunables::default();
    let mut g = gun();
    fire_control(&mut g, Vec2::new(100.0, 300.0), PLAYER_CENTER, 0, &t);
    let b = &g.bullets[0];
    assert_eq!(b.direction, Vec2::new(1.0, 0.0));
    assert_eq!(b.rect.center(), Vec2::new(100.0, 300.0));
    assert_eq!(b.speed, t.bullet_speed);
}

#[test]
fn zero_aim_skips_shot_and_keeps_timer() {
    let mut g = gun();
    assert!(!fire_control(&mut g, PLAYER_CENTER, PLAYER_CENTER, 0, &Tunables::default()));
    assert!(g.bullets.is_empty());
    assert_eq!(g.last_shot, None);
}

// ── strong pursuit ────────────────────────────────────────────────────────────

#[test]
fn strong_enemy_always_pursues() {
    let t = Tunables::default();
    let mut e = Enemy {
        rect: Rect::from_center(Vec2::new(400.0, 0.0), 45.0, 45.0), // d = 300, far beyond attack range
        speed: t.strong_enemy_speed,
        kind: EnemyKind::Strong { hp: 3 },
    };
    step(&mut e, false, 0);
    assert_eq!(e.rect.center(), Vec2::new(400.0, 2.0));
    step(&mut e, true, 16);
    assert_eq!(e.rect.center(), Vec2::new(400.0, 4.0));
}

// ── projectiles ───────────────────────────────────────────────────────────────

#[test]
fn bullets_fly_straight() {
    let arena = Tunables::default().arena();
    let mut bullets = vec![projectile::spawn(Vec2::new(100.0, 100.0), Vec2::new(0.0, 1.0), 10.0, 5.0)];
    projectile::advance(&mut bullets, &arena);
    projectile::advance(&mut bullets, &arena);
    assert_eq!(bullets[0].rect.center(), Vec2::new(100.0, 110.0));
}

#[test]
fn bullets_leaving_the_arena_are_culled() {
    let arena = Tunables::default().arena();
    let mut bullets = vec![
        projectile::spawn(Vec2::new(3.0, 100.0), Vec2::new(-1.0, 0.0), 10.0, 5.0),
        projectile::spawn(Vec2::new(-4.0, 100.0), Vec2::new(-1.0, 0.0), 10.0, 5.0),
    ];
    projectile::advance(&mut bullets, &arena);
    // First one still pokes into the arena (x ∈ [-7, 3)), second is gone
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].rect.center(), Vec2::new(-2.0, 100.0));
}
