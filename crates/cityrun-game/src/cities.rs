use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use cityrun_core::config::{
    CHECKPOINT_POSITIONS, GROUND_PLANE_Y, LANDMARK_INSET, LEVEL_WIDTH, SCREEN_HEIGHT,
};

use crate::collectible::{Collectible, CollectibleKind};
use crate::enemy::Enemy;
use crate::level::{LevelWorld, Platform, PlatformKind};

/// The coast-to-coast route, in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum City {
    Boston,
    Nyc,
    Chicago,
}

impl City {
    pub const ALL: [City; 3] = [City::Boston, City::Nyc, City::Chicago];

    pub const fn display_name(self) -> &'static str {
        match self {
            City::Boston => "Boston",
            City::Nyc => "New York City",
            City::Chicago => "Chicago",
        }
    }

    pub const fn landmark_name(self) -> &'static str {
        match self {
            City::Boston => "Fenway Park",
            City::Nyc => "Times Square",
            City::Chicago => "The Chicago Bean",
        }
    }

    /// Next stop on the route, if any.
    pub const fn next(self) -> Option<City> {
        match self {
            City::Boston => Some(City::Nyc),
            City::Nyc => Some(City::Chicago),
            City::Chicago => None,
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Build a city's level. The seed fixes every randomized placement, so the
/// same (city, seed) pair always produces the same world.
pub fn build_level(city: City, seed: u64) -> LevelWorld {
    let mut rng = StdRng::seed_from_u64(seed);
    let (platforms, enemies, collectibles) = match city {
        City::Boston => build_boston(&mut rng),
        City::Nyc => build_nyc(&mut rng),
        City::Chicago => build_chicago(&mut rng),
    };
    tracing::debug!(
        %city,
        platforms = platforms.len(),
        enemies = enemies.len(),
        collectibles = collectibles.len(),
        "level built"
    );
    LevelWorld::new(
        city,
        LEVEL_WIDTH,
        platforms,
        enemies,
        collectibles,
        CHECKPOINT_POSITIONS.to_vec(),
        LEVEL_WIDTH - LANDMARK_INSET,
        rng,
    )
}

/// Fall-themed brick streets: stoops, awnings, fire escapes, rooftops, and
/// park benches.
fn build_boston(rng: &mut StdRng) -> (Vec<Platform>, Vec<Enemy>, Vec<Collectible>) {
    let ground_y = GROUND_PLANE_Y;
    let mut platforms = vec![Platform::new(
        0.0,
        ground_y,
        LEVEL_WIDTH,
        100.0,
        PlatformKind::Ground,
    )];

    let stoops: [(f32, f32, f32); 9] = [
        (250.0, ground_y - 40.0, 80.0),
        (600.0, ground_y - 35.0, 90.0),
        (950.0, ground_y - 45.0, 85.0),
        (1300.0, ground_y - 40.0, 75.0),
        (1650.0, ground_y - 38.0, 95.0),
        (2100.0, ground_y - 42.0, 80.0),
        (2550.0, ground_y - 45.0, 90.0),
        (2900.0, ground_y - 40.0, 85.0),
        (3300.0, ground_y - 35.0, 100.0),
    ];
    for (x, y, w) in stoops {
        platforms.push(Platform::new(x, y, w, 15.0, PlatformKind::Stoop));
    }

    let awnings: [(f32, f32, f32); 8] = [
        (400.0, ground_y - 120.0, 200.0),
        (700.0, ground_y - 140.0, 150.0),
        (1050.0, ground_y - 125.0, 180.0),
        (1450.0, ground_y - 135.0, 160.0),
        (1850.0, ground_y - 130.0, 190.0),
        (2250.0, ground_y - 145.0, 170.0),
        (2650.0, ground_y - 125.0, 185.0),
        (3050.0, ground_y - 140.0, 175.0),
    ];
    for (x, y, w) in awnings {
        platforms.push(Platform::new(x, y, w, 12.0, PlatformKind::Awning));
    }

    let fire_escapes: [(f32, f32, f32); 7] = [
        (500.0, ground_y - 200.0, 120.0),
        (900.0, ground_y - 240.0, 110.0),
        (1400.0, ground_y - 220.0, 130.0),
        (1800.0, ground_y - 250.0, 115.0),
        (2200.0, ground_y - 230.0, 125.0),
        (2700.0, ground_y - 245.0, 120.0),
        (3100.0, ground_y - 210.0, 140.0),
    ];
    for (x, y, w) in fire_escapes {
        platforms.push(Platform::new(x, y, w, 10.0, PlatformKind::FireEscape));
    }

    let rooftops: [(f32, f32, f32); 7] = [
        (800.0, ground_y - 300.0, 180.0),
        (1200.0, ground_y - 280.0, 160.0),
        (1600.0, ground_y - 320.0, 150.0),
        (2000.0, ground_y - 290.0, 200.0),
        (2400.0, ground_y - 310.0, 170.0),
        (2800.0, ground_y - 285.0, 180.0),
        (3200.0, ground_y - 295.0, 190.0),
    ];
    for (x, y, w) in rooftops {
        platforms.push(Platform::new(x, y, w, 18.0, PlatformKind::Rooftop));
    }

    let benches: [(f32, f32, f32); 5] = [
        (350.0, ground_y - 25.0, 50.0),
        (1100.0, ground_y - 25.0, 55.0),
        (1750.0, ground_y - 25.0, 50.0),
        (2350.0, ground_y - 25.0, 60.0),
        (3000.0, ground_y - 25.0, 50.0),
    ];
    for (x, y, w) in benches {
        platforms.push(Platform::new(x, y, w, 8.0, PlatformKind::Bench));
    }

    let mut enemies = Vec::new();
    let enemy_ground_y = SCREEN_HEIGHT - 148.0;
    for x in [500.0, 1100.0, 1900.0, 2600.0] {
        enemies.push(Enemy::cyclist(x, enemy_ground_y, 200.0));
    }
    for (x, y) in [(700.0, 300.0), (1400.0, 250.0), (2200.0, 280.0), (3000.0, 260.0)] {
        enemies.push(Enemy::pigeon(x, y, 80.0));
    }
    enemies.push(Enemy::taxi(100.0, enemy_ground_y + 8.0));

    let mut collectibles = Vec::new();
    for _ in 0..30 {
        let x = rng.random_range(200.0..LEVEL_WIDTH - 200.0);
        collectibles.push(Collectible::new(x, ground_y - 50.0, CollectibleKind::Teacup));
    }
    let books: [(f32, f32); 8] = [
        (450.0, ground_y - 150.0),
        (850.0, ground_y - 210.0),
        (1250.0, ground_y - 180.0),
        (1650.0, ground_y - 230.0),
        (2050.0, ground_y - 170.0),
        (2450.0, ground_y - 220.0),
        (2850.0, ground_y - 190.0),
        (3250.0, ground_y - 160.0),
    ];
    for (x, y) in books {
        collectibles.push(Collectible::new(x, y, CollectibleKind::Book));
    }
    sprinkle_on_platforms(rng, &platforms, 0.6, &[CollectibleKind::Teacup], &mut collectibles);

    (platforms, enemies, collectibles)
}

/// Neon-night fire escapes over a long street.
fn build_nyc(rng: &mut StdRng) -> (Vec<Platform>, Vec<Enemy>, Vec<Collectible>) {
    let ground_y = GROUND_PLANE_Y;
    let mut platforms = vec![Platform::new(
        0.0,
        ground_y,
        LEVEL_WIDTH,
        100.0,
        PlatformKind::Ground,
    )];

    // Staggered ledges with slightly randomized widths
    for i in 0..12 {
        let x = 350.0 + i as f32 * 300.0;
        let y = ground_y - 120.0 - (i % 4) as f32 * 40.0;
        let width = 120.0 + rng.random_range(-20.0..=20.0);
        platforms.push(Platform::new(x, y, width, 15.0, PlatformKind::Ledge));
    }

    let mut enemies = Vec::new();
    let enemy_ground_y = SCREEN_HEIGHT - 115.0;
    for i in 0..8 {
        let x = 600.0 + i as f32 * 450.0;
        enemies.push(Enemy::rat(x, enemy_ground_y, rng.random()));
    }
    for x in [800.0, 1600.0, 2400.0] {
        enemies.push(Enemy::vendor(x, enemy_ground_y));
    }
    enemies.push(Enemy::taxi(100.0, enemy_ground_y + 15.0));

    let menu = [
        CollectibleKind::Pizza,
        CollectibleKind::Metrocard,
        CollectibleKind::Bagel,
    ];
    let mut collectibles = Vec::new();
    for _ in 0..40 {
        let x = rng.random_range(200.0..LEVEL_WIDTH - 200.0);
        let kind = menu[rng.random_range(0..menu.len())];
        collectibles.push(Collectible::new(x, ground_y - 50.0, kind));
    }
    sprinkle_on_platforms(rng, &platforms, 0.7, &menu, &mut collectibles);

    (platforms, enemies, collectibles)
}

/// Windy city: elevated train tracks, pigeons, and paper on the wind.
fn build_chicago(rng: &mut StdRng) -> (Vec<Platform>, Vec<Enemy>, Vec<Collectible>) {
    let ground_y = GROUND_PLANE_Y;
    let mut platforms = vec![Platform::new(
        0.0,
        ground_y,
        LEVEL_WIDTH,
        100.0,
        PlatformKind::Ground,
    )];

    for i in 0..10 {
        let x = 300.0 + i as f32 * 350.0;
        let y = ground_y - 180.0 - (i % 3) as f32 * 30.0;
        platforms.push(Platform::new(x, y, 180.0, 20.0, PlatformKind::TrainTrack));
    }

    let mut enemies = Vec::new();
    for i in 0..6 {
        let x = 500.0 + i as f32 * 600.0;
        let y = 200.0 + rng.random_range(-50.0..=50.0);
        enemies.push(Enemy::pigeon(x, y, 100.0));
    }
    for _ in 0..15 {
        let x = rng.random_range(300.0..LEVEL_WIDTH - 300.0);
        let y = rng.random_range(150.0..400.0);
        enemies.push(Enemy::flying_paper(x, y, LEVEL_WIDTH, rng.random()));
    }

    let menu = [
        CollectibleKind::DeepDish,
        CollectibleKind::HotDog,
        CollectibleKind::JazzNote,
    ];
    let mut collectibles = Vec::new();
    for _ in 0..35 {
        let x = rng.random_range(200.0..LEVEL_WIDTH - 200.0);
        let kind = menu[rng.random_range(0..menu.len())];
        collectibles.push(Collectible::new(x, ground_y - 50.0, kind));
    }
    sprinkle_on_platforms(rng, &platforms, 0.65, &menu, &mut collectibles);

    (platforms, enemies, collectibles)
}

/// Drop a collectible centered above some fraction of the non-ground
/// platforms.
fn sprinkle_on_platforms(
    rng: &mut StdRng,
    platforms: &[Platform],
    chance: f64,
    kinds: &[CollectibleKind],
    out: &mut Vec<Collectible>,
) {
    for platform in platforms.iter().skip(1) {
        if rng.random_bool(chance) {
            let x = platform.rect.center_x();
            let y = platform.rect.top() - 30.0;
            let kind = kinds[rng.random_range(0..kinds.len())];
            out.push(Collectible::new(x, y, kind));
        }
    }
}
