// Tick and timing
pub const FPS: u32 = 60;
pub const FRAME_DT: f64 = 1.0 / FPS as f64; // fixed step fed to every stage
pub const STAGE_COUNT: usize = 5;

// Cast timing
pub const CAST_TRACK_LENGTH: f64 = 600.0;
pub const CAST_MARKER_SPEED: f64 = 300.0;
pub const CAST_TARGET_ZONE_FRACTION: f64 = 0.10;

// Depth control
pub const DEPTH_TRACK_LENGTH: f64 = 400.0;
pub const DEPTH_MARKER_SPEED: f64 = 180.0;
pub const DEPTH_IDEAL_ZONE: (f64, f64) = (185.0, 215.0);

// Bite reaction
pub const BITE_DELAY_RANGE: (f64, f64) = (1.0, 2.5);
pub const BITE_REACTION_WINDOW: f64 = 0.6;
pub const BITE_WINDOW_PENALTY_PER_SEC: f64 = 100.0;
pub const BITE_LATE_BASE_SCORE: f64 = 20.0;
pub const BITE_LATE_PENALTY_PER_SEC: f64 = 40.0;

// Reeling rhythm
pub const REELING_SEQUENCE_LENGTH: usize = 8;

// Line tension (y grows downward)
pub const TENSION_DURATION: f64 = 5.0;
pub const TENSION_TRACK: (f64, f64) = (150.0, 550.0);
pub const TENSION_BOBBER_START: f64 = 250.0;
pub const TENSION_GRAVITY: f64 = 200.0;
pub const TENSION_LIFT: f64 = 300.0;
pub const TENSION_MAX_SPEED: f64 = 300.0;
pub const TENSION_TARGET_SIZE: f64 = 80.0;
pub const TENSION_TARGET_SPEED: f64 = 80.0;
pub const TENSION_TARGET_TOP_RANGE: (f64, f64) = (150.0, 450.0);
pub const TENSION_TARGET_START: f64 = 300.0;

// Quality
pub const WEIGHTED_STAGE_SHARE: f64 = 0.7;
pub const WEIGHTED_TARGET_SHARE: f64 = 0.3;

// Rewards
pub const LUCK_DIVISOR: f64 = 1000.0;
pub const SENTINEL_ITEM_NAME: &str = "Common Fish";
pub const PRICE_BONUS_MULTIPLIER: u64 = 10;
pub const PRICE_QUALITY_EXPONENT: f64 = 1.5;
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

// Economy
pub const STARTING_GOLD: u64 = 5000;
pub const INVENTORY_CAPACITY: usize = 20;
