// src/config/consts.rs

// Addressing
pub const SENTINEL_MAX: u32 = 9000; // "rest of the chapter"
pub const DEFAULT_TRANSLATION: &str = "NIV";

// Net config
pub const HOST: &str = "https://www.biblegateway.com";
pub const PASSAGE_PATH: &str = "/passage/";
pub const USER_AGENT: &str = concat!("verse_scrape/", env!("CARGO_PKG_VERSION"));

// Retry policy
pub const RETRY_COUNT: u32 = 3;
pub const RETRY_DELAY_SECS: u64 = 2;
pub const RETRY_COUNT_MAX: u32 = 10;
pub const RETRY_DELAY_MAX_SECS: u64 = 30;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite

// Logging
pub const LOG_ENV: &str = "VERSE_SCRAPE_LOG";
