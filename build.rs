//! Stamps `RAYPROBE_BUILD` ("<version> (<utc timestamp>)") for `rayprobe version`.
//!
//! `SOURCE_DATE_EPOCH` pins the timestamp for reproducible builds.

use time::OffsetDateTime;

fn main() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let built_at = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .unwrap_or_else(OffsetDateTime::now_utc);

    let fmt = time::format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second] UTC")
        .expect("valid timestamp format");
    let stamp = built_at.format(&fmt).unwrap_or_else(|_| "unknown date".to_string());

    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    println!("cargo:rustc-env=RAYPROBE_BUILD={} ({})", version, stamp);
}
