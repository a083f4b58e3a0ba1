// Interactive driver: read `key value` pairs, insert, print the cache

use anyhow::{Context, Result};
use ordered_lru::LruCache;
use std::fmt::Write as _;
use std::io::{BufRead, Write};
use tracing::warn;

/// Parse one `key value` pair taken from the token stream.
pub fn parse_pair(key: &str, value: &str) -> Result<(i64, String)> {
    let key: i64 = key
        .parse()
        .with_context(|| format!("invalid key {key:?}"))?;
    Ok((key, value.to_string()))
}

/// Render the cache in ascending key order as `[k, v] [k, v] `.
pub fn render(cache: &LruCache<i64, String>) -> String {
    let mut out = String::new();
    for (key, value) in cache {
        let _ = write!(out, "[{key}, {value}] ");
    }
    out
}

/// Run the driver until `input` is exhausted.
///
/// Input is a stream of whitespace-separated tokens taken two at a time, so a
/// line may hold several pairs and a pair may span lines. Each pair is inserted
/// and the cache printed as soon as its value arrives. Pairs with a malformed
/// key are logged and skipped. Returns the number of pairs inserted.
pub fn run<R: BufRead, W: Write>(
    capacity: usize,
    input: R,
    mut output: W,
) -> Result<usize> {
    let mut cache = LruCache::new(capacity);
    let mut inserted = 0;
    let mut pending_key: Option<String> = None;

    for (lineno, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        for token in line.split_whitespace() {
            let Some(key) = pending_key.take() else {
                pending_key = Some(token.to_string());
                continue;
            };
            match parse_pair(&key, token) {
                Ok((key, value)) => {
                    cache.insert(key, value);
                    inserted += 1;
                    writeln!(output, "{}", render(&cache)).context("failed to write output")?;
                }
                Err(err) => warn!(line = lineno + 1, "skipping malformed pair: {err:#}"),
            }
        }
    }

    if let Some(key) = pending_key {
        warn!("ignoring key {key:?} with no value at end of input");
    }

    Ok(inserted)
}
