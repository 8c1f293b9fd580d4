// ABOUTME: Narrow-interface external collaborators (clock, RNG, HTTP, input) kept out of the core engine

use crate::error::InterpretError;
use crate::value::Value;
use chrono::Local;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::Write;

pub trait Clock {
    fn now_time(&self) -> String;
    fn now_date(&self) -> String;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_time(&self) -> String {
        Local::now().format("%H:%M:%S").to_string()
    }

    fn now_date(&self) -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }
}

pub trait RandomSource {
    fn gen_range_i64(&self, lo: i64, hi: i64) -> i64;
    fn shuffle(&self, items: &mut [Value]);
}

pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn gen_range_i64(&self, lo: i64, hi: i64) -> i64 {
        let mut rng = rand::thread_rng();
        rng.gen_range(lo..=hi)
    }

    fn shuffle(&self, items: &mut [Value]) {
        let mut rng = rand::thread_rng();
        items.shuffle(&mut rng);
    }
}

pub trait HttpClient {
    fn get(&self, url: &str) -> Result<(u16, String), InterpretError>;
}

pub struct UreqHttpClient;

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &str) -> Result<(u16, String), InterpretError> {
        match ureq::get(url).call() {
            Ok(response) => {
                let status = response.status();
                let body = response
                    .into_string()
                    .map_err(|e| InterpretError::IOError(e.to_string()))?;
                Ok((status, body))
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Ok((status, body))
            }
            Err(e) => Err(InterpretError::IOError(e.to_string())),
        }
    }
}

/// Backs "read a line of user input": a FIFO queue of pre-supplied
/// lines is drained first (scripted input), falling back to an
/// interactive read from stdin once it's empty.
pub trait InputSource {
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

#[derive(Default)]
pub struct StdinInputSource {
    queue: std::collections::VecDeque<String>,
}

impl StdinInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queued_lines(lines: Vec<String>) -> Self {
        StdinInputSource {
            queue: lines.into(),
        }
    }

    pub fn push_line(&mut self, line: String) {
        self.queue.push_back(line);
    }
}

impl InputSource for StdinInputSource {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if let Some(line) = self.queue.pop_front() {
            return Some(line);
        }
        print!("{}", prompt);
        let _ = std::io::stdout().flush();
        let mut buf = String::new();
        match std::io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches(['\n', '\r']).to_string()),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_lines_are_drained_before_falling_back() {
        let mut source = StdinInputSource::with_queued_lines(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(source.read_line(""), Some("a".to_string()));
        assert_eq!(source.read_line(""), Some("b".to_string()));
    }

    #[test]
    fn system_random_range_stays_within_bounds() {
        let rng = SystemRandom;
        for _ in 0..50 {
            let n = rng.gen_range_i64(1, 3);
            assert!((1..=3).contains(&n));
        }
    }
}
