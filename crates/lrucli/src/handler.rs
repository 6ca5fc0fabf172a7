//! Command handler for the lru shell

use std::fmt;

use lrucache::{CacheStats, LruCache};
use tracing::debug;

/// Reply to a single command line
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ok,
    Pong,
    Value(String),
    Nil,
    Integer(usize),
    Keys(Vec<String>),
    Stats(CacheStats),
    Error(String),
    Quit,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Pong => write!(f, "PONG"),
            Reply::Value(v) => write!(f, "{}", v),
            Reply::Nil => write!(f, "(nil)"),
            Reply::Integer(n) => write!(f, "{}", n),
            Reply::Keys(keys) => write!(f, "{}", keys.join(" ")),
            Reply::Stats(s) => write!(
                f,
                "hits={} misses={} inserts={} updates={} evictions={} hit_ratio={:.2}",
                s.hits(),
                s.misses(),
                s.inserts(),
                s.updates(),
                s.evictions(),
                s.hit_ratio()
            ),
            Reply::Error(msg) => write!(f, "ERR {}", msg),
            Reply::Quit => Ok(()),
        }
    }
}

pub struct CommandHandler {
    cache: LruCache<String, String>,
}

impl CommandHandler {
    pub fn new(cache: LruCache<String, String>) -> Self {
        Self { cache }
    }

    /// Run one command line. Blank lines and `#` comments yield no reply.
    pub fn handle(&mut self, line: &str) -> Option<Reply> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (command, rest) = split_word(line);
        let command = command.to_uppercase();
        debug!(command = %command, "handling command");

        let reply = match command.as_str() {
            "PING" => no_args("ping", rest, || Reply::Pong),
            "SET" => self.handle_set(rest),
            "GET" => self.handle_get(rest),
            "DEL" => self.handle_del(rest),
            "SIZE" => no_args("size", rest, || Reply::Integer(self.cache.size())),
            "LEN" => no_args("len", rest, || Reply::Integer(self.cache.len())),
            "KEYS" => no_args("keys", rest, || {
                Reply::Keys(self.cache.iter().map(|(k, _)| k.clone()).collect())
            }),
            "STATS" => no_args("stats", rest, || Reply::Stats(*self.cache.stats())),
            "CLEAR" => {
                if rest.is_empty() {
                    self.cache.clear();
                    Reply::Ok
                } else {
                    wrong_arity("clear")
                }
            }
            "QUIT" | "EXIT" => Reply::Quit,
            _ => Reply::Error(format!("unknown command '{}'", command.to_lowercase())),
        };

        Some(reply)
    }

    fn handle_set(&mut self, args: &str) -> Reply {
        let (key, value) = split_word(args);
        if key.is_empty() || value.is_empty() {
            return wrong_arity("set");
        }

        self.cache.set(key.to_string(), value.to_string());
        Reply::Ok
    }

    fn handle_get(&mut self, args: &str) -> Reply {
        let Some(key) = single_arg(args) else {
            return wrong_arity("get");
        };

        match self.cache.get(key) {
            Some(value) => Reply::Value(value.clone()),
            None => Reply::Nil,
        }
    }

    fn handle_del(&mut self, args: &str) -> Reply {
        let Some(key) = single_arg(args) else {
            return wrong_arity("del");
        };

        self.cache.del(key);
        Reply::Ok
    }
}

fn split_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn single_arg(args: &str) -> Option<&str> {
    match split_word(args) {
        (key, "") if !key.is_empty() => Some(key),
        _ => None,
    }
}

fn no_args(name: &str, rest: &str, reply: impl FnOnce() -> Reply) -> Reply {
    if rest.is_empty() {
        reply()
    } else {
        wrong_arity(name)
    }
}

fn wrong_arity(name: &str) -> Reply {
    Reply::Error(format!("wrong number of arguments for '{}' command", name))
}
