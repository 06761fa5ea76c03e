#![doc(
  html_playground_url = "https://play.rust-lang.org/",
  test(no_crate_inject, attr(deny(warnings)))
)]

#[macro_use]
extern crate log;

use log::LevelFilter;

pub mod chunk;
pub mod config;
pub mod math;
pub mod nbt;
pub mod util;

pub use config::Config;

/// Initializes logger. Might do more things in the future.
pub fn init(name: &str) { init_with_level(name, LevelFilter::Info) }

/// Installs the stdout logger, filtering everything above `level`. If a logger
/// has already been installed (for example, by a test harness), this does
/// nothing.
pub fn init_with_level(_name: &str, level: LevelFilter) {
  use log::{Level, Metadata, Record};

  struct Logger;

  impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
      // The http stack is very chatty at debug level.
      let noisy =
        metadata.target().starts_with("ureq") || metadata.target().starts_with("rustls");
      metadata.level() <= log::max_level() && !(noisy && metadata.level() > Level::Info)
    }

    fn log(&self, record: &Record) {
      if self.enabled(record.metadata()) {
        let now = chrono::Local::now();
        print!("{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
        #[cfg(debug_assertions)]
        {
          if let Some(path) = record.module_path() {
            print!("{path}");
          }
          if let Some(line) = record.line() {
            print!(":{line}");
          }
          print!(" ");
        }
        match record.level() {
          Level::Trace => print!("[\x1b[36mTRACE\x1b[0m]"),
          Level::Debug => print!("[\x1b[34mDEBUG\x1b[0m]"),
          Level::Info => print!("[\x1b[32mINFO\x1b[0m]"),
          Level::Warn => print!("[\x1b[33mWARN\x1b[0m]"),
          Level::Error => print!("[\x1b[31m\x1b[1mERROR\x1b[0m]"),
        }
        println!(" {}", record.args());
      }
    }

    fn flush(&self) {}
  }

  static LOGGER: Logger = Logger;
  if log::set_logger(&LOGGER).is_ok() {
    log::set_max_level(level);
  }
}
