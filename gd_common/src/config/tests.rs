use super::*;
use pretty_assertions::assert_eq;

#[test]
fn default_src_matches() {
  assert_eq!(Config::from_src(DEFAULT_SRC).unwrap(), Config::default());
}

#[test]
fn empty_is_default() {
  assert_eq!(Config::from_src("").unwrap(), Config::default());
}

#[test]
fn parse_simple_values() {
  let config = Config::from_src(
    r#"
    log-level = "debug"
    host = "http://127.0.0.1:9001"
    retries = 3
    timeout-secs = 5
    dimension = "minecraft:the_nether"
    heightmaps = ["OCEAN_FLOOR"]
    default-heightmap = "OCEAN_FLOOR"
    "#,
  )
  .unwrap();

  assert_eq!(config.log_level, LevelFilter::Debug);
  assert_eq!(config.host, "http://127.0.0.1:9001");
  assert_eq!(config.retries, 3);
  assert_eq!(config.retry_delay(), Duration::from_secs(3));
  assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
  assert_eq!(config.dimension.as_deref(), Some("minecraft:the_nether"));
  assert_eq!(config.build_y_min, -64);
  assert_eq!(config.heightmaps, vec![HeightmapKind::OceanFloor]);
  assert_eq!(config.default_heightmap, HeightmapKind::OceanFloor);
}

#[test]
fn invalid() {
  assert!(matches!(Config::from_src("retries = -1"), Err(ConfigError::Toml(_))));
  assert!(matches!(Config::from_src("heightmaps = [\"LEAVES\"]"), Err(ConfigError::Toml(_))));
  assert!(matches!(Config::from_src("unknown-key = 1"), Err(ConfigError::Toml(_))));
}

#[test]
fn missing_file() {
  let path = "/this/path/does/not/exist/gd.toml";
  assert_eq!(Config::read(path).unwrap(), None);
  assert_eq!(Config::load(path).unwrap(), Config::default());
}

#[test]
fn read_file() {
  let path = std::env::temp_dir().join(format!("gd-config-test-{}.toml", std::process::id()));
  fs::write(&path, "retries = 2").unwrap();
  let read = Config::read(&path);
  let loaded = Config::load(&path);
  fs::remove_file(&path).unwrap();
  assert_eq!(read.unwrap(), Some(Config { retries: 2, ..Config::default() }));
  assert_eq!(loaded.unwrap().retries, 2);

  // A directory exists, but can't be read as a config.
  assert!(matches!(Config::read(std::env::temp_dir()), Err(ConfigError::IO(_))));
}
