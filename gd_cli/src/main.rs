#[macro_use]
extern crate log;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gd_common::{
  chunk::HeightmapKind,
  math::{Pos, Rect},
  Config,
};
use gd_http::Interface;
use gd_world::{SliceOptions, WorldSlice};
use log::LevelFilter;
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
struct Args {
  /// The config file. If it doesn't exist, the default config is used.
  #[clap(long, default_value = "gd.toml")]
  config:  PathBuf,
  /// The address of the GDMC HTTP interface. Overrides the `host` in the
  /// config.
  #[clap(long)]
  host:    Option<String>,
  #[clap(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Prints the Minecraft version of the server.
  Version,
  /// Loads a rect of blocks, and prints a summary of the sections and heights.
  #[clap(allow_negative_numbers = true)]
  Slice {
    x:         i32,
    z:         i32,
    dx:        i32,
    dz:        i32,
    /// The heightmap to summarize. Defaults to the one in the config.
    #[clap(long)]
    heightmap: Option<HeightmapKind>,
    /// Reads chunk data from this file, instead of fetching it. The file must
    /// contain exactly the chunks covering the rect.
    #[clap(long)]
    file:      Option<PathBuf>,
  },
  /// Prints the block and biome at a single position.
  #[clap(allow_negative_numbers = true)]
  Block { x: i32, y: i32, z: i32 },
  /// Loads the build area, and prints its heights.
  BuildArea {
    #[clap(long)]
    heightmap: Option<HeightmapKind>,
  },
}

fn main() {
  let args = Args::parse();
  let config = match Config::read(&args.config) {
    Ok(c) => c,
    Err(e) => {
      // The logger isn't set up yet.
      eprintln!("{e}");
      std::process::exit(1);
    }
  };
  gd_common::init_with_level("gd", config.as_ref().map_or(LevelFilter::Info, |c| c.log_level));
  let config = config.unwrap_or_else(|| {
    warn!("no config found at `{}`, using the default config", args.config.display());
    Config::default()
  });
  if let Err(e) = Config::write_default("gd-default.toml") {
    warn!("could not write default config to `gd-default.toml`: {e}");
  }

  match run(args, config) {
    Ok(()) => {}
    Err(e) => {
      error!("{e:#}");
      std::process::exit(1);
    }
  }
}

fn run(args: Args, mut config: Config) -> Result<()> {
  if let Some(host) = args.host {
    config.host = host;
  }
  let interface = Interface::from_config(&config);
  let mut opts = SliceOptions::from(&config);

  match args.command {
    Command::Version => println!("{}", interface.get_version()?),
    Command::Slice { x, z, dx, dz, heightmap, file } => {
      let rect = Rect::new(x, z, dx, dz);
      let slice = match file {
        Some(path) => {
          let bytes =
            fs::read(&path).with_context(|| format!("could not read {}", path.display()))?;
          WorldSlice::from_bytes(bytes, rect, &opts)?
        }
        None => WorldSlice::with_options(&interface, rect, &opts)?,
      };
      print_summary(&slice, heightmap.unwrap_or(config.default_heightmap))?;
    }
    Command::Block { x, y, z } => {
      let pos = Pos::new(x, y, z);
      opts.heightmaps = vec![opts.default_heightmap];
      let slice = WorldSlice::with_options(&interface, Rect::new(x, z, 1, 1), &opts)?;
      match slice.block_at(pos) {
        Some(state) => println!("block:   {state}"),
        None => println!("block:   {}", slice.block_id_at(pos)),
      }
      println!("biome:   {}", slice.biome_at(pos).unwrap_or("none"));
      println!("primary: {}", slice.primary_biome_near(pos).unwrap_or("none"));
      println!("height:  {}", slice.height(x, z)?);
    }
    Command::BuildArea { heightmap } => {
      let area = interface.get_build_area()?;
      info!("build area is {} to {}", area.from(), area.to());
      let kind = heightmap.unwrap_or(config.default_heightmap);
      let slice = WorldSlice::with_options(&interface, area.rect(), &opts)?;
      print_summary(&slice, kind)?;
      print_heights(&slice, kind)?;
    }
  }
  Ok(())
}

fn print_summary(slice: &WorldSlice, kind: HeightmapKind) -> Result<()> {
  let Some(heightmap) = slice.heightmap(kind) else {
    bail!("the {kind} heightmap was not loaded (see `heightmaps` in the config)");
  };
  println!("rect:     {}", slice.rect());
  println!("chunks:   {}", slice.chunk_rect());
  println!("sections: {}", slice.section_count());
  println!(
    "{kind}: min {}, max {}",
    heightmap.min().unwrap_or_default(),
    heightmap.max().unwrap_or_default()
  );
  Ok(())
}

fn print_heights(slice: &WorldSlice, kind: HeightmapKind) -> Result<()> {
  let rect = slice.rect();
  for z in rect.z..rect.z + rect.dz {
    let row = (rect.x..rect.x + rect.dx)
      .map(|x| slice.height_at(kind, x, z).map(|h| h.to_string()))
      .collect::<Result<Vec<_>, _>>()?;
    println!("{}", row.join(" "));
  }
  Ok(())
}
