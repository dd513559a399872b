//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

use crate::config::{ExtentKind, MapConfig, WorldKind};

#[derive(Parser, Debug)]
#[command(name = "voxmap", about = "Top-down voxel map renderer")]
pub struct Cli {
    /// Map settings file; CLI values override it.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). `RUST_LOG` is used otherwise.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a view to a PNG file.
    Render {
        #[command(flatten)]
        view: ViewArgs,
        /// Output PNG path.
        #[arg(short, long, default_value = "map.png")]
        output: PathBuf,
        /// Use the byte-exact integer zoom path.
        #[arg(long)]
        exact: bool,
    },
    /// Render once, then report the block under an output pixel.
    Pick {
        #[command(flatten)]
        view: ViewArgs,
        /// Output pixel as PX,PY.
        #[arg(long, value_parser = parse_pair::<i32>)]
        at: (i32, i32),
    },
}

#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    /// World column at the image centre, X,Z.
    #[arg(long, value_parser = parse_pair::<f64>, allow_hyphen_values = true)]
    pub center: Option<(f64, f64)>,
    /// Output pixels per block.
    #[arg(long)]
    pub zoom: Option<f64>,
    /// Image size, WxH.
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(usize, usize)>,
    /// Highest world y drawn.
    #[arg(long, allow_hyphen_values = true)]
    pub top_y: Option<i32>,
    /// Comma separated render options, e.g. depth-shading,lighting,grid.
    #[arg(long, value_delimiter = ',')]
    pub options: Option<Vec<String>>,
    #[arg(long, value_enum)]
    pub world: Option<WorldKind>,
    #[arg(long, value_enum)]
    pub extent: Option<ExtentKind>,
    /// Noise generator settings file.
    #[arg(long)]
    pub world_config: Option<PathBuf>,
    /// Chunk file directory for `--world raw`.
    #[arg(long)]
    pub world_dir: Option<PathBuf>,
    /// Block colour overrides.
    #[arg(long)]
    pub palette: Option<PathBuf>,
    /// Selection box corners x0,y0,z0,x1,y1,z1 in world coordinates.
    #[arg(long, value_parser = parse_corners, allow_hyphen_values = true)]
    pub highlight: Option<[i32; 6]>,
}

/// `A,B` with surrounding whitespace allowed.
pub fn parse_pair<T: FromStr>(s: &str) -> Result<(T, T), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma separated values, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<T>()
            .map_err(|_| format!("invalid number '{}'", v.trim()))
    };
    Ok((parse(a)?, parse(b)?))
}

/// `WxH`
pub fn parse_size(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: usize = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let h: usize = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    if w == 0 || h == 0 {
        return Err("image size must be non-zero".into());
    }
    Ok((w, h))
}

pub fn parse_corners(s: &str) -> Result<[i32; 6], String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<i32>().map_err(|_| format!("invalid coordinate '{}'", v.trim())))
        .collect::<Result<Vec<_>, _>>()?;
    <[i32; 6]>::try_from(values).map_err(|v| format!("expected 6 coordinates, got {}", v.len()))
}

impl MapConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &ViewArgs) {
        if let Some((x, z)) = args.center {
            self.view.center = [x, z];
        }
        if let Some(zoom) = args.zoom {
            self.view.zoom = zoom;
        }
        if let Some((w, h)) = args.size {
            self.view.width = w;
            self.view.height = h;
        }
        if let Some(y) = args.top_y {
            self.view.top_y = Some(y);
        }
        if let Some(ref options) = args.options {
            self.render.options = options.clone();
        }
        if let Some(kind) = args.world {
            self.world.kind = kind;
        }
        if let Some(extent) = args.extent {
            self.world.extent = extent;
        }
        if let Some(ref path) = args.world_config {
            self.world.config = Some(path.clone());
        }
        if let Some(ref path) = args.world_dir {
            self.world.dir = Some(path.clone());
        }
        if let Some(ref path) = args.palette {
            self.palette = Some(path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_and_sizes() {
        assert_eq!(parse_pair::<f64>("-12.5, 40"), Ok((-12.5, 40.0)));
        assert!(parse_pair::<i32>("3").is_err());
        assert!(parse_pair::<i32>("3,x").is_err());
        assert_eq!(parse_size("640x480"), Ok((640, 480)));
        assert!(parse_size("0x10").is_err());
        assert_eq!(parse_corners("0,60,0,-15,70,15"), Ok([0, 60, 0, -15, 70, 15]));
        assert!(parse_corners("1,2,3").is_err());
    }

    #[test]
    fn render_command_parses() {
        let cli = Cli::try_parse_from([
            "voxmap",
            "render",
            "--center",
            "-100,250",
            "--zoom",
            "3",
            "--size",
            "256x128",
            "--options",
            "cave-mode,grid",
            "--world",
            "flat",
            "-o",
            "out.png",
            "--exact",
        ])
        .unwrap();
        let Command::Render { view, output, exact } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(view.center, Some((-100.0, 250.0)));
        assert_eq!(view.size, Some((256, 128)));
        assert_eq!(view.options, Some(vec!["cave-mode".to_string(), "grid".to_string()]));
        assert_eq!(view.world, Some(WorldKind::Flat));
        assert_eq!(output, PathBuf::from("out.png"));
        assert!(exact);
    }

    #[test]
    fn pick_requires_position() {
        assert!(Cli::try_parse_from(["voxmap", "pick"]).is_err());
        let cli = Cli::try_parse_from(["voxmap", "--log-level", "debug", "pick", "--at", "10,20"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Pick { at: (10, 20), .. }));
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = MapConfig::default();
        let args = ViewArgs {
            zoom: Some(4.0),
            top_y: Some(70),
            world: Some(WorldKind::Flat),
            ..ViewArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.view.zoom, 4.0);
        assert_eq!(config.view.top_y, Some(70));
        assert_eq!(config.world.kind, WorldKind::Flat);
        // Non-overridden fields retain defaults
        assert_eq!(config.view.width, 512);
        assert_eq!(config.render, MapConfig::default().render);
    }
}
