#![deny(unsafe_code)]
//! CLI binary for the point field.
//!
//! Subcommands:
//! - `render`: run the field N frames, write a PNG of the last one
//! - `stats`: run the field N frames, report what got drawn
//! - `schema`: print the parameter schema

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use point_field_core::effect::{self, FrameStats};
use point_field_core::{FieldConfig, Recorder, Rgb, Scene};
use point_field_raster::Raster;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "point-field", about = "Drifting point field with proximity lines")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the field for N frames and write a PNG snapshot.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Background color behind the field.
        #[arg(long, default_value = "#000000")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "field.png")]
        output: PathBuf,
    },
    /// Run the field for N frames and report point, sparkle and line counts.
    Stats {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Print the parameter schema.
    Schema,
}

#[derive(Args)]
struct SceneArgs {
    /// Viewport width.
    #[arg(short = 'W', long, default_value_t = 1280)]
    width: u32,

    /// Viewport height.
    #[arg(short = 'H', long, default_value_t = 720)]
    height: u32,

    /// Number of frames to run after the initial draw.
    #[arg(short, long, default_value_t = 120)]
    frames: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Field parameters as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Pointer position as "X,Y".
    #[arg(long)]
    pointer: Option<String>,

    /// Load the whole scene from a JSON file instead (other scene flags are ignored).
    #[arg(long)]
    scene: Option<PathBuf>,
}

impl SceneArgs {
    fn into_scene(self) -> Result<Scene, CliError> {
        if let Some(path) = self.scene {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            let scene: Scene = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid scene file: {e}")))?;
            return Ok(scene);
        }
        let params: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let mut scene = Scene::new(self.width, self.height, self.seed);
        scene.params = params;
        scene.frames = self.frames;
        scene.pointer = self.pointer.as_deref().map(parse_pointer).transpose()?;
        Ok(scene)
    }
}

/// Parses `"X,Y"` into a pointer position.
fn parse_pointer(text: &str) -> Result<[f64; 2], CliError> {
    let invalid = || CliError::Input(format!("invalid --pointer '{text}': expected X,Y"));
    let (x, y) = text.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(invalid());
    }
    Ok([x, y])
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            let schema = FieldConfig::param_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Render {
            scene,
            background,
            output,
        } => {
            let scene = scene.into_scene()?;
            let background =
                Rgb::from_hex(&background).map_err(|e| CliError::Input(e.to_string()))?;
            let mut field = scene.build()?;
            let mut raster = Raster::new(scene.width as usize, scene.height as usize, background)?;

            let stats = effect::run(&mut field, &mut raster, scene.frames)?;
            point_field_raster::snapshot::write_png(&raster, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": scene.width,
                    "height": scene.height,
                    "frames": scene.frames,
                    "seed": scene.seed,
                    "points": field.points().len(),
                    "totals": stats,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} points ({}x{}, {} frames, seed {}) -> {}",
                    field.points().len(),
                    scene.width,
                    scene.height,
                    scene.frames,
                    scene.seed,
                    output.display()
                );
            }
        }
        Command::Stats { scene } => {
            let scene = scene.into_scene()?;
            let mut field = scene.build()?;
            let mut recorder = Recorder::new();

            field.draw_initial(&mut recorder)?;
            let mut totals = FrameStats::default();
            let mut busiest = 0;
            for _ in 0..scene.frames {
                recorder.reset();
                let frame = field.frame(&mut recorder)?;
                busiest = busiest.max(frame.links);
                totals += frame;
            }
            let frames = scene.frames.max(1) as f64;
            let mean_links = totals.links as f64 / frames;
            let mean_pointer_links = totals.pointer_links as f64 / frames;
            log::debug!("ran {} frames over {} points", scene.frames, field.points().len());

            if cli.json {
                let info = serde_json::json!({
                    "points": field.points().len(),
                    "frames": scene.frames,
                    "totals": totals,
                    "mean_links": mean_links,
                    "max_links": busiest,
                    "mean_pointer_links": mean_pointer_links,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("points:             {}", field.points().len());
                println!("frames:             {}", scene.frames);
                println!("sparkles:           {}", totals.sparkles);
                println!("links per frame:    {mean_links:.2} (max {busiest})");
                println!("pointer links/frame: {mean_pointer_links:.2}");
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SceneArgs {
        SceneArgs {
            width: 640,
            height: 480,
            frames: 10,
            seed: 7,
            params: "{}".into(),
            pointer: None,
            scene: None,
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_pointer_accepts_pairs_with_spaces() {
        assert_eq!(parse_pointer("10, 20.5").unwrap(), [10.0, 20.5]);
    }

    #[test]
    fn parse_pointer_rejects_garbage() {
        for bad in ["10", "a,b", "1,2,3", "inf,0"] {
            let err = parse_pointer(bad).err().unwrap_or_else(|| panic!("{bad} parsed"));
            assert_eq!(err.exit_code(), 12);
        }
    }

    #[test]
    fn scene_from_flags() {
        let mut a = args();
        a.pointer = Some("1,2".into());
        a.params = r#"{"link_distance": 70}"#.into();
        let scene = a.into_scene().ok().unwrap();
        assert_eq!((scene.width, scene.height, scene.seed, scene.frames), (640, 480, 7, 10));
        assert_eq!(scene.pointer, Some([1.0, 2.0]));
        assert_eq!(scene.params["link_distance"], 70);
    }

    #[test]
    fn bad_params_json_is_an_input_error() {
        let mut a = args();
        a.params = "{nope".into();
        assert_eq!(a.into_scene().err().unwrap().exit_code(), 12);
    }

    #[test]
    fn huge_density_is_a_field_error() {
        let mut a = args();
        a.params = r#"{"density": 1e300}"#.into();
        let scene = a.into_scene().ok().unwrap();
        let err = CliError::from(scene.build().err().unwrap());
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn missing_scene_file_is_an_io_error() {
        let mut a = args();
        a.scene = Some(PathBuf::from("/definitely/not/here.json"));
        assert_eq!(a.into_scene().err().unwrap().exit_code(), 11);
    }

    #[test]
    fn parses_render_subcommand() {
        let cli = Cli::try_parse_from([
            "point-field", "render", "-W", "300", "-H", "200", "--pointer", "5,5", "-o", "x.png",
        ])
        .ok()
        .unwrap();
        match cli.command {
            Command::Render { scene, output, .. } => {
                assert_eq!((scene.width, scene.height), (300, 200));
                assert_eq!(output, PathBuf::from("x.png"));
            }
            _ => panic!("expected render"),
        }
    }
}
