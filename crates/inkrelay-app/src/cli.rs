//! Command-line interface.

use crate::script::{run_script, ScriptStep};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inkrelay_core::{
    BatchStore, CaptureConfig, FileBatchStore, RecordingSurface, Replayer, StorageError,
    StrokeCapture,
};
use inkrelay_render::{SceneConfig, SceneSurface};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// InkRelay stroke capture and replay tool
#[derive(Parser, Debug)]
#[command(name = "inkrelay")]
#[command(about = "Record scripted strokes into batch logs and replay them")]
#[command(version)]
pub struct Cli {
    /// Capture configuration file (JSON). Defaults apply when absent.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an input script and append every delivered batch to a stream
    Record {
        /// JSON array of script steps
        script: PathBuf,
        /// Directory holding batch streams [default: user data directory]
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long, default_value = "default")]
        stream: String,
    },
    /// Replay a stream onto a fresh surface
    Replay {
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long, default_value = "default")]
        stream: String,
        /// Write the replayed scene as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Print the primitive calls as JSON lines instead
        #[arg(long)]
        commands: bool,
        #[arg(long, default_value_t = 1024.0)]
        width: f64,
        #[arg(long, default_value_t = 768.0)]
        height: f64,
        #[arg(long, default_value = "white")]
        background: String,
    },
    /// List streams in a store
    Streams {
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<CaptureConfig> {
    match path {
        Some(path) => CaptureConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(CaptureConfig::default()),
    }
}

fn open_store(store: Option<PathBuf>) -> Result<FileBatchStore> {
    let store = match store {
        Some(path) => FileBatchStore::new(&path)
            .with_context(|| format!("Failed to open store {}", path.display()))?,
        None => FileBatchStore::default_location().context("Failed to open default store")?,
    };
    log::debug!("Using stream store {}", store.base_path().display());
    Ok(store)
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Record {
            script,
            store,
            stream,
        } => record(config, &script, store, &stream),
        Commands::Replay {
            store,
            stream,
            svg,
            commands,
            width,
            height,
            background,
        } => {
            let scene = SceneConfig {
                width,
                height,
                background,
            };
            replay(config, store, &stream, svg, commands, scene)
        }
        Commands::Streams { store } => {
            let store = open_store(store)?;
            for name in store.list()? {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

fn record(config: CaptureConfig, script: &Path, store: Option<PathBuf>, stream: &str) -> Result<()> {
    let json = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let steps: Vec<ScriptStep> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse script {}", script.display()))?;
    let store = open_store(store)?;

    let delivered = Rc::new(RefCell::new(0usize));
    let failure: Rc<RefCell<Option<StorageError>>> = Rc::new(RefCell::new(None));

    let mut capture = StrokeCapture::new(config).context("Invalid capture config")?;
    {
        let store = store.clone();
        let stream = stream.to_string();
        let delivered = delivered.clone();
        let failure = failure.clone();
        capture.on_batch(move |batch| {
            if failure.borrow().is_some() {
                return;
            }
            match store.append(&stream, batch) {
                Ok(()) => *delivered.borrow_mut() += 1,
                Err(e) => *failure.borrow_mut() = Some(e),
            }
        });
    }

    run_script(&steps, &mut capture);

    if let Some(e) = failure.borrow_mut().take() {
        return Err(e).context("Failed to store batch");
    }
    log::info!(
        "Recorded {} batches from {} steps into stream {}",
        delivered.borrow(),
        steps.len(),
        stream
    );
    Ok(())
}

fn replay(
    config: CaptureConfig,
    store: Option<PathBuf>,
    stream: &str,
    svg: Option<PathBuf>,
    commands: bool,
    scene: SceneConfig,
) -> Result<()> {
    let store = open_store(store)?;
    let batches = store
        .load(stream)
        .with_context(|| format!("Failed to load stream {}", stream))?;
    let mut replayer = Replayer::new(config.appearance);

    if commands {
        let mut surface = RecordingSurface::new();
        replayer.replay_all(&batches, &mut surface);
        for command in surface.commands() {
            println!("{}", serde_json::to_string(command)?);
        }
        return Ok(());
    }

    let out = svg.context("Either --svg <file> or --commands is required")?;
    let mut surface = SceneSurface::new(scene);
    let stats = replayer.replay_all(&batches, &mut surface);
    surface.write_svg(&out)?;
    log::info!(
        "Replayed {} batches ({} segments, {} clears) into {}",
        batches.len(),
        stats.segments,
        stats.clears,
        out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SCRIPT: &str = r#"[
        {"step": "style", "colour": "blue", "width": "4"},
        {"step": "input", "event": {"type": "down", "sample": {"kind": "pointer", "offset_x": 10.0, "offset_y": 10.0}}},
        {"step": "input", "event": {"type": "move", "sample": {"kind": "pointer", "offset_x": 20.0, "offset_y": 10.0}}},
        {"step": "input", "event": {"type": "move", "sample": {"kind": "pointer", "offset_x": 30.0, "offset_y": 15.0}}},
        {"step": "input", "event": {"type": "up"}}
    ]"#;

    fn args(list: &[&str]) -> Cli {
        Cli::try_parse_from(list).unwrap()
    }

    #[test]
    fn test_parse_record() {
        let cli = args(&["inkrelay", "record", "s.json", "--store", "out", "--stream", "room"]);
        match cli.command {
            Commands::Record { script, store, stream } => {
                assert_eq!(script, PathBuf::from("s.json"));
                assert_eq!(store, Some(PathBuf::from("out")));
                assert_eq!(stream, "room");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_store_is_optional() {
        let cli = args(&["inkrelay", "streams"]);
        assert!(matches!(cli.command, Commands::Streams { store: None }));
    }

    #[test]
    fn test_explicit_store_is_used() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("streams");
        let store = open_store(Some(path.clone())).unwrap();
        assert_eq!(store.base_path(), path.as_path());
        assert!(path.is_dir());
    }

    #[test]
    fn test_replay_requires_output() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().to_str().unwrap();
        let cli = args(&["inkrelay", "replay", "--store", store]);
        assert!(run(cli).is_err());
    }

    #[test]
    fn test_record_then_replay_svg() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("script.json");
        std::fs::write(&script, SCRIPT).unwrap();
        let store = dir.path().join("streams");
        let svg = dir.path().join("out.svg");

        run(args(&[
            "inkrelay",
            "record",
            script.to_str().unwrap(),
            "--store",
            store.to_str().unwrap(),
        ]))
        .unwrap();

        let batches = FileBatchStore::new(&store).unwrap().load("default").unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].points().count(), 2);

        run(args(&[
            "inkrelay",
            "replay",
            "--store",
            store.to_str().unwrap(),
            "--svg",
            svg.to_str().unwrap(),
        ]))
        .unwrap();

        let output = std::fs::read_to_string(&svg).unwrap();
        assert!(output.contains(r##"stroke="#0000ff""##));
        assert!(output.contains(r#"stroke-width="4""#));
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let cli = args(&["inkrelay", "--config", "/nonexistent/inkrelay.json", "streams", "--store", "x"]);
        assert!(run(cli).is_err());
    }
}
