//! Command-line entry point.
//!
//! Usage:
//!
//! ```text
//! floorplan <plan.json>      summarize an exported plan file
//! floorplan --saved <id>     summarize a plan from the local plan store
//! floorplan --list           list plans in the local plan store
//! floorplan                  build, save and summarize a sample plan
//! ```
//!
//! `--help` prints the full usage.

use clap::Parser;
use floorplan_core::{
    Camera, Editor, FileStorage, FurnitureType, Modifiers, MouseButton, PointerEvent, RoomTemplate,
    SceneFile, SceneStore, Storage, ToolKind,
};
use kurbo::{Point, Size};
use std::path::PathBuf;
use std::process::ExitCode;

/// Id the sample plan is saved under.
const SAMPLE_PLAN_ID: &str = "sample";

/// Startup configuration.
struct AppConfig {
    viewport: Size,
    /// Padding around the plan when fitting the camera.
    fit_padding: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 800.0),
            fit_padding: 40.0,
        }
    }
}

/// Summarize floor plans, or build a sample plan when no plan is given
#[derive(Parser, Debug)]
#[command(name = "floorplan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Summarize a plan from the local plan store
    #[arg(long, value_name = "ID", conflicts_with_all = ["file", "list"])]
    saved: Option<String>,

    /// List plans in the local plan store
    #[arg(long, conflicts_with = "file")]
    list: bool,

    /// Exported plan file to summarize
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

enum Command {
    Summarize(PathBuf),
    Saved(String),
    List,
    Sample,
}

impl From<Args> for Command {
    fn from(args: Args) -> Self {
        match (args.file, args.saved, args.list) {
            (Some(path), _, _) => Command::Summarize(path),
            (None, Some(id), _) => Command::Saved(id),
            (None, None, true) => Command::List,
            (None, None, false) => Command::Sample,
        }
    }
}

fn open_editor(store: SceneStore, config: &AppConfig) -> Editor {
    let mut camera = Camera::new(config.viewport);
    if let Some(bounds) = store.state().content_bounds() {
        camera.fit_to_bounds(bounds, config.fit_padding);
    }
    Editor::with_store(store, camera)
}

/// Press at the first plan point, move through the rest and release at the last.
fn gesture(editor: &mut Editor, path: &[Point]) {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return;
    };
    let to_screen = |p: &Point| editor.camera().world_to_screen(*p);
    let mut events = vec![PointerEvent::Down {
        position: to_screen(first),
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    }];
    events.extend(path[1..].iter().map(|p| PointerEvent::Move {
        position: to_screen(p),
        modifiers: Modifiers::NONE,
    }));
    events.push(PointerEvent::Up {
        position: to_screen(last),
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    });
    for event in events {
        editor.handle_pointer(event);
    }
}

/// Drive the editor the way a user would: a template, a drawn room, a door and
/// some furniture.
fn build_sample(editor: &mut Editor) {
    editor.place_template(RoomTemplate::LShape);

    editor.set_tool(ToolKind::Room);
    gesture(editor, &[Point::new(-800.0, 0.0), Point::new(-400.0, 320.0)]);

    editor.set_tool(ToolKind::Door);
    gesture(editor, &[Point::new(-600.0, 4.0)]);

    editor.place_furniture(FurnitureType::Sofa3Seater);
    editor.place_furniture(FurnitureType::TableDining);
    log::debug!("sample plan has {} entities", editor.scene().len());
}

fn print_summary(editor: &Editor) {
    let scene = editor.scene();
    let settings = &scene.settings;
    println!(
        "{} rooms, {} zones, {} furniture, {} doors and windows",
        scene.shapes.len(),
        scene.zones.len(),
        scene.furniture.len(),
        scene.wall_items.len(),
    );
    for room in scene.room_summaries() {
        println!(
            "  {:<16} area {:>10}  floor {:>10}  perimeter {:>10}",
            room.label,
            settings.format_area(room.area),
            settings.format_area(room.inner_area),
            settings.format_length(room.perimeter),
        );
    }
}

fn run(command: Command, config: &AppConfig) -> Result<(), String> {
    match command {
        Command::Summarize(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
            let mut store = SceneStore::new();
            store
                .import_state(&json)
                .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
            print_summary(&open_editor(store, config));
        }
        Command::Saved(id) => {
            let storage = FileStorage::default_location().map_err(|e| e.to_string())?;
            let plan = pollster::block_on(storage.load(&id)).map_err(|e| e.to_string())?;
            let mut store = SceneStore::new();
            store.load_file(plan);
            print_summary(&open_editor(store, config));
        }
        Command::List => {
            let storage = FileStorage::default_location().map_err(|e| e.to_string())?;
            let mut ids = pollster::block_on(storage.list()).map_err(|e| e.to_string())?;
            ids.sort();
            for id in ids {
                println!("{id}");
            }
        }
        Command::Sample => {
            let mut editor = open_editor(SceneStore::new(), config);
            build_sample(&mut editor);
            print_summary(&editor);

            let storage = FileStorage::default_location().map_err(|e| e.to_string())?;
            let plan = SceneFile::from_state(editor.scene());
            if let Err(e) = pollster::block_on(storage.save(SAMPLE_PLAN_ID, &plan)) {
                log::warn!("Failed to save sample plan: {e}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::init();
    log::info!("Starting floorplan");

    match run(args.into(), &AppConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
