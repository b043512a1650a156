//! rayprobe CLI - sanity checks for trace data roots.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rayprobe::geom::MeshStats;
use rayprobe::rays::ShadowStats;
use rayprobe::{Error, TraceLayout};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted when no trace root is given.
const TRACES_ENV: &str = "RAYPROBE_TRACES";

/// Options shared by every command.
struct Options {
    level: &'static str,
    json: bool,
    layout: TraceLayout,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    // Parse global flags
    let mut opts = Options { level: "info", json: false, layout: TraceLayout::default() };
    let mut filtered_args: Vec<&str> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => opts.level = "debug",
            "-vv" | "--trace" => opts.level = "trace",
            "-q" | "--quiet" => opts.level = "error",
            "-j" | "--json" => opts.json = true,
            "--scene" => match iter.next() {
                Some(dir) => opts.layout = TraceLayout::for_scene(dir.as_str()),
                None => {
                    eprintln!("Error: --scene needs a directory name");
                    return ExitCode::FAILURE;
                }
            },
            _ => filtered_args.push(arg),
        }
    }

    init_logging(opts.level);

    let Some(&command) = filtered_args.first() else {
        print_help();
        return ExitCode::SUCCESS;
    };

    match command {
        "shadows" | "s" => with_root(&filtered_args, |root| cmd_shadows(&root, &opts)),
        "tris" | "t" => with_root(&filtered_args, |root| cmd_tris(&root, &opts)),
        "check" | "c" => with_root(&filtered_args, |root| cmd_check(&root, &opts)),
        "help" | "h" | "-h" | "--help" => {
            print_help();
            ExitCode::SUCCESS
        }
        "version" | "-V" | "--version" => {
            print_version();
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_help();
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the verbosity flags.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve the trace root from the command line or [`TRACES_ENV`].
fn with_root(args: &[&str], run: impl FnOnce(PathBuf) -> bool) -> ExitCode {
    let root = match args.get(1) {
        Some(p) => PathBuf::from(*p),
        None => match env::var_os(TRACES_ENV) {
            Some(p) => {
                debug!("using trace root from {}", TRACES_ENV);
                PathBuf::from(p)
            }
            None => {
                eprintln!("Error: missing trace root argument");
                eprintln!("Usage: rayprobe {} <traces_root>  (or set {})", args[0], TRACES_ENV);
                return ExitCode::FAILURE;
            }
        },
    };
    if run(root) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_shadows(root: &Path, opts: &Options) -> bool {
    match opts.layout.shadow_stats(root) {
        Ok(stats) => {
            report_shadows(&stats, opts.json);
            true
        }
        Err(e) => fail("ray dump", &opts.layout.ray_dump_path(root), &e),
    }
}

fn cmd_tris(root: &Path, opts: &Options) -> bool {
    match opts.layout.load_mesh(root) {
        Ok(mesh) => {
            report_mesh(&mesh.stats(), opts.json);
            true
        }
        Err(e) => fail("mesh", &opts.layout.mesh_path(root), &e),
    }
}

/// Run both pipelines; one failing does not stop the other.
fn cmd_check(root: &Path, opts: &Options) -> bool {
    let shadows = cmd_shadows(root, opts);
    let tris = cmd_tris(root, opts);
    shadows && tris
}

fn fail(what: &str, path: &Path, e: &Error) -> bool {
    error!(kind = ?e.kind(), "failed to load {} {}: {}", what, path.display(), e);
    false
}

fn report_shadows(stats: &ShadowStats, json: bool) {
    if json {
        let v = serde_json::json!({
            "shadow_queries": stats.total,
            "connected": stats.connected,
            "occluded": stats.occluded(),
            "connected_fraction": stats.connected_fraction(),
        });
        println!("{}", serde_json::to_string_pretty(&v).unwrap_or_default());
    } else {
        println!("Shadow queries: {}", stats.total);
        println!("  Connected: {} ({:.1}%)", stats.connected, stats.connected_fraction() * 100.0);
        println!("  Occluded:  {}", stats.occluded());
    }
}

fn report_mesh(stats: &MeshStats, json: bool) {
    if json {
        let bounds = (!stats.bounds.is_empty()).then(|| {
            serde_json::json!({
                "min": stats.bounds.min.to_array(),
                "max": stats.bounds.max.to_array(),
            })
        });
        let v = serde_json::json!({
            "triangles": stats.triangles,
            "vertices": stats.vertices,
            "bounds": bounds,
        });
        println!("{}", serde_json::to_string_pretty(&v).unwrap_or_default());
    } else {
        println!("Triangles: {}", stats.triangles);
        println!("  Vertices: {}", stats.vertices);
        if !stats.bounds.is_empty() {
            println!("  Bounds:   {:?} - {:?}", stats.bounds.min, stats.bounds.max);
        }
    }
}

fn print_help() {
    println!("rayprobe - ray dump and mesh sanity checks");
    println!();
    println!("USAGE:");
    println!("    rayprobe [OPTIONS] <COMMAND> [TRACES_ROOT]");
    println!();
    println!("COMMANDS:");
    println!("    s, shadows <root>    Count shadow rays that reached their light");
    println!("    t, tris    <root>    Load the scene mesh and count triangles");
    println!("    c, check   <root>    Run both checks");
    println!("    h, help              Show this help");
    println!("    version              Show version and build date");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose        Show debug output");
    println!("    -vv, --trace         Show trace output (very verbose)");
    println!("    -q, --quiet          Only show errors");
    println!("    -j, --json           Print reports as JSON");
    println!("    --scene <dir>        Scene directory under the root (default: scientist)");
    println!();
    println!("FILES:");
    println!("    <root>/<scene>/raydump.ray     Ray dump");
    println!("    <root>/<scene>/triangles.obj   Scene mesh");
    println!();
    println!("ENVIRONMENT:");
    println!("    {}              Trace root used when none is given", TRACES_ENV);
    println!("    RUST_LOG                     Log filter, overrides -v/-q");
}

fn print_version() {
    println!("rayprobe {}", env!("RAYPROBE_BUILD"));
}
