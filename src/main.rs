//! `orbitview` binary: open one of the demo scenes in a window.

use std::path::PathBuf;

use orbitview::{options::Options, scene::SceneKind, OrbitViewError, Viewer};

const USAGE: &str =
    "usage: orbitview [cube|skybox|panorama] [PATH] [--options FILE]";

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Args {
    kind: SceneKind,
    path: Option<PathBuf>,
    options: Option<PathBuf>,
}

fn parse_args<I>(args: I) -> Result<Args, OrbitViewError>
where
    I: IntoIterator<Item = String>,
{
    let mut kind = None;
    let mut path = None;
    let mut options = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--options" {
            let file = args.next().ok_or_else(|| {
                OrbitViewError::Usage("--options needs a file".to_owned())
            })?;
            options = Some(PathBuf::from(file));
        } else if let Some(file) = arg.strip_prefix("--options=") {
            options = Some(PathBuf::from(file));
        } else if arg == "-h" || arg == "--help" {
            return Err(OrbitViewError::Usage(USAGE.to_owned()));
        } else if arg.starts_with('-') {
            return Err(OrbitViewError::Usage(format!("unknown flag '{arg}'")));
        } else if kind.is_none() {
            kind = Some(arg.parse::<SceneKind>()?);
        } else if path.is_none() {
            path = Some(PathBuf::from(arg));
        } else {
            return Err(OrbitViewError::Usage(format!(
                "unexpected argument '{arg}'"
            )));
        }
    }

    let kind = kind.unwrap_or(SceneKind::Cube);
    if path.is_some() && !kind.takes_assets() {
        return Err(OrbitViewError::Usage(format!(
            "the {kind} scene takes no asset path"
        )));
    }
    Ok(Args {
        kind,
        path,
        options,
    })
}

fn run() -> Result<(), OrbitViewError> {
    let args = parse_args(std::env::args().skip(1))?;
    let options = match &args.options {
        Some(file) => Options::load(file)?,
        None => Options::default(),
    };

    Viewer::builder()
        .with_scene(args.kind.with_assets(args.path))
        .with_options(options)
        .build()
        .run()
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        if matches!(e, OrbitViewError::Usage(_)) {
            log::error!("{USAGE}");
        }
        std::process::exit(1);
    }
}
