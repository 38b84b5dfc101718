/// Orrery Terminal Demo - Spinning Planet with an Orbiting Moon
///
/// Renders a filled-wireframe planet spinning in place while a smaller
/// moon circles it the other way around.
/// Controls:
///   - X/Y/Z: Switch the spin axis
///   - +/-: Change degrees of spin per frame
///   - Q/ESC: Quit

use std::env;
use std::io;
use std::time::Duration;

use nalgebra::Vector3;
use orrery_core::{obj, transform, Axis, Body, Mesh, Projection, Rgb, Viewport};
use orrery_terminal::OrreryApp;

/// The camera sits at the origin looking down +z; the planet floats 12
/// units out with the moon's track around it.
const PLANET_POSITION: [f64; 3] = [0.0, 0.0, 12.0];
const ORBIT_RADIUS: f64 = 10.0;
const FOV: f64 = std::f64::consts::PI / 3.0;
const NEAR: f64 = 0.1;
const FAR: f64 = 1000.0;
const START_ANGLE: f64 = 0.0;
const PLANET_FILL: Rgb = Rgb::new(33, 70, 94);
const MOON_FILL: Rgb = Rgb::new(204, 204, 204);
/// Moon-to-planet size when one mesh serves for both bodies.
const MOON_SCALE: f64 = 0.27;

struct Options {
    planet_path: Option<String>,
    moon_path: Option<String>,
    axis: Axis,
    speed: f64,
    duration: Duration,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        planet_path: None,
        moon_path: None,
        axis: Axis::Y,
        speed: 5.0,
        duration: Duration::from_secs(30),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--axis" => {
                let value = args.next().ok_or("--axis needs a value")?;
                options.axis = match value.as_str() {
                    "x" => Axis::X,
                    "y" => Axis::Y,
                    "z" => Axis::Z,
                    other => return Err(format!("unknown axis '{other}', expected x, y or z")),
                };
            }
            "--speed" => {
                let value = args.next().ok_or("--speed needs a value")?;
                options.speed = value
                    .parse()
                    .map_err(|_| format!("bad speed '{value}'"))?;
            }
            "--duration" => {
                let value = args.next().ok_or("--duration needs a value")?;
                let seconds: u64 = value
                    .parse()
                    .map_err(|_| format!("bad duration '{value}'"))?;
                options.duration = Duration::from_secs(seconds);
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option '{flag}'"));
            }
            path if options.planet_path.is_none() => {
                options.planet_path = Some(path.to_string());
            }
            path if options.moon_path.is_none() => {
                options.moon_path = Some(path.to_string());
            }
            extra => return Err(format!("unexpected argument '{extra}'")),
        }
    }

    Ok(options)
}

/// Resolve the two meshes: both from files, the moon as a scaled copy of
/// a single file, or built-in spheres when no files are given.
fn load_meshes(options: &Options) -> Result<(Mesh, Mesh), obj::ObjError> {
    match (&options.planet_path, &options.moon_path) {
        (Some(planet), Some(moon)) => Ok((obj::load_obj(planet)?, obj::load_obj(moon)?)),
        (Some(planet), None) => {
            let planet_mesh = obj::load_obj(planet)?;
            let moon_mesh = Mesh::new(
                transform::scale(&planet_mesh.vertices, &Vector3::repeat(MOON_SCALE)),
                planet_mesh.faces.clone(),
            );
            Ok((planet_mesh, moon_mesh))
        }
        _ => Ok((Mesh::uv_sphere(4.0, 24, 16), Mesh::uv_sphere(1.1, 16, 12))),
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!(
                "Usage: orrery [planet.obj [moon.obj]] [--axis x|y|z] [--speed deg-per-frame] [--duration seconds]"
            );
            std::process::exit(2);
        }
    };

    let (planet_mesh, moon_mesh) = load_meshes(&options)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    log::info!(
        "planet: {} vertices / {} faces, moon: {} vertices / {} faces",
        planet_mesh.vertices.len(),
        planet_mesh.faces.len(),
        moon_mesh.vertices.len(),
        moon_mesh.faces.len()
    );

    let (columns, rows) = crossterm::terminal::size()?;
    let viewport = Viewport::new(columns as f64, rows as f64);
    // Terminal cells are roughly twice as tall as they are wide; folding
    // that into the aspect ratio keeps the planet round
    let aspect_ratio = (rows as f64 * 2.0) / columns as f64;
    let projection = Projection::new(FOV, aspect_ratio, NEAR, FAR);

    let body = Body::new(
        planet_mesh,
        Vector3::from(PLANET_POSITION),
        projection,
        viewport,
        START_ANGLE,
        PLANET_FILL,
    )
    .with_satellite(moon_mesh, ORBIT_RADIUS, MOON_FILL);

    println!(
        "Orrery: {} seconds around axis {:?} (press Q to quit early)...",
        options.duration.as_secs(),
        options.axis
    );
    std::thread::sleep(Duration::from_secs(1));

    let mut app = OrreryApp::new(body, options.axis, options.speed, options.duration);
    app.run()?;

    log::info!("animation finished");
    Ok(())
}
