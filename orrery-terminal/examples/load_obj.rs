/// Example: Load and animate an OBJ file in the terminal
///
/// Usage: cargo run --example load_obj -- path/to/model.obj

use std::env;
use std::io;
use std::time::Duration;

use nalgebra::Vector3;
use orrery_core::{obj, Axis, Body, Mesh, Projection, Rgb, Viewport};
use orrery_terminal::OrreryApp;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mesh = if args.len() < 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo OBJ file provided, using default cube...");
        Mesh::cube(4.0)
    } else {
        println!("Loading OBJ file: {}", args[1]);
        obj::load_obj(&args[1])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?
    };

    println!(
        "Loaded {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );
    println!("Starting animation (press Q to quit)...");
    std::thread::sleep(Duration::from_secs(1));

    let (columns, rows) = crossterm::terminal::size()?;
    let viewport = Viewport::new(columns as f64, rows as f64);
    let aspect_ratio = (rows as f64 * 2.0) / columns as f64;
    let projection = Projection::new(std::f64::consts::PI / 3.0, aspect_ratio, 0.1, 1000.0);

    let body = Body::new(
        mesh,
        Vector3::new(0.0, 0.0, 12.0),
        projection,
        viewport,
        0.0,
        Rgb::new(33, 70, 94),
    );

    let mut app = OrreryApp::new(body, Axis::Y, 5.0, Duration::from_secs(30));
    app.run()
}
