/// Terminal front end: the frame loop and canvas glue around the core
/// polygon pipeline.
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use orrery_core::frame::sort_back_to_front;
use orrery_core::{Axis, Body, Projection, Rgb, Viewport};

pub mod renderer;

pub use renderer::CanvasRenderer;

/// Frame rate the loop paces itself to.
const TARGET_FPS: u64 = 60;
/// Polygon edges are stroked black over the fill.
const OUTLINE: Rgb = Rgb::new(0, 0, 0);

/// Main application struct for one animation run.
pub struct OrreryApp {
    body: Body,
    axis: Axis,
    step: f64,
    duration: Duration,
    projection: Projection,
    viewport: Viewport,
    renderer: CanvasRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl OrreryApp {
    /// Build an app around an already-placed body. `step` is degrees of
    /// spin per frame; the run ends after `duration` or on quit.
    pub fn new(body: Body, axis: Axis, step: f64, duration: Duration) -> Self {
        let projection = body.projection();
        let viewport = body.viewport();

        Self {
            renderer: CanvasRenderer::new(viewport.width as usize, viewport.height as usize),
            body,
            axis,
            step,
            duration,
            projection,
            viewport,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / TARGET_FPS);
        let started = Instant::now();

        while self.running && started.elapsed() < self.duration {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('x') => {
                    self.axis = Axis::X;
                }
                KeyCode::Char('y') => {
                    self.axis = Axis::Y;
                }
                KeyCode::Char('z') => {
                    self.axis = Axis::Z;
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    self.step += 1.0;
                }
                KeyCode::Char('-') => {
                    self.step -= 1.0;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let mut polygons = self.body.advance_and_project(self.step, self.axis);
        sort_back_to_front(&mut polygons, &self.viewport);

        self.renderer.clear();
        for polygon in &polygons {
            self.renderer
                .draw_polygon(polygon, self.projection.near, self.projection.far, OUTLINE);
        }

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Orrery | FPS: {:.1} | Step: {:+.1} deg | Axis: {:?} | Controls: X/Y/Z=Axis +/-=Speed Q=Quit",
                self.fps, self.step, self.axis
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
