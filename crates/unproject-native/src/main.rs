use std::time::{Duration, Instant};
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use unproject_core::{
    FrameDriver, FrameOutput, ProjectorConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEPTH_STEP,
    NUDGE_STEP_PX,
};

mod render;

const TITLE: &str = "Perspective Unproject";
const TITLE_REFRESH: Duration = Duration::from_millis(500);
// Pixels of trackpad scroll treated as one wheel line
const PIXELS_PER_LINE: f32 = 40.0;

fn handle_key(driver: &mut FrameDriver, code: KeyCode) {
    let input = driver.input_mut();
    match code {
        KeyCode::ArrowLeft => input.nudge(-NUDGE_STEP_PX, 0.0),
        KeyCode::ArrowRight => input.nudge(NUDGE_STEP_PX, 0.0),
        KeyCode::ArrowUp => input.nudge(0.0, NUDGE_STEP_PX),
        KeyCode::ArrowDown => input.nudge(0.0, -NUDGE_STEP_PX),
        KeyCode::PageUp => input.adjust_depth(DEPTH_STEP),
        KeyCode::PageDown => input.adjust_depth(-DEPTH_STEP),
        KeyCode::Home => input.set_depth(0.0),
        _ => {}
    }
}

fn wheel_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
    }
}

fn status_title(driver: &FrameDriver, out: &FrameOutput) -> String {
    let s = out.screen;
    let w = out.world;
    let stats = driver.stats();
    format!(
        "{TITLE} | screen ({:.0}, {:.0}, {:.2}) -> world ({:.3}, {:.3}, {:.3}) | {:.2} FPS / {:.4} ms",
        s.x,
        s.y,
        s.z,
        w.x,
        w.y,
        w.z,
        stats.fps(),
        stats.frame_time_ms()
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = ProjectorConfig::default();
    let mut driver = FrameDriver::new(config)?;
    log::info!(
        "[main] projector ready: viewport={}x{} fovy={:.1}deg clip=[{}, {}]",
        config.viewport.width,
        config.viewport.height,
        config.projection.fovy_radians.to_degrees(),
        config.projection.clip.near,
        config.projection.clip.far
    );

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(PhysicalSize::new(DEFAULT_WIDTH as u32, DEFAULT_HEIGHT as u32))
        .with_resizable(false)
        .build(&event_loop)?;

    // The window manager may still hand us a different size (HiDPI, tiling).
    let size = window.inner_size();
    if size.width > 0 && size.height > 0 {
        driver.resize(size.width as f32, size.height as f32)?;
    }

    let mut state = pollster::block_on(render::GpuState::new(&window))?;
    let mut last_title = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                match driver.resize(size.width as f32, size.height as f32) {
                    Ok(()) => state.resize(size),
                    Err(err) => log::warn!("[main] ignoring resize: {err}"),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                driver
                    .input_mut()
                    .set_cursor(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                driver
                    .input_mut()
                    .adjust_depth(wheel_lines(delta) * DEPTH_STEP);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                    PhysicalKey::Code(code) => handle_key(&mut driver, code),
                    PhysicalKey::Unidentified(_) => {}
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            let out = driver.tick();
            if last_title.elapsed() >= TITLE_REFRESH {
                state.window.set_title(&status_title(&driver, &out));
                last_title = Instant::now();
            }
            match state.render(driver.projector(), &out) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(err) => log::debug!("[main] skipped frame: {err}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
