use std::time::Instant;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key as WinitKey, NamedKey};
use winit::window::WindowBuilder;

use choreo_core::{AudioCoupling, InputEvent, Key, SceneDirector, SceneEvent, SceneParams, Sprite};
use glam::Vec2;

mod audio;
mod gpu;

// Browser-like pixels per wheel line.
const WHEEL_LINE_PX: f32 = 100.0;

fn map_key(key: &WinitKey) -> Option<Key> {
    match key {
        WinitKey::Named(NamedKey::Space) => Some(Key::Space),
        WinitKey::Named(NamedKey::ArrowUp) => Some(Key::ArrowUp),
        WinitKey::Named(NamedKey::ArrowDown) => Some(Key::ArrowDown),
        WinitKey::Character(s) => s.chars().next().map(Key::Char),
        _ => None,
    }
}

/// Pointer bookkeeping needed to turn cursor motion into drag distances.
#[derive(Default)]
struct PointerState {
    pos: Vec2,
    down: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let audio = match audio::start_native_audio() {
        Some(a) => AudioCoupling::new(Box::new(a)),
        None => {
            log::warn!("no audio output device; running silent");
            AudioCoupling::silent()
        }
    };
    let mut director = SceneDirector::new(SceneParams::default(), audio)?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("choreo (native)")
        .build(&event_loop)?;
    let size = window.inner_size();
    director.handle_input(InputEvent::Resize {
        width: size.width as f32,
        height: size.height as f32,
    });

    let mut state = pollster::block_on(gpu::GpuState::new(&window))?;
    let mut pointer = PointerState::default();
    let mut sprites: Vec<Sprite> = Vec::new();
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| {
        let input = match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    elwt.exit();
                    None
                }
                WindowEvent::Resized(size) => {
                    state.resize(size);
                    Some(InputEvent::Resize {
                        width: size.width as f32,
                        height: size.height as f32,
                    })
                }
                WindowEvent::MouseInput {
                    state: press,
                    button: MouseButton::Left,
                    ..
                } => {
                    pointer.down = press == ElementState::Pressed;
                    Some(if pointer.down {
                        InputEvent::PointerDown {
                            x: pointer.pos.x,
                            y: pointer.pos.y,
                        }
                    } else {
                        InputEvent::PointerUp
                    })
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let pos = Vec2::new(position.x as f32, position.y as f32);
                    let moved = pos.distance(pointer.pos);
                    pointer.pos = pos;
                    pointer
                        .down
                        .then_some(InputEvent::PointerDrag { distance: moved })
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let delta = match delta {
                        MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
                        MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                    };
                    Some(InputEvent::Scroll { delta })
                }
                WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() => {
                    map_key(&event.logical_key).map(InputEvent::Key)
                }
                _ => None,
            },
            Event::AboutToWait => {
                let now = Instant::now();
                director.tick(now - last_frame);
                last_frame = now;

                sprites.clear();
                director.draw(&mut sprites);
                state.set_ambient_clear(director.last_energy() / choreo_core::BAND_ENERGY_MAX);
                match state.render(&director.camera(), &sprites) {
                    Ok(_) => state.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(e) => log::warn!("surface error: {e:?}"),
                }
                None
            }
            _ => None,
        };

        if let Some(input) = input {
            for ev in director.handle_input(input) {
                match ev {
                    SceneEvent::MoonActivated(i) => log::info!("moon {i} clicked"),
                    SceneEvent::ModeChanged(mode) => log::info!("mode: {mode:?}"),
                    SceneEvent::TargetsRebuilt { points } => log::info!("targets: {points}"),
                }
            }
        }
    })?;
    Ok(())
}
