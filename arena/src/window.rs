//! Keyboard input from a winit window, and a display the environment's RGB
//! frames are drawn into.
//!
//! Key presses are reported under the names the manual-control key map
//! expects (`left`, `up`, `left shift`, `1`, ...). Closing the window is
//! reported as [`InputEvent::CloseRequested`]; the window itself stays open so
//! later slots can keep using it.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use control::{ControlError, EventSource, InputEvent};
use gridworld::{Action, Env, EnvError, Frame, GridEnv, Observation, Step};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, KeyLocation, NamedKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder};

const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Window plus the pixel buffer scaled onto it.
pub struct Display {
    window: Window,
    pixels: RefCell<Pixels>,
    buffer_size: Cell<(u32, u32)>,
}

impl Display {
    fn new(window: Window) -> Result<Self> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, &window);
        let pixels = Pixels::new(size.width, size.height, surface).context("failed to create pixel surface")?;
        Ok(Self {
            window,
            pixels: RefCell::new(pixels),
            buffer_size: Cell::new((size.width, size.height)),
        })
    }

    /// Draws an RGB `frame`; text frames are ignored.
    pub fn present(&self, frame: &Frame) -> Result<(), EnvError> {
        let Frame::Pixels { width, height, data } = frame else {
            return Ok(());
        };
        let width = u32::try_from(*width).map_err(display_error)?;
        let height = u32::try_from(*height).map_err(display_error)?;
        let mut pixels = self.pixels.borrow_mut();
        if self.buffer_size.get() != (width, height) {
            pixels.resize_buffer(width, height).map_err(display_error)?;
            self.buffer_size.set((width, height));
        }
        copy_rgb_to_rgba(data, pixels.frame_mut());
        pixels.render().map_err(display_error)
    }

    fn resize(&self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let mut pixels = self.pixels.borrow_mut();
        if let Err(err) = pixels.resize_surface(width, height) {
            tracing::warn!(%err, "failed to resize pixel surface");
            return;
        }
        if let Err(err) = pixels.render() {
            tracing::warn!(%err, "failed to redraw after resize");
        }
    }
}

fn display_error(err: impl std::fmt::Display) -> EnvError {
    EnvError::Render(io::Error::other(err.to_string()))
}

/// Expands packed RGB into the RGBA layout `pixels` expects.
fn copy_rgb_to_rgba(rgb: &[u8], rgba: &mut [u8]) {
    for (src, dst) in rgb.chunks_exact(3).zip(rgba.chunks_exact_mut(4)) {
        dst[..3].copy_from_slice(src);
        dst[3] = 0xff;
    }
}

/// [`GridEnv`] rendering in `RgbArray` mode whose frames are shown on a [`Display`].
pub struct WindowedEnv {
    inner: GridEnv,
    display: Rc<Display>,
}

impl WindowedEnv {
    #[must_use]
    pub fn new(inner: GridEnv, display: Rc<Display>) -> Self {
        Self { inner, display }
    }
}

impl Env for WindowedEnv {
    type Observation = Observation;

    fn reset(&mut self, seed: Option<u64>) -> Result<Observation, EnvError> {
        self.inner.reset(seed)
    }

    fn step(&mut self, action: Action) -> Result<Step<Observation>, EnvError> {
        self.inner.step(action)
    }

    fn render(&mut self) -> Result<(), EnvError> {
        self.inner.render()?;
        match self.inner.last_frame() {
            Some(frame) => self.display.present(frame),
            None => Ok(()),
        }
    }

    fn close(&mut self) {
        self.inner.close();
    }

    fn step_count(&self) -> u32 {
        self.inner.step_count()
    }

    fn action_count(&self) -> usize {
        self.inner.action_count()
    }
}

pub struct WindowEvents {
    event_loop: EventLoop<()>,
    display: Rc<Display>,
    pending: VecDeque<InputEvent>,
    exited: bool,
}

impl WindowEvents {
    /// Opens a `screen_size` x `screen_size` window titled `title`.
    pub fn new(title: &str, screen_size: u32) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(screen_size, screen_size))
            .build(&event_loop)
            .context("failed to create window")?;
        let display = Rc::new(Display::new(window)?);
        Ok(Self { event_loop, display, pending: VecDeque::new(), exited: false })
    }

    /// Display shared with the environments of every slot.
    #[must_use]
    pub fn display(&self) -> Rc<Display> {
        Rc::clone(&self.display)
    }
}

/// Name of a pressed key, or `None` for keys the session never cares about.
fn key_name(event: &KeyEvent) -> Option<String> {
    let name = match &event.logical_key {
        Key::Named(NamedKey::ArrowLeft) => "left",
        Key::Named(NamedKey::ArrowRight) => "right",
        Key::Named(NamedKey::ArrowUp) => "up",
        Key::Named(NamedKey::ArrowDown) => "down",
        Key::Named(NamedKey::Escape) => "escape",
        Key::Named(NamedKey::Backspace) => "backspace",
        Key::Named(NamedKey::Tab) => "tab",
        Key::Named(NamedKey::Enter) => "enter",
        Key::Named(NamedKey::Space) => "space",
        Key::Named(NamedKey::Shift) if event.location == KeyLocation::Right => "right shift",
        Key::Named(NamedKey::Shift) => "left shift",
        Key::Character(text) => return Some(text.to_lowercase()),
        _ => return None,
    };
    Some(name.to_string())
}

impl EventSource for WindowEvents {
    fn next_event(&mut self) -> Result<Option<InputEvent>, ControlError> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            if self.exited {
                return Ok(None);
            }

            let window_id = self.display.window.id();
            let display = &self.display;
            let pending = &mut self.pending;
            let status = self.event_loop.pump_events(Some(POLL_INTERVAL), |event, _elwt| {
                let Event::WindowEvent { window_id: id, event } = event else {
                    return;
                };
                if id != window_id {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested => pending.push_back(InputEvent::CloseRequested),
                    WindowEvent::Resized(size) => display.resize(size.width, size.height),
                    WindowEvent::KeyboardInput { event, .. }
                        if event.state == ElementState::Pressed && !event.repeat =>
                    {
                        if let Some(name) = key_name(&event) {
                            pending.push_back(InputEvent::KeyDown(name));
                        }
                    }
                    _ => {}
                }
            });

            if let PumpStatus::Exit(code) = status {
                tracing::debug!(code, "window event loop exited");
                self.exited = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_expands_to_opaque_rgba() {
        let rgb = [1, 2, 3, 40, 50, 60];
        let mut rgba = [0u8; 8];
        copy_rgb_to_rgba(&rgb, &mut rgba);
        assert_eq!(rgba, [1, 2, 3, 0xff, 40, 50, 60, 0xff]);
    }
}
