//! Window lifecycle and event polling.
//!
//! [`WindowSystem`] is what the frame loop needs from a platform window: one
//! polling call per frame returning plain [`Event`] values, an open flag, and
//! a way to present the frame drawn into the window's own context.
//! [`SdlWindow`] implements it over SDL2, presenting a [`SoftwareContext`]
//! through a streaming texture.

use sdl2::event::{Event as SdlEvent, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};

use crate::error::{Error, Result};
use crate::graphics::GraphicsContext;
use crate::input::{Key, KeyState};
use crate::render::SoftwareContext;
use crate::state::{configure_static_state, configure_viewport};

pub const WINDOW_WIDTH: u32 = 256;
pub const WINDOW_HEIGHT: u32 = 256;
pub const WINDOW_TITLE: &str = "Colored Triangle";
pub const REFRESH_RATE: u64 = 60;

/// Bits per color channel the streaming texture supports.
const SUPPORTED_COLOR_BITS: u8 = 8;
const SUPPORTED_DEPTH_BITS: [u8; 4] = [0, 16, 24, 32];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Bits per color channel.
    pub color_bits: u8,
    /// Depth buffer bits; zero means no depth buffer.
    pub depth_bits: u8,
    pub title: String,
    /// Refresh periods per presented frame; zero disables pacing.
    pub swap_interval: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            color_bits: SUPPORTED_COLOR_BITS,
            depth_bits: 0,
            title: WINDOW_TITLE.to_string(),
            swap_interval: 1,
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<()> {
        if self.color_bits != SUPPORTED_COLOR_BITS {
            return Err(Error::Initialization(format!(
                "unsupported color depth: {} bits per channel",
                self.color_bits
            )));
        }
        if !SUPPORTED_DEPTH_BITS.contains(&self.depth_bits) {
            return Err(Error::Initialization(format!(
                "unsupported depth buffer: {} bits",
                self.depth_bits
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Resize(u32, u32),
    Key { key: Key, state: KeyState },
    CloseRequested,
}

pub trait WindowSystem {
    type Context: GraphicsContext;

    fn set_swap_interval(&mut self, interval: u32);
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Drains the events that arrived since the last call. Never blocks.
    ///
    /// Fails if the window could not follow an event, such as a resize whose
    /// backing storage could not be recreated.
    fn poll_events(&mut self) -> Result<Vec<Event>>;
    fn is_open(&self) -> bool;
    fn close(&mut self);
    fn size(&self) -> (u32, u32);
    fn context(&self) -> &Self::Context;
    fn context_mut(&mut self) -> &mut Self::Context;
    fn swap_buffers(&mut self) -> Result<()>;
}

/// Applies the one-time window and render state for `config`.
///
/// Sets the swap interval and title, then the static render state and the
/// initial viewport. Nothing here is repeated per frame.
pub fn prepare<W: WindowSystem>(window: &mut W, config: &WindowConfig) -> Result<()> {
    window.set_swap_interval(config.swap_interval);
    window.set_title(&config.title)?;

    let (width, height) = window.size();
    configure_static_state(window.context_mut());
    configure_viewport(window.context_mut(), width, height);
    Ok(())
}

/// Paces presentation to a multiple of the display refresh period.
pub struct FrameLimiter {
    previous_frame_time: u64,
    frame_target_time: u64,
}

impl FrameLimiter {
    pub fn new(now: u64, swap_interval: u32) -> Self {
        Self {
            previous_frame_time: now,
            frame_target_time: Self::target_for(swap_interval),
        }
    }

    fn target_for(swap_interval: u32) -> u64 {
        swap_interval as u64 * 1000 / REFRESH_RATE
    }

    pub fn set_swap_interval(&mut self, swap_interval: u32) {
        self.frame_target_time = Self::target_for(swap_interval);
    }

    /// Milliseconds still to wait at `now` before the next frame may go out.
    pub fn remaining(&self, now: u64) -> u64 {
        let delta_time = now.saturating_sub(self.previous_frame_time);
        self.frame_target_time.saturating_sub(delta_time)
    }

    /// Records `now` as the time the last frame went out.
    pub fn mark(&mut self, now: u64) {
        self.previous_frame_time = now;
    }
}

/// An SDL2 window presenting a [`SoftwareContext`].
///
/// Fields drop in declaration order, which is the teardown order: the
/// rendering context and its texture first, then the window, then SDL.
pub struct SdlWindow {
    context: SoftwareContext,
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    _video_subsystem: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
    limiter: FrameLimiter,
    open: bool,
}

impl SdlWindow {
    /// Starts SDL and opens an untitled window sized per `config`.
    ///
    /// Swap interval and title are applied by [`prepare`].
    pub fn open(config: &WindowConfig) -> Result<Self> {
        config.validate()?;

        let sdl = sdl2::init().map_err(Error::Initialization)?;
        let video_subsystem = sdl.video().map_err(Error::Initialization)?;
        let timer_subsystem = sdl.timer().map_err(Error::Initialization)?;
        let event_pump = sdl.event_pump().map_err(Error::Initialization)?;

        let window = video_subsystem
            .window("", config.width, config.height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| Error::WindowCreation(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| Error::WindowCreation(e.to_string()))?;
        let texture_creator = Box::new(canvas.texture_creator());
        let texture = Self::create_texture(&texture_creator, config.width, config.height)
            .map_err(Error::WindowCreation)?;

        log::info!(
            "opened {}x{} window, {} color bits, {} depth bits",
            config.width,
            config.height,
            config.color_bits,
            config.depth_bits
        );

        let limiter = FrameLimiter::new(timer_subsystem.ticks64(), config.swap_interval);

        Ok(Self {
            context: SoftwareContext::new(config.width, config.height, config.depth_bits),
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            _video_subsystem: video_subsystem,
            _sdl: sdl,
            limiter,
            open: true,
        })
    }

    fn create_texture(
        texture_creator: &TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> std::result::Result<Texture<'static>, String> {
        // SAFETY: texture_creator is heap-allocated and lives as long as SdlWindow.
        // The texture field is declared before texture_creator, so it drops first.
        let texture_creator: &'static TextureCreator<WindowContext> =
            unsafe { &*(texture_creator as *const _) };
        texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.texture = Self::create_texture(&self.texture_creator, width.max(1), height.max(1))
            .map_err(Error::Resize)?;
        self.context.resize(width.max(1), height.max(1));
        Ok(())
    }
}

/// Maps an SDL event to the events the frame loop handles.
///
/// Key repeats are dropped and negative sizes clamp to zero.
fn translate(event: &SdlEvent) -> Option<Event> {
    match *event {
        SdlEvent::Quit { .. } => Some(Event::CloseRequested),
        SdlEvent::KeyDown {
            keycode, repeat, ..
        } if !repeat => Some(Event::Key {
            key: translate_key(keycode),
            state: KeyState::Pressed,
        }),
        SdlEvent::KeyUp { keycode, .. } => Some(Event::Key {
            key: translate_key(keycode),
            state: KeyState::Released,
        }),
        SdlEvent::Window {
            win_event: WindowEvent::Resized(w, h),
            ..
        } => Some(Event::Resize(w.max(0) as u32, h.max(0) as u32)),
        _ => None,
    }
}

fn translate_key(keycode: Option<Keycode>) -> Key {
    match keycode {
        Some(Keycode::Escape) => Key::Escape,
        _ => Key::Other,
    }
}

impl WindowSystem for SdlWindow {
    type Context = SoftwareContext;

    fn set_swap_interval(&mut self, interval: u32) {
        self.limiter.set_swap_interval(interval);
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| Error::WindowCreation(e.to_string()))
    }

    fn poll_events(&mut self) -> Result<Vec<Event>> {
        let events: Vec<Event> = self
            .event_pump
            .poll_iter()
            .filter_map(|event| translate(&event))
            .collect();
        for event in &events {
            if let Event::Resize(width, height) = *event {
                log::debug!("window resized to {width}x{height}");
                self.resize(width, height)?;
            }
        }
        Ok(events)
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        if self.open {
            log::info!("closing window");
            self.open = false;
            self.canvas.window_mut().hide();
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.context.width(), self.context.height())
    }

    fn context(&self) -> &SoftwareContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut SoftwareContext {
        &mut self.context
    }

    fn swap_buffers(&mut self) -> Result<()> {
        let pitch = (self.context.width() * 4) as usize;
        self.texture
            .update(None, self.context.frame_bytes(), pitch)
            .map_err(|e| Error::Present(e.to_string()))?;

        self.canvas.clear();
        let (width, height) = self.size();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, width, height)))
            .map_err(Error::Present)?;
        self.canvas.present();

        let wait = self.limiter.remaining(self.timer_subsystem.ticks64());
        if wait > 0 {
            std::thread::sleep(std::time::Duration::from_millis(wait));
        }
        self.limiter.mark(self.timer_subsystem.ticks64());
        Ok(())
    }
}
