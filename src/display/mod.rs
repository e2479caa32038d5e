//! SDL2 window and the lockable surface the renderer draws into

use crate::error::RenderError;
use crate::raster::Canvas;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Texture, TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;
use sdl2::EventPump;

/// Packed as 0xXXRRGGBB, so B, G, R, X in memory on little-endian hosts
const SURFACE_FORMAT: PixelFormatEnum = PixelFormatEnum::RGB888;

pub struct Display {
    canvas: WindowCanvas,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

/// Streaming texture that stands in for the window's pixel surface
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    /// Left mouse button pressed
    RenderRequested,
    ToggleMode,
}

impl Display {
    /// Open a window pinned to the top-left corner of the screen.
    ///
    /// With `vsync` the per-frame present waits for the monitor refresh.
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl = sdl2::init()?;
        let window = sdl
            .video()?
            .window(title, width, height)
            .position(0, 0)
            .build()
            .map_err(|e| e.to_string())?;

        let builder = window.into_canvas().accelerated();
        let builder = if vsync {
            builder.present_vsync()
        } else {
            builder
        };
        let canvas = builder.build().map_err(|e| e.to_string())?;

        let display = Self {
            event_pump: sdl.event_pump()?,
            canvas,
            width,
            height,
        };
        let texture_creator = display.canvas.texture_creator();
        Ok((display, texture_creator))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Push the last rendered surface to the window
    pub fn present(&mut self, target: &RenderTarget) -> Result<(), String> {
        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(Keycode::M),
                    repeat: false,
                    ..
                } => events.push(InputEvent::ToggleMode),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    ..
                } => events.push(InputEvent::RenderRequested),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(SURFACE_FORMAT, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }

    /// Lock the surface and hand it to `draw` as a `Canvas`.
    ///
    /// The lock is released when `draw` returns, on success or error.
    pub fn with_canvas<T, F>(&mut self, draw: F) -> Result<T, RenderError>
    where
        F: FnOnce(&mut Canvas) -> Result<T, RenderError>,
    {
        let (width, height) = (self.width, self.height);
        let bytes_per_pixel = SURFACE_FORMAT.byte_size_per_pixel();

        self.texture
            .with_lock(None, |pixels: &mut [u8], pitch: usize| {
                let mut canvas = Canvas::new(pixels, width, height, pitch, bytes_per_pixel)?;
                draw(&mut canvas)
            })
            .map_err(RenderError::Surface)?
    }

    /// Black out the whole surface
    pub fn clear(&mut self) -> Result<(), RenderError> {
        self.with_canvas(|canvas| {
            canvas.clear();
            Ok(())
        })
    }
}
