// BearPixel
// copyright bear_pixel developers 2025

//! Terminal host built on crossterm.
//!
//! Every terminal cell shows two vertically stacked pixels with the upper
//! half block: foreground is the top pixel, background the bottom one.
//! Keyboard events are converted to `Event`s; when the terminal cannot
//! report key releases, presses are delivered as one-frame taps.

use crate::{
    event::{Event, KeyCode},
    render::{
        adapter::{copy_image, fill_rect_rgba, Surface},
        style::Color,
    },
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        Event as CEvent, KeyCode as CKeyCode, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color as CColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use std::{
    io::{self, Write},
    time::Duration,
};

pub struct CrosstermSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    writer: Box<dyn Write>,
    key_release: bool,
}

impl CrosstermSurface {
    /// Switch the terminal to raw mode + alternate screen.
    pub fn new(width: usize, height: usize) -> io::Result<Self> {
        let (tw, th) = terminal::size()?;
        let (need_w, need_h) = (width as u16, height.div_ceil(2) as u16);
        if need_w > tw || need_h > th {
            warn!(
                "terminal {}x{} smaller than required {}x{}",
                tw, th, need_w, need_h
            );
        }
        enable_raw_mode()?;
        let mut writer: Box<dyn Write> = Box::new(io::stdout());
        execute!(writer, EnterAlternateScreen, Hide)?;
        let key_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if key_release {
            execute!(
                writer,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        info!("terminal surface {}x{} key_release={}", width, height, key_release);
        Ok(Self {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
            writer,
            key_release,
        })
    }

    fn px(&self, x: usize, y: usize) -> CColor {
        if y >= self.height {
            return CColor::Reset;
        }
        let i = (y * self.width + x) * 4;
        CColor::Rgb {
            r: self.pixels[i],
            g: self.pixels[i + 1],
            b: self.pixels[i + 2],
        }
    }

    fn present(&mut self) -> io::Result<()> {
        for row in 0..self.height.div_ceil(2) {
            queue!(self.writer, MoveTo(0, row as u16))?;
            for x in 0..self.width {
                let top = self.px(x, row * 2);
                let bottom = self.px(x, row * 2 + 1);
                queue!(
                    self.writer,
                    SetForegroundColor(top),
                    SetBackgroundColor(bottom),
                    Print('▀')
                )?;
            }
        }
        queue!(self.writer, ResetColor)?;
        self.writer.flush()
    }

    /// restore the terminal
    fn reset(&mut self) -> io::Result<()> {
        if self.key_release {
            execute!(self.writer, PopKeyboardEnhancementFlags)?;
        }
        execute!(self.writer, ResetColor, Show, LeaveAlternateScreen)?;
        disable_raw_mode()
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        if let Err(e) = self.reset() {
            warn!("terminal reset failed: {}", e);
        }
    }
}

impl Surface for CrosstermSurface {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        fill_rect_rgba(&mut self.pixels, self.width, self.height, x, y, w, h, color);
    }

    fn get_image_data(&self, out: &mut [u8]) {
        let n = out.len().min(self.pixels.len());
        out[..n].copy_from_slice(&self.pixels[..n]);
    }

    fn put_image_data(&mut self, data: &[u8]) -> io::Result<()> {
        copy_image(data, &mut self.pixels)?;
        self.present()
    }

    fn poll_events(&mut self, events: &mut Vec<Event>) -> bool {
        loop {
            match crossterm::event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return false,
                Err(e) => {
                    warn!("poll terminal events: {}", e);
                    return true;
                }
            }
            let key = match crossterm::event::read() {
                Ok(CEvent::Key(key)) => key,
                Ok(_) => continue,
                Err(e) => {
                    warn!("read terminal event: {}", e);
                    return true;
                }
            };
            if matches!(key.code, CKeyCode::Esc | CKeyCode::Char('q')) {
                return true;
            }
            let Some(kc) = key_from_cross(key.code) else {
                continue;
            };
            let ev = match (self.key_release, key.kind) {
                (false, _) => Event::KeyTap(kc),
                (true, KeyEventKind::Release) => Event::KeyUp(kc),
                (true, _) => Event::KeyDown(kc),
            };
            events.push(ev);
        }
    }
}

fn key_from_cross(code: CKeyCode) -> Option<KeyCode> {
    Some(match code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Backspace => KeyCode::Backspace,
        _ => return None,
    })
}
