// Display UI module
// Shared grayscale canvas, keyed element registry and the lock guarding it

use crate::error::UiError;
use image::{GrayImage, Luma};
use log::error;
use std::sync::{Mutex, MutexGuard};

/// Shared on-device drawing surface
pub type Canvas = GrayImage;

/// Background color of a freshly cleared canvas
pub const WHITE: Luma<u8> = Luma([255]);

/// A drawable element living in the registry
pub trait Widget: Send {
    fn draw(&self, canvas: &mut Canvas);
}

/// Keyed collection of widgets, drawn in insertion order
#[derive(Default)]
pub struct Registry {
    elements: Vec<(String, Box<dyn Widget>)>,
    revision: u64,
    additions: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element` under `key`; the key must be free
    pub fn add_element(&mut self, key: &str, element: Box<dyn Widget>) -> Result<(), UiError> {
        if self.contains(key) {
            return Err(UiError::AlreadyRegistered(key.to_string()));
        }
        self.elements.push((key.to_string(), element));
        self.revision += 1;
        self.additions += 1;
        Ok(())
    }

    /// Remove the element under `key`, failing with `NotFound` when absent
    pub fn remove_element(&mut self, key: &str) -> Result<Box<dyn Widget>, UiError> {
        let index = self
            .elements
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| UiError::NotFound(key.to_string()))?;
        let (_, element) = self.elements.remove(index);
        self.revision += 1;
        Ok(element)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.elements.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of successful adds and removes so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of successful adds so far
    pub fn additions(&self) -> u64 {
        self.additions
    }

    /// Draw every element onto `canvas`
    pub fn draw_all(&self, canvas: &mut Canvas) {
        for (_, element) in &self.elements {
            element.draw(canvas);
        }
    }
}

/// The host's view: a fixed-size canvas and a lock-guarded registry
pub struct View {
    width: u32,
    height: u32,
    registry: Mutex<Registry>,
}

impl View {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            registry: Mutex::new(Registry::new()),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Acquire the registry lock for a multi-step update
    pub fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(|poisoned| {
            error!("Registry lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Run `f` with the registry locked for its entire duration
    pub fn with_registry<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        let mut registry = self.lock();
        f(&mut registry)
    }

    /// Draw the current registry onto a fresh white canvas
    pub fn render(&self) -> Canvas {
        let mut canvas = Canvas::from_pixel(self.width, self.height, WHITE);
        self.with_registry(|registry| registry.draw_all(&mut canvas));
        canvas
    }
}

/// Copy `src` onto `canvas` with its top-left corner at `xy`, clipping at the edges
pub fn paste(canvas: &mut Canvas, src: &GrayImage, xy: (u32, u32)) -> Result<(), UiError> {
    let (width, height) = canvas.dimensions();
    let (x, y) = xy;
    if x >= width || y >= height {
        return Err(UiError::OutOfBounds {
            x,
            y,
            width,
            height,
        });
    }

    image::imageops::replace(canvas, src, i64::from(x), i64::from(y));
    Ok(())
}
