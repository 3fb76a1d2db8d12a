// Widgets module
// Drawable elements the connection plugin places in the registry

use crate::image_loader::IconImage;
use crate::ui::{paste, Canvas, Widget};
use log::{debug, error};
use std::sync::Arc;

/// Connection status icon pasted at a fixed screen position
#[derive(Debug, Clone)]
pub struct InetIcon {
    image: Arc<IconImage>,
    xy: (u32, u32),
}

impl InetIcon {
    /// Wrap an already prepared icon
    pub fn new(image: Arc<IconImage>, xy: (u32, u32)) -> Self {
        Self { image, xy }
    }
}

impl Widget for InetIcon {
    fn draw(&self, canvas: &mut Canvas) {
        if let Err(e) = paste(canvas, &self.image.pixels, self.xy) {
            error!("Error drawing connection icon: {}", e);
            debug!("{:?}", e);
        }
    }
}

/// Empty label slot registered next to the icon; draws nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPlaceholder;

impl Widget for LabelPlaceholder {
    fn draw(&self, _canvas: &mut Canvas) {}
}
